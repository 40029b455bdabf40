//! `delete_block`.

use super::BlockTarget;
use crate::{ApplyOptions, Block, Editor, Operation, PathSource, Paths};

/// Which neighbor receives focus after a deletion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    /// The block right before the deleted one.
    #[default]
    Previous,
    /// The block right after; it slides into the deleted block's order.
    Next,
    /// Leave focus alone.
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteBlockOptions {
    /// Move focus to a neighbor.
    pub focus: bool,
    pub focus_target: FocusTarget,
}

impl DeleteBlockOptions {
    pub fn focus(focus_target: FocusTarget) -> Self {
        Self {
            focus: true,
            focus_target,
        }
    }
}

impl Editor {
    /// Delete a block by id or order. Returns the removed block.
    ///
    /// The owning plugin's `on_destroy` hook runs first, while the block is
    /// still in the document. If the block sat in a column group, the group
    /// is re-evaluated afterwards and dissolved when degenerate. Everything
    /// is one batch.
    pub fn delete_block(
        &mut self,
        target: impl Into<BlockTarget>,
        options: DeleteBlockOptions,
    ) -> Option<Block> {
        let target = target.into();
        let Some(id) = self.resolve(target) else {
            tracing::warn!(?target, "delete_block: block not found");
            return None;
        };
        let block = self.document.get(&id)?.clone();
        let order = block.meta.order;

        // Neighbor must be picked before the delete renumbers things.
        let focus_on = if options.focus {
            match options.focus_target {
                FocusTarget::Previous => self.document.get_previous_block_order(order),
                FocusTarget::Next => self.document.get_next_block_order(order),
                FocusTarget::None => None,
            }
            .and_then(|neighbor| self.document.id_at(neighbor))
        } else {
            None
        };

        self.plugins.on_destroy(&self.document, &block);

        let group = block.column_group();
        let applied = self.batch_operations(|editor| {
            let op = Operation::DeleteBlock {
                block: block.clone(),
            };
            if !editor.apply_or_warn(vec![op], ApplyOptions::trusted(), "delete_block") {
                return false;
            }
            if let Some(group) = group {
                editor.normalize_column_group(&group);
            }
            if let Some(neighbor) = focus_on
                && let Some(new_order) = editor.document.order_of(&neighbor)
            {
                editor.paths = Paths::at(new_order, PathSource::Programmatic);
            }
            true
        });

        if applied {
            tracing::debug!(block = %id, order, "deleted block");
            Some(block)
        } else {
            None
        }
    }
}
