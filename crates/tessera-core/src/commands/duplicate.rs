//! `duplicate_block`.

use super::BlockTarget;
use crate::{ApplyOptions, Block, BlockId, Editor, Operation, PathSource, Paths};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DuplicateBlockOptions {
    /// Where to put the copy. Defaults to right after the original, in which
    /// case the copy also joins the original's column.
    pub at: Option<usize>,
    pub focus: bool,
}

impl Editor {
    /// Copy a block under a fresh id. Returns the new id.
    pub fn duplicate_block(
        &mut self,
        target: impl Into<BlockTarget>,
        options: DuplicateBlockOptions,
    ) -> Option<BlockId> {
        let target = target.into();
        let Some(source) = self.resolve(target).and_then(|id| self.document.get(&id)) else {
            tracing::warn!(?target, "duplicate_block: block not found");
            return None;
        };

        let len = self.document.len();
        let order = options
            .at
            .unwrap_or(source.meta.order + 1)
            .min(len);

        let mut copy = Block::new(source.block_type.clone(), source.value.clone(), order);
        copy.meta.depth = source.meta.depth;
        copy.meta.align = source.meta.align;
        if options.at.is_none() {
            copy.meta.column_group = source.meta.column_group;
            copy.meta.column_index = source.meta.column_index;
            copy.meta.column_width = source.meta.column_width;
        }
        let source_id = source.id;
        let id = copy.id;

        let duplicated = self.batch_operations(|editor| {
            let op = Operation::InsertBlock { block: copy };
            if !editor.apply_or_warn(vec![op], ApplyOptions::default(), "duplicate_block") {
                return false;
            }
            if options.focus {
                editor.paths = Paths::at(order, PathSource::Programmatic);
            }
            true
        });

        duplicated.then(|| {
            tracing::debug!(source = %source_id, block = %id, order, "duplicated block");
            id
        })
    }
}
