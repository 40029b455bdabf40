//! Block lifecycle commands.
//!
//! Commands are the verbs UI and plugin code call. Each one resolves its
//! target, builds operations, and hands them to the applier inside a single
//! batch. A command that references a block that no longer exists logs a
//! warning and returns without touching the document; stale references are
//! routine when UI events arrive out of order.

mod delete;
mod duplicate;
mod insert;
mod move_block;
mod update;

pub use delete::{DeleteBlockOptions, FocusTarget};
pub use duplicate::DuplicateBlockOptions;
pub use insert::InsertBlockOptions;

use crate::{ApplyOptions, BlockId, Editor, MetaPatch, Operation};

/// How a command addresses a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockTarget {
    Id(BlockId),
    /// Whatever block currently occupies this order.
    At(usize),
}

impl From<BlockId> for BlockTarget {
    fn from(id: BlockId) -> Self {
        BlockTarget::Id(id)
    }
}

impl From<&BlockId> for BlockTarget {
    fn from(id: &BlockId) -> Self {
        BlockTarget::Id(*id)
    }
}

impl Editor {
    /// Resolve a target to a live block id.
    pub(crate) fn resolve(&self, target: BlockTarget) -> Option<BlockId> {
        match target {
            BlockTarget::Id(id) => self.document.contains(&id).then_some(id),
            BlockTarget::At(order) => self.document.id_at(order),
        }
    }

    /// Build and apply a `SetBlockMeta` op against the live block.
    ///
    /// Returns false (after a warning) if the block is gone.
    pub(crate) fn patch_meta(&mut self, id: &BlockId, properties: MetaPatch, command: &str) -> bool {
        let Some(block) = self.document.get(id) else {
            tracing::warn!(block = %id, "{command}: block not found");
            return false;
        };
        let prev_properties = properties.capture(&block.meta);
        if prev_properties == properties {
            return true;
        }
        let op = Operation::SetBlockMeta {
            id: *id,
            properties,
            prev_properties,
        };
        self.apply_or_warn(vec![op], ApplyOptions::default(), command)
    }

    /// Apply operations built by a command. Failures here mean the command
    /// computed an inconsistent batch; they are logged, never propagated.
    pub(crate) fn apply_or_warn(
        &mut self,
        operations: Vec<Operation>,
        options: ApplyOptions,
        command: &str,
    ) -> bool {
        match self.apply_transforms(operations, options) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "{command}: transforms rejected");
                false
            }
        }
    }
}
