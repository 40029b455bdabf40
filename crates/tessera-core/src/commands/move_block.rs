//! `move_block`.

use super::BlockTarget;
use crate::{ApplyOptions, Editor, Operation};

impl Editor {
    /// Move a block to order `to` (clamped to the last position).
    ///
    /// Blocks between the old and new position shift by one so orders stay
    /// dense. Focus follows the moved block if it was focused.
    pub fn move_block(&mut self, target: impl Into<BlockTarget>, to: usize) -> bool {
        let target = target.into();
        let Some(id) = self.resolve(target) else {
            tracing::warn!(?target, "move_block: block not found");
            return false;
        };
        let Some(from) = self.document.order_of(&id) else {
            return false;
        };
        let to = to.min(self.document.len() - 1);
        if from == to {
            return true;
        }

        self.batch_operations(|editor| {
            let op = Operation::MoveBlock {
                id,
                prev_order: from,
                new_order: to,
            };
            if !editor.apply_or_warn(vec![op], ApplyOptions::default(), "move_block") {
                return false;
            }
            if editor.paths.current == Some(from) {
                editor.paths.current = Some(to);
            }
            tracing::debug!(block = %id, from, to, "moved block");
            true
        })
    }
}
