//! In-place block updates: payload, type, indent, alignment.

use super::BlockTarget;
use crate::{Align, ApplyOptions, BlockType, Editor, MetaPatch, Operation};

impl Editor {
    /// Replace a block's payload.
    pub fn update_block_value(
        &mut self,
        target: impl Into<BlockTarget>,
        value: serde_json::Value,
    ) -> bool {
        let target = target.into();
        let Some(block) = self.resolve(target).and_then(|id| self.document.get(&id)) else {
            tracing::warn!(?target, "update_block_value: block not found");
            return false;
        };
        if block.value == value {
            return true;
        }
        let op = Operation::SetBlockValue {
            id: block.id,
            value,
            prev_value: block.value.clone(),
        };
        self.apply_or_warn(vec![op], ApplyOptions::default(), "update_block_value")
    }

    /// Hand a block to a different plugin. The payload is kept as-is.
    pub fn toggle_block_type(
        &mut self,
        target: impl Into<BlockTarget>,
        block_type: impl Into<BlockType>,
    ) -> bool {
        let target = target.into();
        let block_type = block_type.into();
        let Some(block) = self.resolve(target).and_then(|id| self.document.get(&id)) else {
            tracing::warn!(?target, "toggle_block_type: block not found");
            return false;
        };
        if block.block_type == block_type {
            return true;
        }
        let op = Operation::SetBlockType {
            id: block.id,
            block_type,
            prev_type: block.block_type.clone(),
        };
        self.apply_or_warn(vec![op], ApplyOptions::default(), "toggle_block_type")
    }

    pub fn increase_block_depth(&mut self, target: impl Into<BlockTarget>) -> bool {
        self.shift_depth(target.into(), 1, "increase_block_depth")
    }

    /// Saturates at zero.
    pub fn decrease_block_depth(&mut self, target: impl Into<BlockTarget>) -> bool {
        self.shift_depth(target.into(), -1, "decrease_block_depth")
    }

    pub fn set_block_align(&mut self, target: impl Into<BlockTarget>, align: Align) -> bool {
        let target = target.into();
        let Some(id) = self.resolve(target) else {
            tracing::warn!(?target, "set_block_align: block not found");
            return false;
        };
        self.patch_meta(&id, MetaPatch::align(align), "set_block_align")
    }

    fn shift_depth(&mut self, target: BlockTarget, delta: isize, command: &str) -> bool {
        let Some(block) = self.resolve(target).and_then(|id| self.document.get(&id)) else {
            tracing::warn!(?target, "{command}: block not found");
            return false;
        };
        let id = block.id;
        let depth = block.meta.depth.saturating_add_signed(delta);
        self.patch_meta(&id, MetaPatch::depth(depth), command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockId, InsertBlockOptions};
    use serde_json::json;

    fn one_block() -> (Editor, BlockId) {
        let mut editor = Editor::new();
        let id = editor
            .insert_block("paragraph", InsertBlockOptions::default())
            .unwrap();
        (editor, id)
    }

    #[test]
    fn test_update_value_is_undoable() {
        let (mut editor, id) = one_block();
        assert!(editor.update_block_value(id, json!([{ "text": "hello" }])));
        assert_eq!(editor.document().get(&id).unwrap().value[0]["text"], "hello");

        assert!(editor.undo());
        assert_eq!(editor.document().get(&id).unwrap().value, json!([]));
    }

    #[test]
    fn test_toggle_type_keeps_value() {
        let (mut editor, id) = one_block();
        editor.update_block_value(id, json!("x"));
        assert!(editor.toggle_block_type(id, "heading-one"));
        let block = editor.document().get(&id).unwrap();
        assert_eq!(block.block_type.as_str(), "heading-one");
        assert_eq!(block.value, json!("x"));
    }

    #[test]
    fn test_depth_saturates_at_zero() {
        let (mut editor, id) = one_block();
        assert!(editor.increase_block_depth(id));
        assert!(editor.increase_block_depth(id));
        assert_eq!(editor.document().get(&id).unwrap().meta.depth, 2);

        for _ in 0..3 {
            assert!(editor.decrease_block_depth(id));
        }
        assert_eq!(editor.document().get(&id).unwrap().meta.depth, 0);
        // Insert, two increases and two effective decreases. The third
        // decrease changed nothing and is not recorded.
        assert_eq!(editor.history().undo_depth(), 5);
    }

    #[test]
    fn test_align() {
        let (mut editor, id) = one_block();
        assert!(editor.set_block_align(id, Align::Justify));
        assert_eq!(editor.document().get(&id).unwrap().meta.align, Align::Justify);
        assert!(!editor.set_block_align(BlockId::new(), Align::Left));
    }
}
