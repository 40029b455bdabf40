//! Document operations.
//!
//! All mutations to a [`Document`](crate::Document) are expressed as
//! operations. Operations are:
//! - Immutable once built
//! - Invertible from their own payload (every variant carries the previous
//!   state it overwrites)
//! - Serializable, so callers can persist or ship undo tooling

use serde::{Deserialize, Serialize};

use crate::{Align, Block, BlockId, BlockMeta, BlockType, ColumnGroupId};

/// One atomic change to the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Insert a block at `block.meta.order`; later blocks shift down.
    InsertBlock { block: Block },

    /// Delete a block. Carries the full prior block so the delete can be
    /// inverted into an insert at the same order.
    DeleteBlock { block: Block },

    /// Move a block; blocks between the two orders are renumbered.
    MoveBlock {
        id: BlockId,
        prev_order: usize,
        new_order: usize,
    },

    /// Patch metadata other than `order`.
    SetBlockMeta {
        id: BlockId,
        properties: MetaPatch,
        prev_properties: MetaPatch,
    },

    /// Replace the opaque payload.
    SetBlockValue {
        id: BlockId,
        value: serde_json::Value,
        prev_value: serde_json::Value,
    },

    /// Retag the block with a different plugin type.
    SetBlockType {
        id: BlockId,
        block_type: BlockType,
        prev_type: BlockType,
    },
}

impl Operation {
    /// The operation that undoes this one.
    pub fn inverse(&self) -> Operation {
        match self {
            Operation::InsertBlock { block } => Operation::DeleteBlock {
                block: block.clone(),
            },
            Operation::DeleteBlock { block } => Operation::InsertBlock {
                block: block.clone(),
            },
            Operation::MoveBlock {
                id,
                prev_order,
                new_order,
            } => Operation::MoveBlock {
                id: *id,
                prev_order: *new_order,
                new_order: *prev_order,
            },
            Operation::SetBlockMeta {
                id,
                properties,
                prev_properties,
            } => Operation::SetBlockMeta {
                id: *id,
                properties: prev_properties.clone(),
                prev_properties: properties.clone(),
            },
            Operation::SetBlockValue {
                id,
                value,
                prev_value,
            } => Operation::SetBlockValue {
                id: *id,
                value: prev_value.clone(),
                prev_value: value.clone(),
            },
            Operation::SetBlockType {
                id,
                block_type,
                prev_type,
            } => Operation::SetBlockType {
                id: *id,
                block_type: prev_type.clone(),
                prev_type: block_type.clone(),
            },
        }
    }

    /// Get the block ID this operation targets.
    pub fn target_block(&self) -> BlockId {
        match self {
            Operation::InsertBlock { block } | Operation::DeleteBlock { block } => block.id,
            Operation::MoveBlock { id, .. }
            | Operation::SetBlockMeta { id, .. }
            | Operation::SetBlockValue { id, .. }
            | Operation::SetBlockType { id, .. } => *id,
        }
    }

    /// Check if this is a structural operation (affects block ordering).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Operation::InsertBlock { .. }
                | Operation::DeleteBlock { .. }
                | Operation::MoveBlock { .. }
        )
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::InsertBlock { .. } => "insert_block",
            Operation::DeleteBlock { .. } => "delete_block",
            Operation::MoveBlock { .. } => "move_block",
            Operation::SetBlockMeta { .. } => "set_block_meta",
            Operation::SetBlockValue { .. } => "set_block_value",
            Operation::SetBlockType { .. } => "set_block_type",
        }
    }
}

/// The three column fields, written together.
///
/// All-`None` means "not in a column group".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFields {
    pub group: Option<ColumnGroupId>,
    pub index: Option<usize>,
    pub width: Option<u32>,
}

impl ColumnFields {
    pub fn new(group: ColumnGroupId, index: usize, width: u32) -> Self {
        Self {
            group: Some(group),
            index: Some(index),
            width: Some(width),
        }
    }

    /// Fields that remove a block from any group.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn of(meta: &BlockMeta) -> Self {
        Self {
            group: meta.column_group,
            index: meta.column_index,
            width: meta.column_width,
        }
    }

    fn write_to(&self, meta: &mut BlockMeta) {
        meta.column_group = self.group;
        meta.column_index = self.index;
        meta.column_width = self.width;
    }
}

/// Partial update to [`BlockMeta`]. `None` fields are left untouched.
///
/// `order` is deliberately absent: position changes go through
/// [`Operation::MoveBlock`] so the dense ordering is renumbered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnFields>,
}

impl MetaPatch {
    pub fn depth(depth: usize) -> Self {
        Self {
            depth: Some(depth),
            ..Default::default()
        }
    }

    pub fn align(align: Align) -> Self {
        Self {
            align: Some(align),
            ..Default::default()
        }
    }

    pub fn column(column: ColumnFields) -> Self {
        Self {
            column: Some(column),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_none() && self.align.is_none() && self.column.is_none()
    }

    /// Current values of `meta` for exactly the fields this patch touches.
    pub fn capture(&self, meta: &BlockMeta) -> MetaPatch {
        MetaPatch {
            depth: self.depth.map(|_| meta.depth),
            align: self.align.map(|_| meta.align),
            column: self.column.map(|_| ColumnFields::of(meta)),
        }
    }

    /// Check whether `meta` already holds every value in this patch.
    pub fn matches(&self, meta: &BlockMeta) -> bool {
        self.capture(meta) == *self
    }

    pub fn apply_to(&self, meta: &mut BlockMeta) {
        if let Some(depth) = self.depth {
            meta.depth = depth;
        }
        if let Some(align) = self.align {
            meta.align = align;
        }
        if let Some(column) = &self.column {
            column.write_to(meta);
        }
    }
}
