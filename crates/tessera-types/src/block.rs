//! Block record, metadata, and type tags.
//!
//! ## Design: payload vs. metadata
//!
//! A block's `value` is an opaque rich-text fragment owned by whichever plugin
//! the `block_type` tag names. The engine never looks inside it. Everything
//! the engine reasons about (position, indent, alignment, column layout)
//! lives in [`BlockMeta`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use strum::EnumString;

use crate::ids::{BlockId, ColumnGroupId};

/// Tag identifying which plugin owns and interprets a block's payload.
///
/// Free-form (`"paragraph"`, `"heading-one"`, `"image"`, ...). Short tags are
/// stored inline.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockType(SmartString);

impl BlockType {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(SmartString::from(tag.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for BlockType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for BlockType {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text alignment hint. Opaque to the engine; carried for renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }
}

impl std::fmt::Display for Align {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-block metadata the engine reasons about.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    /// Position in the visual sequence. Unique across the document.
    pub order: usize,
    /// Nesting/indent level, independent of `order`.
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub align: Align,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_group: Option<ColumnGroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<usize>,
    /// Percentage width, shared by every block at the same `column_index`
    /// within the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<u32>,
}

impl BlockMeta {
    /// Metadata for an ungrouped block at `order`.
    pub fn at(order: usize) -> Self {
        Self {
            order,
            ..Default::default()
        }
    }

    /// Check if any column field is set.
    pub fn has_column(&self) -> bool {
        self.column_group.is_some() || self.column_index.is_some() || self.column_width.is_some()
    }
}

/// The unit of document content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Opaque rich-text fragment owned by the plugin.
    #[serde(default)]
    pub value: serde_json::Value,
    pub meta: BlockMeta,
}

impl Block {
    /// Create a block with a fresh ID.
    pub fn new(block_type: impl Into<BlockType>, value: serde_json::Value, order: usize) -> Self {
        Self::with_id(BlockId::new(), block_type, value, order)
    }

    /// Create a block with a caller-supplied ID (restore, duplication, tests).
    pub fn with_id(
        id: BlockId,
        block_type: impl Into<BlockType>,
        value: serde_json::Value,
        order: usize,
    ) -> Self {
        Self {
            id,
            block_type: block_type.into(),
            value,
            meta: BlockMeta::at(order),
        }
    }

    pub fn order(&self) -> usize {
        self.meta.order
    }

    /// Group this block belongs to, if any.
    pub fn column_group(&self) -> Option<ColumnGroupId> {
        self.meta.column_group
    }
}

// ============================================================================
// Tests
// ============================================================================
