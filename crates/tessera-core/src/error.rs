//! Error types for the engine.
//!
//! Stale references from UI code (unknown block ids, empty groups) are not
//! errors: commands log a warning and no-op. The types here cover misuse that
//! should surface during development: malformed operation batches, duplicate
//! plugin registrations, corrupt persisted documents, bad config.

use thiserror::Error;

use crate::{BlockId, BlockType};

/// Errors returned by the transform applier and the editor context.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Block not found in document.
    #[error("block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Inserting a block whose id is already present.
    #[error("block already exists: {0:?}")]
    DuplicateBlock(BlockId),

    /// Order outside the dense `0..len` range the document allows.
    #[error("order {order} out of range for document with {len} blocks")]
    InvalidOrder { order: usize, len: usize },

    /// An operation's recorded previous state does not match the live block.
    #[error("stale operation on block {id:?}: {reason}")]
    StaleOperation { id: BlockId, reason: String },

    /// Two plugins registered for the same block type.
    #[error("plugin already registered for block type '{0}'")]
    DuplicatePlugin(BlockType),
}

/// Errors from restoring a persisted document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// Map key disagrees with the block's own id.
    #[error("map key {key:?} does not match block id {id:?}")]
    KeyMismatch { key: BlockId, id: BlockId },

    /// Same block id supplied twice.
    #[error("duplicate block id: {0:?}")]
    DuplicateBlock(BlockId),

    /// Two blocks share an order.
    #[error("duplicate order {0}")]
    DuplicateOrder(usize),

    /// Orders are not the dense sequence `0..len`.
    #[error("order gap: expected {expected}, found {found}")]
    OrderGap { expected: usize, found: usize },
}

/// Errors from loading [`EditorConfig`](crate::EditorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON syntax error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
