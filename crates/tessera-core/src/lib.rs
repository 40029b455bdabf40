//! Block document engine for Tessera.
//!
//! A document is a flat, ordered list of typed blocks. Block payloads are
//! opaque to the engine and owned by per-type plugins; the engine owns
//! identity, position, indentation, alignment and column layout.
//!
//! # Design Philosophy
//!
//! Every change goes through one gateway, the transform applier. Commands
//! build [`Operation`]s that carry both the new and the previous value of
//! whatever they touch, so any batch can be inverted for undo or replayed
//! elsewhere. Observers see exactly one notification per outermost batch,
//! after paths have settled.
//!
//! # Key Types
//!
//! | Type               | Purpose                                          |
//! |--------------------|--------------------------------------------------|
//! | [`Editor`]         | Context object: document, paths, plugins, history |
//! | [`Document`]       | `BlockId → Block` map with a dense order index   |
//! | [`Operation`]      | Invertible, serializable unit of change          |
//! | [`Paths`]          | Focused and selected orders                      |
//! | [`BlockPlugin`]    | Per-type lifecycle hooks                         |
//! | [`History`]        | Undo/redo stacks of applied batches              |
//! | [`EditorConfig`]   | RON-loadable settings                            |
//!
//! # Example
//!
//! ```
//! use tessera_core::{Editor, InsertBlockOptions};
//!
//! let mut editor = Editor::new();
//! let a = editor.insert_block("paragraph", InsertBlockOptions::default()).unwrap();
//! let b = editor.insert_block("paragraph", InsertBlockOptions::default()).unwrap();
//! let group = editor.create_column_group(&[a, b], None).unwrap();
//!
//! assert_eq!(editor.get_column_group_blocks(&group).len(), 2);
//! assert!(editor.undo());
//! assert!(editor.get_column_group_blocks(&group).is_empty());
//! ```

mod columns;
mod commands;
mod config;
mod document;
mod editor;
mod error;
mod history;
mod observers;
mod ops;
mod paths;
mod plugins;
mod query;
mod transforms;

pub use tessera_types::{Align, Block, BlockId, BlockMeta, BlockType, ColumnGroupId};

pub use commands::{
    BlockTarget, DeleteBlockOptions, DuplicateBlockOptions, FocusTarget, InsertBlockOptions,
};
pub use config::{ColumnConfig, EditorConfig, HistoryConfig};
pub use document::Document;
pub use editor::Editor;
pub use error::{ConfigError, DocumentError, EditorError};
pub use history::{History, HistoryEntry};
pub use observers::{Change, SubscriptionId};
pub use ops::{ColumnFields, MetaPatch, Operation};
pub use paths::{PathSource, Paths};
pub use plugins::{BlockPlugin, PluginRegistry};
pub use transforms::ApplyOptions;

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
