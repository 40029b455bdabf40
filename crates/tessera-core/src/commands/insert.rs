//! `insert_block`.

use crate::{Align, ApplyOptions, Block, BlockId, BlockType, Editor, Operation, PathSource, Paths};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InsertBlockOptions {
    /// Target order. Defaults to right after the focused block, or the end
    /// of the document when nothing is focused. Clamped to the end.
    pub at: Option<usize>,
    /// Initial payload. Falls back to the plugin's `on_before_create`, then
    /// to an empty fragment.
    pub value: Option<serde_json::Value>,
    pub depth: usize,
    pub align: Align,
    /// Focus the new block.
    pub focus: bool,
}

impl InsertBlockOptions {
    pub fn at(order: usize) -> Self {
        Self {
            at: Some(order),
            ..Default::default()
        }
    }
}

impl Editor {
    /// Insert a new block and return its id.
    pub fn insert_block(
        &mut self,
        block_type: impl Into<BlockType>,
        options: InsertBlockOptions,
    ) -> Option<BlockId> {
        let block_type = block_type.into();
        let len = self.document.len();
        let order = options
            .at
            .or_else(|| self.paths.current.map(|current| current + 1))
            .unwrap_or(len)
            .min(len);

        let value = options
            .value
            .or_else(|| self.plugins.on_before_create(&block_type))
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));

        let mut block = Block::new(block_type, value, order);
        block.meta.depth = options.depth;
        block.meta.align = options.align;
        let id = block.id;

        let inserted = self.batch_operations(|editor| {
            let op = Operation::InsertBlock { block };
            if !editor.apply_or_warn(vec![op], ApplyOptions::default(), "insert_block") {
                return false;
            }
            if options.focus {
                editor.paths = Paths::at(order, PathSource::Programmatic);
            }
            true
        });

        inserted.then(|| {
            tracing::debug!(block = %id, order, "inserted block");
            id
        })
    }
}
