//! The transform applier: the single gateway through which the document
//! changes.
//!
//! # Batching
//!
//! `apply_transforms` opens an implicit batch around its own operations.
//! `batch_operations` lets a caller group several applier calls; nesting
//! collapses into the outermost scope. When the outermost batch closes:
//!
//! 1. paths are settled against the new document length
//! 2. the batch is recorded in history (if every call allowed it)
//! 3. each observer is invoked once with the settled document
//!
//! Nothing happens at close if no operation was applied.
//!
//! # Atomicity
//!
//! A single `apply_transforms` call is all-or-nothing: if operation `k`
//! fails, operations `0..k` are rolled back through their inverses before
//! the error is returned. Calls that already succeeded earlier in the same
//! outer batch stay applied.

use crate::history::HistoryEntry;
use crate::observers::Change;
use crate::{Document, Editor, EditorError, Operation, Paths, Result};

/// Per-call applier options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Re-check that each operation's recorded previous state still matches
    /// the live document. Structural bounds are always enforced.
    pub validate_paths: bool,
    /// Record the enclosing batch in the undo stack.
    pub save_history: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            validate_paths: true,
            save_history: true,
        }
    }
}

impl ApplyOptions {
    /// Options for callers that already resolved validity themselves.
    pub fn trusted() -> Self {
        Self {
            validate_paths: false,
            ..Self::default()
        }
    }
}

/// Open-batch bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct BatchState {
    depth: usize,
    applied: Vec<Operation>,
    paths_before: Option<Paths>,
    /// Cleared by any call in the batch that opts out of history.
    save_history: bool,
}

impl Editor {
    /// Apply an ordered list of operations as one observable step.
    pub fn apply_transforms(
        &mut self,
        operations: Vec<Operation>,
        options: ApplyOptions,
    ) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }
        self.batch_operations(|editor| {
            let validate = options.validate_paths && editor.config.validate_paths;
            apply_all(&mut editor.document, &operations, validate)?;
            if !options.save_history || editor.history.is_paused() {
                editor.batch.save_history = false;
            }
            editor.batch.applied.extend(operations);
            Ok(())
        })
    }

    /// Run `f` with notifications deferred until the outermost batch ends.
    pub fn batch_operations<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.batch.depth == 0 {
            self.batch.paths_before = Some(self.paths.clone());
            self.batch.save_history = true;
        }
        self.batch.depth += 1;
        let result = f(self);
        self.batch.depth -= 1;
        if self.batch.depth == 0 {
            self.flush_batch();
        }
        result
    }

    /// Whether a batch is currently open.
    pub fn is_batching(&self) -> bool {
        self.batch.depth > 0
    }

    fn flush_batch(&mut self) {
        let operations = std::mem::take(&mut self.batch.applied);
        let paths_before = self.batch.paths_before.take().unwrap_or_default();
        if operations.is_empty() {
            return;
        }

        self.paths.settle(self.document.len());
        tracing::debug!(
            ops = operations.len(),
            blocks = self.document.len(),
            "batch applied"
        );

        if self.batch.save_history && self.history.is_recording() {
            self.history.record(HistoryEntry {
                operations: operations.clone(),
                paths_before,
                paths_after: self.paths.clone(),
            });
        }

        let change = Change {
            document: &self.document,
            operations: &operations,
        };
        self.observers.notify(&change);
    }
}

/// Apply every operation or none of them.
fn apply_all(document: &mut Document, operations: &[Operation], validate: bool) -> Result<()> {
    for (applied, op) in operations.iter().enumerate() {
        if let Err(e) = apply_operation(document, op, validate) {
            tracing::warn!(op = op.name(), block = %op.target_block(), error = %e, "rolling back transforms");
            for done in operations[..applied].iter().rev() {
                if let Err(rollback) = apply_operation(document, &done.inverse(), false) {
                    tracing::error!(op = done.name(), error = %rollback, "rollback failed");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

/// Forward effect of one operation.
pub(crate) fn apply_operation(document: &mut Document, op: &Operation, validate: bool) -> Result<()> {
    tracing::trace!(op = op.name(), block = %op.target_block(), "apply");
    match op {
        Operation::InsertBlock { block } => document.insert(block.clone()),

        Operation::DeleteBlock { block } => {
            if validate {
                let live = document
                    .order_of(&block.id)
                    .ok_or(EditorError::BlockNotFound(block.id))?;
                if live != block.meta.order {
                    return Err(stale(block.id, format!(
                        "expected order {}, found {live}",
                        block.meta.order
                    )));
                }
            }
            document.remove(&block.id).map(|_| ())
        }

        Operation::MoveBlock {
            id,
            prev_order,
            new_order,
        } => {
            if validate {
                let live = document.order_of(id).ok_or(EditorError::BlockNotFound(*id))?;
                if live != *prev_order {
                    return Err(stale(*id, format!("expected order {prev_order}, found {live}")));
                }
            }
            document.relocate(id, *new_order)
        }

        Operation::SetBlockMeta {
            id,
            properties,
            prev_properties,
        } => {
            let block = document.block_mut(id)?;
            if validate && !prev_properties.matches(&block.meta) {
                return Err(stale(*id, "metadata changed since operation was built".into()));
            }
            properties.apply_to(&mut block.meta);
            Ok(())
        }

        Operation::SetBlockValue {
            id,
            value,
            prev_value,
        } => {
            let block = document.block_mut(id)?;
            if validate && block.value != *prev_value {
                return Err(stale(*id, "value changed since operation was built".into()));
            }
            block.value = value.clone();
            Ok(())
        }

        Operation::SetBlockType {
            id,
            block_type,
            prev_type,
        } => {
            let block = document.block_mut(id)?;
            if validate && block.block_type != *prev_type {
                return Err(stale(*id, format!("expected type {prev_type}, found {}", block.block_type)));
            }
            block.block_type = block_type.clone();
            Ok(())
        }
    }
}

fn stale(id: crate::BlockId, reason: String) -> EditorError {
    EditorError::StaleOperation { id, reason }
}
