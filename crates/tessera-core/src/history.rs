//! Undo/redo over applied batches.
//!
//! Each recorded entry is one outermost batch. Undo re-applies the batch's
//! operations in reverse order with new/previous values swapped; redo
//! re-applies them forward. Neither recomputes anything from the document.

use crate::{ApplyOptions, Editor, Operation, Paths};

/// One recorded batch.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub operations: Vec<Operation>,
    pub paths_before: Paths,
    pub paths_after: Paths,
}

impl HistoryEntry {
    /// Operations that revert this entry, in application order.
    pub fn inverse_operations(&self) -> Vec<Operation> {
        self.operations.iter().rev().map(Operation::inverse).collect()
    }
}

#[derive(Debug)]
pub struct History {
    undos: Vec<HistoryEntry>,
    redos: Vec<HistoryEntry>,
    max_depth: usize,
    enabled: bool,
    /// Nesting count of `without_saving_history` scopes.
    paused: usize,
}

impl History {
    pub fn new(max_depth: usize, enabled: bool) -> Self {
        Self {
            undos: Vec::new(),
            redos: Vec::new(),
            max_depth,
            enabled,
            paused: 0,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undos.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redos.len()
    }

    pub fn undos(&self) -> &[HistoryEntry] {
        &self.undos
    }

    pub fn clear(&mut self) {
        self.undos.clear();
        self.redos.clear();
    }

    pub(crate) fn is_recording(&self) -> bool {
        self.enabled && self.paused == 0 && self.max_depth > 0
    }

    /// Inside a `without_saving_history` scope.
    pub(crate) fn is_paused(&self) -> bool {
        self.paused > 0
    }

    /// Record a fresh batch. Invalidates redo.
    pub(crate) fn record(&mut self, entry: HistoryEntry) {
        self.redos.clear();
        self.push_undo(entry);
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        if self.undos.len() >= self.max_depth {
            self.undos.remove(0);
        }
        self.undos.push(entry);
    }
}

impl Editor {
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Run `f` without recording its batches in the undo stack.
    pub fn without_saving_history<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.history.paused += 1;
        let result = f(self);
        self.history.paused -= 1;
        result
    }

    /// Revert the most recent recorded batch. Returns false if there was
    /// nothing to undo or the inverse could not be applied.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undos.pop() else {
            return false;
        };
        let inverse = entry.inverse_operations();
        let restore = entry.paths_before.clone();

        let result = self.replay(inverse, restore);
        match result {
            Ok(()) => {
                self.history.redos.push(entry);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "undo: inverse batch failed, dropping entry");
                false
            }
        }
    }

    /// Re-apply the most recently undone batch.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redos.pop() else {
            return false;
        };
        let forward = entry.operations.clone();
        let restore = entry.paths_after.clone();

        let result = self.replay(forward, restore);
        match result {
            Ok(()) => {
                self.history.push_undo(entry);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "redo: batch failed, dropping entry");
                false
            }
        }
    }

    fn replay(&mut self, operations: Vec<Operation>, paths: Paths) -> crate::Result<()> {
        let options = ApplyOptions {
            validate_paths: false,
            save_history: false,
        };
        self.batch_operations(|editor| {
            editor.apply_transforms(operations, options)?;
            editor.paths = paths;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, InsertBlockOptions};

    #[test]
    fn test_depth_limit_evicts_oldest() {
        let mut config = EditorConfig::default();
        config.history.max_depth = 2;
        let mut editor = Editor::with_config(config);

        for _ in 0..3 {
            editor.insert_block("paragraph", InsertBlockOptions::default());
        }
        assert_eq!(editor.history().undo_depth(), 2);

        assert!(editor.undo());
        assert!(editor.undo());
        assert!(!editor.undo());
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_without_saving_history() {
        let mut editor = Editor::new();
        editor.without_saving_history(|editor| {
            editor.insert_block("paragraph", InsertBlockOptions::default());
        });
        assert_eq!(editor.document().len(), 1);
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_unsaved_edits_inside_batch_stay_unrecorded() {
        let mut editor = Editor::new();
        editor.batch_operations(|editor| {
            editor.without_saving_history(|editor| {
                editor.insert_block("paragraph", InsertBlockOptions::default());
            });
        });
        assert_eq!(editor.document().len(), 1);
        assert_eq!(editor.history().undo_depth(), 0);

        // The whole batch is left out once any part of it opts out.
        editor.batch_operations(|editor| {
            editor.insert_block("paragraph", InsertBlockOptions::default());
            editor.without_saving_history(|editor| {
                editor.insert_block("heading", InsertBlockOptions::default());
            });
        });
        assert_eq!(editor.document().len(), 3);
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_disabled_history_records_nothing() {
        let mut config = EditorConfig::default();
        config.history.enabled = false;
        let mut editor = Editor::with_config(config);
        editor.insert_block("paragraph", InsertBlockOptions::default());
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_new_batch_clears_redo() {
        let mut editor = Editor::new();
        editor.insert_block("paragraph", InsertBlockOptions::default());
        assert!(editor.undo());
        assert!(editor.history().can_redo());

        editor.insert_block("heading", InsertBlockOptions::default());
        assert!(!editor.history().can_redo());
    }
}
