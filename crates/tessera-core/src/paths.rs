//! Addressing: current focus, multi-select, and selection provenance.
//!
//! Paths are expressed as orders, not ids, because they describe screen
//! positions. They are ephemeral UI state and never persisted. The applier
//! re-settles them after every batch so they never point past the end of
//! the document.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{Block, BlockId, Editor};

/// What produced the most recent selection change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum PathSource {
    /// Pointer hovering or clicking over blocks.
    #[strum(serialize = "pointer_move", serialize = "mousemove")]
    PointerMove,
    /// Arrow keys, tab, and friends.
    Keyboard,
    /// Set by code, not by the user.
    Programmatic,
    /// Rubber-band selection across blocks.
    #[strum(serialize = "selection_box")]
    SelectionBox,
    #[strum(serialize = "copy_paste")]
    CopyPaste,
}

impl PathSource {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PathSource::PointerMove => "pointer_move",
            PathSource::Keyboard => "keyboard",
            PathSource::Programmatic => "programmatic",
            PathSource::SelectionBox => "selection_box",
            PathSource::CopyPaste => "copy_paste",
        }
    }

    /// True when a person is actively navigating (as opposed to a script).
    pub fn is_user_navigation(&self) -> bool {
        !matches!(self, PathSource::Programmatic)
    }
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Focus and selection state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paths {
    /// Order of the focused block.
    pub current: Option<usize>,
    /// Orders of multi-selected blocks, ascending and deduplicated.
    pub selected: Option<Vec<usize>>,
    pub source: Option<PathSource>,
}

impl Paths {
    pub fn at(current: usize, source: PathSource) -> Self {
        Self {
            current: Some(current),
            selected: None,
            source: Some(source),
        }
    }

    /// Clamp to a document of `len` blocks.
    pub(crate) fn settle(&mut self, len: usize) {
        if len == 0 {
            self.current = None;
            self.selected = None;
            return;
        }
        if let Some(current) = self.current
            && current >= len
        {
            self.current = Some(len - 1);
        }
        if let Some(selected) = &mut self.selected {
            selected.retain(|&order| order < len);
            if selected.is_empty() {
                self.selected = None;
            }
        }
    }
}

impl Editor {
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Replace the whole path state.
    pub fn set_path(&mut self, mut paths: Paths) {
        if let Some(selected) = &mut paths.selected {
            selected.sort_unstable();
            selected.dedup();
        }
        paths.settle(self.document.len());
        tracing::trace!(current = ?paths.current, source = ?paths.source, "set path");
        self.paths = paths;
    }

    pub fn get_selected_paths(&self) -> Option<&[usize]> {
        self.paths.selected.as_deref()
    }

    pub fn path_source(&self) -> Option<PathSource> {
        self.paths.source
    }

    /// Replace the multi-selection. Orders past the end are dropped.
    pub fn set_selected(&mut self, orders: impl IntoIterator<Item = usize>, source: PathSource) {
        let selected: Vec<usize> = orders.into_iter().collect();
        self.set_path(Paths {
            current: self.paths.current,
            selected: (!selected.is_empty()).then_some(selected),
            source: Some(source),
        });
    }

    /// Focus a block by ID. Unknown ids are a warn-and-ignore.
    pub fn focus_block(&mut self, id: &BlockId, source: PathSource) -> bool {
        let Some(order) = self.document.order_of(id) else {
            tracing::warn!(block = %id, "focus_block: block not found");
            return false;
        };
        self.set_path(Paths::at(order, source));
        true
    }

    /// The focused block, if any.
    pub fn current_block(&self) -> Option<&Block> {
        self.paths
            .current
            .and_then(|order| self.document.block_at(order))
    }

    pub fn get_previous_block_order(&self, order: usize) -> Option<usize> {
        self.document.get_previous_block_order(order)
    }

    pub fn get_next_block_order(&self, order: usize) -> Option<usize> {
        self.document.get_next_block_order(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InsertBlockOptions;

    fn editor_with(n: usize) -> (Editor, Vec<BlockId>) {
        let mut editor = Editor::new();
        let ids = (0..n)
            .map(|_| {
                editor
                    .insert_block("paragraph", InsertBlockOptions::default())
                    .unwrap()
            })
            .collect();
        (editor, ids)
    }

    #[test]
    fn test_source_parse_aliases() {
        assert_eq!(PathSource::from_str("mousemove"), Some(PathSource::PointerMove));
        assert_eq!(PathSource::from_str("Keyboard"), Some(PathSource::Keyboard));
        assert!(!PathSource::Programmatic.is_user_navigation());
        assert!(PathSource::Keyboard.is_user_navigation());
    }

    #[test]
    fn test_neighbor_orders_at_the_edges() {
        let (editor, _) = editor_with(1);
        assert_eq!(editor.get_next_block_order(0), None);
        assert_eq!(editor.get_next_block_order(usize::MAX), None);
        assert_eq!(editor.get_previous_block_order(0), None);
    }

    #[test]
    fn test_focus_block_records_source() {
        let (mut editor, ids) = editor_with(3);
        assert!(editor.focus_block(&ids[1], PathSource::Keyboard));
        assert_eq!(editor.paths().current, Some(1));
        assert_eq!(editor.path_source(), Some(PathSource::Keyboard));
        assert_eq!(editor.current_block().map(|b| b.id), Some(ids[1]));

        assert!(!editor.focus_block(&BlockId::new(), PathSource::Keyboard));
        assert_eq!(editor.paths().current, Some(1));
    }

    #[test]
    fn test_selected_sorted_deduped_and_clamped() {
        let (mut editor, _) = editor_with(3);
        editor.set_selected([2, 0, 2, 9], PathSource::SelectionBox);
        assert_eq!(editor.get_selected_paths(), Some(&[0, 2][..]));
        assert_eq!(editor.path_source(), Some(PathSource::SelectionBox));

        editor.set_selected(Vec::new(), PathSource::Programmatic);
        assert_eq!(editor.get_selected_paths(), None);
    }

    #[test]
    fn test_settle_clears_on_empty() {
        let mut paths = Paths {
            current: Some(4),
            selected: Some(vec![1, 5]),
            source: Some(PathSource::PointerMove),
        };
        paths.settle(3);
        assert_eq!(paths.current, Some(2));
        assert_eq!(paths.selected, Some(vec![1]));

        paths.settle(0);
        assert_eq!(paths.current, None);
        assert_eq!(paths.selected, None);
    }
}
