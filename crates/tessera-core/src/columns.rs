//! Column layout: blocks that sit side by side.
//!
//! There is no group object. A group is the set of blocks whose metadata
//! carries the same [`ColumnGroupId`], and its state is re-derived from that
//! metadata every time it matters. A group is only meaningful while its
//! members span at least two distinct column indices; anything less is
//! degenerate and gets dissolved by [`Editor::normalize_column_group`], which
//! every shrinking mutation calls.
//!
//! Widths belong to the column, not the block, but are stored per block:
//! every member at the same index carries the same `column_width`.

use std::collections::BTreeSet;

use crate::ops::ColumnFields;
use crate::{ApplyOptions, BlockId, ColumnGroupId, Editor, MetaPatch, Operation};

/// Even split used when no explicit width is given.
fn default_width(columns: usize) -> u32 {
    (100 / columns.max(1)) as u32
}

impl Editor {
    /// Group at least two existing blocks into columns.
    ///
    /// Blocks are sorted by their current order and given indices `0..N`.
    /// `widths`, when given, must have one entry per block; otherwise every
    /// column gets `floor(100 / N)`.
    pub fn create_column_group(
        &mut self,
        block_ids: &[BlockId],
        widths: Option<&[u32]>,
    ) -> Option<ColumnGroupId> {
        let mut unique: Vec<BlockId> = Vec::with_capacity(block_ids.len());
        for id in block_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        if unique.len() < 2 {
            tracing::warn!(blocks = unique.len(), "create_column_group: need at least two blocks");
            return None;
        }
        if let Some(missing) = unique.iter().find(|id| !self.document.contains(id)) {
            tracing::warn!(block = %missing, "create_column_group: block not found");
            return None;
        }
        if let Some(widths) = widths.filter(|w| w.len() != unique.len()) {
            tracing::warn!(
                widths = widths.len(),
                blocks = unique.len(),
                "create_column_group: width count does not match block count"
            );
            return None;
        }

        unique.sort_by_key(|id| self.document.order_of(id));

        let group = ColumnGroupId::new();
        let count = unique.len();
        let mut previous_groups = BTreeSet::new();
        let mut ops = Vec::with_capacity(count);
        for (index, id) in unique.iter().enumerate() {
            let Some(block) = self.document.get(id) else {
                continue;
            };
            if let Some(old) = block.meta.column_group {
                previous_groups.insert(old);
            }
            let width = match widths {
                Some(widths) => self.config.clamp_width(widths[index]),
                None => default_width(count),
            };
            let properties = MetaPatch::column(ColumnFields::new(group, index, width));
            ops.push(Operation::SetBlockMeta {
                id: *id,
                prev_properties: properties.capture(&block.meta),
                properties,
            });
        }

        let created = self.batch_operations(|editor| {
            if !editor.apply_or_warn(ops, ApplyOptions::default(), "create_column_group") {
                return false;
            }
            for old in &previous_groups {
                editor.normalize_column_group(old);
            }
            true
        });

        created.then(|| {
            tracing::debug!(group = %group, columns = count, "created column group");
            group
        })
    }

    /// Put a block into `group` at column `index`.
    ///
    /// The block adopts the width already used at that index; a brand-new
    /// index gets an even split over the resulting column count. A block
    /// leaving another group (or another index of this one) may leave that
    /// group degenerate, in which case it is dissolved.
    pub fn add_to_column(&mut self, block_id: &BlockId, group: &ColumnGroupId, index: usize) -> bool {
        let Some(block) = self.document.get(block_id) else {
            tracing::warn!(block = %block_id, "add_to_column: block not found");
            return false;
        };
        let previous_group = block.meta.column_group;

        let others: Vec<_> = self
            .document
            .get_column_group_blocks(group)
            .into_iter()
            .filter(|b| b.id != *block_id)
            .collect();
        if others.is_empty() {
            tracing::warn!(group = %group, "add_to_column: column group not found");
            return false;
        }

        let width = others
            .iter()
            .find(|b| b.meta.column_index == Some(index))
            .and_then(|b| b.meta.column_width)
            .unwrap_or_else(|| {
                let mut indices: BTreeSet<usize> =
                    others.iter().filter_map(|b| b.meta.column_index).collect();
                indices.insert(index);
                default_width(indices.len())
            });

        let patch = MetaPatch::column(ColumnFields::new(*group, index, width));
        self.batch_operations(|editor| {
            if !editor.patch_meta(block_id, patch, "add_to_column") {
                return false;
            }
            if let Some(previous) = previous_group {
                editor.normalize_column_group(&previous);
            }
            true
        })
    }

    /// Take one block out of its group. If fewer than two distinct indices
    /// remain, the whole group is dissolved.
    pub fn remove_from_column(&mut self, block_id: &BlockId) -> bool {
        let Some(block) = self.document.get(block_id) else {
            tracing::warn!(block = %block_id, "remove_from_column: block not found");
            return false;
        };
        let Some(group) = block.meta.column_group else {
            tracing::warn!(block = %block_id, "remove_from_column: block is not in a column group");
            return false;
        };

        self.batch_operations(|editor| {
            let cleared = MetaPatch::column(ColumnFields::cleared());
            if !editor.patch_meta(block_id, cleared, "remove_from_column") {
                return false;
            }
            editor.normalize_column_group(&group);
            true
        })
    }

    /// Clear column metadata from every member of `group`.
    pub fn delete_column_group(&mut self, group: &ColumnGroupId) -> bool {
        if self.document.get_column_group_blocks(group).is_empty() {
            tracing::warn!(group = %group, "delete_column_group: column group not found");
            return false;
        }
        self.dissolve(group)
    }

    /// Set the width of column `index` on every block at that index.
    pub fn set_column_width(&mut self, group: &ColumnGroupId, index: usize, width: u32) -> bool {
        let width = self.config.clamp_width(width);
        let members: Vec<_> = self
            .document
            .get_column_group_blocks(group)
            .into_iter()
            .filter(|b| b.meta.column_index == Some(index))
            .collect();
        if members.is_empty() {
            tracing::warn!(group = %group, index, "set_column_width: column not found");
            return false;
        }

        let ops: Vec<Operation> = members
            .into_iter()
            .filter(|b| b.meta.column_width != Some(width))
            .map(|b| {
                let properties = MetaPatch::column(ColumnFields::new(*group, index, width));
                Operation::SetBlockMeta {
                    id: b.id,
                    prev_properties: properties.capture(&b.meta),
                    properties,
                }
            })
            .collect();
        if ops.is_empty() {
            return true;
        }
        self.apply_or_warn(ops, ApplyOptions::default(), "set_column_width")
    }

    /// Recompute `group` from block metadata and dissolve it if degenerate.
    ///
    /// Returns true when the group was dissolved.
    pub fn normalize_column_group(&mut self, group: &ColumnGroupId) -> bool {
        let members = self.document.get_column_group_blocks(group);
        if members.is_empty() {
            return false;
        }
        let distinct: BTreeSet<usize> =
            members.iter().filter_map(|b| b.meta.column_index).collect();
        if distinct.len() > 1 {
            return false;
        }
        tracing::debug!(group = %group, members = members.len(), "dissolving degenerate column group");
        self.dissolve(group)
    }

    fn dissolve(&mut self, group: &ColumnGroupId) -> bool {
        let cleared = MetaPatch::column(ColumnFields::cleared());
        let ops: Vec<Operation> = self
            .document
            .get_column_group_blocks(group)
            .into_iter()
            .map(|b| Operation::SetBlockMeta {
                id: b.id,
                properties: cleared.clone(),
                prev_properties: cleared.capture(&b.meta),
            })
            .collect();
        self.apply_or_warn(ops, ApplyOptions::default(), "delete_column_group")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeleteBlockOptions, InsertBlockOptions};

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

    fn column(editor: &Editor, id: &BlockId) -> ColumnFields {
        ColumnFields::of(&editor.document().get(id).unwrap().meta)
    }

    #[test]
    fn test_create_assigns_indices_by_order() {
        let (mut editor, ids) = editor_with(3);
        // Given out of order; indices follow document order.
        let group = editor
            .create_column_group(&[ids[2], ids[0], ids[1]], None)
            .unwrap();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(column(&editor, id), ColumnFields::new(group, i, 33));
        }
    }

    #[test]
    fn test_create_guards() {
        let (mut editor, ids) = editor_with(2);
        assert!(editor.create_column_group(&[ids[0]], None).is_none());
        assert!(editor.create_column_group(&[ids[0], ids[0]], None).is_none());
        assert!(editor.create_column_group(&[ids[0], BlockId::new()], None).is_none());
        assert!(editor.create_column_group(&ids, Some(&[50])).is_none());
        assert_eq!(editor.history().undo_depth(), 2);
        assert!(editor.document().iter().all(|b| !b.meta.has_column()));
    }

    #[test]
    fn test_create_with_explicit_widths() {
        let (mut editor, ids) = editor_with(2);
        let group = editor.create_column_group(&ids, Some(&[70, 2])).unwrap();
        assert_eq!(column(&editor, &ids[0]).width, Some(70));
        assert_eq!(column(&editor, &ids[1]).width, Some(2));
        assert_eq!(column(&editor, &ids[1]).group, Some(group));
    }

    #[test]
    fn test_configured_min_width_clamps_explicit_widths() {
        let mut config = crate::EditorConfig::default();
        config.columns.min_width = 10;
        let mut editor = Editor::with_config(config);
        let ids: Vec<BlockId> = (0..2)
            .map(|_| {
                editor
                    .insert_block("paragraph", InsertBlockOptions::default())
                    .unwrap()
            })
            .collect();

        let group = editor.create_column_group(&ids, Some(&[70, 2])).unwrap();
        assert_eq!(column(&editor, &ids[1]).width, Some(10));
        assert!(editor.set_column_width(&group, 0, 5));
        assert_eq!(column(&editor, &ids[0]).width, Some(10));
    }

    #[test]
    fn test_narrow_width_is_kept_by_default() {
        let (mut editor, ids) = editor_with(2);
        let group = editor.create_column_group(&ids, None).unwrap();
        assert!(editor.set_column_width(&group, 0, 5));
        assert_eq!(column(&editor, &ids[0]).width, Some(5));
        assert_eq!(column(&editor, &ids[1]).width, Some(50));
    }

    #[test]
    fn test_create_steals_from_old_group_and_dissolves_it() {
        let (mut editor, ids) = editor_with(4);
        let old = editor.create_column_group(&[ids[0], ids[1]], None).unwrap();
        let new = editor.create_column_group(&[ids[1], ids[2]], None).unwrap();

        assert!(editor.document().get_column_group_blocks(&old).is_empty());
        assert!(column(&editor, &ids[0]).group.is_none());
        assert_eq!(column(&editor, &ids[1]), ColumnFields::new(new, 0, 50));
    }

    #[test]
    fn test_remove_middle_of_three_keeps_group() {
        let (mut editor, ids) = editor_with(3);
        let group = editor.create_column_group(&ids, None).unwrap();

        assert!(editor.remove_from_column(&ids[1]));
        assert_eq!(column(&editor, &ids[1]), ColumnFields::cleared());
        assert_eq!(column(&editor, &ids[0]), ColumnFields::new(group, 0, 33));
        assert_eq!(column(&editor, &ids[2]), ColumnFields::new(group, 2, 33));
    }

    #[test]
    fn test_remove_from_pair_dissolves() {
        let (mut editor, ids) = editor_with(2);
        let group = editor.create_column_group(&ids, None).unwrap();
        assert!(editor.remove_from_column(&ids[0]));
        assert!(editor.document().get_column_group_blocks(&group).is_empty());
        assert_eq!(column(&editor, &ids[1]), ColumnFields::cleared());
    }

    #[test]
    fn test_remove_ungrouped_is_noop() {
        let (mut editor, ids) = editor_with(1);
        assert!(!editor.remove_from_column(&ids[0]));
        assert!(!editor.remove_from_column(&BlockId::new()));
    }

    #[test]
    fn test_dissolve_when_survivors_share_an_index() {
        let (mut editor, ids) = editor_with(3);
        let group = editor.create_column_group(&[ids[0], ids[1]], None).unwrap();
        assert!(editor.add_to_column(&ids[2], &group, 0));
        assert_eq!(column(&editor, &ids[2]), ColumnFields::new(group, 0, 50));

        // Survivors ids[0] and ids[2] both sit at index 0.
        assert!(editor.remove_from_column(&ids[1]));
        assert!(editor.document().get_column_group_blocks(&group).is_empty());
    }

    #[test]
    fn test_add_new_index_gets_even_split() {
        let (mut editor, ids) = editor_with(3);
        let group = editor.create_column_group(&[ids[0], ids[1]], None).unwrap();
        assert!(editor.add_to_column(&ids[2], &group, 2));
        assert_eq!(column(&editor, &ids[2]), ColumnFields::new(group, 2, 33));
    }

    #[test]
    fn test_add_to_unknown_group() {
        let (mut editor, ids) = editor_with(1);
        assert!(!editor.add_to_column(&ids[0], &ColumnGroupId::new(), 0));
    }

    #[test]
    fn test_moving_within_group_can_degenerate_it() {
        let (mut editor, ids) = editor_with(2);
        let group = editor.create_column_group(&ids, None).unwrap();
        assert!(editor.add_to_column(&ids[1], &group, 0));
        assert!(editor.document().get_column_group_blocks(&group).is_empty());
    }

    #[test]
    fn test_member_without_index_does_not_keep_group_alive() {
        let (mut editor, ids) = editor_with(2);
        let group = editor.create_column_group(&ids, None).unwrap();

        // Half-written column fields, as a raw operation or a hand-edited
        // document could leave them.
        let properties = MetaPatch::column(ColumnFields {
            group: Some(group),
            index: None,
            width: Some(50),
        });
        let op = Operation::SetBlockMeta {
            id: ids[1],
            prev_properties: properties.capture(&editor.document().get(&ids[1]).unwrap().meta),
            properties,
        };
        editor.apply_transforms(vec![op], ApplyOptions::default()).unwrap();

        assert!(editor.normalize_column_group(&group));
        assert!(editor.document().iter().all(|b| !b.meta.has_column()));
    }

    #[test]
    fn test_set_width_propagates_to_column_only() {
        let (mut editor, ids) = editor_with(4);
        let group = editor
            .create_column_group(&[ids[0], ids[1], ids[2]], None)
            .unwrap();
        editor.add_to_column(&ids[3], &group, 1);

        assert!(editor.set_column_width(&group, 1, 45));
        assert_eq!(column(&editor, &ids[1]).width, Some(45));
        assert_eq!(column(&editor, &ids[3]).width, Some(45));
        assert_eq!(column(&editor, &ids[0]).width, Some(33));
        assert_eq!(column(&editor, &ids[2]).width, Some(33));

        assert!(!editor.set_column_width(&group, 7, 45));
    }

    #[test]
    fn test_delete_group() {
        let (mut editor, ids) = editor_with(4);
        let group = editor.create_column_group(&ids, None).unwrap();
        assert!(editor.delete_column_group(&group));
        assert!(editor.document().iter().all(|b| !b.meta.has_column()));
        assert!(!editor.delete_column_group(&group));
    }

    #[test]
    fn test_delete_block_dissolves_pair() {
        let (mut editor, ids) = editor_with(3);
        let group = editor.create_column_group(&[ids[0], ids[1]], None).unwrap();
        editor.delete_block(ids[0], DeleteBlockOptions::default());
        assert!(editor.document().get_column_group_blocks(&group).is_empty());
        assert_eq!(column(&editor, &ids[1]), ColumnFields::cleared());
    }

    #[test]
    fn test_dissolving_four_columns_is_one_step() {
        let (mut editor, ids) = editor_with(4);
        let group = editor.create_column_group(&ids, None).unwrap();
        let depth = editor.history().undo_depth();

        let notified = std::rc::Rc::new(std::cell::Cell::new(0));
        let seen = notified.clone();
        editor.subscribe(move |change| {
            seen.set(seen.get() + 1);
            assert_eq!(change.operations.len(), 4);
        });
        editor.delete_column_group(&group);

        assert_eq!(notified.get(), 1);
        assert_eq!(editor.history().undo_depth(), depth + 1);
    }
}
