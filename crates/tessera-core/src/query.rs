//! Read-only projections over a document.

use std::collections::BTreeSet;

use crate::{Block, BlockId, BlockType, ColumnGroupId, Document, Editor};

impl Document {
    /// Blocks in visual order.
    pub fn blocks_ordered(&self) -> Vec<&Block> {
        self.iter().collect()
    }

    /// Members of a column group, sorted by `column_index` and then by
    /// `order`. Layout code relies on this ordering.
    pub fn get_column_group_blocks(&self, group: &ColumnGroupId) -> Vec<&Block> {
        // `iter` already yields by order, so a stable sort on index is enough.
        let mut members: Vec<&Block> = self
            .iter()
            .filter(|b| b.meta.column_group.as_ref() == Some(group))
            .collect();
        members.sort_by_key(|b| b.meta.column_index);
        members
    }

    /// Every live group id, in order of each group's first member.
    pub fn column_groups(&self) -> Vec<ColumnGroupId> {
        let mut seen = BTreeSet::new();
        self.iter()
            .filter_map(|b| b.meta.column_group)
            .filter(|group| seen.insert(*group))
            .collect()
    }

    /// Distinct column indices in use by a group, ascending.
    pub fn column_indices(&self, group: &ColumnGroupId) -> Vec<usize> {
        self.iter()
            .filter(|b| b.meta.column_group.as_ref() == Some(group))
            .filter_map(|b| b.meta.column_index)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn blocks_of_type(&self, block_type: &BlockType) -> Vec<&Block> {
        self.iter().filter(|b| &b.block_type == block_type).collect()
    }
}

impl Editor {
    pub fn get_block(&self, id: &BlockId) -> Option<&Block> {
        self.document.get(id)
    }

    pub fn block_at(&self, order: usize) -> Option<&Block> {
        self.document.block_at(order)
    }

    pub fn blocks_ordered(&self) -> Vec<&Block> {
        self.document.blocks_ordered()
    }

    pub fn get_column_group_blocks(&self, group: &ColumnGroupId) -> Vec<&Block> {
        self.document.get_column_group_blocks(group)
    }
}
