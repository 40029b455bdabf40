//! The document: a flat map of blocks plus a derived order index.
//!
//! # Order contract
//!
//! `order` values are **dense and contiguous**: a document with `n` blocks
//! holds exactly the orders `0..n`, each once. Every structural mutation
//! renumbers the affected range so the contract holds after each operation,
//! not just at batch boundaries.
//!
//! The `order_index` vector is the inverse of `meta.order`, which gives O(1)
//! addressing in both directions. It is never persisted; serialization
//! writes the plain `id → Block` map and deserialization rebuilds the index.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Block, BlockId, DocumentError, EditorError};

/// Mapping from block id to block, ordered by `meta.order`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<BlockId, Block>",
    into = "BTreeMap<BlockId, Block>"
)]
pub struct Document {
    /// Blocks indexed by ID.
    blocks: HashMap<BlockId, Block>,

    /// `order_index[order]` is the id of the block at that order.
    order_index: Vec<BlockId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from blocks, validating the order contract.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Result<Self, DocumentError> {
        let mut by_id = HashMap::new();
        for block in blocks {
            let id = block.id;
            if by_id.insert(id, block).is_some() {
                return Err(DocumentError::DuplicateBlock(id));
            }
        }

        let mut ordered: Vec<(usize, BlockId)> =
            by_id.values().map(|b| (b.meta.order, b.id)).collect();
        ordered.sort();

        let mut seen = HashSet::new();
        for (expected, (found, _)) in ordered.iter().enumerate() {
            if !seen.insert(*found) {
                return Err(DocumentError::DuplicateOrder(*found));
            }
            if *found != expected {
                return Err(DocumentError::OrderGap {
                    expected,
                    found: *found,
                });
            }
        }

        Ok(Self {
            blocks: by_id,
            order_index: ordered.into_iter().map(|(_, id)| id).collect(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.order_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_index.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    /// Get a block by ID.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Iterate blocks in visual order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.order_index.iter().filter_map(|id| self.blocks.get(id))
    }

    /// Block IDs in visual order.
    pub fn ids_ordered(&self) -> &[BlockId] {
        &self.order_index
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    /// Current order of a block.
    pub fn order_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.get(id).map(|b| b.meta.order)
    }

    /// ID of the block occupying `order`.
    pub fn id_at(&self, order: usize) -> Option<BlockId> {
        self.order_index.get(order).copied()
    }

    /// Block occupying `order`.
    pub fn block_at(&self, order: usize) -> Option<&Block> {
        self.id_at(order).and_then(|id| self.blocks.get(&id))
    }

    /// Order of the block before `order`, or `None` at the start or when
    /// `order` is not occupied.
    pub fn get_previous_block_order(&self, order: usize) -> Option<usize> {
        if order >= self.len() {
            return None;
        }
        order.checked_sub(1)
    }

    /// Order of the block after `order`, or `None` at the end or when
    /// `order` is not occupied.
    pub fn get_next_block_order(&self, order: usize) -> Option<usize> {
        order.checked_add(1).filter(|&next| next < self.len())
    }

    // =========================================================================
    // Raw mutation (transform applier only)
    // =========================================================================

    pub(crate) fn block_mut(&mut self, id: &BlockId) -> Result<&mut Block, EditorError> {
        self.blocks
            .get_mut(id)
            .ok_or(EditorError::BlockNotFound(*id))
    }

    /// Insert at `block.meta.order`, shifting later blocks down.
    pub(crate) fn insert(&mut self, block: Block) -> Result<(), EditorError> {
        let order = block.meta.order;
        let len = self.len();
        if self.blocks.contains_key(&block.id) {
            return Err(EditorError::DuplicateBlock(block.id));
        }
        if order > len {
            return Err(EditorError::InvalidOrder { order, len });
        }

        self.order_index.insert(order, block.id);
        self.blocks.insert(block.id, block);
        self.renumber(order, self.len());
        Ok(())
    }

    /// Remove a block, shifting later blocks up. Returns the removed block.
    pub(crate) fn remove(&mut self, id: &BlockId) -> Result<Block, EditorError> {
        let block = self
            .blocks
            .remove(id)
            .ok_or(EditorError::BlockNotFound(*id))?;
        let order = block.meta.order;
        self.order_index.remove(order);
        self.renumber(order, self.len());
        Ok(block)
    }

    /// Move a block to `to`, renumbering everything between.
    pub(crate) fn relocate(&mut self, id: &BlockId, to: usize) -> Result<(), EditorError> {
        let from = self
            .order_of(id)
            .ok_or(EditorError::BlockNotFound(*id))?;
        let len = self.len();
        if to >= len {
            return Err(EditorError::InvalidOrder { order: to, len });
        }
        if from == to {
            return Ok(());
        }

        let moved = self.order_index.remove(from);
        self.order_index.insert(to, moved);
        self.renumber(from.min(to), from.max(to) + 1);
        Ok(())
    }

    /// Rewrite `meta.order` for every block in `start..end` from the index.
    fn renumber(&mut self, start: usize, end: usize) {
        for order in start..end {
            let id = self.order_index[order];
            if let Some(block) = self.blocks.get_mut(&id) {
                block.meta.order = order;
            }
        }
    }
}

impl TryFrom<BTreeMap<BlockId, Block>> for Document {
    type Error = DocumentError;

    fn try_from(map: BTreeMap<BlockId, Block>) -> Result<Self, Self::Error> {
        for (key, block) in &map {
            if *key != block.id {
                return Err(DocumentError::KeyMismatch {
                    key: *key,
                    id: block.id,
                });
            }
        }
        Self::from_blocks(map.into_values())
    }
}

impl From<Document> for BTreeMap<BlockId, Block> {
    fn from(doc: Document) -> Self {
        doc.blocks.into_iter().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with(n: usize) -> (Document, Vec<BlockId>) {
        let blocks: Vec<Block> = (0..n)
            .map(|i| Block::new("paragraph", json!(format!("block {i}")), i))
            .collect();
        let ids = blocks.iter().map(|b| b.id).collect();
        (Document::from_blocks(blocks).unwrap(), ids)
    }

    fn assert_dense(doc: &Document) {
        for (i, block) in doc.iter().enumerate() {
            assert_eq!(block.meta.order, i);
            assert_eq!(doc.id_at(i), Some(block.id));
        }
    }

    #[test]
    fn test_from_blocks_rejects_gaps_and_duplicates() {
        let a = Block::new("paragraph", json!(null), 0);
        let b = Block::new("paragraph", json!(null), 2);
        assert_eq!(
            Document::from_blocks(vec![a.clone(), b]),
            Err(DocumentError::OrderGap {
                expected: 1,
                found: 2
            })
        );

        let c = Block::new("paragraph", json!(null), 0);
        assert_eq!(
            Document::from_blocks(vec![a.clone(), c]),
            Err(DocumentError::DuplicateOrder(0))
        );

        assert_eq!(
            Document::from_blocks(vec![a.clone(), a.clone()]),
            Err(DocumentError::DuplicateBlock(a.id))
        );
    }

    #[test]
    fn test_neighbor_lookup() {
        let (doc, _) = doc_with(3);
        assert_eq!(doc.get_previous_block_order(0), None);
        assert_eq!(doc.get_previous_block_order(2), Some(1));
        assert_eq!(doc.get_next_block_order(1), Some(2));
        assert_eq!(doc.get_next_block_order(2), None);
        assert_eq!(doc.get_previous_block_order(7), None);
        assert_eq!(doc.get_next_block_order(7), None);
        assert_eq!(doc.get_next_block_order(usize::MAX), None);
        assert_eq!(doc.get_previous_block_order(usize::MAX), None);
    }

    #[test]
    fn test_insert_shifts_later_blocks() {
        let (mut doc, ids) = doc_with(3);
        let inserted = Block::new("heading", json!(null), 1);
        let new_id = inserted.id;
        doc.insert(inserted).unwrap();

        assert_eq!(doc.ids_ordered(), &[ids[0], new_id, ids[1], ids[2]]);
        assert_dense(&doc);
    }

    #[test]
    fn test_insert_rejects_out_of_range() {
        let (mut doc, _) = doc_with(2);
        let err = doc.insert(Block::new("heading", json!(null), 5)).unwrap_err();
        assert!(matches!(err, EditorError::InvalidOrder { order: 5, len: 2 }));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_remove_closes_gap() {
        let (mut doc, ids) = doc_with(4);
        let removed = doc.remove(&ids[1]).unwrap();
        assert_eq!(removed.meta.order, 1);
        assert_eq!(doc.ids_ordered(), &[ids[0], ids[2], ids[3]]);
        assert_dense(&doc);
    }

    #[test]
    fn test_relocate_both_directions() {
        let (mut doc, ids) = doc_with(5);
        doc.relocate(&ids[0], 3).unwrap();
        assert_eq!(doc.ids_ordered(), &[ids[1], ids[2], ids[3], ids[0], ids[4]]);
        assert_dense(&doc);

        doc.relocate(&ids[4], 0).unwrap();
        assert_eq!(doc.ids_ordered(), &[ids[4], ids[1], ids[2], ids[3], ids[0]]);
        assert_dense(&doc);
    }

    #[test]
    fn test_serde_roundtrip_rebuilds_index() {
        let (doc, ids) = doc_with(3);
        let json = serde_json::to_string(&doc).unwrap();
        let restored: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.ids_ordered(), ids.as_slice());
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_deserialize_rejects_key_mismatch() {
        let block = Block::new("paragraph", json!(null), 0);
        let other = BlockId::new();
        let raw = json!({ other.to_string(): block });
        let result: Result<Document, _> = serde_json::from_value(raw);
        assert!(result.is_err());
    }
}
