//! Shared identity and block types for Tessera.
//!
//! This crate is the leaf of the workspace: typed IDs and the block record.
//! It has **no internal tessera dependencies**.
//!
//! # Key Types
//!
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`BlockId`]       | Stable, globally unique block address        |
//! | [`ColumnGroupId`] | Column-layout group tag in block metadata    |
//! | [`BlockType`]     | Plugin tag owning a block's payload          |
//! | [`BlockMeta`]     | Order, depth, alignment, column fields       |
//! | [`Block`]         | Serializable block record                    |

pub mod block;
pub mod ids;

pub use block::{Align, Block, BlockMeta, BlockType};
pub use ids::{BlockId, ColumnGroupId};
