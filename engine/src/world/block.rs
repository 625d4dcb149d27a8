//! Block Definitions
//!
//! Block descriptors and the catalog the editor selects from. A block's
//! `shape` suffix encodes its resting orientation (`cube_up`, `wedge_west`);
//! for blocks that face a direction, the name suffix encodes the facing
//! (`wall-left`, `wall-front`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A block definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Unique name, e.g. `grass` or `wall-left`.
    pub name: String,
    /// Logical block type shared by all its shapes, e.g. `grass`, `wall`.
    pub block_type: String,
    /// Shape identifier with orientation suffix, e.g. `cube_up`.
    pub shape: String,
}

impl Block {
    /// Create a new block definition.
    pub fn new(
        name: impl Into<String>,
        block_type: impl Into<String>,
        shape: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            block_type: block_type.into(),
            shape: shape.into(),
        }
    }
}

/// Registry of all known block definitions, keyed by name.
///
/// Built once at startup by the embedding application; iteration order is
/// name order, which keeps downstream grouping deterministic.
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    blocks: BTreeMap<String, Block>,
}

impl BlockCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block definition, replacing any previous one with the same name.
    pub fn register(&mut self, block: Block) {
        self.blocks.insert(block.name.clone(), block);
    }

    /// Look up a block by name.
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    /// Whether a block with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Iterate all blocks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block selected when the editor starts: `grass` if registered,
    /// otherwise the first block in name order.
    pub fn default_block(&self) -> Option<&Block> {
        self.get("grass").or_else(|| self.blocks.values().next())
    }
}
