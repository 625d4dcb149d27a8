//! Block Shape Groups
//!
//! Groups block variants that share a shape family and resolves which
//! variant is the default or next one, plus the name-suffix rotation used by
//! the rotate action. Only one block of a family shows in the blocks window;
//! cycling through a family is independent of rotation-by-name.

use log::trace;

use crate::world::{Block, BlockCatalog};

/// A collection of blocks with a similar shape.
///
/// The default block is recalculated each time a variant is added: the
/// variant whose shape ends in `_up` wins, else the one ending in `_west`,
/// else the first inserted variant.
#[derive(Debug, Clone)]
pub struct ShapeGroup {
    name: String,
    variants: Vec<Block>,
    index: usize,
}

impl ShapeGroup {
    /// Create an empty group with the given family key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            index: 0,
        }
    }

    /// The canonical shape-family key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a variant and recompute the default index.
    pub fn add_variant(&mut self, block: Block) {
        self.variants.push(block);
        self.recompute_default();
    }

    /// The current variant, if the group is non-empty.
    pub fn current(&self) -> Option<&Block> {
        self.variants.get(self.index)
    }

    /// Advance to the next variant (wrapping) and return it.
    pub fn advance(&mut self) -> Option<&Block> {
        if self.variants.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.variants.len();
        self.variants.get(self.index)
    }

    /// The variant following the given block (wrapping), or `None` if the
    /// block is not a member of this group.
    pub fn next_after(&self, block: &Block) -> Option<&Block> {
        let position = self.variants.iter().position(|b| b == block)?;
        self.variants.get((position + 1) % self.variants.len())
    }

    /// Reset the index to the default variant without adding one.
    pub fn reset(&mut self) {
        self.recompute_default();
    }

    /// Number of variants in the group.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the group has no variants.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// All variants in insertion order.
    pub fn variants(&self) -> &[Block] {
        &self.variants
    }

    fn recompute_default(&mut self) {
        let mut up_index = None;
        let mut west_index = None;
        for (i, block) in self.variants.iter().enumerate() {
            if block.shape.ends_with("_up") {
                up_index = Some(i);
            } else if block.shape.ends_with("_west") {
                west_index = Some(i);
            }
        }
        self.index = up_index.or(west_index).unwrap_or(0);
    }
}

/// Returns the name of the 90-degree clockwise rotated block, or `None` when
/// the name has no facing suffix.
///
/// The cycle is `left -> back -> right -> front -> left`.
pub fn rotated_name(name: &str) -> Option<String> {
    if name.ends_with("left") {
        Some(format!("{}back", &name[..name.len() - 4]))
    } else if name.ends_with("back") {
        Some(format!("{}right", &name[..name.len() - 4]))
    } else if name.ends_with("right") {
        Some(format!("{}front", &name[..name.len() - 5]))
    } else if name.ends_with("front") {
        Some(format!("{}left", &name[..name.len() - 5]))
    } else {
        None
    }
}

/// All shape groups built from a catalog, sorted by family key.
#[derive(Debug, Clone, Default)]
pub struct BlockLibrary {
    groups: Vec<ShapeGroup>,
}

impl BlockLibrary {
    /// Group a catalog's blocks by shape family.
    ///
    /// The family key is `{type}-{shape}` with the shape's trailing
    /// orientation suffix (`_up`, `_west`, ...) stripped.
    pub fn from_catalog(catalog: &BlockCatalog) -> Self {
        let mut groups: Vec<ShapeGroup> = Vec::new();

        for block in catalog.iter() {
            let generic_shape = match block.shape.rfind('_') {
                Some(i) if i > 0 => &block.shape[..i],
                _ => block.shape.as_str(),
            };
            let name = format!("{}-{}", block.block_type, generic_shape);

            match groups.iter_mut().find(|g| g.name() == name) {
                Some(group) => group.add_variant(block.clone()),
                None => {
                    let mut group = ShapeGroup::new(name);
                    group.add_variant(block.clone());
                    groups.push(group);
                }
            }
        }

        groups.sort_by(|a, b| a.name().cmp(b.name()));
        trace!("Built {} shape groups from catalog", groups.len());
        Self { groups }
    }

    /// All groups in name order.
    pub fn groups(&self) -> &[ShapeGroup] {
        &self.groups
    }

    /// Mutable access to a group by family key.
    pub fn group_mut(&mut self, name: &str) -> Option<&mut ShapeGroup> {
        self.groups.iter_mut().find(|g| g.name() == name)
    }

    /// The variant following the given block in whichever group contains it.
    /// Used by the recently-used blocks feature, not by the placement path.
    pub fn next_variant_of(&self, block: &Block) -> Option<&Block> {
        self.groups.iter().find_map(|g| g.next_after(block))
    }
}
