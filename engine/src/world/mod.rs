//! World Module
//!
//! The voxel-world surface the editor controllers talk to: block definitions
//! and catalog, integer cell coordinates, the `VoxelWorld`/`RaycastProvider`
//! interfaces, and `BlockVolume`, a bounded in-memory reference
//! implementation with a DDA voxel raycast.

pub mod block;
pub mod volume;

pub use block::{Block, BlockCatalog};
pub use volume::{BlockVolume, GridPos, RayHit, RaycastProvider, VoxelWorld};
