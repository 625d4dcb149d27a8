//! Voxel Volume Module
//!
//! Integer cell addressing, the `VoxelWorld` / `RaycastProvider` interfaces
//! the editor controllers consume, and `BlockVolume`: a bounded in-memory
//! implementation backing tests and headless embedding. The raycast walks
//! cells with a DDA traversal and falls back to the ground plane at the
//! bottom of the volume, so placement works on an empty floor.

use std::collections::HashMap;

use glam::{IVec3, Vec3};
use log::trace;

use crate::camera::{CameraPose, RaycastConfig, screen_ray};

use super::block::Block;

/// Edge length of the default editable volume, in cells.
pub const VOLUME_EDGE: i32 = 32;

/// One addressable unit-cube cell in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing a world-space point.
    pub fn from_world(p: Vec3) -> Self {
        Self::new(
            p.x.floor() as i32,
            p.y.floor() as i32,
            p.z.floor() as i32,
        )
    }

    /// World-space center of this cell.
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }

    /// The cell offset by an integer delta.
    pub fn offset(self, delta: IVec3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl From<IVec3> for GridPos {
    fn from(value: IVec3) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Result of a cursor raycast against the voxel geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The cell that was hit (for a floor hit, the cell below the floor).
    pub cell: GridPos,
    /// World-space collision point.
    pub point: Vec3,
    /// Unit normal of the face that was entered.
    pub normal: IVec3,
}

/// The voxel world the editor mutates. Single-writer: only the builder's
/// trigger actions call the mutating operations.
pub trait VoxelWorld {
    /// Whether a cell is inside the world's addressable bounds.
    fn contains(&self, cell: GridPos) -> bool;
    /// The block occupying a cell, if any.
    fn block_at(&self, cell: GridPos) -> Option<&Block>;
    /// Put a block into a cell, replacing any occupant. Out-of-bounds cells
    /// are ignored.
    fn add_block(&mut self, cell: GridPos, block: Block);
    /// Clear a cell, returning the block that occupied it.
    fn remove_block(&mut self, cell: GridPos) -> Option<Block>;
}

/// Produces the nearest collision for a cursor position seen through a
/// camera pose, or `None` for a miss.
pub trait RaycastProvider {
    fn cursor_ray_hit(&self, pose: &CameraPose, cursor: (f32, f32)) -> Option<RayHit>;
}

/// A bounded, flat-storage voxel volume.
///
/// Cells are unit cubes addressed by integer coordinates inside
/// `[min, max)`. The default volume is 32x32x32 with its floor at y = 0.
#[derive(Debug, Clone)]
pub struct BlockVolume {
    cells: HashMap<GridPos, Block>,
    min: IVec3,
    max: IVec3,
    raycast_config: RaycastConfig,
    max_ray_distance: f32,
}

impl Default for BlockVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockVolume {
    /// Create the default 32x32x32 volume anchored at the origin.
    pub fn new() -> Self {
        Self::with_bounds(IVec3::ZERO, IVec3::splat(VOLUME_EDGE))
    }

    /// Create a volume spanning `[min, max)` in cells.
    pub fn with_bounds(min: IVec3, max: IVec3) -> Self {
        Self {
            cells: HashMap::new(),
            min,
            max,
            raycast_config: RaycastConfig::default(),
            max_ray_distance: 256.0,
        }
    }

    /// Set the projection parameters used for cursor rays.
    pub fn set_raycast_config(&mut self, config: RaycastConfig) {
        self.raycast_config = config;
    }

    /// Number of occupied cells.
    pub fn block_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate occupied cells.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Block)> {
        self.cells.iter().map(|(&pos, block)| (pos, block))
    }

    /// Walk the ray through the grid and return the first occupied cell, or
    /// the floor cell when the ray reaches the bottom plane of the volume.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        let dir = dir.normalize_or_zero();
        if dir.length_squared() < 1e-8 || max_dist <= 0.0 {
            return None;
        }

        let block_hit = self.raycast_cells(origin, dir, max_dist);
        let floor_hit = self.raycast_floor(origin, dir, max_dist);

        match (block_hit, floor_hit) {
            (Some(block), Some(floor)) => {
                let t_block = (block.point - origin).length();
                let t_floor = (floor.point - origin).length();
                Some(if t_block <= t_floor { block } else { floor })
            }
            (hit, None) | (None, hit) => hit,
        }
    }

    /// DDA traversal over occupied cells.
    fn raycast_cells(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        let mut cell = GridPos::from_world(origin).as_ivec3();
        let step = IVec3::new(sign_i(dir.x), sign_i(dir.y), sign_i(dir.z));

        let mut t_max_x = dda_t_max(origin.x, dir.x, cell.x, step.x);
        let mut t_max_y = dda_t_max(origin.y, dir.y, cell.y, step.y);
        let mut t_max_z = dda_t_max(origin.z, dir.z, cell.z, step.z);
        let t_delta_x = dda_t_delta(dir.x);
        let t_delta_y = dda_t_delta(dir.y);
        let t_delta_z = dda_t_delta(dir.z);

        let mut t = 0.0f32;
        let mut entry_normal = IVec3::ZERO;
        // A diagonal ray crosses up to sqrt(3) boundaries per unit distance.
        let max_steps = (max_dist * 2.0).ceil() as usize + 4;

        for _ in 0..max_steps {
            let coord = GridPos::from(cell);
            if self.block_at(coord).is_some() {
                return Some(RayHit {
                    cell: coord,
                    point: origin + dir * t,
                    normal: entry_normal,
                });
            }

            if t_max_x <= t_max_y && t_max_x <= t_max_z {
                cell.x += step.x;
                t = t_max_x;
                t_max_x += t_delta_x;
                entry_normal = IVec3::new(-step.x, 0, 0);
            } else if t_max_y <= t_max_x && t_max_y <= t_max_z {
                cell.y += step.y;
                t = t_max_y;
                t_max_y += t_delta_y;
                entry_normal = IVec3::new(0, -step.y, 0);
            } else {
                cell.z += step.z;
                t = t_max_z;
                t_max_z += t_delta_z;
                entry_normal = IVec3::new(0, 0, -step.z);
            }

            if t > max_dist {
                break;
            }
        }

        None
    }

    /// Intersection with the floor plane at the bottom of the volume,
    /// limited to the volume's footprint. The returned cell is the one just
    /// below the plane, so its +Y neighbour is the first in-bounds cell.
    fn raycast_floor(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<RayHit> {
        if dir.y.abs() < 1e-6 {
            return None;
        }
        let floor_y = self.min.y as f32;
        let t = (floor_y - origin.y) / dir.y;
        if t < 0.0 || t > max_dist {
            return None;
        }

        let point = origin + dir * t;
        let in_footprint = point.x >= self.min.x as f32
            && point.x < self.max.x as f32
            && point.z >= self.min.z as f32
            && point.z < self.max.z as f32;
        if !in_footprint {
            return None;
        }

        Some(RayHit {
            cell: GridPos::new(
                point.x.floor() as i32,
                self.min.y - 1,
                point.z.floor() as i32,
            ),
            point,
            normal: IVec3::Y,
        })
    }
}

impl VoxelWorld for BlockVolume {
    fn contains(&self, cell: GridPos) -> bool {
        cell.x >= self.min.x
            && cell.y >= self.min.y
            && cell.z >= self.min.z
            && cell.x < self.max.x
            && cell.y < self.max.y
            && cell.z < self.max.z
    }

    fn block_at(&self, cell: GridPos) -> Option<&Block> {
        self.cells.get(&cell)
    }

    fn add_block(&mut self, cell: GridPos, block: Block) {
        if !self.contains(cell) {
            trace!("add_block outside bounds at {cell:?}, ignored");
            return;
        }
        self.cells.insert(cell, block);
    }

    fn remove_block(&mut self, cell: GridPos) -> Option<Block> {
        self.cells.remove(&cell)
    }
}

impl RaycastProvider for BlockVolume {
    fn cursor_ray_hit(&self, pose: &CameraPose, cursor: (f32, f32)) -> Option<RayHit> {
        let (origin, dir) = screen_ray(pose, cursor, &self.raycast_config);
        self.raycast(origin, dir, self.max_ray_distance)
    }
}

fn sign_i(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn dda_t_delta(dir_component: f32) -> f32 {
    if dir_component.abs() < 1e-6 {
        f32::INFINITY
    } else {
        1.0 / dir_component.abs()
    }
}

fn dda_t_max(origin_component: f32, dir_component: f32, cell: i32, step: i32) -> f32 {
    if step == 0 || dir_component.abs() < 1e-6 {
        return f32::INFINITY;
    }
    let boundary = if step > 0 {
        cell as f32 + 1.0
    } else {
        cell as f32
    };
    (boundary - origin_component) / dir_component
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone() -> Block {
        Block::new("stone", "stone", "cube_up")
    }

    #[test]
    fn test_place_get_remove_roundtrip() {
        let mut volume = BlockVolume::new();
        let cell = GridPos::new(2, 3, 1);
        volume.add_block(cell, stone());
        assert_eq!(volume.block_at(cell).unwrap().name, "stone");
        assert_eq!(volume.block_count(), 1);
        assert_eq!(volume.remove_block(cell).unwrap().name, "stone");
        assert!(volume.block_at(cell).is_none());
    }

    #[test]
    fn test_add_outside_bounds_ignored() {
        let mut volume = BlockVolume::new();
        volume.add_block(GridPos::new(-1, 0, 0), stone());
        volume.add_block(GridPos::new(0, VOLUME_EDGE, 0), stone());
        assert_eq!(volume.block_count(), 0);
    }

    #[test]
    fn test_contains_bounds() {
        let volume = BlockVolume::new();
        assert!(volume.contains(GridPos::new(0, 0, 0)));
        assert!(volume.contains(GridPos::new(31, 31, 31)));
        assert!(!volume.contains(GridPos::new(32, 0, 0)));
        assert!(!volume.contains(GridPos::new(0, -1, 0)));
    }

    #[test]
    fn test_raycast_hits_first_occupied_cell() {
        let mut volume = BlockVolume::new();
        volume.add_block(GridPos::new(2, 0, 0), stone());
        volume.add_block(GridPos::new(5, 0, 0), stone());

        let hit = volume
            .raycast(Vec3::new(0.5, 0.5, 0.5), Vec3::X, 16.0)
            .unwrap();
        assert_eq!(hit.cell, GridPos::new(2, 0, 0));
        // Entered through the -X face.
        assert_eq!(hit.normal, IVec3::new(-1, 0, 0));
        assert!((hit.point.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_top_face_normal() {
        let mut volume = BlockVolume::new();
        volume.add_block(GridPos::new(4, 0, 4), stone());

        let hit = volume
            .raycast(Vec3::new(4.5, 10.0, 4.5), Vec3::NEG_Y, 32.0)
            .unwrap();
        assert_eq!(hit.cell, GridPos::new(4, 0, 4));
        assert_eq!(hit.normal, IVec3::Y);
    }

    #[test]
    fn test_raycast_floor_fallback() {
        let volume = BlockVolume::new();
        let hit = volume
            .raycast(
                Vec3::new(16.5, 10.0, 16.5),
                Vec3::new(0.0, -1.0, 0.0),
                64.0,
            )
            .unwrap();
        // Floor hit reports the cell below the plane with an up normal, so
        // the +Y neighbour is the first placeable cell.
        assert_eq!(hit.cell, GridPos::new(16, -1, 16));
        assert_eq!(hit.normal, IVec3::Y);
        let neighbour = hit.cell.offset(hit.normal);
        assert!(volume.contains(neighbour));
    }

    #[test]
    fn test_raycast_block_beats_floor() {
        let mut volume = BlockVolume::new();
        volume.add_block(GridPos::new(16, 0, 16), stone());
        let hit = volume
            .raycast(Vec3::new(16.5, 10.0, 16.5), Vec3::NEG_Y, 64.0)
            .unwrap();
        assert_eq!(hit.cell, GridPos::new(16, 0, 16));
    }

    #[test]
    fn test_raycast_miss_outside_footprint() {
        let volume = BlockVolume::new();
        let hit = volume.raycast(Vec3::new(-50.0, 10.0, -50.0), Vec3::NEG_Y, 64.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_raycast_degenerate_direction() {
        let volume = BlockVolume::new();
        assert!(volume.raycast(Vec3::ZERO, Vec3::ZERO, 10.0).is_none());
        assert!(volume.raycast(Vec3::ZERO, Vec3::X, 0.0).is_none());
    }

    #[test]
    fn test_grid_pos_center_and_from_world() {
        let cell = GridPos::new(3, 0, -2);
        assert_eq!(cell.center(), Vec3::new(3.5, 0.5, -1.5));
        assert_eq!(GridPos::from_world(Vec3::new(3.9, 0.1, -1.2)), cell);
    }

    #[test]
    fn test_cursor_ray_hit_through_pose() {
        let mut volume = BlockVolume::new();
        volume.add_block(GridPos::new(16, 0, 16), stone());
        let pose = CameraPose {
            position: Vec3::new(16.5, 20.0, 16.5),
            target: Vec3::new(16.5, 0.0, 16.5),
            up: Vec3::Y,
        };
        let hit = volume.cursor_ray_hit(&pose, (0.5, 0.5)).unwrap();
        assert_eq!(hit.cell, GridPos::new(16, 0, 16));
    }
}
