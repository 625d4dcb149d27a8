//! Block Forge Engine
//!
//! Core library for an interactive voxel-world editor: orbit the camera
//! around a grid of blocks and add, remove or rotate the block under the
//! cursor. This library is window-system and renderer agnostic - it only
//! manages controller state, input mapping and world queries. The embedding
//! application owns the window loop, feeds device state in, and draws the
//! published camera pose and placeholder transforms.
//!
//! # Modules
//!
//! - [`camera`] - orbit camera control with rubber-band follow, screen-space ray generation
//! - [`input`] - platform-agnostic input functions, bindings and device state
//! - [`world`] - voxel world interfaces, block catalog and the reference block volume
//! - [`editor`] - the editor controllers and the scheduler composing them
//!
//! # Example
//!
//! ```ignore
//! use block_forge_engine::editor::Workbench;
//! use block_forge_engine::input::{KeyboardState, MouseState};
//! use block_forge_engine::world::{BlockCatalog, BlockVolume};
//!
//! let mut workbench = Workbench::new(BlockVolume::new(), catalog);
//! workbench.activate();
//!
//! // Each frame: feed device state, tick, then draw the published outputs.
//! workbench.frame(&keyboard, &mut mouse, dt, now_ms);
//! let pose = workbench.camera_pose();
//! let markers = workbench.placeholders();
//! ```

pub mod camera;
pub mod input;
pub mod world;

// Editor modules (located in src/editor/ directory)
#[path = "../../src/editor/mod.rs"]
pub mod editor;

// Re-export commonly used types at crate level for convenience
pub use camera::{CameraPose, OrbitCamera, OrbitConfig, RaycastConfig};
pub use input::{
    InputFrame, InputFunction, InputGroup, InputMapper, KeyCode, KeyboardState, MouseButton,
    MouseState,
};
pub use world::{Block, BlockCatalog, BlockVolume, GridPos, RayHit, RaycastProvider, VoxelWorld};
