//! Camera Module
//!
//! Provides orbit camera control and screen-space ray generation.
//! This is window-system agnostic - it only manages camera state and
//! transformations. Input handling is done externally and passed to the
//! controller via delta values.

pub mod orbit;
pub mod raycast;

pub use orbit::{CameraPose, OrbitCamera, OrbitConfig};
pub use raycast::{RaycastConfig, screen_ray};
