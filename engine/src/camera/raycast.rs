//! Raycast Module
//!
//! Converts a cursor position on screen into a world-space ray through the
//! camera, for block picking and placement.

use glam::Vec3;

use super::orbit::CameraPose;

/// Projection parameters needed to turn screen coordinates into rays.
#[derive(Clone, Copy, Debug)]
pub struct RaycastConfig {
    /// Screen aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            fov: 1.2, // ~69 degrees
        }
    }
}

impl RaycastConfig {
    /// Create a raycast config with the given aspect ratio.
    pub fn with_aspect(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            ..Default::default()
        }
    }
}

/// Convert normalized cursor coordinates to a world-space ray.
///
/// # Arguments
/// * `pose` - Camera pose for the current frame
/// * `cursor` - Normalized screen coordinates (0-1, 0-1), origin bottom-left
/// * `config` - Projection parameters
///
/// # Returns
/// Tuple of (ray_origin, ray_direction), direction normalized.
pub fn screen_ray(pose: &CameraPose, cursor: (f32, f32), config: &RaycastConfig) -> (Vec3, Vec3) {
    // Convert to normalized device coordinates (-1 to 1)
    let ndc = (cursor.0 * 2.0 - 1.0, cursor.1 * 2.0 - 1.0);
    let half_fov_tan = (config.fov * 0.5).tan();

    let forward = pose.forward();

    // Looking straight up or down: the world-up cross degenerates, fall back
    // to the world X axis as the right reference.
    let (right, up) = if forward.y.abs() > 0.99 {
        let right = Vec3::X;
        let up = right.cross(forward).normalize();
        (right, up)
    } else {
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward).normalize();
        (right, up)
    };

    let direction = (forward
        + right * ndc.0 * half_fov_tan * config.aspect_ratio
        + up * ndc.1 * half_fov_tan)
        .normalize();

    (pose.position, direction)
}
