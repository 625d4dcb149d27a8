//! Orbit Camera Module
//!
//! A spherical-coordinate orbit camera with spring-damped ("rubber band")
//! distance follow. The camera orbits a movable focus point using yaw, pitch
//! and distance; zoom and pan adjust the authoritative targets immediately
//! while the rendered distance catches up over a few frames, so input feels
//! instantaneous without visual jitter.
//!
//! Controls (as routed by the editor layer):
//! - Drag-rotate: yaw/pitch deltas, applied only while dragging
//! - Scroll / PageUp / PageDown: zoom (changes target distance)
//! - Move / strafe / bounce: translate the focus point
//! - Center: snap the focus point back to the configured home

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Default distance between camera and focus point.
const DEFAULT_DISTANCE: f32 = 40.0;
/// Default yaw, placing the camera on the +Z side of the target.
const DEFAULT_YAW: f32 = FRAC_PI_2;
/// Default pitch: 30 degrees above the horizon.
const DEFAULT_PITCH: f32 = 30.0 * std::f32::consts::PI / 180.0;
/// Pitch limit: 89 degrees in radians, keeps the pole singularity out.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;
/// Distance at which the smoothed distance counts as converged.
const CONVERGENCE_EPSILON: f32 = 0.01;

/// Tuning parameters for the orbit camera.
///
/// The rubber band window is `[target_distance + stretch_min,
/// target_distance + stretch_max]`: while chasing, the raw camera distance is
/// clamped into that window before being blended toward the target distance.
#[derive(Debug, Clone, Copy)]
pub struct OrbitConfig {
    /// Horizontal and vertical rotation speed (radians per unit input per second).
    pub rotation_speed: f32,
    /// Cap applied to a single raw pitch input, suppresses mouse-motion spikes.
    pub max_rotation_speed: f32,
    /// Zoom speed (distance units per unit input per second).
    pub zoom_speed: f32,
    /// Focus point translation speed (units per second).
    pub move_speed: f32,
    /// Max zoom-in distance.
    pub min_distance: f32,
    /// Max zoom-out distance.
    pub max_distance: f32,
    /// Minimum pitch (radians).
    pub min_pitch: f32,
    /// Maximum pitch (radians).
    pub max_pitch: f32,
    /// Invert mouse x-axis movement (camera yaw).
    pub invert_x: bool,
    /// Invert mouse y-axis movement (camera pitch).
    pub invert_y: bool,
    /// Enable the rubber-band distance smoothing.
    pub smooth_motion: bool,
    /// Smoothing sensitivity. The lower the value, the more the band stretches.
    pub smooth_sensitivity: f32,
    /// Lower edge of the rubber band window, relative to the target distance.
    pub stretch_min: f32,
    /// Upper edge of the rubber band window, relative to the target distance.
    pub stretch_max: f32,
    /// Focus point movement below this threshold does not re-trigger chasing.
    pub discard_threshold: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 2.5,
            max_rotation_speed: 4.0,
            zoom_speed: 50.0,
            move_speed: 6.0,
            min_distance: 1.0,
            max_distance: 100.0,
            min_pitch: -PITCH_LIMIT,
            max_pitch: PITCH_LIMIT,
            invert_x: false,
            invert_y: false,
            smooth_motion: true,
            smooth_sensitivity: 30.0,
            stretch_min: -1.0,
            stretch_max: 1.0,
            discard_threshold: 0.002,
        }
    }
}

/// Camera pose published once per frame: a position looking at a target with
/// a fixed world-up vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    /// The identity pose the camera is reset to on deactivation.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl CameraPose {
    /// The normalized direction the camera is looking.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Compute the view (look-at) matrix for this pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Orbit camera controller state.
///
/// `distance` is the actual, smoothed distance between camera and target; it
/// deviates from `target_distance` while the camera is moving around but
/// always returns to it. `target_distance` is the authoritative value that
/// zoom input changes immediately.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub config: OrbitConfig,
    /// Rotation around the vertical axis, wrapped into [0, 2π).
    pub yaw: f32,
    /// Rotation above/below the horizon, clamped to the configured limits.
    pub pitch: f32,
    /// Focus point the camera returns to on `recenter`.
    pub home: Vec3,
    distance: f32,
    target_distance: f32,
    target_location: Vec3,
    target_offset: Vec3,
    position: Vec3,
    previous_target: Vec3,
    chasing: bool,
    dragging: bool,
    distance_lerp: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            config: OrbitConfig::default(),
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            home: Vec3::ZERO,
            distance: DEFAULT_DISTANCE,
            target_distance: DEFAULT_DISTANCE,
            target_location: Vec3::ZERO,
            target_offset: Vec3::ZERO,
            position: Vec3::ZERO,
            previous_target: Vec3::ZERO,
            chasing: false,
            dragging: false,
            distance_lerp: 0.0,
        }
    }
}

impl OrbitCamera {
    /// Create a new orbit camera with default settings, focused on the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an orbit camera focused on a custom home point.
    pub fn with_home(home: Vec3) -> Self {
        Self {
            home,
            target_location: home,
            previous_target: home,
            ..Self::default()
        }
    }

    /// Current smoothed camera distance.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Authoritative distance the camera converges to.
    #[inline]
    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Current focus point (without the live offset).
    #[inline]
    pub fn target_location(&self) -> Vec3 {
        self.target_location
    }

    /// Last computed camera position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Whether the smoothed distance is still catching up with the target.
    #[inline]
    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    /// Whether drag-rotate is currently engaged.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Engage or release drag-rotate. Yaw/pitch deltas only apply while
    /// dragging; the editor layer releases cursor capture when not dragging.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Set the live focus point offset added on top of the target location.
    pub fn set_target_offset(&mut self, offset: Vec3) {
        self.target_offset = offset;
    }

    /// Snap the focus point back to the home position.
    pub fn recenter(&mut self) {
        self.target_location = self.home;
    }

    /// Apply a yaw rotation delta.
    ///
    /// Yaw accumulates unclamped and wraps into [0, 2π); a full rotation is
    /// legal and continuous across the wrap.
    pub fn apply_yaw(&mut self, value: f32, dt: f32) {
        if !self.dragging {
            return;
        }
        let sign = if self.config.invert_x { -1.0 } else { 1.0 };
        self.yaw += value * dt * self.config.rotation_speed * sign;
        if self.yaw < 0.0 {
            self.yaw += TAU;
        }
        if self.yaw > TAU {
            self.yaw -= TAU;
        }
    }

    /// Apply a pitch rotation delta.
    ///
    /// The raw input is clamped to `max_rotation_speed` first; a sudden mouse
    /// movement can produce very large values.
    pub fn apply_pitch(&mut self, value: f32, dt: f32) {
        if !self.dragging {
            return;
        }
        let capped = value.clamp(
            -self.config.max_rotation_speed,
            self.config.max_rotation_speed,
        );
        let sign = if self.config.invert_y { -1.0 } else { 1.0 };
        self.pitch += capped * dt * self.config.rotation_speed * sign;
        self.pitch = self.pitch.clamp(self.config.min_pitch, self.config.max_pitch);
    }

    /// Apply a zoom delta. Positive input zooms in.
    pub fn apply_zoom(&mut self, value: f32, dt: f32) {
        self.target_distance -= value * dt * self.config.zoom_speed;
        self.target_distance = self
            .target_distance
            .clamp(self.config.min_distance, self.config.max_distance);
        self.chasing = true;
    }

    /// Move the focus point along the camera's forward direction projected
    /// onto the ground plane.
    pub fn apply_move(&mut self, value: f32, dt: f32) {
        let forward = Vec3::new(-self.yaw.cos(), 0.0, -self.yaw.sin());
        self.target_location += forward * value * self.config.move_speed * dt;
        self.chasing = true;
    }

    /// Move the focus point along the camera's left direction.
    pub fn apply_strafe(&mut self, value: f32, dt: f32) {
        let left = Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos());
        self.target_location += left * value * self.config.move_speed * dt;
        self.chasing = true;
    }

    /// Move the focus point along the world up axis.
    pub fn apply_bounce(&mut self, value: f32, dt: f32) {
        self.target_location += Vec3::Y * value * self.config.move_speed * dt;
        self.chasing = true;
    }

    /// Advance the camera one frame and publish the resulting pose.
    ///
    /// Must be called once per frame. With smoothing enabled the distance is
    /// the raw camera distance clamped into the rubber band window and blended
    /// toward the target distance; once within `0.01` of the target the chase
    /// ends and the blend factor resets.
    pub fn tick(&mut self, dt: f32) -> CameraPose {
        let target = self.target_location + self.target_offset;

        if self.config.smooth_motion {
            if (target - self.previous_target).length() > self.config.discard_threshold {
                self.chasing = true;
            }

            if self.chasing {
                let raw = (target - self.position).length().clamp(
                    self.target_distance + self.config.stretch_min,
                    self.target_distance + self.config.stretch_max,
                );
                self.distance_lerp = (self.distance_lerp
                    + dt * dt * self.config.smooth_sensitivity * 0.05)
                    .min(1.0);
                self.distance = lerp(self.distance_lerp, raw, self.target_distance);
                if (self.distance - self.target_distance).abs() <= CONVERGENCE_EPSILON {
                    self.distance_lerp = 0.0;
                    self.chasing = false;
                }
            }
        } else {
            self.distance = self.target_distance;
        }

        // Spherical to Cartesian with the polar angle measured from vertical.
        let horizontal = self.distance * (FRAC_PI_2 - self.pitch).sin();
        self.position = target
            + Vec3::new(
                horizontal * self.yaw.cos(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.sin(),
            );

        self.previous_target = target;

        CameraPose {
            position: self.position,
            target,
            up: Vec3::Y,
        }
    }

    /// Reset all state back to the defaults, keeping config and home.
    pub fn reset(&mut self) {
        let config = self.config;
        let home = self.home;
        *self = Self::with_home(home);
        self.config = config;
    }
}

fn lerp(t: f32, from: f32, to: f32) -> f32 {
    from + (to - from) * t
}
