//! Camera Control
//!
//! Lifecycle wrapper around the orbit camera: owns the Camera input group,
//! routes the frame's analog values into the controller, handles the
//! drag-rotate gate (with cursor capture) and the recenter action, and
//! publishes the resulting pose into the shared context.

use glam::Vec3;
use log::info;

use crate::camera::{CameraPose, OrbitCamera};
use crate::input::{InputFrame, InputFunction, InputGroup};

use super::{EditorState, StateCtx};

/// The editor's camera controller.
pub struct CameraControl {
    orbit: OrbitCamera,
}

impl Default for CameraControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControl {
    /// Create a camera control focused on the origin.
    pub fn new() -> Self {
        Self {
            orbit: OrbitCamera::new(),
        }
    }

    /// Create a camera control focused on a custom home point.
    pub fn with_home(home: Vec3) -> Self {
        Self {
            orbit: OrbitCamera::with_home(home),
        }
    }

    /// Set the home focus point and snap the camera to it.
    pub fn set_home(&mut self, home: Vec3) {
        self.orbit.home = home;
        self.orbit.recenter();
    }

    /// The underlying orbit camera.
    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    /// Mutable access to the orbit camera (tuning, tests).
    pub fn orbit_mut(&mut self) -> &mut OrbitCamera {
        &mut self.orbit
    }
}

impl EditorState for CameraControl {
    fn activate(&mut self, ctx: &mut StateCtx) {
        ctx.mapper.activate_group(InputGroup::Camera);
        self.orbit.recenter();
        info!("Camera control activated");
    }

    fn deactivate(&mut self, ctx: &mut StateCtx) {
        ctx.mapper.deactivate_group(InputGroup::Camera);
        ctx.cursor.release();
        self.orbit.reset();
        ctx.camera_pose = CameraPose::default();
        info!("Camera control deactivated");
    }

    fn tick(&mut self, ctx: &mut StateCtx, frame: &InputFrame) {
        if frame.was_pressed(InputFunction::Drag) {
            self.orbit.set_dragging(true);
            ctx.cursor.capture();
        }
        if frame.was_released(InputFunction::Drag) {
            self.orbit.set_dragging(false);
            ctx.cursor.release();
        }
        if frame.was_pressed(InputFunction::Center) {
            self.orbit.recenter();
        }

        for (function, value) in frame.analog() {
            match function {
                // Pitch is driven by the mouse Y-axis, yaw by the X-axis.
                InputFunction::XRotate => self.orbit.apply_pitch(value, frame.dt),
                InputFunction::YRotate => self.orbit.apply_yaw(value, frame.dt),
                InputFunction::Zoom => self.orbit.apply_zoom(value, frame.dt),
                InputFunction::Move => self.orbit.apply_move(value, frame.dt),
                InputFunction::Strafe => self.orbit.apply_strafe(value, frame.dt),
                InputFunction::Bounce => self.orbit.apply_bounce(value, frame.dt),
                _ => {}
            }
        }

        ctx.camera_pose = self.orbit.tick(frame.dt);
    }
}
