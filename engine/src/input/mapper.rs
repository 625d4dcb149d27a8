//! Input Mapper Module
//!
//! Maps physical inputs (keys, mouse buttons, mouse axes) to logical input
//! functions and snapshots one `InputFrame` per tick from the current device
//! state. Functions only emit while their group is active; groups are
//! activated by the controller that consumes them and deactivated again when
//! that controller shuts down, so there are no dangling registrations.

use std::collections::{HashMap, HashSet};

use log::trace;

use super::functions::{ButtonPhase, InputFrame, InputFunction, InputGroup};
use super::keyboard::{KeyCode, KeyboardState};
use super::mouse::{MouseButton, MouseState};

/// Mouse axes that can drive analog functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAxis {
    /// Horizontal cursor motion.
    X,
    /// Vertical cursor motion.
    Y,
    /// Scroll wheel.
    Wheel,
}

/// Maps physical inputs to logical functions and produces per-tick frames.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    /// Keys acting as digital function triggers.
    key_buttons: HashMap<KeyCode, InputFunction>,
    /// Mouse buttons acting as digital function triggers.
    mouse_buttons: HashMap<MouseButton, InputFunction>,
    /// Keys that feed an analog function a constant rate while held.
    key_axes: HashMap<KeyCode, (InputFunction, f32)>,
    /// Mouse axes feeding analog functions, with a scale factor.
    mouse_axes: HashMap<MouseAxis, (InputFunction, f32)>,
    /// Groups currently delivering events.
    active_groups: HashSet<InputGroup>,
    /// Digital functions that were on at the end of the previous frame.
    held: HashSet<InputFunction>,
}

impl InputMapper {
    /// Create a mapper with no bindings and no active groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with the editor's default mappings.
    ///
    /// - Mouse Y / X while dragging: pitch / yaw
    /// - Wheel, PageUp/PageDown: zoom
    /// - W/S and Up/Down: move; A/D and Left/Right: strafe; Q/Z: up/down
    /// - Home: recenter; middle mouse or V: drag-rotate
    /// - Left mouse: place block; right mouse: remove block; R: rotate block
    pub fn with_default_bindings() -> Self {
        let mut mapper = Self::new();

        // Pitch movement (nose up / down) is done with the mouse Y-axis,
        // yaw movement (nose left / right) with the mouse X-axis.
        mapper.bind_mouse_axis(MouseAxis::Y, InputFunction::XRotate, 1.0);
        mapper.bind_mouse_axis(MouseAxis::X, InputFunction::YRotate, 1.0);
        mapper.bind_mouse_axis(MouseAxis::Wheel, InputFunction::Zoom, 0.05);
        mapper.bind_key_axis(KeyCode::PageUp, InputFunction::Zoom, 1.0);
        mapper.bind_key_axis(KeyCode::PageDown, InputFunction::Zoom, -1.0);
        mapper.bind_key_axis(KeyCode::W, InputFunction::Move, 1.0);
        mapper.bind_key_axis(KeyCode::ArrowUp, InputFunction::Move, 1.0);
        mapper.bind_key_axis(KeyCode::S, InputFunction::Move, -1.0);
        mapper.bind_key_axis(KeyCode::ArrowDown, InputFunction::Move, -1.0);
        mapper.bind_key_axis(KeyCode::A, InputFunction::Strafe, 1.0);
        mapper.bind_key_axis(KeyCode::ArrowLeft, InputFunction::Strafe, 1.0);
        mapper.bind_key_axis(KeyCode::D, InputFunction::Strafe, -1.0);
        mapper.bind_key_axis(KeyCode::ArrowRight, InputFunction::Strafe, -1.0);
        mapper.bind_key_axis(KeyCode::Q, InputFunction::Bounce, 1.0);
        mapper.bind_key_axis(KeyCode::Z, InputFunction::Bounce, -1.0);
        mapper.bind_key(KeyCode::V, InputFunction::Drag);
        mapper.bind_key(KeyCode::Home, InputFunction::Center);
        mapper.bind_mouse_button(MouseButton::Middle, InputFunction::Drag);
        mapper.bind_mouse_button(MouseButton::Left, InputFunction::PlaceBlock);
        mapper.bind_mouse_button(MouseButton::Right, InputFunction::RemoveBlock);
        mapper.bind_key(KeyCode::R, InputFunction::RotateBlock);

        trace!("Initialized default input mappings");
        mapper
    }

    /// Bind a key to a digital function.
    pub fn bind_key(&mut self, key: KeyCode, function: InputFunction) {
        self.key_axes.remove(&key);
        self.key_buttons.insert(key, function);
    }

    /// Bind a mouse button to a digital function.
    pub fn bind_mouse_button(&mut self, button: MouseButton, function: InputFunction) {
        self.mouse_buttons.insert(button, function);
    }

    /// Bind a key to an analog function; while held the function receives
    /// `scale` as a constant rate.
    pub fn bind_key_axis(&mut self, key: KeyCode, function: InputFunction, scale: f32) {
        self.key_buttons.remove(&key);
        self.key_axes.insert(key, (function, scale));
    }

    /// Bind a mouse axis to an analog function. Cursor motion is delivered as
    /// a rate (UV distance per second) multiplied by `scale`.
    pub fn bind_mouse_axis(&mut self, axis: MouseAxis, function: InputFunction, scale: f32) {
        self.mouse_axes.insert(axis, (function, scale));
    }

    /// Remove any binding for a key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_buttons.remove(&key);
        self.key_axes.remove(&key);
    }

    /// Start delivering a group's functions.
    pub fn activate_group(&mut self, group: InputGroup) {
        self.active_groups.insert(group);
    }

    /// Stop delivering a group's functions. Functions of the group that are
    /// mid-press are dropped silently, no release edge is delivered.
    pub fn deactivate_group(&mut self, group: InputGroup) {
        self.active_groups.remove(&group);
        self.held.retain(|f| f.group() != group);
    }

    /// Whether a group is currently delivering.
    pub fn is_group_active(&self, group: InputGroup) -> bool {
        self.active_groups.contains(&group)
    }

    /// Snapshot one frame of logical input from the current device state.
    ///
    /// Drains the mouse motion/scroll accumulators; call exactly once per
    /// rendered frame.
    pub fn begin_frame(
        &mut self,
        keyboard: &KeyboardState,
        mouse: &mut MouseState,
        dt: f32,
        now_ms: u64,
    ) -> InputFrame {
        let mut frame = InputFrame::empty(dt, now_ms);
        frame.cursor = mouse.normalized_position();

        // Digital: current on-set from device state, filtered by group.
        let mut current: HashSet<InputFunction> = HashSet::new();
        for (&key, &function) in &self.key_buttons {
            if keyboard.is_pressed(key) && self.is_group_active(function.group()) {
                current.insert(function);
            }
        }
        for (&button, &function) in &self.mouse_buttons {
            if mouse.buttons.is_pressed(button) && self.is_group_active(function.group()) {
                current.insert(function);
            }
        }

        for &function in &current {
            if self.held.contains(&function) {
                frame.push_held(function);
            } else {
                frame.push_edge(function, ButtonPhase::Pressed);
            }
        }
        for &function in &self.held {
            if !current.contains(&function) {
                frame.push_edge(function, ButtonPhase::Released);
            }
        }
        self.held = current;

        // Analog from held keys: constant rate while held.
        for (&key, &(function, scale)) in &self.key_axes {
            if keyboard.is_pressed(key) && self.is_group_active(function.group()) {
                frame.push_analog(function, scale);
            }
        }

        // Analog from mouse motion and scroll, normalized to rates so the
        // controllers' `value * dt` integration recovers the frame delta.
        let delta = mouse.take_delta();
        let scroll = mouse.take_scroll();
        if dt > 0.0 {
            for (&axis, &(function, scale)) in &self.mouse_axes {
                if !self.is_group_active(function.group()) {
                    continue;
                }
                let raw = match axis {
                    MouseAxis::X => delta.x,
                    MouseAxis::Y => delta.y,
                    MouseAxis::Wheel => scroll.y,
                };
                if raw != 0.0 {
                    frame.push_analog(function, raw / dt * scale);
                }
            }
        }

        frame
    }
}
