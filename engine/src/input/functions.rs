//! Input Functions Module
//!
//! Logical editor input functions, independent of their physical mappings,
//! and the immutable per-tick snapshot (`InputFrame`) that delivers them to
//! the controllers. Functions belong to groups; a group only emits while a
//! controller holding it active is enabled, so deactivating a controller
//! stops delivery in the same call.

use std::collections::HashSet;

/// Logical input functions the editor responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFunction {
    /// Pitch rotation (mouse Y axis while dragging). Analog.
    XRotate,
    /// Yaw rotation (mouse X axis while dragging). Analog.
    YRotate,
    /// Zoom in/out (wheel, PageUp/PageDown). Analog.
    Zoom,
    /// Move the focus point forward/backward. Analog.
    Move,
    /// Strafe the focus point left/right. Analog.
    Strafe,
    /// Move the focus point up/down. Analog.
    Bounce,
    /// Drag-rotate gate (middle mouse, V). Digital.
    Drag,
    /// Snap the focus point back home (Home). Digital.
    Center,
    /// Place a block at the add cursor (left mouse). Digital.
    PlaceBlock,
    /// Remove the block under the cursor (right mouse). Digital.
    RemoveBlock,
    /// Rotate the block under the cursor (R). Digital.
    RotateBlock,
}

impl InputFunction {
    /// The group this function belongs to.
    pub fn group(self) -> InputGroup {
        match self {
            Self::XRotate
            | Self::YRotate
            | Self::Zoom
            | Self::Move
            | Self::Strafe
            | Self::Bounce
            | Self::Drag
            | Self::Center => InputGroup::Camera,
            Self::PlaceBlock | Self::RemoveBlock | Self::RotateBlock => InputGroup::Builder,
        }
    }

    /// Whether this function carries an analog value (vs on/off state).
    pub fn is_analog(self) -> bool {
        matches!(
            self,
            Self::XRotate | Self::YRotate | Self::Zoom | Self::Move | Self::Strafe | Self::Bounce
        )
    }
}

/// Input function groups, activated and deactivated with the controller that
/// consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputGroup {
    Camera,
    Builder,
}

/// Edge transition of a digital function within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    Pressed,
    Released,
}

/// Immutable snapshot of one frame of logical input.
///
/// Analog entries carry normalized rate values (the controllers multiply by
/// `dt` and their own speeds). Digital functions appear as edges on the frame
/// they change and in the held set while on. `now_ms` is the frame's
/// wall-clock reference used for click debouncing.
#[derive(Debug, Clone)]
pub struct InputFrame {
    pub dt: f32,
    pub now_ms: u64,
    /// Cursor position in normalized UV coordinates, if inside the viewport.
    pub cursor: Option<(f32, f32)>,
    analog: Vec<(InputFunction, f32)>,
    edges: Vec<(InputFunction, ButtonPhase)>,
    held: HashSet<InputFunction>,
}

impl InputFrame {
    /// Create an empty frame carrying only timing information.
    pub fn empty(dt: f32, now_ms: u64) -> Self {
        Self {
            dt,
            now_ms,
            cursor: None,
            analog: Vec::new(),
            edges: Vec::new(),
            held: HashSet::new(),
        }
    }

    /// Iterate the analog values delivered this frame.
    pub fn analog(&self) -> impl Iterator<Item = (InputFunction, f32)> + '_ {
        self.analog.iter().copied()
    }

    /// Sum of the analog values for one function this frame.
    pub fn value(&self, function: InputFunction) -> f32 {
        self.analog
            .iter()
            .filter(|(f, _)| *f == function)
            .map(|(_, v)| v)
            .sum()
    }

    /// Whether a digital function is currently on.
    pub fn is_held(&self, function: InputFunction) -> bool {
        self.held.contains(&function)
    }

    /// Whether a digital function transitioned to on this frame.
    pub fn was_pressed(&self, function: InputFunction) -> bool {
        self.edges
            .contains(&(function, ButtonPhase::Pressed))
    }

    /// Whether a digital function transitioned to off this frame.
    pub fn was_released(&self, function: InputFunction) -> bool {
        self.edges
            .contains(&(function, ButtonPhase::Released))
    }

    /// Record an analog value.
    pub fn push_analog(&mut self, function: InputFunction, value: f32) {
        self.analog.push((function, value));
    }

    /// Record a digital edge, updating the held set accordingly.
    pub fn push_edge(&mut self, function: InputFunction, phase: ButtonPhase) {
        self.edges.push((function, phase));
        match phase {
            ButtonPhase::Pressed => {
                self.held.insert(function);
            }
            ButtonPhase::Released => {
                self.held.remove(&function);
            }
        }
    }

    /// Mark a digital function as held without an edge (it was already on).
    pub fn push_held(&mut self, function: InputFunction) {
        self.held.insert(function);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_groups() {
        assert_eq!(InputFunction::Zoom.group(), InputGroup::Camera);
        assert_eq!(InputFunction::Drag.group(), InputGroup::Camera);
        assert_eq!(InputFunction::PlaceBlock.group(), InputGroup::Builder);
        assert_eq!(InputFunction::RotateBlock.group(), InputGroup::Builder);
    }

    #[test]
    fn test_analog_classification() {
        assert!(InputFunction::XRotate.is_analog());
        assert!(InputFunction::Bounce.is_analog());
        assert!(!InputFunction::Drag.is_analog());
        assert!(!InputFunction::PlaceBlock.is_analog());
    }

    #[test]
    fn test_frame_value_sums() {
        let mut frame = InputFrame::empty(0.016, 0);
        frame.push_analog(InputFunction::Move, 1.0);
        frame.push_analog(InputFunction::Move, -0.25);
        frame.push_analog(InputFunction::Zoom, 2.0);
        assert!((frame.value(InputFunction::Move) - 0.75).abs() < 1e-6);
        assert_eq!(frame.value(InputFunction::Strafe), 0.0);
    }

    #[test]
    fn test_frame_edges_update_held() {
        let mut frame = InputFrame::empty(0.016, 0);
        frame.push_edge(InputFunction::Drag, ButtonPhase::Pressed);
        assert!(frame.was_pressed(InputFunction::Drag));
        assert!(frame.is_held(InputFunction::Drag));

        frame.push_edge(InputFunction::Drag, ButtonPhase::Released);
        assert!(frame.was_released(InputFunction::Drag));
        assert!(!frame.is_held(InputFunction::Drag));
    }

    #[test]
    fn test_held_without_edge() {
        let mut frame = InputFrame::empty(0.016, 0);
        frame.push_held(InputFunction::PlaceBlock);
        assert!(frame.is_held(InputFunction::PlaceBlock));
        assert!(!frame.was_pressed(InputFunction::PlaceBlock));
    }
}
