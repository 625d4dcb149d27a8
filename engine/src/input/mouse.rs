//! Mouse Input Module
//!
//! Mouse state tracking for position, buttons and scroll wheel, decoupled
//! from winit. Positions are kept both in raw pixels and in normalized UV
//! coordinates (origin bottom-left, Y up) for raycasting; motion and scroll
//! accumulate between frames and are drained once per tick by the mapper.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// State of all mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {}
        }
    }

    /// Check if a specific button is pressed.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    /// Check if any button is pressed.
    pub fn any_pressed(&self) -> bool {
        self.left || self.middle || self.right
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 2D position, used for mouse coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to tuple.
    pub fn to_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Scroll wheel delta, can be line-based or pixel-based.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = up/forward)
    pub y: f32,
}

impl ScrollDelta {
    /// Create from line delta (common for mouse wheels).
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create from pixel delta (common for trackpads).
    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }

    /// Check if there's any scroll movement.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Complete mouse state tracking.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Current mouse position in normalized UV coordinates (0.0 to 1.0).
    /// Origin is bottom-left, Y increases upward.
    pub position: Option<Position>,

    /// Current mouse position in raw pixel coordinates.
    pub position_pixels: Option<Position>,

    /// Current button states.
    pub buttons: ButtonState,

    /// Whether the mouse is inside the window.
    pub in_window: bool,

    /// Motion accumulated since the last `take_delta`, in UV units.
    accumulated_delta: Position,

    /// Scroll accumulated since the last `take_scroll`.
    accumulated_scroll: ScrollDelta,
}

impl MouseState {
    /// Create a new mouse state with no position and all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update mouse position from raw pixel coordinates.
    ///
    /// # Arguments
    /// * `x` - X position in pixels
    /// * `y` - Y position in pixels (origin at top)
    /// * `window_width` - Window width in pixels
    /// * `window_height` - Window height in pixels
    pub fn set_position(&mut self, x: f64, y: f64, window_width: u32, window_height: u32) {
        self.position_pixels = Some(Position::new(x as f32, y as f32));

        // Normalized UV coordinates (bottom-left origin, Y up)
        let norm_x = x as f32 / window_width as f32;
        let norm_y = 1.0 - (y as f32 / window_height as f32);
        let next = Position::new(norm_x, norm_y);

        if let Some(previous) = self.position {
            self.accumulated_delta.x += next.x - previous.x;
            self.accumulated_delta.y += next.y - previous.y;
        }
        self.position = Some(next);
    }

    /// Get the normalized position as a tuple, if available.
    pub fn normalized_position(&self) -> Option<(f32, f32)> {
        self.position.map(Position::to_tuple)
    }

    /// Handle a mouse button press/release event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    /// Handle a scroll wheel event; deltas accumulate until drained.
    pub fn add_scroll(&mut self, delta: ScrollDelta) {
        self.accumulated_scroll.x += delta.x;
        self.accumulated_scroll.y += delta.y;
    }

    /// Drain the motion accumulated since the last call, in UV units.
    pub fn take_delta(&mut self) -> Position {
        std::mem::take(&mut self.accumulated_delta)
    }

    /// Drain the scroll accumulated since the last call.
    pub fn take_scroll(&mut self) -> ScrollDelta {
        std::mem::take(&mut self.accumulated_scroll)
    }

    /// Handle mouse entering the window.
    pub fn enter_window(&mut self) {
        self.in_window = true;
    }

    /// Handle mouse leaving the window. Clears positions so re-entry does not
    /// produce a motion spike.
    pub fn leave_window(&mut self) {
        self.in_window = false;
        self.position = None;
        self.position_pixels = None;
        self.accumulated_delta = Position::default();
    }

    /// Reset all mouse state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
