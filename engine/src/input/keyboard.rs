//! Keyboard Input Module
//!
//! Keyboard state tracking, decoupled from winit to use generic key codes.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
///
/// Covers the keys the editor binds by default plus common candidates for
/// remapping. Anything else maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    Q,
    R,
    S,
    V,
    W,
    X,
    Z,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,
    Enter,
    Tab,
    Space,
    Home,
    End,
    PageUp,
    PageDown,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks which keys are currently held down.
///
/// The mapper reads this every frame; bindings are data-driven, so the state
/// keeps a plain pressed-set rather than named booleans.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    /// Check if a specific key is currently held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Check if any key is currently held.
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Release all keys. Call when the window loses focus to prevent stuck keys.
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}
