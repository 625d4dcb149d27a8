//! Cursor Capture Module
//!
//! Tracks whether the cursor should be captured by the camera (hidden and
//! grabbed while drag-rotating) or released to the UI. The editor starts
//! released; the camera controller captures for the duration of a drag. A
//! dirty-flag handshake tells the windowing layer when to apply the state.

/// Cursor capture state for the editor window.
#[derive(Debug, Clone)]
pub struct CursorCapture {
    /// Whether the cursor is captured for drag-rotate (hidden, grabbed).
    captured: bool,
    /// Whether the window currently has focus.
    has_focus: bool,
    /// Tracks if state changed and needs to be applied to the window.
    dirty: bool,
}

impl Default for CursorCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorCapture {
    /// Create a cursor state with the cursor released to the UI, the editor's
    /// resting state.
    pub fn new() -> Self {
        Self {
            captured: false,
            has_focus: true,
            dirty: true, // apply initial state
        }
    }

    /// Whether the cursor is currently captured.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Whether the window has focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Check if cursor state needs to be applied to the window.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after applying state to the window.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Capture the cursor for drag-rotate.
    pub fn capture(&mut self) {
        if !self.captured {
            self.captured = true;
            self.dirty = true;
        }
    }

    /// Release the cursor back to the UI.
    pub fn release(&mut self) {
        if self.captured {
            self.captured = false;
            self.dirty = true;
        }
    }

    /// Handle a window focus change. Losing focus releases the capture so the
    /// cursor is never stuck hidden over another window.
    pub fn handle_focus(&mut self, focused: bool) {
        self.has_focus = focused;
        if !focused {
            self.release();
        }
    }
}
