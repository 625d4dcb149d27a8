//! Input Module
//!
//! Provides platform-agnostic input handling for the editor. This module is
//! decoupled from any specific windowing system (like winit): the embedding
//! application feeds `KeyboardState` and `MouseState` from its event loop,
//! and the `InputMapper` turns them into logical input functions delivered
//! as one immutable `InputFrame` per tick.
//!
//! # Example
//!
//! ```rust,ignore
//! use block_forge_engine::input::{InputMapper, KeyboardState, MouseState, KeyCode};
//!
//! let mut mapper = InputMapper::with_default_bindings();
//! mapper.activate_group(InputGroup::Camera);
//!
//! let mut keyboard = KeyboardState::new();
//! let mut mouse = MouseState::new();
//! keyboard.handle_key(KeyCode::W, true);
//!
//! let frame = mapper.begin_frame(&keyboard, &mut mouse, 0.016, now_ms);
//! for (function, value) in frame.analog() {
//!     // Route to the controllers
//! }
//! ```

pub mod cursor;
pub mod functions;
pub mod keyboard;
pub mod mapper;
pub mod mouse;

// Re-export commonly used types at module level
pub use cursor::CursorCapture;
pub use functions::{ButtonPhase, InputFrame, InputFunction, InputGroup};
pub use keyboard::{KeyCode, KeyboardState};
pub use mapper::{InputMapper, MouseAxis};
pub use mouse::{ButtonState, MouseButton, MouseState, Position, ScrollDelta};
