//! Input abstraction: winit events folded into per-frame key and pointer
//! samples for the camera controller.

pub mod keyboard;
pub mod keymap;
pub mod mouse;
pub mod sample;

pub use keyboard::KeyboardState;
pub use keymap::KeyMap;
pub use mouse::{MouseState, SCROLL_UNITS_PER_LINE};
pub use sample::{InputSample, Key, KeySet, Pointer};
