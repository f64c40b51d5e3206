//! Physical key bindings for the abstract [`Key`] set.

use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use crate::sample::{InputSample, Key, KeySet};

/// Maps physical keys to abstract keys. Several physical keys may drive
/// the same abstract key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    bindings: Vec<(KeyCode, Key)>,
}

impl Default for KeyMap {
    /// WASD movement, Space / Left Ctrl / C for vertical, backquote for the console.
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::KeyW, Key::Forward),
                (KeyCode::KeyS, Key::Back),
                (KeyCode::KeyA, Key::Left),
                (KeyCode::KeyD, Key::Right),
                (KeyCode::Space, Key::Up),
                (KeyCode::ControlLeft, Key::Down),
                (KeyCode::KeyC, Key::Down),
                (KeyCode::Backquote, Key::Toggle),
            ],
        }
    }
}

impl KeyMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding, keeping existing bindings for the same key.
    pub fn bind(&mut self, code: KeyCode, key: Key) {
        if !self.bindings.contains(&(code, key)) {
            self.bindings.push((code, key));
        }
    }

    /// Remove every physical binding for `key`.
    pub fn unbind(&mut self, key: Key) {
        self.bindings.retain(|&(_, k)| k != key);
    }

    /// Physical keys bound to `key`.
    pub fn codes_for(&self, key: Key) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |&&(_, k)| k == key)
            .map(|&(code, _)| code)
    }

    /// Abstract keys currently held.
    #[must_use]
    pub fn held_keys(&self, keyboard: &KeyboardState) -> KeySet {
        self.bindings
            .iter()
            .filter(|(code, _)| keyboard.is_pressed(*code))
            .map(|&(_, key)| key)
            .collect()
    }

    /// Whether any binding of `key` went down this frame.
    #[must_use]
    pub fn just_pressed(&self, keyboard: &KeyboardState, key: Key) -> bool {
        self.codes_for(key).any(|code| keyboard.just_pressed(code))
    }

    /// Snapshot the current frame's input.
    #[must_use]
    pub fn sample(&self, keyboard: &KeyboardState, mouse: &MouseState) -> InputSample {
        InputSample::new(mouse.pointer(), self.held_keys(keyboard))
    }
}
