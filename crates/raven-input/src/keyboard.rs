//! Frame-coherent keyboard state.
//!
//! [`KeyboardState`] folds winit key events into the set of held keys and the
//! keys that changed this frame. Physical key codes are used so WASD stays
//! where it is on every keyboard layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Held, freshly pressed and freshly released physical keys.
///
/// 1. Forward every [`KeyEvent`] to [`process_event`](Self::process_event).
/// 2. Query [`is_pressed`](Self::is_pressed) / [`just_pressed`](Self::just_pressed).
/// 3. Call [`end_frame`](Self::end_frame) once the frame's sample is taken.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a winit key event into the state. Unidentified keys are ignored.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.apply(code, event.state, event.repeat);
        }
    }

    /// Platform-independent entry point; auto-repeat presses are dropped.
    pub fn apply(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        if repeat {
            return;
        }
        match state {
            ElementState::Pressed => {
                if self.held.insert(code) {
                    self.pressed_this_frame.insert(code);
                }
            }
            ElementState::Released => {
                if self.held.remove(&code) {
                    self.released_this_frame.insert(code);
                }
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// True only during the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.pressed_this_frame.contains(&code)
    }

    /// True only during the frame the key went up.
    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.released_this_frame.contains(&code)
    }

    /// Release everything, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }

    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_held_and_pressed() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::KeyW, ElementState::Pressed, false);
        assert!(kb.is_pressed(KeyCode::KeyW));
        assert!(kb.just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_pressed_lasts_one_frame() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::Backquote, ElementState::Pressed, false);
        kb.end_frame();
        assert!(!kb.just_pressed(KeyCode::Backquote));
        assert!(kb.is_pressed(KeyCode::Backquote));
    }

    #[test]
    fn test_release_clears_held() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::KeyA, ElementState::Pressed, false);
        kb.apply(KeyCode::KeyA, ElementState::Released, false);
        assert!(!kb.is_pressed(KeyCode::KeyA));
    }

    #[test]
    fn test_release_is_reported_for_one_frame() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::KeyA, ElementState::Pressed, false);
        kb.end_frame();
        kb.apply(KeyCode::KeyA, ElementState::Released, false);
        assert!(kb.just_released(KeyCode::KeyA));
        kb.end_frame();
        assert!(!kb.just_released(KeyCode::KeyA));
    }

    #[test]
    fn test_repeat_does_not_retrigger() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::Space, ElementState::Pressed, false);
        kb.end_frame();
        kb.apply(KeyCode::Space, ElementState::Pressed, true);
        assert!(!kb.just_pressed(KeyCode::Space));
        assert!(kb.is_pressed(KeyCode::Space));
    }

    #[test]
    fn test_second_press_while_held_is_not_fresh() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::KeyD, ElementState::Pressed, false);
        kb.end_frame();
        kb.apply(KeyCode::KeyD, ElementState::Pressed, false);
        assert!(!kb.just_pressed(KeyCode::KeyD));
    }

    #[test]
    fn test_release_all_drops_everything() {
        let mut kb = KeyboardState::new();
        kb.apply(KeyCode::KeyW, ElementState::Pressed, false);
        kb.apply(KeyCode::KeyS, ElementState::Pressed, false);
        kb.release_all();
        assert!(!kb.is_pressed(KeyCode::KeyW));
        assert!(!kb.is_pressed(KeyCode::KeyS));
        assert!(!kb.just_pressed(KeyCode::KeyW));
    }
}
