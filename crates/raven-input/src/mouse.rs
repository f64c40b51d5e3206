//! Absolute pointer tracking with an accumulating wheel counter.
//!
//! Unlike a per-frame delta tracker, [`MouseState`] keeps the last cursor
//! position and a scroll total that never resets: the camera derives deltas
//! itself from the previous sample it saw.

use glam::IVec2;
use winit::event::MouseScrollDelta;

use crate::sample::Pointer;

/// Scroll units reported per wheel notch.
pub const SCROLL_UNITS_PER_LINE: f32 = 120.0;

/// Pixel-precision touchpads report roughly this many pixels per notch.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: IVec2,
    scroll_lines: f32,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event (physical pixels).
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = IVec2::new(x.round() as i32, y.round() as i32);
    }

    /// Process a `MouseWheel` event. Positive is away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_lines += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Record that the OS cursor was moved programmatically, so the next
    /// sample agrees with where the cursor actually is.
    pub fn warp_to(&mut self, position: IVec2) {
        self.position = position;
    }

    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Accumulated scroll in [`SCROLL_UNITS_PER_LINE`] units.
    #[must_use]
    pub fn scroll(&self) -> i32 {
        (self.scroll_lines * SCROLL_UNITS_PER_LINE).round() as i32
    }

    #[must_use]
    pub fn pointer(&self) -> Pointer {
        Pointer::new(self.position.x, self.position.y, self.scroll())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_cursor_position_rounds_to_pixels() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.4, 199.6);
        assert_eq!(ms.position(), IVec2::new(100, 200));
    }

    #[test]
    fn test_scroll_accumulates_across_frames() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, -0.5));
        assert_eq!(ms.scroll(), 180);
    }

    #[test]
    fn test_pixel_scroll_is_normalized() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)));
        assert_eq!(ms.scroll(), 120);
    }

    #[test]
    fn test_warp_updates_pointer() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(5.0, 5.0);
        ms.warp_to(IVec2::new(400, 300));
        assert_eq!(ms.pointer(), Pointer::new(400, 300, 0));
    }
}
