//! Window client area as seen by the camera.

use glam::IVec2;

use crate::error::CameraError;

/// Non-empty window client size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowBounds {
    width: u32,
    height: u32,
}

impl WindowBounds {
    /// Fails when either side is zero (e.g. a minimized window).
    pub fn new(width: u32, height: u32) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidConfiguration(format!(
                "window bounds must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Client width in pixels, never zero.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Client height in pixels, never zero.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Integer centre of the client area.
    pub fn center(&self) -> IVec2 {
        IVec2::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// True when `point` lies strictly within `margin` pixels of any edge.
    pub fn is_near_edge(&self, point: IVec2, margin: i32) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        point.x < margin || point.x > w - margin || point.y < margin || point.y > h - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bounds_rejected() {
        assert!(WindowBounds::new(0, 600).is_err());
        assert!(WindowBounds::new(800, 0).is_err());
    }

    #[test]
    fn test_center_and_aspect() {
        let b = WindowBounds::new(800, 600).unwrap();
        assert_eq!(b.center(), IVec2::new(400, 300));
        assert!((b.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_edge_margin_boundaries() {
        let b = WindowBounds::new(800, 600).unwrap();
        assert!(!b.is_near_edge(IVec2::new(20, 300), 20));
        assert!(b.is_near_edge(IVec2::new(19, 300), 20));
        assert!(!b.is_near_edge(IVec2::new(780, 300), 20));
        assert!(b.is_near_edge(IVec2::new(781, 300), 20));
        assert!(b.is_near_edge(IVec2::new(400, 581), 20));
        assert!(b.is_near_edge(IVec2::new(400, -5), 20));
    }
}
