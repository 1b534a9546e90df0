//! Raycast Module
//!
//! Converts window pointer coordinates into NDC and world-space points.

use glam::{Vec2, Vec3};

use super::projection::Camera;

/// NDC depth used when unprojecting a pointer for dragging.
pub const POINTER_UNPROJECT_DEPTH: f32 = 0.5;

/// Window size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Convert a pixel position (origin top-left, y down) to NDC (-1 to 1, y up).
///
/// A degenerate viewport maps everything to the screen center.
pub fn screen_to_ndc(pixel: Vec2, viewport: Viewport) -> Vec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec2::ZERO;
    }
    let u = pixel.x / viewport.width;
    let v = pixel.y / viewport.height;
    Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
}

/// Unproject a pointer in NDC to the world point at mid depth.
pub fn unproject_pointer(camera: &Camera, ndc: Vec2) -> Vec3 {
    camera.unproject(ndc.extend(POINTER_UNPROJECT_DEPTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_ndc_corners() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::new(0.0, 0.0), viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(
            screen_to_ndc(Vec2::new(800.0, 600.0), viewport),
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
    }

    #[test]
    fn test_degenerate_viewport() {
        let viewport = Viewport::new(0.0, 0.0);
        assert_eq!(screen_to_ndc(Vec2::new(10.0, 10.0), viewport), Vec2::ZERO);
        assert_eq!(viewport.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_unproject_pointer_identity() {
        let p = unproject_pointer(&Camera::identity(), Vec2::new(0.25, -0.5));
        assert!((p - Vec3::new(0.25, -0.5, 0.5)).length() < 1e-6);
    }
}
