//! Projection Module
//!
//! A camera reduced to what pointer dragging needs: its world position and
//! the view-projection matrix used to unproject normalized device coordinates.

use glam::{Mat4, Vec3};

/// Default vertical field of view (radians), a narrow 25° lens.
pub const DEFAULT_FOV_Y: f32 = 25.0 * std::f32::consts::PI / 180.0;

/// Camera used to map pointer positions into world space.
///
/// NDC follows the OpenGL convention: x and y in [-1, 1] with y up, depth in
/// [-1, 1] from near to far plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    view_projection: Mat4,
    inverse_view_projection: Mat4,
}

impl Default for Camera {
    /// Camera at (0, 0, 13) looking at the origin with a 25° lens.
    fn default() -> Self {
        Self::perspective(
            Vec3::new(0.0, 0.0, 13.0),
            Vec3::ZERO,
            DEFAULT_FOV_Y,
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}

impl Camera {
    /// Create a perspective camera at `position` looking at `target`.
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `target` - Point the camera is looking at
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Screen aspect ratio (width / height)
    /// * `near`, `far` - Clip plane distances
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let forward = (target - position).normalize_or_zero();

        // Looking straight up or down - use world Z as up reference
        let up = if forward.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };

        let view = Mat4::look_at_rh(position, target, up);
        let projection = Mat4::perspective_rh_gl(fov_y, aspect_ratio, near, far);
        Self::from_view_projection(position, projection * view)
    }

    /// Build a camera from an explicit view-projection matrix.
    pub fn from_view_projection(position: Vec3, view_projection: Mat4) -> Self {
        Self {
            position,
            view_projection,
            inverse_view_projection: view_projection.inverse(),
        }
    }

    /// Camera at the origin whose NDC space is world space.
    pub fn identity() -> Self {
        Self::from_view_projection(Vec3::ZERO, Mat4::IDENTITY)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Map a point in NDC back to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.inverse_view_projection.project_point3(ndc)
    }

    /// Map a world-space point to NDC.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection.project_point3(world)
    }
}
