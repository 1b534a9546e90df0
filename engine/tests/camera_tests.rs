//! Camera Tests - Projection, Screen Mapping and Drag Targets
//!
//! Tests for the camera module: pixel to NDC conversion, unprojection and the
//! world point the badge is dragged toward.

use glam::{Vec2, Vec3};
use lanyard_engine::camera::raycast::POINTER_UNPROJECT_DEPTH;
use lanyard_engine::camera::{Camera, Viewport, screen_to_ndc, unproject_pointer};
use lanyard_engine::input::PointerTracker;
use lanyard_engine::lanyard::drag_target;

// ============================================================================
// Camera Tests
// ============================================================================

#[test]
fn test_default_camera_position() {
    let camera = Camera::default();
    assert_eq!(camera.position, Vec3::new(0.0, 0.0, 13.0));
}

#[test]
fn test_origin_projects_to_screen_center() {
    let camera = Camera::default();
    let ndc = camera.project(Vec3::ZERO);

    assert!(ndc.x.abs() < 1e-5);
    assert!(ndc.y.abs() < 1e-5);
    // Inside the depth range
    assert!(ndc.z > -1.0 && ndc.z < 1.0);
}

#[test]
fn test_unproject_depth_moves_along_ray() {
    let camera = Camera::default();
    let ndc = Vec2::new(0.4, -0.3);

    let near = camera.unproject(ndc.extend(-1.0));
    let mid = unproject_pointer(&camera, ndc);
    let far = camera.unproject(ndc.extend(0.99));

    let d_near = near.distance(camera.position);
    let d_mid = mid.distance(camera.position);
    let d_far = far.distance(camera.position);
    assert!(d_near < d_mid && d_mid < d_far);

    // All three lie on one ray from the camera
    let dir = (mid - camera.position).normalize();
    assert!((near - camera.position).normalize().dot(dir) > 0.9999);
    assert!((far - camera.position).normalize().dot(dir) > 0.9999);
}

#[test]
fn test_pointer_depth_constant() {
    let camera = Camera::default();
    let ndc = Vec2::new(-0.2, 0.6);
    assert_eq!(
        unproject_pointer(&camera, ndc),
        camera.unproject(ndc.extend(POINTER_UNPROJECT_DEPTH))
    );
}

// ============================================================================
// Screen Mapping Tests
// ============================================================================

#[test]
fn test_screen_to_ndc_axes() {
    let viewport = Viewport::new(1000.0, 500.0);

    // Right half is positive x, top half positive y
    let ndc = screen_to_ndc(Vec2::new(750.0, 125.0), viewport);
    assert!((ndc.x - 0.5).abs() < 1e-6);
    assert!((ndc.y - 0.5).abs() < 1e-6);
}

#[test]
fn test_viewport_aspect_ratio() {
    assert!((Viewport::default().aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(Viewport::new(300.0, 300.0).aspect_ratio(), 1.0);
}

#[test]
fn test_pointer_tracker_follows_pixels() {
    let mut tracker = PointerTracker::new(Viewport::new(200.0, 100.0));
    assert_eq!(tracker.ndc(), Vec2::ZERO);

    tracker.move_to_pixel(Vec2::new(0.0, 100.0));
    assert_eq!(tracker.ndc(), Vec2::new(-1.0, -1.0));

    tracker.set_viewport(Viewport::new(400.0, 100.0));
    tracker.move_to_pixel(Vec2::new(200.0, 50.0));
    assert_eq!(tracker.ndc(), Vec2::ZERO);
}

// ============================================================================
// Drag Target Tests
// ============================================================================

#[test]
fn test_drag_target_screen_center_reaches_past_origin() {
    let camera = Camera::default();
    let target = drag_target(&camera, Vec2::ZERO);

    // Straight down the view axis, pushed 13 units beyond mid depth
    assert!(target.x.abs() < 1e-3);
    assert!(target.y.abs() < 1e-3);
    assert!(target.z < 0.0);
}

#[test]
fn test_drag_target_follows_pointer_direction() {
    let camera = Camera::default();
    let left = drag_target(&camera, Vec2::new(-0.5, 0.0));
    let right = drag_target(&camera, Vec2::new(0.5, 0.0));
    let up = drag_target(&camera, Vec2::new(0.0, 0.5));

    assert!(left.x < 0.0 && right.x > 0.0);
    assert!(up.y > 0.0);
    assert!((left.x + right.x).abs() < 1e-3);
}
