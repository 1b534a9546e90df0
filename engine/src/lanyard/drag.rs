//! Drag controller
//!
//! Two-state machine for grabbing the badge:
//!
//! - **Idle → Dragging** on pointer-down over the badge. The offset between
//!   the picked point and the badge origin is captured once and the badge
//!   becomes kinematic.
//! - **Dragging → Idle** on pointer-up. The badge becomes dynamic again.
//!
//! While dragging, the latest pointer position is mapped to a world target
//! every frame and written as the badge's next kinematic translation. While
//! idle the controller never touches a body.

use glam::{Vec2, Vec3};

use crate::camera::{Camera, unproject_pointer};
use crate::input::PointerId;
use crate::lanyard::chain::ChainBodies;
use crate::physics::{BodyKind, PhysicsWorld};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Grab offset: picked world point minus badge translation at pick time
    Dragging { offset: Vec3 },
}

/// Platform pointer-capture request emitted on a state transition.
///
/// The controller does not talk to the windowing system; the caller applies
/// the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapture {
    Capture(PointerId),
    Release(PointerId),
}

/// World point the pointer drags toward.
///
/// Unprojects the pointer at mid depth, then pushes it further along the view
/// ray by the camera's distance from the world origin. This is a fixed-offset
/// heuristic rather than a pick-plane intersection, so it only tracks the
/// badge accurately for cameras framed on the origin.
pub fn drag_target(camera: &Camera, pointer_ndc: Vec2) -> Vec3 {
    let point = unproject_pointer(camera, pointer_ndc);
    let direction = (point - camera.position).normalize_or_zero();
    point + direction * camera.position.length()
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a drag at `picked` (world point under the pointer on the badge).
    ///
    /// Ignored while already dragging or when the badge is not ready.
    pub fn on_pointer_down<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        bodies: &ChainBodies,
        picked: Vec3,
        pointer: PointerId,
    ) -> Option<PointerCapture> {
        if self.is_dragging() {
            return None;
        }
        let badge_at_pick = world.translation(bodies.badge)?;
        world.set_body_kind(bodies.badge, BodyKind::KinematicPosition)?;
        self.state = DragState::Dragging {
            offset: picked - badge_at_pick,
        };
        log::debug!("[DragController] Drag started, offset {:?}", picked - badge_at_pick);
        Some(PointerCapture::Capture(pointer))
    }

    /// Steer the badge toward the pointer. Returns the kinematic target that
    /// was written, or `None` when idle or not ready.
    pub fn on_pointer_move<W: PhysicsWorld + ?Sized>(
        &self,
        world: &mut W,
        bodies: &ChainBodies,
        camera: &Camera,
        pointer_ndc: Vec2,
    ) -> Option<Vec3> {
        let DragState::Dragging { offset } = self.state else {
            return None;
        };
        let target = drag_target(camera, pointer_ndc) - offset;
        world.set_next_kinematic_translation(bodies.badge, target)?;
        // A sleeping chain would ignore the moved badge
        for body in bodies.iter() {
            world.wake_up(body);
        }
        Some(target)
    }

    /// End the drag. Ignored while idle.
    pub fn on_pointer_up<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        bodies: &ChainBodies,
        pointer: PointerId,
    ) -> Option<PointerCapture> {
        if !self.is_dragging() {
            return None;
        }
        self.state = DragState::Idle;
        if world.set_body_kind(bodies.badge, BodyKind::Dynamic).is_none() {
            log::trace!("[DragController] Badge not ready on release");
        }
        log::debug!("[DragController] Drag ended");
        Some(PointerCapture::Release(pointer))
    }
}
