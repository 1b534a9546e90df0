//! Pointer Input Module
//!
//! Pointer events as the lanyard consumes them, plus a tracker holding the
//! latest pointer position. Decoupled from any windowing system.

use glam::{Vec2, Vec3};

use crate::camera::{Viewport, screen_to_ndc};

/// Platform pointer identifier (mouse, touch contact, pen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u32);

/// Pointer events delivered to the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on the badge. `picked` is the world-space hit point.
    Down { pointer: PointerId, picked: Vec3 },
    /// Pointer moved, in window pixels (origin top-left).
    Move { pixel: Vec2 },
    Up { pointer: PointerId },
    /// Pointer entered or left the badge.
    Hover { over_badge: bool },
}

/// Latest pointer position in NDC.
///
/// Dragging samples this once per frame rather than per move event, so a
/// burst of moves between frames costs one kinematic update.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    ndc: Vec2,
    viewport: Viewport,
}

impl PointerTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            ndc: Vec2::ZERO,
            viewport,
        }
    }

    /// Current position in NDC (-1 to 1, y up).
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Record a move in window pixels.
    pub fn move_to_pixel(&mut self, pixel: Vec2) {
        self.ndc = screen_to_ndc(pixel, self.viewport);
    }

    /// Record a move already expressed in NDC.
    pub fn move_to_ndc(&mut self, ndc: Vec2) {
        self.ndc = ndc;
    }
}
