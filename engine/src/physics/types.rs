//! Physics types shared between the lanyard kernel and the engine collaborator
//!
//! Core math types are re-exported from glam. Body and joint descriptors are
//! plain data: the kernel builds them, the [`PhysicsWorld`](super::PhysicsWorld)
//! implementation turns them into engine objects.

pub use glam::{Quat, Vec3};

use serde::{Deserialize, Serialize};

/// Opaque handle to a rigid body owned by the physics world.
///
/// The kernel never owns bodies; it only holds these handles and asks the
/// world for state. A handle can become invalid (body removed), in which case
/// every accessor returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// Opaque handle to a joint owned by the physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointHandle(pub u32);

/// How a body is moved by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves.
    Fixed,
    /// Integrated from forces, gravity and joint impulses.
    Dynamic,
    /// Driven by an externally supplied next translation each step.
    KinematicPosition,
}

/// Collision shape attached to a body. Gives dynamic bodies their mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Everything the world needs to create one rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    /// World-space translation at creation
    pub translation: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Whether the body may fall asleep when at rest
    pub can_sleep: bool,
    pub collider: Option<ColliderDesc>,
    /// Collider density (kg/m³); ignored without a collider
    pub density: f32,
}

impl BodyDesc {
    /// A body of the given kind at `translation` with no damping or collider.
    pub fn new(kind: BodyKind, translation: Vec3) -> Self {
        Self {
            kind,
            translation,
            linear_damping: 0.0,
            angular_damping: 0.0,
            can_sleep: true,
            collider: None,
            density: 1.0,
        }
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn with_collider(mut self, collider: Option<ColliderDesc>) -> Self {
        self.collider = collider;
        self
    }

    pub fn with_can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }
}

/// A constraint between two bodies. Immutable after creation.
///
/// Anchors are expressed in each body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointDesc {
    /// Keeps the two anchors at most `length` apart.
    Rope {
        local_anchor_a: Vec3,
        local_anchor_b: Vec3,
        length: f32,
    },
    /// Pins the two anchors together, rotation stays free.
    Spherical {
        local_anchor_a: Vec3,
        local_anchor_b: Vec3,
    },
}

impl JointDesc {
    pub fn is_rope(&self) -> bool {
        matches!(self, JointDesc::Rope { .. })
    }

    pub fn is_spherical(&self) -> bool {
        matches!(self, JointDesc::Spherical { .. })
    }
}

/// Engine-wide integration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant gravity vector (m/s²)
    pub gravity: Vec3,
    /// Fixed integration timestep (seconds)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -40.0, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}
