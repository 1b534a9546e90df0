//! Physics module for the lanyard engine
//!
//! The lanyard kernel does not solve constraints itself. It talks to a physics
//! engine through the [`PhysicsWorld`] trait: bodies and joints are created
//! once at scene init, then read and nudged every frame.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! # Submodules
//!
//! - [`types`] - Handles, body/joint descriptors, glam re-exports
//! - [`rapier_world`] - Production world backed by rapier3d

pub mod rapier_world;
pub mod types;

pub use rapier_world::RapierWorld;
pub use types::{
    BodyDesc, BodyHandle, BodyKind, ColliderDesc, JointDesc, JointHandle, PhysicsConfig, Quat,
    Vec3,
};

use crate::error::PhysicsError;

/// Contract between the kernel and the physics engine that owns the bodies.
///
/// Accessors return `None` and mutators return `None` when the handle is not
/// (or no longer) valid. The kernel treats that as "not ready" and skips the
/// affected work for the frame.
pub trait PhysicsWorld {
    /// Create a rigid body.
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError>;

    /// Create a joint between two existing bodies.
    fn create_joint(
        &mut self,
        body_a: BodyHandle,
        body_b: BodyHandle,
        joint: &JointDesc,
    ) -> Result<JointHandle, PhysicsError>;

    /// Remove a body and every joint attached to it. Returns false for an
    /// unknown handle.
    fn remove_body(&mut self, body: BodyHandle) -> bool;

    fn translation(&self, body: BodyHandle) -> Option<Vec3>;
    fn rotation(&self, body: BodyHandle) -> Option<Quat>;
    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3>;
    fn body_kind(&self, body: BodyHandle) -> Option<BodyKind>;
    fn is_sleeping(&self, body: BodyHandle) -> Option<bool>;

    fn set_angular_velocity(&mut self, body: BodyHandle, angvel: Vec3) -> Option<()>;
    fn set_body_kind(&mut self, body: BodyHandle, kind: BodyKind) -> Option<()>;

    /// Target translation for a kinematic body, consumed by the next
    /// [`step`](PhysicsWorld::step).
    fn set_next_kinematic_translation(&mut self, body: BodyHandle, translation: Vec3)
    -> Option<()>;

    fn wake_up(&mut self, body: BodyHandle) -> Option<()>;

    /// Number of live bodies.
    fn body_count(&self) -> usize;
    /// Number of live joints.
    fn joint_count(&self) -> usize;

    /// Advance the simulation by exactly one fixed timestep.
    fn step(&mut self);

    /// The fixed timestep used by [`step`](PhysicsWorld::step).
    fn timestep(&self) -> f32;
}
