//! Rapier-backed physics world
//!
//! Owns every rapier set and pipeline stage and exposes them through the
//! [`PhysicsWorld`] trait. Kernel-facing handles are indices into small
//! registries so the kernel never sees rapier types.

use glam::{Quat, Vec3};
use rapier3d::na::{Point3, Vector3};
use rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointHandle,
    ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, QueryPipeline, Real, RigidBody, RigidBodyBuilder, RigidBodyHandle,
    RigidBodySet, RigidBodyType, RopeJointBuilder, SphericalJointBuilder,
};

use super::types::{BodyDesc, BodyHandle, BodyKind, ColliderDesc, JointDesc, JointHandle};
use super::{PhysicsConfig, PhysicsWorld};
use crate::error::PhysicsError;

fn to_na(v: Vec3) -> Vector3<Real> {
    Vector3::new(v.x, v.y, v.z)
}

fn to_na_point(v: Vec3) -> Point3<Real> {
    Point3::new(v.x, v.y, v.z)
}

fn from_na(v: &Vector3<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_rapier_kind(kind: BodyKind) -> RigidBodyType {
    match kind {
        BodyKind::Fixed => RigidBodyType::Fixed,
        BodyKind::Dynamic => RigidBodyType::Dynamic,
        BodyKind::KinematicPosition => RigidBodyType::KinematicPositionBased,
    }
}

fn from_rapier_kind(kind: RigidBodyType) -> BodyKind {
    match kind {
        RigidBodyType::Fixed => BodyKind::Fixed,
        RigidBodyType::Dynamic => BodyKind::Dynamic,
        // Velocity-based kinematics are never created here; report them as
        // kinematic so callers still see an externally driven body.
        RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
            BodyKind::KinematicPosition
        }
    }
}

fn validate_body(desc: &BodyDesc) -> Result<(), PhysicsError> {
    if !desc.translation.is_finite() {
        return Err(PhysicsError::InvalidParameter(
            "body translation is not finite".into(),
        ));
    }
    if !(desc.linear_damping >= 0.0 && desc.angular_damping >= 0.0) {
        return Err(PhysicsError::InvalidParameter(
            "damping must be non-negative".into(),
        ));
    }
    match desc.collider {
        Some(ColliderDesc::Ball { radius }) if !(radius > 0.0) => Err(
            PhysicsError::InvalidParameter("ball collider radius must be positive".into()),
        ),
        Some(ColliderDesc::Cuboid { half_extents }) if !half_extents.cmpgt(Vec3::ZERO).all() => {
            Err(PhysicsError::InvalidParameter(
                "cuboid half extents must be positive".into(),
            ))
        }
        Some(_) if !(desc.density > 0.0) => Err(PhysicsError::InvalidParameter(
            "collider density must be positive".into(),
        )),
        _ => Ok(()),
    }
}

/// Physics world backed by rapier3d impulse joints.
pub struct RapierWorld {
    gravity: Vector3<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    /// Kernel handle index -> rapier handle (None once removed)
    body_registry: Vec<Option<RigidBodyHandle>>,
    joint_registry: Vec<ImpulseJointHandle>,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl RapierWorld {
    /// Create an empty world with the given gravity and fixed timestep.
    pub fn new(config: PhysicsConfig) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: config.timestep,
            ..IntegrationParameters::default()
        };

        Self {
            gravity: to_na(config.gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            body_registry: Vec::new(),
            joint_registry: Vec::new(),
        }
    }

    pub fn gravity(&self) -> Vec3 {
        from_na(&self.gravity)
    }

    fn rapier_handle(&self, body: BodyHandle) -> Option<RigidBodyHandle> {
        self.body_registry.get(body.0 as usize).copied().flatten()
    }

    fn body_ref(&self, body: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(self.rapier_handle(body)?)
    }

    /// Whether the joint still exists. Removing either body drops it.
    pub fn contains_joint(&self, joint: JointHandle) -> bool {
        self.joint_registry
            .get(joint.0 as usize)
            .is_some_and(|handle| self.impulse_joints.get(*handle).is_some())
    }

    fn body_mut(&mut self, body: BodyHandle) -> Option<&mut RigidBody> {
        let handle = self.rapier_handle(body)?;
        self.bodies.get_mut(handle)
    }
}

impl PhysicsWorld for RapierWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        validate_body(desc)?;

        let rigid_body = RigidBodyBuilder::new(to_rapier_kind(desc.kind))
            .translation(to_na(desc.translation))
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .can_sleep(desc.can_sleep)
            .build();
        let handle = self.bodies.insert(rigid_body);

        if let Some(shape) = desc.collider {
            let builder = match shape {
                ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
                ColliderDesc::Cuboid { half_extents } => {
                    ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                }
            };
            self.colliders.insert_with_parent(
                builder.density(desc.density).build(),
                handle,
                &mut self.bodies,
            );
        }

        let id = self.body_registry.len() as u32;
        self.body_registry.push(Some(handle));
        Ok(BodyHandle(id))
    }

    fn create_joint(
        &mut self,
        body_a: BodyHandle,
        body_b: BodyHandle,
        joint: &JointDesc,
    ) -> Result<JointHandle, PhysicsError> {
        let a = self
            .rapier_handle(body_a)
            .ok_or(PhysicsError::InvalidHandle(body_a.0))?;
        let b = self
            .rapier_handle(body_b)
            .ok_or(PhysicsError::InvalidHandle(body_b.0))?;

        let handle = match *joint {
            JointDesc::Rope {
                local_anchor_a,
                local_anchor_b,
                length,
            } => {
                if !(length.is_finite() && length > 0.0) {
                    return Err(PhysicsError::InvalidParameter(format!(
                        "rope length must be positive, got {length}"
                    )));
                }
                let rope = RopeJointBuilder::new(length)
                    .local_anchor1(to_na_point(local_anchor_a))
                    .local_anchor2(to_na_point(local_anchor_b));
                self.impulse_joints.insert(a, b, rope, true)
            }
            JointDesc::Spherical {
                local_anchor_a,
                local_anchor_b,
            } => {
                let ball = SphericalJointBuilder::new()
                    .local_anchor1(to_na_point(local_anchor_a))
                    .local_anchor2(to_na_point(local_anchor_b));
                self.impulse_joints.insert(a, b, ball, true)
            }
        };

        let id = self.joint_registry.len() as u32;
        self.joint_registry.push(handle);
        Ok(JointHandle(id))
    }

    fn remove_body(&mut self, body: BodyHandle) -> bool {
        let Some(handle) = self.rapier_handle(body) else {
            return false;
        };
        self.body_registry[body.0 as usize] = None;
        self.bodies
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn translation(&self, body: BodyHandle) -> Option<Vec3> {
        self.body_ref(body).map(|b| from_na(b.translation()))
    }

    fn rotation(&self, body: BodyHandle) -> Option<Quat> {
        self.body_ref(body).map(|b| {
            let q = b.rotation().quaternion().coords;
            Quat::from_xyzw(q.x, q.y, q.z, q.w)
        })
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.body_ref(body).map(|b| from_na(b.angvel()))
    }

    fn body_kind(&self, body: BodyHandle) -> Option<BodyKind> {
        self.body_ref(body).map(|b| from_rapier_kind(b.body_type()))
    }

    fn is_sleeping(&self, body: BodyHandle) -> Option<bool> {
        self.body_ref(body).map(|b| b.is_sleeping())
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angvel: Vec3) -> Option<()> {
        self.body_mut(body)?.set_angvel(to_na(angvel), true);
        Some(())
    }

    fn set_body_kind(&mut self, body: BodyHandle, kind: BodyKind) -> Option<()> {
        self.body_mut(body)?.set_body_type(to_rapier_kind(kind), true);
        Some(())
    }

    fn set_next_kinematic_translation(
        &mut self,
        body: BodyHandle,
        translation: Vec3,
    ) -> Option<()> {
        self.body_mut(body)?
            .set_next_kinematic_translation(to_na(translation));
        Some(())
    }

    fn wake_up(&mut self, body: BodyHandle) -> Option<()> {
        self.body_mut(body)?.wake_up(true);
        Some(())
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn joint_count(&self) -> usize {
        self.joint_registry
            .iter()
            .filter(|handle| self.impulse_joints.get(**handle).is_some())
            .count()
    }

    fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_body(kind: BodyKind, at: Vec3) -> BodyDesc {
        BodyDesc::new(kind, at).with_collider(Some(ColliderDesc::Ball { radius: 0.1 }))
    }

    #[test]
    fn test_create_and_read_body() {
        let mut world = RapierWorld::default();
        let h = world
            .create_body(&ball_body(BodyKind::Dynamic, Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        assert_eq!(world.translation(h), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(world.body_kind(h), Some(BodyKind::Dynamic));
        assert_eq!(world.angular_velocity(h), Some(Vec3::ZERO));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_rejects_invalid_descriptors() {
        let mut world = RapierWorld::default();
        let bad = BodyDesc::new(BodyKind::Dynamic, Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(world.create_body(&bad).is_err());

        let bad = BodyDesc::new(BodyKind::Dynamic, Vec3::ZERO).with_damping(-1.0, 0.0);
        assert!(world.create_body(&bad).is_err());

        let a = world.create_body(&ball_body(BodyKind::Fixed, Vec3::ZERO)).unwrap();
        let b = world.create_body(&ball_body(BodyKind::Dynamic, Vec3::X)).unwrap();
        let rope = JointDesc::Rope {
            local_anchor_a: Vec3::ZERO,
            local_anchor_b: Vec3::ZERO,
            length: 0.0,
        };
        assert!(world.create_joint(a, b, &rope).is_err());
        assert_eq!(
            world.create_joint(a, BodyHandle(99), &rope),
            Err(PhysicsError::InvalidHandle(99))
        );
    }

    #[test]
    fn test_dynamic_body_falls_under_gravity() {
        let mut world = RapierWorld::default();
        let h = world
            .create_body(&ball_body(BodyKind::Dynamic, Vec3::ZERO))
            .unwrap();

        for _ in 0..10 {
            world.step();
        }

        assert!(world.translation(h).unwrap().y < 0.0);
    }

    #[test]
    fn test_rope_limits_fall_distance() {
        let mut world = RapierWorld::default();
        let anchor = world.create_body(&ball_body(BodyKind::Fixed, Vec3::ZERO)).unwrap();
        let weight = world
            .create_body(&ball_body(BodyKind::Dynamic, Vec3::new(0.5, 0.0, 0.0)))
            .unwrap();
        world
            .create_joint(
                anchor,
                weight,
                &JointDesc::Rope {
                    local_anchor_a: Vec3::ZERO,
                    local_anchor_b: Vec3::ZERO,
                    length: 1.0,
                },
            )
            .unwrap();

        for _ in 0..120 {
            world.step();
        }

        let distance = world.translation(weight).unwrap().length();
        assert!(distance < 1.1, "rope stretched to {distance}");
        assert_eq!(world.joint_count(), 1);
    }

    #[test]
    fn test_kinematic_translation_applies_on_next_step() {
        let mut world = RapierWorld::default();
        let h = world
            .create_body(&ball_body(BodyKind::Dynamic, Vec3::ZERO))
            .unwrap();
        world.set_body_kind(h, BodyKind::KinematicPosition).unwrap();
        world
            .set_next_kinematic_translation(h, Vec3::new(0.0, 1.0, 0.0))
            .unwrap();

        // Not applied until the engine integrates
        assert_eq!(world.translation(h), Some(Vec3::ZERO));
        world.step();
        let t = world.translation(h).unwrap();
        assert!((t - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_removed_body_is_not_ready() {
        let mut world = RapierWorld::default();
        let a = world.create_body(&ball_body(BodyKind::Fixed, Vec3::ZERO)).unwrap();
        let b = world.create_body(&ball_body(BodyKind::Dynamic, Vec3::X)).unwrap();
        let joint = world
            .create_joint(
                a,
                b,
                &JointDesc::Spherical {
                    local_anchor_a: Vec3::ZERO,
                    local_anchor_b: Vec3::ZERO,
                },
            )
            .unwrap();
        assert!(world.contains_joint(joint));

        assert!(world.remove_body(b));
        assert!(!world.contains_joint(joint));
        assert!(!world.contains_joint(JointHandle(42)));
        assert!(!world.remove_body(b));
        assert_eq!(world.translation(b), None);
        assert_eq!(world.wake_up(b), None);
        assert_eq!(world.joint_count(), 0);
        assert_eq!(world.body_count(), 1);
    }
}
