//! In-memory physics world for kernel tests.
//!
//! Bodies never move on their own: tests place them explicitly. Every
//! mutator bumps a counter so tests can assert that nothing was written.

#![allow(dead_code)]

use glam::{Quat, Vec3};
use lanyard_engine::error::PhysicsError;
use lanyard_engine::physics::{BodyDesc, BodyHandle, BodyKind, JointDesc, JointHandle, PhysicsWorld};

#[derive(Debug, Clone)]
pub struct MockBody {
    pub desc: BodyDesc,
    pub kind: BodyKind,
    pub translation: Vec3,
    pub rotation: Quat,
    pub angvel: Vec3,
    pub next_kinematic: Option<Vec3>,
    pub sleeping: bool,
    pub wake_count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct MockJoint {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub desc: JointDesc,
}

#[derive(Debug, Default)]
pub struct MockWorld {
    pub bodies: Vec<Option<MockBody>>,
    pub joints: Vec<Option<MockJoint>>,
    /// Number of mutator calls that touched a body
    pub mutations: usize,
    /// Fail the n-th body creation (0-based)
    pub fail_body_at: Option<usize>,
    pub steps: usize,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self, h: BodyHandle) -> &MockBody {
        self.bodies[h.0 as usize].as_ref().expect("live body")
    }

    pub fn body_mut(&mut self, h: BodyHandle) -> &mut MockBody {
        self.bodies[h.0 as usize].as_mut().expect("live body")
    }

    fn live(&self, h: BodyHandle) -> Option<&MockBody> {
        self.bodies.get(h.0 as usize)?.as_ref()
    }

    fn live_mut(&mut self, h: BodyHandle) -> Option<&mut MockBody> {
        self.bodies.get_mut(h.0 as usize)?.as_mut()
    }

    pub fn live_joints(&self) -> Vec<MockJoint> {
        self.joints.iter().flatten().copied().collect()
    }
}

impl PhysicsWorld for MockWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, PhysicsError> {
        if self.fail_body_at == Some(self.bodies.len()) {
            return Err(PhysicsError::InvalidParameter("mock failure".into()));
        }
        self.bodies.push(Some(MockBody {
            desc: *desc,
            kind: desc.kind,
            translation: desc.translation,
            rotation: Quat::IDENTITY,
            angvel: Vec3::ZERO,
            next_kinematic: None,
            sleeping: false,
            wake_count: 0,
        }));
        Ok(BodyHandle(self.bodies.len() as u32 - 1))
    }

    fn create_joint(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        joint: &JointDesc,
    ) -> Result<JointHandle, PhysicsError> {
        if self.live(a).is_none() {
            return Err(PhysicsError::InvalidHandle(a.0));
        }
        if self.live(b).is_none() {
            return Err(PhysicsError::InvalidHandle(b.0));
        }
        self.joints.push(Some(MockJoint { a, b, desc: *joint }));
        Ok(JointHandle(self.joints.len() as u32 - 1))
    }

    fn remove_body(&mut self, body: BodyHandle) -> bool {
        let Some(slot) = self.bodies.get_mut(body.0 as usize) else {
            return false;
        };
        if slot.take().is_none() {
            return false;
        }
        for joint in self.joints.iter_mut() {
            if joint.is_some_and(|j| j.a == body || j.b == body) {
                *joint = None;
            }
        }
        true
    }

    fn translation(&self, body: BodyHandle) -> Option<Vec3> {
        self.live(body).map(|b| b.translation)
    }

    fn rotation(&self, body: BodyHandle) -> Option<Quat> {
        self.live(body).map(|b| b.rotation)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.live(body).map(|b| b.angvel)
    }

    fn body_kind(&self, body: BodyHandle) -> Option<BodyKind> {
        self.live(body).map(|b| b.kind)
    }

    fn is_sleeping(&self, body: BodyHandle) -> Option<bool> {
        self.live(body).map(|b| b.sleeping)
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angvel: Vec3) -> Option<()> {
        self.live_mut(body)?.angvel = angvel;
        self.mutations += 1;
        Some(())
    }

    fn set_body_kind(&mut self, body: BodyHandle, kind: BodyKind) -> Option<()> {
        self.live_mut(body)?.kind = kind;
        self.mutations += 1;
        Some(())
    }

    fn set_next_kinematic_translation(&mut self, body: BodyHandle, translation: Vec3) -> Option<()> {
        self.live_mut(body)?.next_kinematic = Some(translation);
        self.mutations += 1;
        Some(())
    }

    fn wake_up(&mut self, body: BodyHandle) -> Option<()> {
        let b = self.live_mut(body)?;
        b.sleeping = false;
        b.wake_count += 1;
        self.mutations += 1;
        Some(())
    }

    fn body_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    fn joint_count(&self) -> usize {
        self.joints.iter().flatten().count()
    }

    fn step(&mut self) {
        for body in self.bodies.iter_mut().flatten() {
            if body.kind == BodyKind::KinematicPosition {
                if let Some(next) = body.next_kinematic.take() {
                    body.translation = next;
                }
            }
        }
        self.steps += 1;
    }

    fn timestep(&self) -> f32 {
        1.0 / 60.0
    }
}
