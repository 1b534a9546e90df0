//! Constraint chain
//!
//! Builds the lanyard topology once at scene init:
//!
//! ```text
//! anchor (fixed) -rope- j1 -rope- j2 -rope- j3 -ball- badge
//! ```
//!
//! Bodies are laid out along the chain axis, `spacing` apart, badge furthest
//! from the anchor. The topology never changes afterwards; the physics world
//! owns the bodies and this module only keeps their handles.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::LanyardError;
use crate::physics::{BodyDesc, BodyHandle, BodyKind, ColliderDesc, JointDesc, JointHandle, PhysicsWorld};

/// Which chain body a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    Anchor,
    J1,
    J2,
    J3,
    Badge,
}

impl BodyRole {
    /// Chain order, fixed end first.
    pub const ORDER: [BodyRole; 5] = [
        BodyRole::Anchor,
        BodyRole::J1,
        BodyRole::J2,
        BodyRole::J3,
        BodyRole::Badge,
    ];
}

/// One of the four constraints of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainLink {
    AnchorJ1,
    J1J2,
    J2J3,
    J3Badge,
}

impl ChainLink {
    pub const ORDER: [ChainLink; 4] = [
        ChainLink::AnchorJ1,
        ChainLink::J1J2,
        ChainLink::J2J3,
        ChainLink::J3Badge,
    ];

    /// The (a, b) body roles joined by this link.
    pub fn roles(self) -> (BodyRole, BodyRole) {
        match self {
            ChainLink::AnchorJ1 => (BodyRole::Anchor, BodyRole::J1),
            ChainLink::J1J2 => (BodyRole::J1, BodyRole::J2),
            ChainLink::J2J3 => (BodyRole::J2, BodyRole::J3),
            ChainLink::J3Badge => (BodyRole::J3, BodyRole::Badge),
        }
    }
}

/// Chain construction parameters. Fixed once the scene is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// World position of the fixed anchor
    pub anchor_position: Vec3,
    /// Direction the bodies are laid out along (normalized on use)
    pub axis: Vec3,
    /// Distance between consecutive bodies at creation
    pub spacing: f32,
    /// Maximum length of each rope segment
    pub segment_length: f32,
    /// Ball-joint anchor in the badge's local frame
    pub badge_anchor: Vec3,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub can_sleep: bool,
    /// Collider on the anchor and rope joints (None = no collider)
    pub segment_collider: Option<ColliderDesc>,
    /// Collider on the badge (None = no collider)
    pub badge_collider: Option<ColliderDesc>,
    pub density: f32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            anchor_position: Vec3::new(0.0, 4.0, 0.0),
            axis: Vec3::X,
            spacing: 0.5,
            segment_length: 1.0,
            badge_anchor: Vec3::new(0.0, 1.45, 0.0),
            linear_damping: 2.0,
            angular_damping: 2.0,
            can_sleep: true,
            segment_collider: Some(ColliderDesc::Ball { radius: 0.1 }),
            badge_collider: Some(ColliderDesc::Cuboid {
                half_extents: Vec3::new(0.8, 1.125, 0.01),
            }),
            density: 1.0,
        }
    }
}

/// Named handles to the five chain bodies.
///
/// This is the simulation context every kernel component receives by
/// reference; nothing reaches the bodies through globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainBodies {
    pub anchor: BodyHandle,
    pub j1: BodyHandle,
    pub j2: BodyHandle,
    pub j3: BodyHandle,
    pub badge: BodyHandle,
}

impl ChainBodies {
    pub fn get(&self, role: BodyRole) -> BodyHandle {
        match role {
            BodyRole::Anchor => self.anchor,
            BodyRole::J1 => self.j1,
            BodyRole::J2 => self.j2,
            BodyRole::J3 => self.j3,
            BodyRole::Badge => self.badge,
        }
    }

    /// All five handles in chain order, anchor first.
    pub fn iter(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        BodyRole::ORDER.iter().map(|role| self.get(*role))
    }
}

/// A created joint together with its descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainJoint {
    pub link: ChainLink,
    pub handle: JointHandle,
    pub desc: JointDesc,
}

/// The lanyard's bodies and joints.
#[derive(Debug, Clone)]
pub struct ConstraintChain {
    bodies: ChainBodies,
    joints: [ChainJoint; 4],
}

impl ConstraintChain {
    /// Create the five bodies and four joints in `world`.
    ///
    /// Any creation failure is fatal: the scene cannot run with a partial
    /// chain.
    pub fn initialize<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        config: &ChainConfig,
    ) -> Result<Self, LanyardError> {
        let axis = config.axis.normalize_or(Vec3::X);
        let position_of = |index: usize| config.anchor_position + axis * (config.spacing * index as f32);

        let mut create = |role: BodyRole, index: usize| -> Result<BodyHandle, LanyardError> {
            let (kind, collider) = match role {
                BodyRole::Anchor => (BodyKind::Fixed, config.segment_collider),
                BodyRole::Badge => (BodyKind::Dynamic, config.badge_collider),
                _ => (BodyKind::Dynamic, config.segment_collider),
            };
            let desc = BodyDesc {
                density: config.density,
                ..BodyDesc::new(kind, position_of(index))
                    .with_damping(config.linear_damping, config.angular_damping)
                    .with_can_sleep(config.can_sleep)
                    .with_collider(collider)
            };
            world
                .create_body(&desc)
                .map_err(|source| LanyardError::BodyCreation { role, source })
        };

        let bodies = ChainBodies {
            anchor: create(BodyRole::Anchor, 0)?,
            j1: create(BodyRole::J1, 1)?,
            j2: create(BodyRole::J2, 2)?,
            j3: create(BodyRole::J3, 3)?,
            badge: create(BodyRole::Badge, 4)?,
        };

        let rope = JointDesc::Rope {
            local_anchor_a: Vec3::ZERO,
            local_anchor_b: Vec3::ZERO,
            length: config.segment_length,
        };
        let ball = JointDesc::Spherical {
            local_anchor_a: Vec3::ZERO,
            local_anchor_b: config.badge_anchor,
        };

        let mut link = |link: ChainLink| -> Result<ChainJoint, LanyardError> {
            let desc = if link == ChainLink::J3Badge { ball } else { rope };
            let (a, b) = link.roles();
            let handle = world
                .create_joint(bodies.get(a), bodies.get(b), &desc)
                .map_err(|source| LanyardError::JointCreation { link, source })?;
            Ok(ChainJoint { link, handle, desc })
        };

        let joints = [
            link(ChainLink::AnchorJ1)?,
            link(ChainLink::J1J2)?,
            link(ChainLink::J2J3)?,
            link(ChainLink::J3Badge)?,
        ];

        log::info!(
            "[ConstraintChain] Created 5 bodies and 4 joints at {:?}",
            config.anchor_position
        );

        Ok(Self { bodies, joints })
    }

    pub fn bodies(&self) -> &ChainBodies {
        &self.bodies
    }

    pub fn joints(&self) -> &[ChainJoint] {
        &self.joints
    }

    /// Body pairs joined by each joint, in chain order.
    pub fn links(&self) -> impl Iterator<Item = (BodyHandle, BodyHandle)> + '_ {
        self.joints.iter().map(|joint| {
            let (a, b) = joint.link.roles();
            (self.bodies.get(a), self.bodies.get(b))
        })
    }

    pub fn rope_joint_count(&self) -> usize {
        self.joints.iter().filter(|j| j.desc.is_rope()).count()
    }

    pub fn spherical_joint_count(&self) -> usize {
        self.joints.iter().filter(|j| j.desc.is_spherical()).count()
    }

    /// Remove every chain body from the world. Later frames see the handles
    /// as not ready and skip their work.
    pub fn teardown<W: PhysicsWorld + ?Sized>(&self, world: &mut W) {
        let removed = self.bodies.iter().filter(|h| world.remove_body(*h)).count();
        log::info!("[ConstraintChain] Teardown removed {removed} bodies");
    }
}
