//! Orientation stabilizer
//!
//! Proportional yaw correction that keeps the badge turned toward the
//! viewer. Only the y component of angular velocity is touched.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::lanyard::chain::ChainBodies;
use crate::physics::PhysicsWorld;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Angular velocity removed per unit of rotation y
    pub yaw_gain: f32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self { yaw_gain: 0.25 }
    }
}

/// Three-axis view of a rotation: the vector part of the unit quaternion.
pub fn rotation_axes(rotation: Quat) -> Vec3 {
    Vec3::new(rotation.x, rotation.y, rotation.z)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OrientationStabilizer {
    config: StabilizerConfig,
}

impl OrientationStabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        Self { config }
    }

    /// `(ang.x, ang.y - rot.y * gain, ang.z)`.
    ///
    /// No clamping or damping term: a large `rot.y` can overcorrect and
    /// oscillate.
    pub fn corrected_angular_velocity(&self, angvel: Vec3, rotation: Vec3) -> Vec3 {
        Vec3::new(
            angvel.x,
            angvel.y - rotation.y * self.config.yaw_gain,
            angvel.z,
        )
    }

    /// Read the badge's spin and write back the corrected value.
    ///
    /// Returns the new angular velocity, or `None` if the badge is not ready.
    pub fn apply<W: PhysicsWorld + ?Sized>(
        &self,
        world: &mut W,
        bodies: &ChainBodies,
    ) -> Option<Vec3> {
        let angvel = world.angular_velocity(bodies.badge)?;
        let rotation = rotation_axes(world.rotation(bodies.badge)?);
        let corrected = self.corrected_angular_velocity(angvel, rotation);
        world.set_angular_velocity(bodies.badge, corrected)?;
        Some(corrected)
    }
}
