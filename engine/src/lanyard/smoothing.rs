//! Smoothing filter
//!
//! Adaptive exponential smoothing of the two middle rope joints. The raw
//! joint positions jitter as the solver fights the rope constraints; the
//! ribbon is drawn through the smoothed copies instead.
//!
//! Responsiveness scales with how far the smoothed value lags the raw one:
//! a small lag tracks at `min_speed`, a lag of one unit or more tracks at
//! `max_speed`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::lanyard::chain::ChainBodies;
use crate::physics::PhysicsWorld;

/// Lag distances are clamped into this range before picking a rate.
pub const MIN_CLAMPED_DISTANCE: f32 = 0.1;
pub const MAX_CLAMPED_DISTANCE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Tracking rate (1/s) when the smoothed value is close to raw
    pub min_speed: f32,
    /// Tracking rate (1/s) when the smoothed value lags by a unit or more
    pub max_speed: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            min_speed: 10.0,
            max_speed: 50.0,
        }
    }
}

impl SmoothingConfig {
    /// Interpolation fraction for a given lag and frame time.
    ///
    /// Not clamped to [0, 1]: a long stall produces a fraction above one and
    /// the smoothed value overshoots the raw target.
    pub fn fraction(&self, lag: f32, delta: f32) -> f32 {
        let clamped = lag.clamp(MIN_CLAMPED_DISTANCE, MAX_CLAMPED_DISTANCE);
        let rate = self.min_speed + clamped * (self.max_speed - self.min_speed);
        rate * delta
    }
}

/// Smoothed position of one joint. Absent until the first update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedJoint {
    lerped: Option<Vec3>,
}

impl SmoothedJoint {
    pub fn lerped(&self) -> Option<Vec3> {
        self.lerped
    }

    /// Move the smoothed value toward `raw` and return it.
    ///
    /// The first call only seeds the value with `raw`.
    pub fn update(&mut self, raw: Vec3, delta: f32, config: &SmoothingConfig) -> Vec3 {
        let next = match self.lerped {
            None => raw,
            Some(lerped) => {
                let fraction = config.fraction(lerped.distance(raw), delta);
                lerped.lerp(raw, fraction)
            }
        };
        self.lerped = Some(next);
        next
    }
}

/// Smoothing for joints j1 and j2.
#[derive(Clone, Debug, Default)]
pub struct SmoothingFilter {
    config: SmoothingConfig,
    j1: SmoothedJoint,
    j2: SmoothedJoint,
}

impl SmoothingFilter {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    pub fn j1(&self) -> &SmoothedJoint {
        &self.j1
    }

    pub fn j2(&self) -> &SmoothedJoint {
        &self.j2
    }

    /// Update both smoothed joints from the world's current translations.
    ///
    /// Returns the smoothed `(j1, j2)` pair, or `None` without touching any
    /// state if either body is not ready.
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        bodies: &ChainBodies,
        delta: f32,
    ) -> Option<(Vec3, Vec3)> {
        let raw_j1 = world.translation(bodies.j1)?;
        let raw_j2 = world.translation(bodies.j2)?;
        Some((
            self.j1.update(raw_j1, delta, &self.config),
            self.j2.update(raw_j2, delta, &self.config),
        ))
    }
}
