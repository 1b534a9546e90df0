//! Lanyard Configuration
//!
//! Aggregates every tunable of the scene. `Default` returns the stock
//! lanyard: smoothing rates 10..50, unit rope segments, badge hung from
//! (0, 1.45, 0), gravity -40 and a 60 Hz step.
//!
//! Every section and field is optional in JSON; missing values fall back to
//! the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lanyard::chain::ChainConfig;
use crate::lanyard::curve::RibbonConfig;
use crate::lanyard::orientation::StabilizerConfig;
use crate::lanyard::smoothing::SmoothingConfig;
use crate::physics::PhysicsConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanyardConfig {
    pub physics: PhysicsConfig,
    pub chain: ChainConfig,
    pub smoothing: SmoothingConfig,
    pub ribbon: RibbonConfig,
    pub stabilizer: StabilizerConfig,
}

impl LanyardConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the kernel cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let s = &self.smoothing;
        if !(s.min_speed >= 0.0 && s.min_speed <= s.max_speed && s.max_speed.is_finite()) {
            return invalid(format!(
                "smoothing speeds must satisfy 0 <= min_speed <= max_speed, got {}..{}",
                s.min_speed, s.max_speed
            ));
        }
        if !(self.physics.timestep > 0.0 && self.physics.timestep.is_finite()) {
            return invalid(format!(
                "physics timestep must be positive, got {}",
                self.physics.timestep
            ));
        }
        if !self.physics.gravity.is_finite() {
            return invalid("gravity must be finite".into());
        }
        if !(self.chain.segment_length > 0.0 && self.chain.segment_length.is_finite()) {
            return invalid(format!(
                "rope segment length must be positive, got {}",
                self.chain.segment_length
            ));
        }
        if !(self.chain.spacing.is_finite() && self.chain.anchor_position.is_finite()) {
            return invalid("chain layout must be finite".into());
        }
        if self.ribbon.points < 2 {
            return invalid(format!(
                "ribbon needs at least 2 points, got {}",
                self.ribbon.points
            ));
        }
        if !self.stabilizer.yaw_gain.is_finite() {
            return invalid("yaw gain must be finite".into());
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_defaults() {
        let config = LanyardConfig::default();
        assert_eq!(config.smoothing.min_speed, 10.0);
        assert_eq!(config.smoothing.max_speed, 50.0);
        assert_eq!(config.chain.segment_length, 1.0);
        assert_eq!(config.chain.badge_anchor, Vec3::new(0.0, 1.45, 0.0));
        assert_eq!(config.physics.gravity, Vec3::new(0.0, -40.0, 0.0));
        assert_eq!(config.ribbon.points, 32);
        assert_eq!(config.stabilizer.yaw_gain, 0.25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            LanyardConfig::from_json_str(r#"{ "smoothing": { "max_speed": 80.0 } }"#).unwrap();
        assert_eq!(config.smoothing.min_speed, 10.0);
        assert_eq!(config.smoothing.max_speed, 80.0);
        assert_eq!(config.chain, ChainConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LanyardConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(LanyardConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_inverted_speeds() {
        let err = LanyardConfig::from_json_str(
            r#"{ "smoothing": { "min_speed": 60.0, "max_speed": 50.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = LanyardConfig::default();
        config.ribbon.points = 1;
        assert!(config.validate().is_err());

        let mut config = LanyardConfig::default();
        config.physics.timestep = 0.0;
        assert!(config.validate().is_err());

        let mut config = LanyardConfig::default();
        config.chain.segment_length = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LanyardConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = LanyardConfig::load(Path::new("/nonexistent/lanyard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
