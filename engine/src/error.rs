//! Error types
//!
//! Only scene construction can fail. Per-frame work never errors: a missing
//! body is "not ready" and the frame skips it.

use thiserror::Error;

use crate::lanyard::chain::{BodyRole, ChainLink};

/// Errors reported by a [`PhysicsWorld`](crate::physics::PhysicsWorld)
/// when creating bodies or joints.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Handle does not refer to a live body or joint.
    #[error("invalid physics handle {0}")]
    InvalidHandle(u32),
    /// Descriptor value rejected by the engine.
    #[error("invalid physics parameter: {0}")]
    InvalidParameter(String),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fatal lanyard scene errors.
#[derive(Debug, Error)]
pub enum LanyardError {
    #[error("failed to create {role:?} body: {source}")]
    BodyCreation {
        role: BodyRole,
        #[source]
        source: PhysicsError,
    },
    #[error("failed to create {link:?} joint: {source}")]
    JointCreation {
        link: ChainLink,
        #[source]
        source: PhysicsError,
    },
    #[error("world timestep {world}s does not match configured {config}s")]
    TimestepMismatch { world: f32, config: f32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
