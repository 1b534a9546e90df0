//! Lanyard Engine Library
//!
//! Physics and interaction kernel for a 3D badge hanging from a flexible
//! lanyard. Rendering is left to the caller: each frame produces a ribbon
//! polyline and a badge transform.
//!
//! # Modules
//!
//! - [`lanyard`] - Constraint chain, smoothing, ribbon curve, drag, stabilizer
//! - [`physics`] - Physics world contract and the rapier3d implementation
//! - [`camera`] - Camera unprojection and screen-to-NDC mapping
//! - [`input`] - Pointer events and cursor feedback
//! - [`config`] - Scene configuration
//!
//! # Example
//!
//! ```ignore
//! use lanyard_engine::camera::Camera;
//! use lanyard_engine::config::LanyardConfig;
//! use lanyard_engine::lanyard::LanyardScene;
//! use lanyard_engine::physics::RapierWorld;
//!
//! let config = LanyardConfig::default();
//! let mut world = RapierWorld::new(config.physics);
//! let mut scene = LanyardScene::new(&mut world, &config)?;
//! let camera = Camera::default();
//!
//! // Every frame
//! let (frame, _steps) = scene.advance(&mut world, &camera, delta);
//! draw_ribbon(frame.ribbon);
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod lanyard;
pub mod physics;

pub use config::LanyardConfig;
pub use error::{ConfigError, LanyardError, PhysicsError};
pub use lanyard::LanyardScene;
pub use physics::{PhysicsWorld, RapierWorld};
