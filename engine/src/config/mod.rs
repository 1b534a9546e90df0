//! Config Module
//!
//! Centralized configuration for the lanyard scene. Fixed once the scene is
//! built.

pub mod lanyard_config;

pub use lanyard_config::LanyardConfig;
