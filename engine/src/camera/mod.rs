//! Camera Module
//!
//! Camera state and screen-to-world math for pointer interaction.
//! This module is window-system agnostic - it only deals with matrices and rays.

pub mod projection;
pub mod raycast;

pub use projection::Camera;
pub use raycast::{Viewport, screen_to_ndc, unproject_pointer};
