//! Lanyard kernel
//!
//! The physical and interaction core of the badge-on-a-lanyard scene.
//!
//! # Submodules
//!
//! - [`chain`] - Rigid-body topology: fixed anchor, three rope joints, badge
//! - [`smoothing`] - Adaptive smoothing of the middle joints
//! - [`curve`] - Chordal Catmull-Rom ribbon sampling
//! - [`drag`] - Pointer-driven kinematic dragging of the badge
//! - [`orientation`] - Yaw correction keeping the badge facing the viewer
//! - [`scene`] - Per-frame orchestration

pub mod chain;
pub mod curve;
pub mod drag;
pub mod orientation;
pub mod scene;
pub mod smoothing;

pub use chain::{BodyRole, ChainBodies, ChainConfig, ChainJoint, ChainLink, ConstraintChain};
pub use curve::{CurveSampler, RibbonConfig, chordal_catmull_rom};
pub use drag::{DragController, DragState, PointerCapture, drag_target};
pub use orientation::{OrientationStabilizer, StabilizerConfig, rotation_axes};
pub use scene::{FrameOutput, LanyardScene};
pub use smoothing::{SmoothedJoint, SmoothingConfig, SmoothingFilter};
