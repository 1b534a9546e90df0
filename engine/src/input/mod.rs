//! Input Module
//!
//! Platform-agnostic pointer input for grabbing the badge.
//! Decoupled from any specific windowing system; the caller translates its
//! events into [`PointerEvent`]s and applies [`CursorIcon`] changes.

pub mod cursor_manager;
pub mod pointer;

pub use cursor_manager::{CursorAction, CursorIcon, CursorManager};
pub use pointer::{PointerEvent, PointerId, PointerTracker};
