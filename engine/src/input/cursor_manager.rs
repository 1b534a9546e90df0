//! Cursor Manager Module
//!
//! Grab feedback for the badge: an open hand while hovering, a closed hand
//! while dragging, the default arrow otherwise.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lanyard_engine::input::{CursorAction, CursorManager};
//!
//! let mut cursor = CursorManager::new();
//!
//! if cursor.set_hovered(true) == CursorAction::ApplyState {
//!     window.set_cursor(cursor.icon());
//!     cursor.clear_dirty();
//! }
//! ```

/// Actions that the CursorManager recommends after handling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// No action needed
    None,
    /// Cursor icon changed; apply it to the window
    ApplyState,
}

/// Cursor icon requested from the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// Tracks hover and drag state and derives the cursor icon from them.
#[derive(Debug, Clone)]
pub struct CursorManager {
    /// Pointer is over the badge
    hovered: bool,
    /// Badge is being dragged
    dragging: bool,
    /// Tracks if state changed and needs to be applied to window
    state_dirty: bool,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorManager {
    pub fn new() -> Self {
        Self {
            hovered: false,
            dragging: false,
            state_dirty: true, // Need to apply initial state
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Check if cursor state needs to be applied to the window.
    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    /// Clear the dirty flag after applying state.
    pub fn clear_dirty(&mut self) {
        self.state_dirty = false;
    }

    /// The icon for the current state. Dragging wins over hovering.
    pub fn icon(&self) -> CursorIcon {
        if self.dragging {
            CursorIcon::Grabbing
        } else if self.hovered {
            CursorIcon::Grab
        } else {
            CursorIcon::Default
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) -> CursorAction {
        let before = self.icon();
        self.hovered = hovered;
        self.mark_if_changed(before)
    }

    pub fn set_dragging(&mut self, dragging: bool) -> CursorAction {
        let before = self.icon();
        self.dragging = dragging;
        self.mark_if_changed(before)
    }

    fn mark_if_changed(&mut self, before: CursorIcon) -> CursorAction {
        if self.icon() != before {
            self.state_dirty = true;
            CursorAction::ApplyState
        } else {
            CursorAction::None
        }
    }
}
