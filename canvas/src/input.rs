//! Input model: modifier keys, mouse buttons, keys, and the gesture state machine.
//!
//! `Modifiers`, `Button` and `Key` describe a raw browser event. `InputState`
//! is the single gesture tracked between pointer-down and pointer-up, carrying
//! everything needed to recompute the element from gesture-start values on
//! each move, or to restore those values if the gesture is aborted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::content::ElementKind;
use crate::doc::ElementId;
use crate::geometry::{Handle, Point, Rect};
use crate::snap::Guide;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Alt or Meta turns a corner press into a rotation.
    #[must_use]
    pub fn rotate(self) -> bool {
        self.alt || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.0 == "Backspace"
    }
}

/// Persistent UI state visible to the surface.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Preview mode hides every editing affordance and ignores presses.
    pub preview: bool,
    /// Guides reported by the last move or resize step.
    pub guides: Vec<Guide>,
    /// Cursor currently requested from the host.
    pub cursor: &'static str,
}

/// The gesture in progress.
///
/// Each active variant carries the gesture-start values. Moves are always
/// recomputed from these, never accumulated, so rounding and snapping cannot
/// drift over a long drag.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A palette entry was pressed; the store's ghost follows the pointer.
    DraggingFromPalette {
        kind: ElementKind,
        /// Canvas-space press point, for the minimum-travel check.
        start_screen: Point,
    },
    /// An element body was pressed and is following the pointer.
    MovingElement {
        id: ElementId,
        /// Page-space pointer minus element origin at press.
        offset: Point,
        /// Element origin at press, restored on abort.
        orig: Point,
    },
    /// A resize handle is being dragged.
    ResizingElement {
        id: ElementId,
        handle: Handle,
        /// Page-space pointer at press; deltas are measured from here.
        start_pointer: Point,
        start_rect: Rect,
    },
    /// The element turns about its center.
    RotatingElement {
        id: ElementId,
        /// Element center at press. Not recomputed mid-gesture.
        center: Point,
        start_pointer: Point,
        orig_rotation: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Element the gesture acts on, if any.
    #[must_use]
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Self::Idle | Self::DraggingFromPalette { .. } => None,
            Self::MovingElement { id, .. } | Self::ResizingElement { id, .. } | Self::RotatingElement { id, .. } => {
                Some(id)
            }
        }
    }
}
