//! Input model: tools, hit regions, and the gesture state machine.
//!
//! `Tool` and `UiState` capture persistent UI intent. `Gesture` is the active
//! pointer interaction between pointer-down and pointer-up, carrying the
//! element id, the pointer origin and the geometry snapshot as one value, so
//! a stale snapshot can never leak into an unrelated drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ElementId, ElementKind};
use crate::geometry::{Point, Snapshot};

/// Which tool is currently active in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    Rectangle,
    Circle,
    Text,
}

impl Tool {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
        }
    }

    /// The element kind this tool creates, if any.
    #[must_use]
    pub fn creates(self) -> Option<ElementKind> {
        match self {
            Self::Select => None,
            Self::Rectangle => Some(ElementKind::Rectangle),
            Self::Circle => Some(ElementKind::Circle),
            Self::Text => Some(ElementKind::Text),
        }
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"ArrowUp"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Whether this key deletes the selection.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// Unit direction for arrow keys, `None` for any other key.
    #[must_use]
    pub fn arrow(&self) -> Option<(f64, f64)> {
        match self.0.as_str() {
            "ArrowUp" => Some((0.0, -1.0)),
            "ArrowDown" => Some((0.0, 1.0)),
            "ArrowLeft" => Some((-1.0, 0.0)),
            "ArrowRight" => Some((1.0, 0.0)),
            _ => None,
        }
    }
}

/// Corner handle drawn on the selected element.
///
/// Every corner resizes from the bottom-right; the box stays anchored at its
/// top-left regardless of which handle is grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleCorner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl HandleCorner {
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    /// Offset of this corner from the box's top-left, as fractions of its size.
    #[must_use]
    pub fn unit_offset(self) -> (f64, f64) {
        match self {
            Self::Nw => (0.0, 0.0),
            Self::Ne => (1.0, 0.0),
            Self::Sw => (0.0, 1.0),
            Self::Se => (1.0, 1.0),
        }
    }
}

/// Which part of an element a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPart {
    Body,
    ResizeHandle(HandleCorner),
    RotateHandle,
}

/// The interaction mode, as reported to the render projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Idle,
    Drag,
    Resize,
    Rotate,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active toolbar tool.
    pub tool: Tool,
    /// The id of the currently selected element, if any. Non-owning.
    pub selected_id: Option<ElementId>,
}

/// The pointer gesture in progress.
///
/// Each active variant carries everything pointer-move needs to recompute the
/// element from scratch: which element, where the pointer went down, and the
/// element's geometry at that moment.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving the element by its body.
    Dragging {
        id: ElementId,
        /// Pointer position at pointer-down.
        origin: Point,
        snapshot: Snapshot,
    },
    /// Resizing by one of the corner handles.
    Resizing {
        id: ElementId,
        /// Handle that was grabbed. Geometry ignores it (every corner
        /// resizes from the bottom-right); hosts read it back through
        /// [`Gesture::corner`] to keep the matching resize cursor.
        corner: HandleCorner,
        origin: Point,
        snapshot: Snapshot,
    },
    /// Rotating by the rotate handle.
    Rotating { id: ElementId, origin: Point, snapshot: Snapshot },
}

impl Gesture {
    /// Start the gesture that a pointer-down on `part` of an element implies.
    #[must_use]
    pub fn begin(id: ElementId, part: HitPart, origin: Point, snapshot: Snapshot) -> Self {
        match part {
            HitPart::Body => Self::Dragging { id, origin, snapshot },
            HitPart::ResizeHandle(corner) => Self::Resizing { id, corner, origin, snapshot },
            HitPart::RotateHandle => Self::Rotating { id, origin, snapshot },
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Idle => Mode::Idle,
            Self::Dragging { .. } => Mode::Drag,
            Self::Resizing { .. } => Mode::Resize,
            Self::Rotating { .. } => Mode::Rotate,
        }
    }

    /// The element being manipulated, if a gesture is active.
    #[must_use]
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id, .. } => Some(id),
        }
    }

    /// The grabbed handle while resizing.
    #[must_use]
    pub fn corner(&self) -> Option<HandleCorner> {
        match self {
            Self::Resizing { corner, .. } => Some(*corner),
            Self::Idle | Self::Dragging { .. } | Self::Rotating { .. } => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
