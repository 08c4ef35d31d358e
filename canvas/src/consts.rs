//! Shared numeric constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Fixed canvas width in CSS pixels. Every element stays fully inside.
pub const CANVAS_WIDTH: f64 = 1210.0;

/// Fixed canvas height in CSS pixels.
pub const CANVAS_HEIGHT: f64 = 1010.0;

/// Smallest width or height an element may have.
pub const MIN_SIZE: f64 = 10.0;

/// Distance an arrow key moves the selected element.
pub const NUDGE_STEP: f64 = 5.0;

// ── Creation defaults ───────────────────────────────────────────

/// Left/top position of every newly created element.
pub const DEFAULT_POSITION: f64 = 100.0;

/// Width and height of a new rectangle or circle.
pub const DEFAULT_SHAPE_SIZE: f64 = 100.0;

/// Width of a new text box.
pub const DEFAULT_TEXT_WIDTH: f64 = 200.0;

/// Height of a new text box.
pub const DEFAULT_TEXT_HEIGHT: f64 = 50.0;

/// Corner radius large enough to round any element into an ellipse.
pub const CIRCLE_RADIUS: f64 = 9999.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around each corner handle.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Distance above the top edge of the rotate handle center.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Storage ─────────────────────────────────────────────────────

/// `localStorage` key holding the persisted editor record.
pub const STORAGE_KEY: &str = "editorState";
