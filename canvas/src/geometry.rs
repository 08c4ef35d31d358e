//! Pointer-driven transform math: translate, resize, rotate.
//!
//! Every function here is pure. Each takes the element geometry captured at
//! pointer-down (a [`Snapshot`]), the pointer position at pointer-down, and
//! the current pointer position, and returns the new value. The gesture
//! controller calls them on every pointer-move with the *original* snapshot,
//! so repeated frames never accumulate drift.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_SIZE};

/// A point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Element geometry frozen at the start of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees at gesture start.
    pub rotation: f64,
}

impl Snapshot {
    /// Center of the snapshot box; the rotation pivot.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// New top-left position after dragging the body from `origin` to `now`.
///
/// Width and height are unchanged; the position is clamped so the box stays
/// on the canvas.
#[must_use]
pub fn translate(snapshot: &Snapshot, origin: Point, now: Point) -> (f64, f64) {
    let dx = now.x - origin.x;
    let dy = now.y - origin.y;
    clamp_position(snapshot.x + dx, snapshot.y + dy, snapshot.width, snapshot.height)
}

/// New `(width, height)` after dragging a corner handle from `origin` to `now`.
///
/// The box stays anchored at its top-left corner. The [`MIN_SIZE`] floor is
/// applied first and the canvas edge cap last, so a request that conflicts
/// with both resolves to the smaller limit.
#[must_use]
pub fn resize(snapshot: &Snapshot, origin: Point, now: Point) -> (f64, f64) {
    let dx = now.x - origin.x;
    let dy = now.y - origin.y;
    (
        clamp_size(snapshot.width + dx, CANVAS_WIDTH - snapshot.x),
        clamp_size(snapshot.height + dy, CANVAS_HEIGHT - snapshot.y),
    )
}

/// New rotation in degrees after dragging the rotate handle from `origin` to `now`.
///
/// The result is the snapshot rotation plus the angle swept around the
/// snapshot center. It is never wrapped into `[0, 360)`.
#[must_use]
pub fn rotate(snapshot: &Snapshot, origin: Point, now: Point) -> f64 {
    let center = snapshot.center();
    let start = (origin.y - center.y).atan2(origin.x - center.x);
    let current = (now.y - center.y).atan2(now.x - center.x);
    snapshot.rotation + (current - start).to_degrees()
}

/// Clamp a top-left position so a `width × height` box fits on the canvas.
#[must_use]
pub fn clamp_position(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (
        x.min(CANVAS_WIDTH - width).max(0.0),
        y.min(CANVAS_HEIGHT - height).max(0.0),
    )
}

/// Floor a size at [`MIN_SIZE`], then cap it at `max`.
///
/// Uses `max`/`min` rather than `f64::clamp`, which panics when the bounds cross.
#[must_use]
pub fn clamp_size(size: f64, max: f64) -> f64 {
    size.max(MIN_SIZE).min(max)
}
