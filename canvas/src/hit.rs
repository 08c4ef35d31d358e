#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{DocStore, Element, ElementId};
use crate::geometry::Point;
use crate::input::{HandleCorner, HitPart};

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under `point`, checking the selected element's handles first.
///
/// Bodies are tested from the topmost z-index down. Points are rotated into
/// each element's local frame so rotated boxes hit where they are drawn.
#[must_use]
pub fn hit_test(point: Point, doc: &DocStore, selected_id: Option<&ElementId>) -> Option<Hit> {
    if let Some(selected) = selected_id.and_then(|id| doc.get(id)) {
        if let Some(part) = handle_at(point, selected) {
            return Some(Hit { element_id: selected.id.clone(), part });
        }
    }

    doc.sorted_by_z()
        .into_iter()
        .rev()
        .find(|e| body_contains(point, e))
        .map(|e| Hit { element_id: e.id.clone(), part: HitPart::Body })
}

/// Handle centers for `elem` in its unrotated local frame (top-left origin).
#[must_use]
pub fn handle_positions(elem: &Element) -> ([(HandleCorner, Point); 4], Point) {
    let corners = HandleCorner::ALL.map(|c| {
        let (ux, uy) = c.unit_offset();
        (c, Point::new(ux * elem.width, uy * elem.height))
    });
    let rotate = Point::new(elem.width / 2.0, -ROTATE_HANDLE_OFFSET_PX);
    (corners, rotate)
}

fn handle_at(point: Point, elem: &Element) -> Option<HitPart> {
    let local = to_local(point, elem);
    let (corners, rotate) = handle_positions(elem);
    if let Some((corner, _)) = corners.iter().find(|(_, p)| near(local, *p)) {
        return Some(HitPart::ResizeHandle(*corner));
    }
    near(local, rotate).then_some(HitPart::RotateHandle)
}

fn body_contains(point: Point, elem: &Element) -> bool {
    let local = to_local(point, elem);
    local.x >= 0.0 && local.x <= elem.width && local.y >= 0.0 && local.y <= elem.height
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= HANDLE_RADIUS_PX && (a.y - b.y).abs() <= HANDLE_RADIUS_PX
}

/// Map a canvas point into `elem`'s unrotated frame with the origin at its top-left.
fn to_local(point: Point, elem: &Element) -> Point {
    let cx = elem.x + elem.width / 2.0;
    let cy = elem.y + elem.height / 2.0;
    let (sin, cos) = (-elem.rotation).to_radians().sin_cos();
    let dx = point.x - cx;
    let dy = point.y - cy;
    Point::new(
        dx * cos - dy * sin + elem.width / 2.0,
        dx * sin + dy * cos + elem.height / 2.0,
    )
}
