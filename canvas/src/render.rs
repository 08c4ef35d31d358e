//! Render projection: the read-only view handed to the host's renderer.
//!
//! This module never draws. It turns document and UI state into plain,
//! serializable records: one [`RenderNode`] per element with the handle
//! affordances attached to the selected one, plus the layers panel feed.
//! The host maps these onto DOM nodes (or any other surface).

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::doc::{DocStore, Element, ElementBody, ElementId, ElementKind};
use crate::geometry::Point;
use crate::hit::handle_positions;
use crate::input::{Gesture, HandleCorner, Mode, UiState};

/// A handle to draw on the selected element, in its local unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Handle {
    Resize { corner: HandleCorner, at: Point },
    Rotate { at: Point },
}

/// One element as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode<'a> {
    /// Full element record, styles included.
    #[serde(flatten)]
    pub element: &'a Element,
    pub selected: bool,
    /// CSS `border-radius` for the box; see [`css_border_radius`].
    pub css_border_radius: String,
    /// Empty unless `selected`.
    pub handles: Vec<Handle>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection<'a> {
    /// Elements in collection order; paint order comes from `zIndex`.
    pub nodes: Vec<RenderNode<'a>>,
    pub selected_id: Option<&'a ElementId>,
    pub mode: Mode,
    /// Handle held during a resize, for the host's cursor.
    pub active_handle: Option<HandleCorner>,
}

/// One row of the layers panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerItem<'a> {
    pub id: &'a ElementId,
    pub kind: ElementKind,
    pub z_index: i64,
    /// `"<type> (<id>)"`.
    pub label: String,
    pub selected: bool,
}

/// Project the document for rendering.
#[must_use]
pub fn project<'a>(doc: &'a DocStore, ui: &'a UiState, gesture: &Gesture) -> Projection<'a> {
    let selected_id = ui.selected_id.as_ref();
    let nodes = doc
        .elements()
        .iter()
        .map(|element| {
            let selected = selected_id == Some(&element.id);
            let handles = if selected { handles_for(element) } else { Vec::new() };
            RenderNode { element, selected, css_border_radius: css_border_radius(element), handles }
        })
        .collect();
    Projection { nodes, selected_id, mode: gesture.mode(), active_handle: gesture.corner() }
}

/// Layers panel rows, bottom layer first.
#[must_use]
pub fn layers<'a>(doc: &'a DocStore, ui: &UiState) -> Vec<LayerItem<'a>> {
    doc.sorted_by_z()
        .into_iter()
        .map(|e| LayerItem {
            id: &e.id,
            kind: e.kind(),
            z_index: e.z_index,
            label: format!("{} ({})", e.kind(), e.id),
            selected: ui.selected_id.as_ref() == Some(&e.id),
        })
        .collect()
}

/// CSS `border-radius` shorthand for an element, as the DOM projector applies it.
///
/// Circles always render fully rounded regardless of their stored radii.
#[must_use]
pub fn css_border_radius(element: &Element) -> String {
    if let ElementBody::Circle { .. } = element.body {
        return "50%".to_owned();
    }
    let r = element.body.border_radius();
    format!("{}px {}px {}px {}px", r.tl, r.tr, r.br, r.bl)
}

fn handles_for(element: &Element) -> Vec<Handle> {
    let (corners, rotate) = handle_positions(element);
    corners
        .into_iter()
        .map(|(corner, at)| Handle::Resize { corner, at })
        .chain(std::iter::once(Handle::Rotate { at: rotate }))
        .collect()
}
