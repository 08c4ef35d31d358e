//! Document model: elements, their style records, and the in-memory store.
//!
//! This module defines what is on the canvas (`Element`, `ElementBody`), the
//! per-kind style records (`ShapeStyles`, `TextStyles`), sparse edit types
//! (`GeometryPatch`, `StylePatch`), and the store that owns every live
//! element (`DocStore`).
//!
//! The serialized shape of an `Element` is the persisted and exported record:
//! camelCase fields, a `type` tag, and a nested `styles` object whose fields
//! depend on the tag.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CIRCLE_RADIUS, DEFAULT_POSITION, DEFAULT_SHAPE_SIZE, DEFAULT_TEXT_HEIGHT,
    DEFAULT_TEXT_WIDTH, MIN_SIZE,
};
use crate::geometry::{Snapshot, clamp_position, clamp_size};
use crate::zorder::{self, Direction};

/// Unique identifier for an element, formatted `elem<N>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Build the id for the `n`th element ever created.
    #[must_use]
    pub fn from_counter(n: u64) -> Self {
        Self(format!("elem{n}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `N` for an id of the form `elem<N>`.
    #[must_use]
    pub fn counter_suffix(&self) -> Option<u64> {
        match self.0.strip_prefix("elem")?.parse() {
            Ok(n) => Some(n),
            Err(_) => None,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    /// Drawn as the ellipse inscribed in the bounding box.
    Circle,
    Text,
}

impl ElementKind {
    /// Lowercase name as used on the wire and in layer labels.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================
// Style records
// =============================================================

/// Per-corner radii in pixels. All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderRadius {
    pub tl: f64,
    pub tr: f64,
    pub br: f64,
    pub bl: f64,
}

impl BorderRadius {
    /// The same radius on all four corners.
    #[must_use]
    pub fn uniform(r: f64) -> Self {
        Self { tl: r, tr: r, br: r, bl: r }
    }

    /// Set one corner, flooring the value at zero.
    pub fn set(&mut self, corner: Corner, value: f64) {
        let value = value.max(0.0);
        match corner {
            Corner::Tl => self.tl = value,
            Corner::Tr => self.tr = value,
            Corner::Br => self.br = value,
            Corner::Bl => self.bl = value,
        }
    }
}

/// One corner of a [`BorderRadius`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Tl,
    Tr,
    Br,
    Bl,
}

/// Font families offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Arial,
    Inter,
    Poppins,
    Roboto,
    Montserrat,
    #[serde(rename = "Courier New")]
    CourierNew,
}

impl FontFamily {
    pub const ALL: [Self; 6] = [
        Self::Arial,
        Self::Inter,
        Self::Poppins,
        Self::Roboto,
        Self::Montserrat,
        Self::CourierNew,
    ];

    /// CSS family name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Inter => "Inter",
            Self::Poppins => "Poppins",
            Self::Roboto => "Roboto",
            Self::Montserrat => "Montserrat",
            Self::CourierNew => "Courier New",
        }
    }
}

/// Horizontal alignment of text inside its box (a flex `justify-content` value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    FlexStart,
    #[default]
    Center,
    FlexEnd,
}

impl Justify {
    pub const ALL: [Self; 3] = [Self::FlexStart, Self::Center, Self::FlexEnd];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FlexStart => "flex-start",
            Self::Center => "center",
            Self::FlexEnd => "flex-end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Bold,
            Self::Bold => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Italic,
            Self::Italic => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

impl TextDecoration {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::None => Self::Underline,
            Self::Underline => Self::None,
        }
    }
}

/// Style record shared by rectangles and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyles {
    /// CSS color string.
    pub background_color: String,
    pub border_radius: BorderRadius,
}

/// Style record of a text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyles {
    pub background_color: String,
    pub border_radius: BorderRadius,
    pub text_content: String,
    pub text_color: String,
    /// Font size in pixels, at least 1.
    pub font_size: u32,
    pub font_family: FontFamily,
    pub justify_content: Justify,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
}

/// Kind tag plus the style record that kind carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementBody {
    Rectangle { styles: ShapeStyles },
    Circle { styles: ShapeStyles },
    Text { styles: TextStyles },
}

impl ElementBody {
    /// Variant defaults for a freshly created element of `kind`.
    #[must_use]
    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Rectangle => Self::Rectangle {
                styles: ShapeStyles {
                    background_color: "#2c2c2c".to_owned(),
                    border_radius: BorderRadius::uniform(0.0),
                },
            },
            ElementKind::Circle => Self::Circle {
                styles: ShapeStyles {
                    background_color: "#2c2c2c".to_owned(),
                    border_radius: BorderRadius::uniform(CIRCLE_RADIUS),
                },
            },
            ElementKind::Text => Self::Text {
                styles: TextStyles {
                    background_color: "transparent".to_owned(),
                    border_radius: BorderRadius::uniform(0.0),
                    text_content: "New Text".to_owned(),
                    text_color: "#000000".to_owned(),
                    font_size: 16,
                    font_family: FontFamily::default(),
                    justify_content: Justify::default(),
                    font_weight: FontWeight::default(),
                    font_style: FontStyle::default(),
                    text_decoration: TextDecoration::default(),
                },
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Rectangle { .. } => ElementKind::Rectangle,
            Self::Circle { .. } => ElementKind::Circle,
            Self::Text { .. } => ElementKind::Text,
        }
    }

    /// Fill color common to every kind.
    #[must_use]
    pub fn background_color(&self) -> &str {
        match self {
            Self::Rectangle { styles } | Self::Circle { styles } => &styles.background_color,
            Self::Text { styles } => &styles.background_color,
        }
    }

    #[must_use]
    pub fn border_radius(&self) -> BorderRadius {
        match self {
            Self::Rectangle { styles } | Self::Circle { styles } => styles.border_radius,
            Self::Text { styles } => styles.border_radius,
        }
    }

    /// Text styles, or `None` for shapes.
    #[must_use]
    pub fn text(&self) -> Option<&TextStyles> {
        match self {
            Self::Text { styles } => Some(styles),
            Self::Rectangle { .. } | Self::Circle { .. } => None,
        }
    }

    fn set_background_color(&mut self, color: String) {
        match self {
            Self::Rectangle { styles } | Self::Circle { styles } => styles.background_color = color,
            Self::Text { styles } => styles.background_color = color,
        }
    }

    fn border_radius_mut(&mut self) -> &mut BorderRadius {
        match self {
            Self::Rectangle { styles } | Self::Circle { styles } => &mut styles.border_radius,
            Self::Text { styles } => &mut styles.border_radius,
        }
    }
}

// =============================================================
// Element
// =============================================================

/// A placeable object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    /// Kind tag and styles, flattened into `type` + `styles`.
    #[serde(flatten)]
    pub body: ElementBody,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the box center. Never normalized.
    pub rotation: f64,
    /// Paint order; higher values paint on top.
    pub z_index: i64,
}

impl Element {
    /// A new element of `kind` at the default position with variant defaults.
    #[must_use]
    pub fn new(kind: ElementKind, id: ElementId, z_index: i64) -> Self {
        let (width, height) = match kind {
            ElementKind::Rectangle | ElementKind::Circle => (DEFAULT_SHAPE_SIZE, DEFAULT_SHAPE_SIZE),
            ElementKind::Text => (DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT),
        };
        Self {
            id,
            body: ElementBody::default_for(kind),
            x: DEFAULT_POSITION,
            y: DEFAULT_POSITION,
            width,
            height,
            rotation: 0.0,
            z_index,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    /// Freeze the current geometry for a pointer gesture.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
        }
    }

    /// Whether the box lies fully on the canvas and respects the size floor.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= CANVAS_WIDTH
            && self.y + self.height <= CANVAS_HEIGHT
            && self.width >= MIN_SIZE
            && self.height >= MIN_SIZE
    }

    /// Apply a geometry edit, keeping the element on the canvas.
    ///
    /// Sizes are floored at the minimum and capped at the canvas; the position
    /// is then clamped so the resized box fits.
    pub fn apply_geometry(&mut self, patch: &GeometryPatch) {
        let width = clamp_size(patch.width.unwrap_or(self.width), CANVAS_WIDTH);
        let height = clamp_size(patch.height.unwrap_or(self.height), CANVAS_HEIGHT);
        let (x, y) = clamp_position(patch.x.unwrap_or(self.x), patch.y.unwrap_or(self.y), width, height);
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
    }

    /// Apply a style edit. Text-only fields are ignored on shapes.
    pub fn apply_style(&mut self, patch: &StylePatch) {
        if let Some(ref color) = patch.background_color {
            self.body.set_background_color(color.clone());
        }
        if let Some((corner, value)) = patch.border_radius {
            self.body.border_radius_mut().set(corner, value);
        }
        let ElementBody::Text { styles } = &mut self.body else {
            return;
        };
        if let Some(ref text) = patch.text_content {
            styles.text_content.clone_from(text);
        }
        if let Some(ref color) = patch.text_color {
            styles.text_color.clone_from(color);
        }
        if let Some(size) = patch.font_size {
            if size >= 1 {
                styles.font_size = size;
            }
        }
        if let Some(family) = patch.font_family {
            styles.font_family = family;
        }
        if let Some(justify) = patch.justify_content {
            styles.justify_content = justify;
        }
        if patch.toggle_bold {
            styles.font_weight = styles.font_weight.toggled();
        }
        if patch.toggle_italic {
            styles.font_style = styles.font_style.toggled();
        }
        if patch.toggle_underline {
            styles.text_decoration = styles.text_decoration.toggled();
        }
    }
}

/// Sparse geometry edit. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Sparse style edit. Toggles flip their two-state value when `true`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub background_color: Option<String>,
    pub border_radius: Option<(Corner, f64)>,
    pub text_content: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<u32>,
    pub font_family: Option<FontFamily>,
    pub justify_content: Option<Justify>,
    pub toggle_bold: bool,
    pub toggle_italic: bool,
    pub toggle_underline: bool,
}

impl StylePatch {
    /// Whether the patch touches any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================
// Store
// =============================================================

/// In-memory store of elements, in insertion order.
///
/// Collection order is independent of paint order; the z-order manager swaps
/// neighbours in both.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    elements: Vec<Element>,
    counter: u64,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element of `kind` with the next id and the top z-index.
    pub fn create(&mut self, kind: ElementKind) -> &Element {
        self.counter += 1;
        let id = ElementId::from_counter(self.counter);
        let z = i64::try_from(self.elements.len()).unwrap_or(i64::MAX - 1) + 1;
        self.elements.push(Element::new(kind, id, z));
        let last = self.elements.len() - 1;
        &self.elements[last]
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Return a mutable reference to an element by id.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Remove an element by id, returning it if it was present.
    ///
    /// Surviving z-indices are compacted back to `1..N`.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| &e.id == id)?;
        let removed = self.elements.remove(index);
        zorder::compact(&mut self.elements);
        Some(removed)
    }

    /// Apply a geometry edit. Returns false if the element doesn't exist.
    pub fn apply_geometry(&mut self, id: &ElementId, patch: &GeometryPatch) -> bool {
        let Some(elem) = self.get_mut(id) else {
            return false;
        };
        elem.apply_geometry(patch);
        true
    }

    /// Apply a style edit. Returns false if the element doesn't exist.
    pub fn apply_style(&mut self, id: &ElementId, patch: &StylePatch) -> bool {
        let Some(elem) = self.get_mut(id) else {
            return false;
        };
        elem.apply_style(patch);
        true
    }

    /// Move an element one layer up or down. Returns whether anything moved.
    pub fn move_layer(&mut self, id: &ElementId, direction: Direction) -> bool {
        zorder::move_layer(&mut self.elements, id, direction)
    }

    /// Drop every element and restart id generation.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.counter = 0;
    }

    /// Replace the contents with a persisted collection.
    ///
    /// Records written by older editors may hold z-index gaps or ties, boxes
    /// off the canvas, or no counter at all. Z-indices are compacted, geometry
    /// is clamped, and the counter is raised past every `elem<N>` id present.
    /// A record that already satisfies the invariants loads unchanged.
    pub fn load(&mut self, mut elements: Vec<Element>, counter: u64) {
        let no_edit = GeometryPatch::default();
        for elem in &mut elements {
            elem.apply_geometry(&no_edit);
        }
        zorder::compact(&mut elements);
        let highest = elements.iter().filter_map(|e| e.id.counter_suffix()).max().unwrap_or(0);
        self.counter = counter.max(highest);
        self.elements = elements;
    }

    /// All elements in collection order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// All elements sorted by `(z_index, id)` for paint order.
    #[must_use]
    pub fn sorted_by_z(&self) -> Vec<&Element> {
        let mut elems: Vec<&Element> = self.elements.iter().collect();
        elems.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        elems
    }

    /// Number of elements ever created; the suffix of the latest id.
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
