//! Parsing of raw property-panel input values.
//!
//! Form inputs arrive as strings. Each parser here turns one into the value
//! the model expects, applying the editor's fallback rule instead of
//! rejecting the edit.

#[cfg(test)]
#[path = "props_test.rs"]
mod props_test;

use crate::consts::MIN_SIZE;
use crate::doc::{Corner, FontFamily, GeometryPatch, Justify, StylePatch};

/// A property name the panel does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property `{0}`")]
pub struct UnknownProperty(pub String);

/// The model edit a single panel input maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Geometry(GeometryPatch),
    Style(StylePatch),
}

/// Property names accepted by [`edit_for`].
pub const PROPERTY_NAMES: [&str; 18] = [
    "x",
    "y",
    "width",
    "height",
    "rotation",
    "background",
    "radius-tl",
    "radius-tr",
    "radius-br",
    "radius-bl",
    "text",
    "text-color",
    "font-size",
    "font-family",
    "justify",
    "bold",
    "italic",
    "underline",
];

/// Map a panel input (`name`, raw `value`) onto a model edit.
///
/// `Ok(None)` means the value was rejected and the edit is dropped, as for an
/// unparsable font size or a family outside the whitelist. Toggle properties
/// (`bold`, `italic`, `underline`) ignore `raw`.
///
/// # Errors
///
/// Returns [`UnknownProperty`] if `name` is not a panel property.
pub fn edit_for(name: &str, raw: &str) -> Result<Option<Edit>, UnknownProperty> {
    let geometry = |patch: GeometryPatch| Ok(Some(Edit::Geometry(patch)));
    let style = |patch: StylePatch| Ok(Some(Edit::Style(patch)));
    let radius = |corner: Corner| style(StylePatch { border_radius: Some((corner, parse_radius(raw))), ..Default::default() });

    match name {
        "x" => geometry(GeometryPatch { x: Some(parse_position(raw)), ..Default::default() }),
        "y" => geometry(GeometryPatch { y: Some(parse_position(raw)), ..Default::default() }),
        "width" => geometry(GeometryPatch { width: Some(parse_dimension(raw)), ..Default::default() }),
        "height" => geometry(GeometryPatch { height: Some(parse_dimension(raw)), ..Default::default() }),
        "rotation" => geometry(GeometryPatch { rotation: Some(parse_rotation(raw)), ..Default::default() }),
        "background" => style(StylePatch { background_color: Some(raw.to_owned()), ..Default::default() }),
        "radius-tl" => radius(Corner::Tl),
        "radius-tr" => radius(Corner::Tr),
        "radius-br" => radius(Corner::Br),
        "radius-bl" => radius(Corner::Bl),
        "text" => style(StylePatch { text_content: Some(raw.to_owned()), ..Default::default() }),
        "text-color" => style(StylePatch { text_color: Some(raw.to_owned()), ..Default::default() }),
        "font-size" => match parse_font_size(raw) {
            Some(size) => style(StylePatch { font_size: Some(size), ..Default::default() }),
            None => Ok(None),
        },
        "font-family" => match parse_font_family(raw) {
            Some(family) => style(StylePatch { font_family: Some(family), ..Default::default() }),
            None => Ok(None),
        },
        "justify" => match parse_justify(raw) {
            Some(justify) => style(StylePatch { justify_content: Some(justify), ..Default::default() }),
            None => Ok(None),
        },
        "bold" => style(StylePatch { toggle_bold: true, ..Default::default() }),
        "italic" => style(StylePatch { toggle_italic: true, ..Default::default() }),
        "underline" => style(StylePatch { toggle_underline: true, ..Default::default() }),
        other => Err(UnknownProperty(other.to_owned())),
    }
}

/// Width/height input: leading integer, floored at [`MIN_SIZE`].
///
/// Unparsable input falls back to [`MIN_SIZE`].
#[must_use]
pub fn parse_dimension(raw: &str) -> f64 {
    parse_leading_int(raw).map_or(MIN_SIZE, |n| n.max(MIN_SIZE))
}

/// Corner radius input: any number, floored at zero; unparsable is zero.
#[must_use]
pub fn parse_radius(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n.max(0.0),
        _ => 0.0,
    }
}

/// Font size input. `None` means the edit is ignored (unparsable or below 1).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_font_size(raw: &str) -> Option<u32> {
    let n = parse_leading_int(raw)?;
    if n < 1.0 || n > f64::from(u32::MAX) {
        return None;
    }
    // Integral and in range, checked above.
    Some(n as u32)
}

/// Font family by its CSS name.
#[must_use]
pub fn parse_font_family(raw: &str) -> Option<FontFamily> {
    FontFamily::ALL.into_iter().find(|f| f.as_str().eq_ignore_ascii_case(raw.trim()))
}

/// Alignment by its `justify-content` value.
#[must_use]
pub fn parse_justify(raw: &str) -> Option<Justify> {
    Justify::ALL.into_iter().find(|j| j.as_str() == raw.trim())
}

/// Position input: leading integer, unparsable is zero.
#[must_use]
pub fn parse_position(raw: &str) -> f64 {
    parse_leading_int(raw).unwrap_or(0.0)
}

/// Rotation input in degrees; unparsable is zero.
#[must_use]
pub fn parse_rotation(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Parse an optional sign and leading digits, ignoring any trailing text.
fn parse_leading_int(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    match digits[..end].parse::<f64>() {
        Ok(n) => Some(sign * n),
        Err(_) => None,
    }
}
