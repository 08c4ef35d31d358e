//! One-way exports of the layout: element data as JSON, and static markup.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::fmt;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::doc::{Element, ElementBody};

/// Download name for [`layout_json`].
pub const LAYOUT_JSON_FILE: &str = "layout.json";

/// Download name for [`static_html`].
pub const LAYOUT_HTML_FILE: &str = "layout.html";

/// The element array, pretty-printed with two-space indentation.
///
/// Each record has the same shape as in the persisted editor state.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn layout_json(elements: &[Element]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(elements)
}

/// A fixed-size container with one absolutely positioned box per element.
///
/// Only geometry, background color, z-index and (for text) the text content
/// are emitted; borders, radii and font styling are not.
#[must_use]
pub fn static_html(elements: &[Element]) -> String {
    StaticHtml(elements).to_string()
}

struct StaticHtml<'a>(&'a [Element]);

impl fmt::Display for StaticHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<div style=\"position:relative; width:{CANVAS_WIDTH}px; height:{CANVAS_HEIGHT}px; background:#fff;\">"
        )?;
        for elem in self.0 {
            let content = match &elem.body {
                ElementBody::Text { styles } => escape_html(&styles.text_content),
                ElementBody::Rectangle { .. } | ElementBody::Circle { .. } => String::new(),
            };
            writeln!(
                f,
                "  <div style=\"position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; transform:rotate({}deg); background:{}; z-index:{};\">{content}</div>",
                elem.x,
                elem.y,
                elem.width,
                elem.height,
                elem.rotation,
                escape_attr(elem.body.background_color()),
                elem.z_index,
            )?;
        }
        f.write_str("</div>")
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}
