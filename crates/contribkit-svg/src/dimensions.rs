//! Natural size of an SVG logo.
//!
//! Strategies are tried in order and the first success wins:
//! 1. `viewBox="minX minY width height"` (both size tokens must be valid, finite numbers)
//! 2. `width="..."` / `height="..."` attributes, parsed as base-10 integers (`256px` -> `256`);
//!    a value too long to be finite counts as missing
//! 3. per-field defaults ([`DEFAULT_WIDTH`] x [`DEFAULT_HEIGHT`])
//!
//! This is a text scan, not an XML parse: the first matching attribute anywhere in the markup is
//! used.

use crate::number::{js_number, js_parse_int, split_js_whitespace};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_WIDTH: f64 = 200.0;
pub const DEFAULT_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Attribute scan result before defaults are applied. Each side is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AttributeDimensions {
    width: Option<f64>,
    height: Option<f64>,
}

impl AttributeDimensions {
    fn or_defaults(self) -> Dimensions {
        let width = self.width.unwrap_or_else(|| {
            tracing::debug!(
                default = DEFAULT_WIDTH,
                "no usable width attribute; using default"
            );
            DEFAULT_WIDTH
        });
        let height = self.height.unwrap_or_else(|| {
            tracing::debug!(
                default = DEFAULT_HEIGHT,
                "no usable height attribute; using default"
            );
            DEFAULT_HEIGHT
        });
        Dimensions { width, height }
    }
}

fn viewbox_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"viewBox=['"]([^'"]*)['"]"#).expect("viewBox regex must compile")
    })
}

fn width_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"width=['"]([^'"]*)['"]"#).expect("width regex must compile")
    })
}

fn height_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"height=['"]([^'"]*)['"]"#).expect("height regex must compile")
    })
}

fn first_capture<'a>(re: &Regex, svg: &'a str) -> Option<&'a str> {
    re.captures(svg)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts the natural width/height of `svg`. Never fails; see the module docs for the
/// fallback order.
pub fn extract_svg_dimensions(svg: &str) -> Dimensions {
    viewbox_dimensions(svg).unwrap_or_else(|| attribute_dimensions(svg).or_defaults())
}

fn viewbox_dimensions(svg: &str) -> Option<Dimensions> {
    let raw = first_capture(viewbox_re(), svg)?;

    // A leading separator yields an empty first token (which reads as 0), so the size tokens
    // are always at index 2 and 3 of the raw split.
    let tokens = split_js_whitespace(raw);
    let width = tokens.get(2).copied().and_then(js_number);
    let height = tokens.get(3).copied().and_then(js_number);

    match (width, height) {
        (Some(width), Some(height)) if width.is_finite() && height.is_finite() => {
            Some(Dimensions { width, height })
        }
        _ => {
            tracing::debug!(view_box = raw, "ignoring unusable viewBox");
            None
        }
    }
}

fn attribute_dimensions(svg: &str) -> AttributeDimensions {
    AttributeDimensions {
        width: first_capture(width_re(), svg)
            .and_then(js_parse_int)
            .filter(|v| v.is_finite()),
        height: first_capture(height_re(), svg)
            .and_then(js_parse_int)
            .filter(|v| v.is_finite()),
    }
}
