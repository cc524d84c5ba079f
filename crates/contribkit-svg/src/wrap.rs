//! Sponsor logo fragments.
//!
//! A fragment is an `<a>` link around a nested `<svg>` that places the logo at `(x, y)` and
//! scales it to a target height. Scaling is expressed only through the outer `width`/`height`;
//! the `viewBox` always keeps the logo's natural size.

use crate::dimensions::Dimensions;
use crate::number::{fmt_js_number_into, strip_js_whitespace};
use serde::{Deserialize, Serialize};

pub const LINK_CLASS: &str = "contribkit-link";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub name: String,
    pub url: String,
}

impl Sponsor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// The sponsor name with every whitespace run removed (`"GitHub Copilot"` ->
    /// `"GitHubCopilot"`).
    pub fn element_id(&self) -> String {
        strip_js_whitespace(&self.name)
    }
}

/// Where a logo goes and how tall it should be rendered.
///
/// A `target_height` of `0` (or NaN) disables scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub target_height: f64,
    pub x: f64,
    pub y: f64,
}

impl Placement {
    pub fn new(target_height: f64, x: f64, y: f64) -> Self {
        Self {
            target_height,
            x,
            y,
        }
    }

    fn scale_for(&self, natural_height: f64) -> f64 {
        if self.target_height != 0.0 && !self.target_height.is_nan() {
            self.target_height / natural_height
        } else {
            1.0
        }
    }
}

pub fn wrap_sponsor_svg(
    sponsor: &Sponsor,
    svg: &str,
    natural: Dimensions,
    placement: Placement,
) -> String {
    let mut out = String::with_capacity(svg.len() + 256);
    wrap_sponsor_svg_into(&mut out, sponsor, svg, natural, placement);
    out
}

/// Appends the sponsor fragment for `svg` to `out`.
///
/// `svg` is inserted verbatim after a fully transparent background `<rect>` sized to the
/// natural dimensions, so logos with transparent regions still get a full hit target.
pub fn wrap_sponsor_svg_into(
    out: &mut String,
    sponsor: &Sponsor,
    svg: &str,
    natural: Dimensions,
    placement: Placement,
) {
    let scale = placement.scale_for(natural.height);
    let scaled_width = natural.width * scale;
    let scaled_height = natural.height * scale;

    out.push_str("\n  <a xlink:href=\"");
    escape_xml_attr_into(out, &sponsor.url);
    out.push_str("\" class=\"");
    out.push_str(LINK_CLASS);
    out.push_str("\" target=\"_blank\" id=\"");
    escape_xml_attr_into(out, &sponsor.element_id());
    out.push_str("\">\n    <svg x=\"");
    fmt_js_number_into(out, placement.x);
    out.push_str("\" y=\"");
    fmt_js_number_into(out, placement.y);
    out.push_str("\" width=\"");
    fmt_js_number_into(out, scaled_width);
    out.push_str("\" height=\"");
    fmt_js_number_into(out, scaled_height);
    out.push_str("\" viewBox=\"0 0 ");
    fmt_js_number_into(out, natural.width);
    out.push(' ');
    fmt_js_number_into(out, natural.height);
    out.push_str("\">\n      <rect width=\"");
    fmt_js_number_into(out, natural.width);
    out.push_str("\" height=\"");
    fmt_js_number_into(out, natural.height);
    out.push_str("\" fill=\"transparent\" />\n      ");
    out.push_str(svg);
    out.push_str("\n    </svg>\n  </a>");
}

fn escape_xml_attr_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
