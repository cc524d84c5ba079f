#![forbid(unsafe_code)]

//! SVG helpers for contribution-kit sponsor graphics.
//!
//! Two infallible building blocks:
//! - [`extract_svg_dimensions`]: read the natural size of an SVG logo (`viewBox`, then
//!   `width`/`height`, then 200x100 defaults)
//! - [`wrap_sponsor_svg`]: position and scale a logo inside a linked `<svg>` fragment
//!
//! plus a typed model of the contribkit configuration ([`ContribkitConfig`]).
//!
//! Numbers are read and printed with JavaScript semantics so fragments match what the
//! contribkit toolchain itself emits.

pub mod config;
pub mod dimensions;
pub mod error;
pub mod number;
pub mod wrap;

pub use config::{
    CirclesConfig, ContribkitConfig, GithubContributionsConfig, Renderer, Tier, TierPreset,
};
pub use dimensions::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Dimensions, extract_svg_dimensions};
pub use error::{Error, Result};
pub use wrap::{Placement, Sponsor, wrap_sponsor_svg, wrap_sponsor_svg_into};
