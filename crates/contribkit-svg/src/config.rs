//! Typed model of the contribkit configuration (`contribkit.config.*`).
//!
//! Keys use the same camelCase spelling as the JavaScript config so a JSON/YAML export of it
//! deserializes directly. Credentials are never read from the process environment here; callers
//! inject a lookup via [`ContribkitConfig::resolve_credentials`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOGIN_ENV: &str = "CONTRIBKIT_GITHUB_CONTRIBUTIONS_LOGIN";
pub const TOKEN_ENV: &str = "CONTRIBKIT_GITHUB_CONTRIBUTIONS_TOKEN";

const REDACTED: &str = "***";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContribkitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsors_auto_merge: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_contributions: Option<GithubContributionsConfig>,
    #[serde(default)]
    pub renderer: Renderer,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circles: Option<CirclesConfig>,
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

fn default_width() -> u32 {
    800
}

impl Default for ContribkitConfig {
    fn default() -> Self {
        Self {
            name: None,
            output_dir: None,
            formats: Vec::new(),
            sponsors_auto_merge: None,
            github_contributions: None,
            renderer: Renderer::default(),
            width: default_width(),
            circles: None,
            tiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubContributionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub logarithmic_scaling: bool,
    #[serde(default = "default_max_contributions")]
    pub max_contributions: u32,
}

fn default_max_contributions() -> u32 {
    100
}

impl Default for GithubContributionsConfig {
    fn default() -> Self {
        Self {
            login: None,
            token: None,
            logarithmic_scaling: false,
            max_contributions: default_max_contributions(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Renderer {
    #[default]
    Tiers,
    Circles,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CirclesConfig {
    #[serde(default = "default_radius_max")]
    pub radius_max: f64,
    #[serde(default = "default_radius_min")]
    pub radius_min: f64,
    #[serde(default = "default_radius_past")]
    pub radius_past: f64,
}

fn default_radius_max() -> f64 {
    300.0
}

fn default_radius_min() -> f64 {
    10.0
}

fn default_radius_past() -> f64 {
    5.0
}

impl Default for CirclesConfig {
    fn default() -> Self {
        Self {
            radius_max: default_radius_max(),
            radius_min: default_radius_min(),
            radius_past: default_radius_past(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub title: String,
    #[serde(default)]
    pub preset: TierPreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_dollars: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierPreset {
    None,
    Xs,
    Small,
    #[default]
    Base,
    Medium,
    Large,
    Xl,
}

impl ContribkitConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads a config file; `.json` is read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        tracing::debug!(path = %path.display(), json = is_json, "loading contribkit config");
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// The checked-in GitHub contributions graphic: a 1000px circle packing of repositories.
    pub fn github_contributions_preset() -> Self {
        Self {
            github_contributions: Some(GithubContributionsConfig {
                login: None,
                token: None,
                logarithmic_scaling: false,
                max_contributions: 100,
            }),
            renderer: Renderer::Circles,
            width: 1000,
            circles: Some(CirclesConfig {
                radius_max: 100.0,
                radius_min: 1.0,
                radius_past: 1.0,
            }),
            tiers: vec![Tier {
                title: "Repo".to_string(),
                preset: TierPreset::Base,
                monthly_dollars: None,
            }],
            ..Self::default()
        }
    }

    /// Fills a missing GitHub contributions `login`/`token` from `lookup` (usually the process
    /// environment, keyed by [`LOGIN_ENV`] and [`TOKEN_ENV`]). Values already set win.
    pub fn resolve_credentials(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let Some(gh) = self.github_contributions.as_mut() else {
            return;
        };
        if gh.login.is_none() {
            gh.login = lookup(LOGIN_ENV).filter(|v| !v.is_empty());
        }
        if gh.token.is_none() {
            gh.token = lookup(TOKEN_ENV).filter(|v| !v.is_empty());
        }
        if gh.login.is_none() || gh.token.is_none() {
            tracing::warn!(
                login = gh.login.is_some(),
                token = gh.token.is_some(),
                "github contributions credentials are incomplete"
            );
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(invalid("width must be greater than 0"));
        }
        if let Some(circles) = &self.circles {
            if circles.radius_min > circles.radius_max {
                return Err(invalid(format!(
                    "circles.radiusMin ({}) exceeds circles.radiusMax ({})",
                    circles.radius_min, circles.radius_max
                )));
            }
        }
        if let Some(gh) = &self.github_contributions {
            if gh.max_contributions == 0 {
                return Err(invalid(
                    "githubContributions.maxContributions must be greater than 0",
                ));
            }
        }
        if let Some(i) = self.tiers.iter().position(|t| t.title.trim().is_empty()) {
            return Err(invalid(format!("tiers[{i}].title must not be empty")));
        }
        Ok(())
    }

    /// A copy safe to print: the GitHub token, if any, is masked.
    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        if let Some(token) = out
            .github_contributions
            .as_mut()
            .and_then(|gh| gh.token.as_mut())
        {
            *token = REDACTED.to_string();
        }
        out
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}
