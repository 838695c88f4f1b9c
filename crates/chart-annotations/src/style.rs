// File: crates/chart-annotations/src/style.rs
// Summary: Label style defaults and TOML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::{FillStyle, TextAlign};
use crate::error::Result;

pub const DEFAULT_FONT_FAMILY: &str = "-apple-system, system-ui, Roboto, 'Helvetica Neue', Ubuntu, sans-serif";
pub const DEFAULT_FONT_SIZE: f32 = 12.0;
pub const DEFAULT_FILL: &str = "#000000";

/// Static label styling, e.g. a `[label]` table in a chart config file.
///
/// ```toml
/// font_family = "Roboto Mono"
/// font_size = 14
/// fill = "#2080c8"
/// rotate = -45
/// text_align = "left"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font_family: String,
    pub font_size: f32,
    /// Hex color.
    pub fill: String,
    /// Degrees, clockwise.
    pub rotate: f64,
    /// Canvas keyword; unset means centered.
    pub text_align: Option<String>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            fill: DEFAULT_FILL.to_owned(),
            rotate: 0.0,
            text_align: None,
        }
    }
}

impl LabelStyle {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("label style {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        log::info!("loading label style from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn fill_style(&self) -> Result<FillStyle> {
        FillStyle::parse(&self.fill)
    }

    pub fn align(&self) -> Result<Option<TextAlign>> {
        self.text_align.as_deref().map(str::parse).transpose()
    }
}
