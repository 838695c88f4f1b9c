// File: crates/chart-annotations/src/canvas.rs
// Summary: Renderer-agnostic 2D drawing contract (save/restore stack, transforms, text) and its style types.

use std::fmt;
use std::str::FromStr;

use skia_safe as skia;

use crate::error::AnnotationError;

/// Affine transform in canvas `setTransform(a, b, c, d, e, f)` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };
}

impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}

/// Horizontal text anchoring relative to the draw point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
        }
    }

    /// Fraction of the text advance to shift left by. Start/End assume left-to-right text.
    pub fn anchor_fraction(&self) -> f32 {
        match self {
            TextAlign::Start | TextAlign::Left => 0.0,
            TextAlign::Center => 0.5,
            TextAlign::End | TextAlign::Right => 1.0,
        }
    }
}

impl FromStr for TextAlign {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(TextAlign::Start),
            "end" => Ok(TextAlign::End),
            "left" => Ok(TextAlign::Left),
            "right" => Ok(TextAlign::Right),
            "center" => Ok(TextAlign::Center),
            _ => Err(AnnotationError::InvalidTextAlign(s.to_owned())),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Pixel font size plus a CSS-style family list.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub family: String,
}

impl FontSpec {
    pub fn new(size: f32, family: impl Into<String>) -> Self {
        Self { size, family: family.into() }
    }

    /// Family names with surrounding quotes stripped, in preference order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.family
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"'))
            .filter(|f| !f.is_empty())
    }
}

impl fmt::Display for FontSpec {
    // Canvas font shorthand, e.g. "12px sans-serif"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Paint used to fill glyphs: a solid color or a linear gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Color(skia::Color),
    LinearGradient {
        start: (f32, f32),
        end: (f32, f32),
        /// (offset in 0..=1, color) pairs
        stops: Vec<(f32, skia::Color)>,
    },
}

impl FillStyle {
    pub const BLACK: FillStyle = FillStyle::Color(skia::Color::BLACK);

    /// Parse a canvas color string such as `"#ff0000"`, `"steelblue"` or `"rgba(0,0,0,0.5)"`.
    pub fn parse(s: &str) -> Result<Self, AnnotationError> {
        parse_css_color(s).map(FillStyle::Color)
    }
}

impl Default for FillStyle {
    fn default() -> Self { Self::BLACK }
}

impl FromStr for FillStyle {
    type Err = AnnotationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl From<skia::Color> for FillStyle {
    fn from(c: skia::Color) -> Self { FillStyle::Color(c) }
}

/// Parse any CSS color: hex forms, named colors, `rgb()`/`rgba()`, `hsl()` and friends.
pub fn parse_css_color(s: &str) -> Result<skia::Color, AnnotationError> {
    let c = csscolorparser::parse(s.trim()).map_err(|_| AnnotationError::InvalidColor(s.to_owned()))?;
    let [r, g, b, a] = c.to_rgba8();
    Ok(skia::Color::from_argb(a, r, g, b))
}

/// The 2D drawing surface a label draws onto.
///
/// Mirrors the canvas state model: `save` pushes transform, font, fill and
/// alignment; `restore` pops them. Implementations must ignore a `restore`
/// on an empty stack, as canvas does.
pub trait DrawingContext {
    fn save(&mut self);
    fn restore(&mut self);
    /// Number of outstanding `save` calls.
    fn save_depth(&self) -> usize;

    fn set_transform(&mut self, t: Transform);
    fn scale(&mut self, sx: f64, sy: f64);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Clockwise rotation in radians.
    fn rotate(&mut self, radians: f64);

    fn set_font(&mut self, font: &FontSpec);
    fn set_fill_style(&mut self, fill: &FillStyle);
    fn set_text_align(&mut self, align: TextAlign);

    fn begin_path(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
