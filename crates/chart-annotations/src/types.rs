// File: crates/chart-annotations/src/types.rs
// Summary: Shared pixel-space types for the render environment.

/// Chart margins around the plot area, in CSS pixels.
/// Only `left` and `top` move the label origin; the rest is carried for hosts.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margin {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}
