// File: crates/chart-annotations/src/context.rs
// Summary: Per-redraw inputs handed to draw callbacks: render environment, scales, accessor, plot data.

use std::fmt;
use std::sync::Arc;

use crate::error::{AnnotationError, Result};
use crate::scale::Scale;
use crate::types::Margin;

/// Scale shared between the host, its panels and label configurations.
pub type SharedScale = Arc<dyn Scale + Send + Sync>;
/// Maps a datum to its logical X value (bar index, timestamp).
pub type Accessor<D> = Arc<dyn Fn(&D) -> f64 + Send + Sync>;

/// Rendering environment of the chart surface the label lives in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderEnv {
    /// Explicit origin of the plot area on the canvas; overrides `margin` when set.
    pub canvas_origin: Option<(f64, f64)>,
    pub margin: Margin,
    /// Device pixel ratio.
    pub ratio: f64,
}

impl RenderEnv {
    pub fn new(margin: Margin, ratio: f64) -> Self {
        Self { canvas_origin: None, margin, ratio }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.canvas_origin = Some((x, y));
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(AnnotationError::InvalidRatio(self.ratio));
        }
        Ok(())
    }

    /// Translation applied after the ratio scale: the explicit origin, or the
    /// top-left margin nudged by half a device pixel for crisp edges.
    pub fn origin_offset(&self) -> (f64, f64) {
        match self.canvas_origin {
            Some(origin) => origin,
            None => (
                self.margin.left + 0.5 * self.ratio,
                self.margin.top + 0.5 * self.ratio,
            ),
        }
    }
}

impl Default for RenderEnv {
    fn default() -> Self { Self::new(Margin::default(), 1.0) }
}

/// One stacked panel of a multi-panel chart.
#[derive(Clone)]
pub struct PanelConfig {
    pub id: usize,
    pub origin: (f64, f64),
    pub height: f64,
    pub y_scale: SharedScale,
}

impl fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelConfig")
            .field("id", &self.id)
            .field("origin", &self.origin)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Chart configuration seen by a draw callback.
#[derive(Clone)]
pub enum ChartConfig {
    /// Drawing inside a single chart: its y scale is available.
    Single { y_scale: SharedScale },
    /// Drawing across every panel: no single y scale applies.
    Panels(Vec<PanelConfig>),
}

impl ChartConfig {
    pub fn y_scale(&self) -> Option<SharedScale> {
        match self {
            ChartConfig::Single { y_scale } => Some(Arc::clone(y_scale)),
            ChartConfig::Panels(_) => None,
        }
    }
}

impl fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartConfig::Single { .. } => f.write_str("Single { .. }"),
            ChartConfig::Panels(p) => f.debug_tuple("Panels").field(p).finish(),
        }
    }
}

/// Scales, accessor and data for one redraw pass.
pub struct DrawContext<D> {
    pub x_scale: SharedScale,
    pub x_accessor: Accessor<D>,
    pub chart_config: ChartConfig,
    pub plot_data: Arc<[D]>,
}

impl<D> DrawContext<D> {
    pub fn new(
        x_scale: SharedScale,
        x_accessor: Accessor<D>,
        chart_config: ChartConfig,
        plot_data: impl Into<Arc<[D]>>,
    ) -> Self {
        Self { x_scale, x_accessor, chart_config, plot_data: plot_data.into() }
    }
}

impl<D> Clone for DrawContext<D> {
    fn clone(&self) -> Self {
        Self {
            x_scale: Arc::clone(&self.x_scale),
            x_accessor: Arc::clone(&self.x_accessor),
            chart_config: self.chart_config.clone(),
            plot_data: Arc::clone(&self.plot_data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ValueScale;

    #[test]
    fn origin_prefers_explicit_canvas_origin() {
        let env = RenderEnv::new(Margin::new(40.0, 10.0, 20.0, 30.0), 2.0);
        assert_eq!(env.origin_offset(), (41.0, 21.0));
        assert_eq!(env.with_origin(5.0, 6.0).origin_offset(), (5.0, 6.0));
    }

    #[test]
    fn ratio_must_be_positive() {
        assert!(RenderEnv::default().validate().is_ok());
        let bad = RenderEnv::new(Margin::default(), 0.0);
        assert!(matches!(bad.validate(), Err(AnnotationError::InvalidRatio(r)) if r == 0.0));
        assert!(RenderEnv::new(Margin::default(), f64::NAN).validate().is_err());
    }

    #[test]
    fn panels_have_no_y_scale() {
        let ys: SharedScale = Arc::new(ValueScale::new_linear(0.0, 100.0, 0.0, 1.0));
        assert!(ChartConfig::Single { y_scale: ys.clone() }.y_scale().is_some());
        let panels = ChartConfig::Panels(vec![PanelConfig { id: 0, origin: (0.0, 0.0), height: 100.0, y_scale: ys }]);
        assert!(panels.y_scale().is_none());
    }
}
