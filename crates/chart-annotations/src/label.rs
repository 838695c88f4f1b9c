// File: crates/chart-annotations/src/label.rs
// Summary: Positioned, styled text label drawn onto a chart canvas.
// Notes:
// - Draw parameters are resolved before the canvas is touched, so a failed
//   resolution leaves the drawing context exactly as it was.
// - The label restores every save it makes; callers see an unchanged save depth.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::canvas::{DrawingContext, FillStyle, FontSpec, TextAlign, Transform};
use crate::component::{select_background, DrawRegistration, SelectCanvas};
use crate::context::{Accessor, DrawContext, RenderEnv, SharedScale};
use crate::error::{AnnotationError, Result};
use crate::functor::Functor;
use crate::scale::Scale;
use crate::style::{LabelStyle, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};

/// Context for a computed x position.
pub struct XContext<D> {
    pub x_scale: SharedScale,
    pub x_accessor: Accessor<D>,
    pub datum: Option<D>,
    pub plot_data: Arc<[D]>,
}

/// Context for a computed y position. `y_scale` is `None` when drawing across panels.
pub struct YContext<D> {
    pub y_scale: Option<SharedScale>,
    pub datum: Option<D>,
    pub plot_data: Arc<[D]>,
}

/// Draw parameters for one draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLabel {
    pub x: f64,
    pub y: f64,
    pub fill_style: FillStyle,
    pub text: String,
}

/// A text label anchored at a chart position.
///
/// `y` has no default and must be set. `x` defaults to the datum's position on
/// the x scale (`x_scale(x_accessor(datum))`).
pub struct Label<D> {
    pub class_name: Option<String>,
    fill_style: Functor<D, FillStyle>,
    font_family: Option<String>,
    font_size: f32,
    rotate: Option<f64>,
    select_canvas: SelectCanvas,
    text: Option<Functor<D, String>>,
    text_align: Option<TextAlign>,
    x: Option<Functor<XContext<D>, f64>>,
    y: Option<Functor<YContext<D>, f64>>,
    x_accessor: Option<Accessor<D>>,
    x_scale: Option<SharedScale>,
    y_scale: Option<SharedScale>,
    datum: Option<D>,
}

impl<D> Default for Label<D> {
    fn default() -> Self {
        Self {
            class_name: None,
            fill_style: Functor::Constant(FillStyle::BLACK),
            font_family: Some(DEFAULT_FONT_FAMILY.to_owned()),
            font_size: DEFAULT_FONT_SIZE,
            rotate: Some(0.0),
            select_canvas: select_background(),
            text: None,
            text_align: None,
            x: None,
            y: None,
            x_accessor: None,
            x_scale: None,
            y_scale: None,
            datum: None,
        }
    }
}

impl<D> Label<D> {
    pub fn new() -> Self { Self::default() }

    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    pub fn text(mut self, text: impl Into<Functor<D, String>>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn text_fn(self, f: impl Fn(&D) -> String + Send + Sync + 'static) -> Self {
        self.text(Functor::computed(f))
    }

    pub fn fill_style(mut self, fill: impl Into<Functor<D, FillStyle>>) -> Self {
        self.fill_style = fill.into();
        self
    }

    pub fn fill_fn(self, f: impl Fn(&D) -> FillStyle + Send + Sync + 'static) -> Self {
        self.fill_style(Functor::computed(f))
    }

    pub fn x(mut self, x: impl Into<Functor<XContext<D>, f64>>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn x_fn(self, f: impl Fn(&XContext<D>) -> f64 + Send + Sync + 'static) -> Self {
        self.x(Functor::computed(f))
    }

    pub fn y(mut self, y: impl Into<Functor<YContext<D>, f64>>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn y_fn(self, f: impl Fn(&YContext<D>) -> f64 + Send + Sync + 'static) -> Self {
        self.y(Functor::computed(f))
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Rotation about the label's own origin, in degrees.
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn select_canvas(mut self, select: SelectCanvas) -> Self {
        self.select_canvas = select;
        self
    }

    pub fn x_accessor(mut self, accessor: Accessor<D>) -> Self {
        self.x_accessor = Some(accessor);
        self
    }

    pub fn x_scale(mut self, scale: SharedScale) -> Self {
        self.x_scale = Some(scale);
        self
    }

    pub fn y_scale(mut self, scale: SharedScale) -> Self {
        self.y_scale = Some(scale);
        self
    }

    pub fn datum(mut self, datum: D) -> Self {
        self.datum = Some(datum);
        self
    }

    /// Apply font, fill and rotation from a loaded style, and its alignment when it sets one.
    pub fn with_style(mut self, style: &LabelStyle) -> Result<Self> {
        self.fill_style = Functor::Constant(style.fill_style()?);
        if let Some(align) = style.align()? {
            self.text_align = Some(align);
        }
        self.font_family = Some(style.font_family.clone());
        self.font_size = style.font_size;
        self.rotate = Some(style.rotate);
        Ok(self)
    }
}

impl<D: Clone> Label<D> {
    /// Resolve position, text and fill for one draw.
    ///
    /// Pure: depends only on the arguments and this label's configuration.
    pub fn resolve(
        &self,
        draw_ctx: &DrawContext<D>,
        x_accessor: Accessor<D>,
        x_scale: SharedScale,
        y_scale: Option<SharedScale>,
    ) -> Result<ResolvedLabel> {
        let datum = self.datum.as_ref();
        let plot_data = &draw_ctx.plot_data;

        let x = match &self.x {
            Some(x) => x.resolve(&XContext {
                x_scale,
                x_accessor,
                datum: datum.cloned(),
                plot_data: Arc::clone(plot_data),
            }),
            None => {
                let d = datum.ok_or(AnnotationError::MissingDatum)?;
                x_scale.scale(x_accessor(d))
            }
        };

        let y = self
            .y
            .as_ref()
            .ok_or(AnnotationError::MissingY)?
            .resolve(&YContext { y_scale, datum: datum.cloned(), plot_data: Arc::clone(plot_data) });

        let text = self
            .text
            .as_ref()
            .ok_or(AnnotationError::MissingText)?
            .resolve_opt(datum)
            .ok_or(AnnotationError::MissingDatum)?;

        let fill_style = self.fill_style.resolve_opt(datum).ok_or(AnnotationError::MissingDatum)?;

        Ok(ResolvedLabel { x, y, fill_style, text })
    }

    /// Draw the label. The context's transform is reset to the chart's device
    /// space, so the label does not inherit transforms from earlier callbacks.
    pub fn draw_on_canvas(
        &self,
        ctx: &mut dyn DrawingContext,
        env: &RenderEnv,
        draw_ctx: &DrawContext<D>,
    ) -> Result<()> {
        env.validate()?;

        let x_scale = self.x_scale.clone().unwrap_or_else(|| Arc::clone(&draw_ctx.x_scale));
        let x_accessor = self.x_accessor.clone().unwrap_or_else(|| Arc::clone(&draw_ctx.x_accessor));
        let y_scale = self.y_scale.clone().or_else(|| draw_ctx.chart_config.y_scale());
        let resolved = self.resolve(draw_ctx, x_accessor, x_scale, y_scale)?;

        log::trace!(
            "label {:?} at ({}, {}) text={:?}",
            self.class_name.as_deref().unwrap_or(""),
            resolved.x,
            resolved.y,
            resolved.text
        );

        ctx.save();
        ctx.set_transform(Transform::IDENTITY);
        ctx.scale(env.ratio, env.ratio);
        let (ox, oy) = env.origin_offset();
        ctx.translate(ox, oy);

        ctx.save();
        ctx.translate(resolved.x, resolved.y);
        if let Some(degrees) = self.rotate {
            ctx.rotate(degrees / 180.0 * PI);
        }
        if let Some(family) = &self.font_family {
            ctx.set_font(&FontSpec::new(self.font_size, family.as_str()));
        }
        ctx.set_fill_style(&resolved.fill_style);
        ctx.set_text_align(self.text_align.unwrap_or(TextAlign::Center));
        ctx.begin_path();
        ctx.fill_text(&resolved.text, 0.0, 0.0);
        ctx.restore();

        ctx.restore();
        Ok(())
    }
}

impl<D: Clone + Send + Sync + 'static> Label<D> {
    /// Hand the host a background-canvas draw callback. Draws only on full
    /// redraws; no interaction events are requested.
    pub fn render(self: &Arc<Self>) -> DrawRegistration<D> {
        let label = Arc::clone(self);
        DrawRegistration {
            canvas_to_draw: Arc::clone(&self.select_canvas),
            canvas_draw: Arc::new(move |ctx: &mut dyn DrawingContext, env: &RenderEnv, draw_ctx: &DrawContext<D>| {
                label.draw_on_canvas(ctx, env, draw_ctx)
            }),
            draw_on: Vec::new(),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for Label<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("class_name", &self.class_name)
            .field("text", &self.text)
            .field("fill_style", &self.fill_style)
            .field("font_family", &self.font_family)
            .field("font_size", &self.font_size)
            .field("rotate", &self.rotate)
            .field("text_align", &self.text_align)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("datum", &self.datum)
            .finish_non_exhaustive()
    }
}
