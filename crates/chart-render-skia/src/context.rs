// File: crates/chart-render-skia/src/context.rs
// Summary: DrawingContext over a skia Canvas; keeps font/fill/alignment in a stack mirrored with canvas save/restore.

use chart_annotations::{DrawingContext, FillStyle, FontSpec, TextAlign, Transform};
use skia_safe as skia;

#[derive(Clone)]
struct TextState {
    font: skia::Font,
    fill: FillStyle,
    align: TextAlign,
}

impl Default for TextState {
    fn default() -> Self {
        // canvas defaults: 10px sans-serif, black, start-aligned
        let mut font = skia::Font::default();
        font.set_size(10.0);
        Self { font, fill: FillStyle::BLACK, align: TextAlign::Start }
    }
}

/// Draws onto a borrowed skia canvas.
///
/// Several contexts may share one canvas (one per chart layer); each keeps
/// its own text state and save depth, and every save it makes on the canvas
/// is matched by its own restore.
pub struct SkiaContext<'a> {
    canvas: &'a skia::Canvas,
    fonts: skia::FontMgr,
    state: TextState,
    stack: Vec<TextState>,
}

impl<'a> SkiaContext<'a> {
    pub fn new(canvas: &'a skia::Canvas) -> Self {
        Self { canvas, fonts: skia::FontMgr::default(), state: TextState::default(), stack: Vec::new() }
    }

    /// First family in the list the font manager knows; falls back to its default typeface.
    fn resolve_font(&self, spec: &FontSpec) -> skia::Font {
        let style = skia::FontStyle::normal();
        let typeface = spec
            .families()
            .find_map(|family| self.fonts.match_family_style(family, style))
            .or_else(|| self.fonts.legacy_make_typeface(None::<&str>, style));
        match typeface {
            Some(tf) => skia::Font::from_typeface(tf, spec.size.max(1.0)),
            None => {
                log::debug!("no typeface for {:?}; using skia default font", spec.family);
                let mut font = skia::Font::default();
                font.set_size(spec.size.max(1.0));
                font
            }
        }
    }

    fn paint(&self) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        match &self.state.fill {
            FillStyle::Color(c) => {
                paint.set_color(*c);
            }
            FillStyle::LinearGradient { start, end, stops } => {
                let colors: Vec<skia::Color> = stops.iter().map(|(_, c)| *c).collect();
                let pos: Vec<f32> = stops.iter().map(|(p, _)| *p).collect();
                let shader = skia::Shader::linear_gradient(
                    (skia::Point::new(start.0, start.1), skia::Point::new(end.0, end.1)),
                    colors.as_slice(),
                    pos.as_slice(),
                    skia::TileMode::Clamp,
                    None,
                    None,
                );
                match shader {
                    Some(s) => {
                        paint.set_shader(s);
                    }
                    None => {
                        // fewer than two stops: paint the first stop (or black) flat
                        paint.set_color(colors.first().copied().unwrap_or(skia::Color::BLACK));
                    }
                }
            }
        }
        paint
    }
}

impl DrawingContext for SkiaContext<'_> {
    fn save(&mut self) {
        self.canvas.save();
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                self.canvas.restore();
            }
            None => log::warn!("restore() without matching save(); ignored"),
        }
    }

    fn save_depth(&self) -> usize { self.stack.len() }

    fn set_transform(&mut self, t: Transform) {
        let m = skia::Matrix::new_all(
            t.a as f32, t.c as f32, t.e as f32,
            t.b as f32, t.d as f32, t.f as f32,
            0.0, 0.0, 1.0,
        );
        self.canvas.reset_matrix();
        self.canvas.concat(&m);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.canvas.scale((sx as f32, sy as f32));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.canvas.translate((dx as f32, dy as f32));
    }

    fn rotate(&mut self, radians: f64) {
        // skia rotates in degrees
        self.canvas.rotate(radians.to_degrees() as f32, None);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = self.resolve_font(font);
    }

    fn set_fill_style(&mut self, fill: &FillStyle) {
        self.state.fill = fill.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    // Text is filled directly; there is no path to reset.
    fn begin_path(&mut self) {}

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if text.is_empty() {
            return;
        }
        let paint = self.paint();
        let (advance, _) = self.state.font.measure_str(text, Some(&paint));
        let dx = advance * self.state.align.anchor_fraction();
        self.canvas.draw_str(text, (x as f32 - dx, y as f32), &self.state.font, &paint);
    }
}
