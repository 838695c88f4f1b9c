// File: crates/chart-annotations/src/recording.rs
// Summary: Headless drawing context that records every canvas call; used by tests, benches and dry runs.

use crate::canvas::{DrawingContext, FillStyle, FontSpec, TextAlign, Transform};

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    Save,
    Restore,
    SetTransform(Transform),
    Scale(f64, f64),
    Translate(f64, f64),
    Rotate(f64),
    /// Canvas font shorthand, e.g. "12px sans-serif".
    Font(String),
    FillStyle(FillStyle),
    TextAlign(TextAlign),
    BeginPath,
    FillText { text: String, x: f64, y: f64 },
}

/// Records canvas calls instead of drawing them.
///
/// An unmatched `restore` is not recorded (canvas ignores it too).
#[derive(Debug, Default)]
pub struct RecordingContext {
    ops: Vec<CanvasOp>,
    depth: usize,
}

impl RecordingContext {
    pub fn new() -> Self { Self::default() }

    pub fn ops(&self) -> &[CanvasOp] { &self.ops }

    /// Drain recorded ops, keeping the current save depth.
    pub fn take_ops(&mut self) -> Vec<CanvasOp> { std::mem::take(&mut self.ops) }

    pub fn fill_text_calls(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::FillText { text, x, y } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }
}

impl DrawingContext for RecordingContext {
    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            log::warn!("restore() without matching save(); ignored");
            return;
        }
        self.depth -= 1;
        self.ops.push(CanvasOp::Restore);
    }

    fn save_depth(&self) -> usize { self.depth }

    fn set_transform(&mut self, t: Transform) { self.ops.push(CanvasOp::SetTransform(t)); }
    fn scale(&mut self, sx: f64, sy: f64) { self.ops.push(CanvasOp::Scale(sx, sy)); }
    fn translate(&mut self, dx: f64, dy: f64) { self.ops.push(CanvasOp::Translate(dx, dy)); }
    fn rotate(&mut self, radians: f64) { self.ops.push(CanvasOp::Rotate(radians)); }

    fn set_font(&mut self, font: &FontSpec) { self.ops.push(CanvasOp::Font(font.to_string())); }
    fn set_fill_style(&mut self, fill: &FillStyle) { self.ops.push(CanvasOp::FillStyle(fill.clone())); }
    fn set_text_align(&mut self, align: TextAlign) { self.ops.push(CanvasOp::TextAlign(align)); }

    fn begin_path(&mut self) { self.ops.push(CanvasOp::BeginPath); }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(CanvasOp::FillText { text: text.to_owned(), x, y });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_restore_is_ignored() {
        let mut ctx = RecordingContext::new();
        ctx.restore();
        assert!(ctx.ops().is_empty());
        ctx.save();
        ctx.save();
        ctx.restore();
        assert_eq!(ctx.save_depth(), 1);
        assert_eq!(ctx.take_ops(), vec![CanvasOp::Save, CanvasOp::Save, CanvasOp::Restore]);
        assert_eq!(ctx.save_depth(), 1);
    }
}
