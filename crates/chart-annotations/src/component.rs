// File: crates/chart-annotations/src/component.rs
// Summary: Host-side redraw contracts: canvas layers, draw registrations, and a minimal redraw host.

use std::fmt;
use std::sync::Arc;

use crate::canvas::DrawingContext;
use crate::context::{DrawContext, RenderEnv};
use crate::error::Result;

/// Stacked canvases a chart draws into, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CanvasLayer {
    Background,
    Axes,
    MouseCoord,
}

impl CanvasLayer {
    pub const ALL: [CanvasLayer; 3] = [CanvasLayer::Background, CanvasLayer::Axes, CanvasLayer::MouseCoord];
}

/// One drawing surface per layer.
#[derive(Debug, Default)]
pub struct Canvases<T> {
    pub bg: T,
    pub axes: T,
    pub mouse_coord: T,
}

impl<T> Canvases<T> {
    pub fn new(bg: T, axes: T, mouse_coord: T) -> Self {
        Self { bg, axes, mouse_coord }
    }

    pub fn get(&self, layer: CanvasLayer) -> &T {
        match layer {
            CanvasLayer::Background => &self.bg,
            CanvasLayer::Axes => &self.axes,
            CanvasLayer::MouseCoord => &self.mouse_coord,
        }
    }

    pub fn get_mut(&mut self, layer: CanvasLayer) -> &mut T {
        match layer {
            CanvasLayer::Background => &mut self.bg,
            CanvasLayer::Axes => &mut self.axes,
            CanvasLayer::MouseCoord => &mut self.mouse_coord,
        }
    }
}

/// Picks the layer to draw into from the ones the host offers.
pub type SelectCanvas = Arc<dyn Fn(&[CanvasLayer]) -> CanvasLayer + Send + Sync>;

pub type DrawCallback<D> =
    Arc<dyn Fn(&mut dyn DrawingContext, &RenderEnv, &DrawContext<D>) -> Result<()> + Send + Sync>;

pub fn select_background() -> SelectCanvas {
    Arc::new(|_: &[CanvasLayer]| CanvasLayer::Background)
}

/// What a component hands the host: where to draw, how to draw, and which
/// interaction events (beyond full redraws) should trigger it.
pub struct DrawRegistration<D> {
    pub canvas_to_draw: SelectCanvas,
    pub canvas_draw: DrawCallback<D>,
    pub draw_on: Vec<String>,
}

impl<D> Clone for DrawRegistration<D> {
    fn clone(&self) -> Self {
        Self {
            canvas_to_draw: Arc::clone(&self.canvas_to_draw),
            canvas_draw: Arc::clone(&self.canvas_draw),
            draw_on: self.draw_on.clone(),
        }
    }
}

impl<D> fmt::Debug for DrawRegistration<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawRegistration").field("draw_on", &self.draw_on).finish_non_exhaustive()
    }
}

/// Minimal redraw scaffold: runs registered callbacks in order, one at a time.
pub struct RedrawHost<D> {
    entries: Vec<(usize, DrawRegistration<D>)>,
    next_id: usize,
}

impl<D> Default for RedrawHost<D> {
    fn default() -> Self { Self { entries: Vec::new(), next_id: 0 } }
}

impl<D> RedrawHost<D> {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, registration: DrawRegistration<D>) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("registered draw callback #{id} (draw_on: {:?})", registration.draw_on);
        self.entries.push((id, registration));
        id
    }

    pub fn unregister(&mut self, id: usize) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        before != self.entries.len()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Full redraw: every registration draws into the layer it selects.
    /// The first failing callback aborts the pass.
    pub fn redraw<C: DrawingContext>(
        &self,
        canvases: &mut Canvases<C>,
        env: &RenderEnv,
        draw_ctx: &DrawContext<D>,
    ) -> Result<()> {
        log::debug!("redraw pass over {} callbacks", self.entries.len());
        Self::run(self.entries.iter().map(|(_, r)| r), canvases, env, draw_ctx)
    }

    /// Redraw only the registrations listening to `event` (e.g. "mousemove").
    pub fn redraw_on<C: DrawingContext>(
        &self,
        event: &str,
        canvases: &mut Canvases<C>,
        env: &RenderEnv,
        draw_ctx: &DrawContext<D>,
    ) -> Result<()> {
        let listening = self.entries.iter().map(|(_, r)| r).filter(|r| r.draw_on.iter().any(|e| e == event));
        Self::run(listening, canvases, env, draw_ctx)
    }

    fn run<'a, C: DrawingContext>(
        registrations: impl Iterator<Item = &'a DrawRegistration<D>>,
        canvases: &mut Canvases<C>,
        env: &RenderEnv,
        draw_ctx: &DrawContext<D>,
    ) -> Result<()>
    where
        D: 'a,
    {
        for r in registrations {
            let layer = (r.canvas_to_draw)(&CanvasLayer::ALL[..]);
            let ctx = canvases.get_mut(layer);
            let depth = ctx.save_depth();
            (r.canvas_draw)(&mut *ctx, env, draw_ctx)?;
            if ctx.save_depth() != depth {
                log::warn!("draw callback on {:?} left save depth {} (expected {})", layer, ctx.save_depth(), depth);
            }
        }
        Ok(())
    }
}
