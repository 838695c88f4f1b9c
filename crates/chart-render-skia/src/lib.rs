// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia renderer crate: drawing-context adapter and headless raster surfaces.

pub mod context;
pub mod surface;

pub use context::SkiaContext;
pub use surface::{render_to_png, render_to_png_bytes, render_to_rgba8, SurfaceOptions};
