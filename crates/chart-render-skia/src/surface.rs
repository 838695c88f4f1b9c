// File: crates/chart-render-skia/src/surface.rs
// Summary: Headless CPU raster surfaces sized for a device pixel ratio, with PNG and RGBA8 output.

use anyhow::{Context, Result};
use skia_safe as skia;

pub struct SurfaceOptions {
    /// Logical (CSS) size; the backing surface is `size * ratio` device pixels.
    pub width: i32,
    pub height: i32,
    pub ratio: f64,
    pub background: skia::Color,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { width: 640, height: 360, ratio: 1.0, background: skia::Color::WHITE }
    }
}

impl SurfaceOptions {
    pub fn device_size(&self) -> (i32, i32) {
        let r = self.ratio.max(0.01);
        (
            ((self.width as f64) * r).ceil().max(1.0) as i32,
            ((self.height as f64) * r).ceil().max(1.0) as i32,
        )
    }
}

fn draw_surface<F>(opts: &SurfaceOptions, draw: F) -> Result<skia::Surface>
where
    F: FnOnce(&skia::Canvas) -> Result<()>,
{
    let mut surface = skia::surfaces::raster_n32_premul(opts.device_size())
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(opts.background);
    draw(canvas)?;
    Ok(surface)
}

/// Render with `draw` and encode the result as PNG.
pub fn render_to_png_bytes<F>(opts: &SurfaceOptions, draw: F) -> Result<Vec<u8>>
where
    F: FnOnce(&skia::Canvas) -> Result<()>,
{
    let mut surface = draw_surface(opts, draw)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

pub fn render_to_png<F>(opts: &SurfaceOptions, output_png_path: impl AsRef<std::path::Path>, draw: F) -> Result<()>
where
    F: FnOnce(&skia::Canvas) -> Result<()>,
{
    let path = output_png_path.as_ref();
    let bytes = render_to_png_bytes(opts, draw)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Render to an unpremultiplied RGBA8 buffer: (pixels, width, height, row stride in bytes).
pub fn render_to_rgba8<F>(opts: &SurfaceOptions, draw: F) -> Result<(Vec<u8>, i32, i32, usize)>
where
    F: FnOnce(&skia::Canvas) -> Result<()>,
{
    let mut surface = draw_surface(opts, draw)?;
    let (w, h) = opts.device_size();
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = w as usize * 4;
    let mut pixels = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        anyhow::bail!("read_pixels failed");
    }
    Ok((pixels, w, h, stride))
}
