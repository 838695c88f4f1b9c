// File: crates/chart-render-skia/tests/render_label.rs
// Purpose: Labels drawn through the skia context land where the transform stack says they should.
// Glyph checks are skipped on hosts without any system fonts.

use std::sync::Arc;

use chart_annotations::context::{Accessor, SharedScale};
use chart_annotations::{
    ChartConfig, DrawContext, DrawingContext, FillStyle, Label, Margin, RenderEnv, TextAlign, TimeScale, ValueScale,
};
use chart_render_skia::{render_to_png_bytes, render_to_rgba8, SkiaContext, SurfaceOptions};
use skia_safe as skia;

fn have_fonts() -> bool {
    let n = skia::FontMgr::default().count_families();
    if n == 0 {
        eprintln!("[render_label] no system fonts; skipping glyph checks");
    }
    n > 0
}

fn draw_ctx() -> DrawContext<f64> {
    let x_scale: SharedScale = Arc::new(TimeScale::new(0.0, 0.0, 10.0));
    let y_scale: SharedScale = Arc::new(ValueScale::new_linear(0.0, 100.0, 0.0, 100.0));
    let accessor: Accessor<f64> = Arc::new(|v: &f64| *v);
    DrawContext::new(x_scale, accessor, ChartConfig::Single { y_scale }, vec![0.0, 5.0, 10.0])
}

fn opts(ratio: f64) -> SurfaceOptions {
    SurfaceOptions { width: 200, height: 100, ratio, background: skia::Color::WHITE }
}

/// Bounding box of clearly red pixels: (min_x, min_y, max_x, max_y).
fn red_bbox(px: &[u8], w: i32, h: i32, stride: usize) -> Option<(i32, i32, i32, i32)> {
    let mut bbox: Option<(i32, i32, i32, i32)> = None;
    for y in 0..h {
        for x in 0..w {
            let i = y as usize * stride + x as usize * 4;
            let (r, g, b) = (px[i], px[i + 1], px[i + 2]);
            if r > 180 && g < 90 && b < 90 {
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bbox
}

fn red_label() -> Label<f64> {
    Label::new()
        .x(100.0)
        .y(60.0)
        .text("MMMM")
        .font_size(24.0)
        .fill_style(FillStyle::parse("#ff0000").unwrap())
}

#[test]
fn png_output_has_png_header() {
    let label = red_label();
    let bytes = render_to_png_bytes(&opts(1.0), |canvas| {
        let mut ctx = SkiaContext::new(canvas);
        label.draw_on_canvas(&mut ctx, &RenderEnv::default(), &draw_ctx())?;
        assert_eq!(ctx.save_depth(), 0);
        Ok(())
    })
    .expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!((img.width(), img.height()), (200, 100));
}

#[test]
fn centered_text_straddles_anchor() {
    if !have_fonts() {
        return;
    }
    let label = red_label();
    let (px, w, h, stride) = render_to_rgba8(&opts(1.0), |canvas| {
        let mut ctx = SkiaContext::new(canvas);
        label.draw_on_canvas(&mut ctx, &RenderEnv::default(), &draw_ctx())?;
        Ok(())
    })
    .expect("rgba render");

    let (x0, y0, x1, y1) = red_bbox(&px, w, h, stride).expect("label pixels");
    let cx = (x0 + x1) / 2;
    assert!((cx - 100).abs() <= 6, "center {cx} should be near the anchor");
    // alphabetic baseline: glyphs sit above y = 60.5
    assert!(y1 <= 62 && y0 < 60, "bbox y {y0}..{y1}");
}

#[test]
fn ratio_two_doubles_device_position() {
    if !have_fonts() {
        return;
    }
    let label = red_label().text_align(TextAlign::Left).x(20.0).y(30.0);
    let env = RenderEnv::new(Margin::default(), 2.0);
    let (px, w, h, stride) = render_to_rgba8(&opts(2.0), |canvas| {
        let mut ctx = SkiaContext::new(canvas);
        label.draw_on_canvas(&mut ctx, &env, &draw_ctx())?;
        Ok(())
    })
    .expect("rgba render");
    assert_eq!((w, h), (400, 200));

    let (x0, _, _, y1) = red_bbox(&px, w, h, stride).expect("label pixels");
    // left-aligned at 20 + 0.5*2 css px -> ~41..42 device px; baseline ~62 device px
    assert!((x0 - 42).abs() <= 6, "left edge {x0}");
    assert!((y1 - 62).abs() <= 12, "bottom {y1}");
}

#[test]
fn gradient_fill_and_rotation_draw_without_leaking_state() {
    let label = Label::<f64>::new()
        .x(50.0)
        .y(50.0)
        .text("grad")
        .rotate(-30.0)
        .fill_style(FillStyle::LinearGradient {
            start: (0.0, 0.0),
            end: (40.0, 0.0),
            stops: vec![(0.0, skia::Color::RED), (1.0, skia::Color::BLUE)],
        });
    render_to_png_bytes(&opts(1.0), |canvas| {
        let before = canvas.save_count();
        let mut ctx = SkiaContext::new(canvas);
        label.draw_on_canvas(&mut ctx, &RenderEnv::default(), &draw_ctx())?;
        label.draw_on_canvas(&mut ctx, &RenderEnv::default(), &draw_ctx())?;
        assert_eq!(ctx.save_depth(), 0);
        assert_eq!(canvas.save_count(), before);
        Ok(())
    })
    .expect("render");
}

#[test]
fn unmatched_restore_is_ignored() {
    render_to_png_bytes(&opts(1.0), |canvas| {
        let before = canvas.save_count();
        let mut ctx = SkiaContext::new(canvas);
        ctx.restore();
        assert_eq!(canvas.save_count(), before);
        Ok(())
    })
    .expect("render");
}
