// File: crates/demo/src/main.rs
// Summary: Demo loads OHLC CSV (or synthesizes candles), annotates extremes, closes and dates with labels, renders a PNG.
// Usage: constellation-label-demo [ohlc.csv] [label.toml]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chart_annotations::context::{Accessor, SharedScale};
use chart_annotations::{
    CanvasLayer, Canvases, ChartConfig, DrawContext, FillStyle, Label, LabelStyle, Margin, RedrawHost, RenderEnv,
    Scale, TextAlign, TimeScale, ValueScale,
};
use chart_render_skia::{render_to_png, SkiaContext, SurfaceOptions};
use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
struct Candle {
    i: f64, // bar index (displayed on X)
    t: f64, // epoch seconds, or the row index when the CSV has no time column
    o: f64,
    h: f64,
    l: f64,
    c: f64,
}

const WIDTH: i32 = 960;
const HEIGHT: i32 = 480;
const EPOCH_2000: f64 = 946_684_800.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let input = args.next();
    let style_path = args.next().unwrap_or_else(|| "label.toml".to_string());
    let style = LabelStyle::load(&style_path).with_context(|| format!("loading label style '{style_path}'"))?;

    let (candles, out) = match input {
        Some(raw) => {
            let (path, used_alt) = resolve_path(&raw)?;
            log::info!("Using input file: {}", path.display());
            if used_alt {
                log::info!("  (extension swapped between .csv/.cvs)");
            }
            let candles = load_ohlc_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            (candles, out_name_with(&path, "labels"))
        }
        None => {
            log::info!("no CSV given; using synthetic candles");
            (synthetic_candles(90), PathBuf::from("target/out/chart_synthetic_labels.png"))
        }
    };
    if candles.is_empty() {
        anyhow::bail!("no candles loaded, check headers/delimiter.");
    }
    log::info!("Loaded {} candles", candles.len());

    let margin = Margin::new(64.0, 24.0, 40.0, 72.0);
    let plot_w = WIDTH as f64 - margin.hsum();
    let plot_h = HEIGHT as f64 - margin.vsum();
    let n = candles.len();
    let (min_p, max_p) = minmax_price(&candles);

    let x_scale: SharedScale = Arc::new(TimeScale::new(0.0, -0.5, plot_w / n as f64));
    let y_scale: SharedScale = Arc::new(ValueScale::new_linear(0.0, plot_h, min_p, max_p));
    let accessor: Accessor<Candle> = Arc::new(|c: &Candle| c.i);
    let draw_ctx = DrawContext::new(x_scale, accessor, ChartConfig::Single { y_scale }, candles.clone());

    let host = build_labels(&candles, &style, plot_w, plot_h)?;
    let env = RenderEnv::new(margin, 2.0);
    let opts = SurfaceOptions { width: WIDTH, height: HEIGHT, ratio: env.ratio, background: skia::Color::WHITE };

    render_to_png(&opts, &out, |canvas| {
        // every layer shares the one raster canvas
        let mut layers = Canvases::new(SkiaContext::new(canvas), SkiaContext::new(canvas), SkiaContext::new(canvas));
        host.redraw(&mut layers, &env, &draw_ctx)?;
        Ok(())
    })?;
    println!("Wrote {}", out.display());
    Ok(())
}

fn build_labels(candles: &[Candle], style: &LabelStyle, plot_w: f64, plot_h: f64) -> Result<RedrawHost<Candle>> {
    let mut host = RedrawHost::new();
    let n = candles.len();

    let title = format!("{} candles, {} .. {}", n, fmt_time(candles[0].t), fmt_time(candles[n - 1].t));
    let title = Label::new()
        .class_name("title")
        .x(plot_w / 2.0)
        .y(-16.0)
        .text(title)
        .with_style(style)?
        .font_size(style.font_size + 4.0)
        .rotate(0.0);
    host.register(Arc::new(title).render());

    let high = candles.iter().copied().fold(candles[0], |a, b| if b.h > a.h { b } else { a });
    let low = candles.iter().copied().fold(candles[0], |a, b| if b.l < a.l { b } else { a });
    let high_label = Label::new()
        .class_name("high")
        .datum(high)
        .y_fn(|c| price_px(c.y_scale.as_ref(), c.datum.map(|d| d.h)) - 6.0)
        .text_fn(|d: &Candle| format!("H {:.4}", d.h))
        .with_style(style)?
        .fill_style(FillStyle::parse("#14a05a")?);
    let low_label = Label::new()
        .class_name("low")
        .datum(low)
        .y_fn(|c| price_px(c.y_scale.as_ref(), c.datum.map(|d| d.l)) + 16.0)
        .text_fn(|d: &Candle| format!("L {:.4}", d.l))
        .with_style(style)?
        .fill_style(FillStyle::parse("#c83c3c")?);
    host.register(Arc::new(high_label).render());
    host.register(Arc::new(low_label).render());

    // closes and dates on every `step`-th bar, colored by direction
    let step = (n / 12).max(1);
    for candle in candles.iter().step_by(step) {
        let close = Label::new()
            .class_name("close")
            .datum(*candle)
            .y_fn(|c| price_px(c.y_scale.as_ref(), c.datum.map(|d| d.c)))
            .text_fn(|d: &Candle| format!("{:.2}", d.c))
            .with_style(style)?
            .fill_fn(|d: &Candle| {
                let color = if d.c >= d.o { skia::Color::from_argb(255, 20, 160, 90) } else { skia::Color::from_argb(255, 200, 60, 60) };
                FillStyle::Color(color)
            });
        host.register(Arc::new(close).render());

        let date = Label::new()
            .class_name("date")
            .datum(*candle)
            .y(plot_h + 18.0)
            .text_fn(|d: &Candle| fmt_time(d.t))
            .with_style(style)?
            .rotate(-30.0)
            .text_align(TextAlign::Right)
            .select_canvas(Arc::new(|_: &[CanvasLayer]| CanvasLayer::Axes));
        host.register(Arc::new(date).render());
    }
    Ok(host)
}

fn price_px(y_scale: Option<&SharedScale>, price: Option<f64>) -> f64 {
    match (y_scale, price) {
        (Some(s), Some(p)) => s.scale(p),
        _ => 0.0,
    }
}

fn fmt_time(t: f64) -> String {
    if t >= EPOCH_2000 {
        if let Some(dt) = chrono::DateTime::from_timestamp(t as i64, 0) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    format!("#{}", t as i64)
}

fn synthetic_candles(n: usize) -> Vec<Candle> {
    let day = 86_400.0;
    let start = 1_700_000_000.0;
    let mut prev = 100.0;
    (0..n)
        .map(|i| {
            let x = i as f64;
            let c = 100.0 + (x * 0.15).sin() * 8.0 + x * 0.05;
            let o = prev;
            prev = c;
            Candle { i: x, t: start + x * day, o, h: o.max(c) + 1.2, l: o.min(c) - 1.2, c }
        })
        .collect()
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    match p.extension()?.to_string_lossy().to_lowercase().as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Produce output file name like target/out/chart_<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let name = if short.is_empty() { format!("chart_{suffix}.png") } else { format!("chart_{short}_{suffix}.png") };
    PathBuf::from("target/out").join(name)
}

/// Load Binance-like OHLC CSV; rows missing any of open/high/low/close are skipped.
fn load_ohlc_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    log::debug!("Headers: {:?}", headers);
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        log::warn!("could not find one of open/high/low/close columns");
    }

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).and_then(|s| s.trim().parse::<f64>().ok());
        let i = out.len() as f64;
        let t = i_time.and_then(|ix| rec.get(ix)).and_then(parse_time_to_f64).unwrap_or(i);
        if let (Some(o), Some(h), Some(l), Some(c)) = (parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            out.push(Candle { i, t, o, h, l, c });
        }
    }
    Ok(out)
}

fn parse_time_to_f64(s: &str) -> Option<f64> {
    let n = s.trim().parse::<i64>().ok()?;
    // epoch ms -> sec
    if n > 10_i64.pow(12) {
        return Some(n as f64 / 1000.0);
    }
    Some(n as f64)
}

fn minmax_price(c: &[Candle]) -> (f64, f64) {
    c.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), k| (lo.min(k.l), hi.max(k.h)))
}
