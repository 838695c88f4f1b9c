// File: crates/chart-annotations/benches/label_bench.rs
// Summary: Per-datum label draws into a recording context.

use std::sync::Arc;

use chart_annotations::context::{Accessor, SharedScale};
use chart_annotations::{ChartConfig, DrawContext, Label, RecordingContext, RenderEnv, Scale, TimeScale, ValueScale};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_ctx(n: usize) -> DrawContext<(f64, f64)> {
    let data: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, (i as f64 * 0.01).sin() * 10.0)).collect();
    let x_scale: SharedScale = Arc::new(TimeScale::new(0.0, 0.0, 2.0));
    let y_scale: SharedScale = Arc::new(ValueScale::new_linear(0.0, 400.0, -12.0, 12.0));
    let accessor: Accessor<(f64, f64)> = Arc::new(|d: &(f64, f64)| d.0);
    DrawContext::new(x_scale, accessor, ChartConfig::Single { y_scale }, data)
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_draw");
    for &n in &[100usize, 1_000usize] {
        group.bench_function(format!("labels_{n}"), |b| {
            let ctx = build_ctx(n);
            let labels: Vec<_> = ctx
                .plot_data
                .iter()
                .map(|d| {
                    Label::new()
                        .datum(*d)
                        .y_fn(|c| {
                            let v = c.datum.map(|d| d.1).unwrap_or_default();
                            c.y_scale.as_ref().map_or(0.0, |s| s.scale(v))
                        })
                        .text_fn(|d: &(f64, f64)| format!("{:.2}", d.1))
                        .rotate(-45.0)
                })
                .collect();
            let env = RenderEnv::default();
            b.iter(|| {
                let mut rec = RecordingContext::new();
                for l in &labels {
                    l.draw_on_canvas(&mut rec, &env, &ctx).expect("draw");
                }
                black_box(rec.ops().len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_draw);
criterion_main!(benches);
