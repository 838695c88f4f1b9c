// File: crates/chart-annotations/tests/redraw_host.rs
// Purpose: Label registration with the redraw host: canvas selection, ordering, failure isolation.

use std::sync::Arc;

use chart_annotations::{
    CanvasLayer, CanvasOp, Canvases, ChartConfig, DrawContext, DrawingContext, Label, RecordingContext, RedrawHost, RenderEnv,
    TimeScale, ValueScale,
};
use chart_annotations::context::{Accessor, SharedScale};

fn draw_ctx() -> DrawContext<f64> {
    let x_scale: SharedScale = Arc::new(TimeScale::new(0.0, 0.0, 10.0));
    let y_scale: SharedScale = Arc::new(ValueScale::new_linear(0.0, 100.0, 0.0, 100.0));
    let accessor: Accessor<f64> = Arc::new(|v: &f64| *v);
    DrawContext::new(x_scale, accessor, ChartConfig::Single { y_scale }, vec![1.0, 2.0, 3.0])
}

fn canvases() -> Canvases<RecordingContext> {
    Canvases::default()
}

#[test]
fn render_registers_on_background_without_events() {
    let label = Arc::new(Label::new().datum(2.0).y(4.0).text("bg"));
    let reg = label.render();
    assert!(reg.draw_on.is_empty());
    assert_eq!((reg.canvas_to_draw)(&CanvasLayer::ALL[..]), CanvasLayer::Background);

    let mut host = RedrawHost::new();
    host.register(reg);
    let mut cv = canvases();
    host.redraw(&mut cv, &RenderEnv::default(), &draw_ctx()).unwrap();

    let texts: Vec<_> = cv.bg.fill_text_calls().map(|(t, _, _)| t.to_owned()).collect();
    assert_eq!(texts, ["bg"]);
    assert!(cv.axes.ops().is_empty());
    assert!(cv.mouse_coord.ops().is_empty());
    assert!(cv.bg.ops().contains(&CanvasOp::Translate(20.0, 4.0)));
}

#[test]
fn custom_selector_routes_to_other_layer() {
    let label = Arc::new(
        Label::new()
            .x(1.0)
            .y(1.0)
            .text("axes")
            .select_canvas(Arc::new(|_: &[CanvasLayer]| CanvasLayer::Axes)),
    );
    let mut host = RedrawHost::new();
    host.register(label.render());
    let mut cv = canvases();
    host.redraw(&mut cv, &RenderEnv::default(), &draw_ctx()).unwrap();
    assert_eq!(cv.get(CanvasLayer::Axes).fill_text_calls().count(), 1);
    assert!(cv.bg.ops().is_empty());
}

#[test]
fn callbacks_run_in_registration_order() {
    let mut host = RedrawHost::new();
    for t in ["first", "second", "third"] {
        host.register(Arc::new(Label::new().x(0.0).y(0.0).text(t)).render());
    }
    let mut cv = canvases();
    host.redraw(&mut cv, &RenderEnv::default(), &draw_ctx()).unwrap();
    let texts: Vec<_> = cv.bg.fill_text_calls().map(|(t, _, _)| t).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert_eq!(cv.bg.save_depth(), 0);
}

#[test]
fn failing_pass_does_not_poison_the_next() {
    let mut host = RedrawHost::new();
    host.register(Arc::new(Label::new().x(0.0).y(0.0).text("ok")).render());
    let broken = host.register(Arc::new(Label::<f64>::new().x(0.0).text("no y")).render());
    let mut cv = canvases();
    assert!(host.redraw(&mut cv, &RenderEnv::default(), &draw_ctx()).is_err());

    assert!(host.unregister(broken));
    assert!(!host.unregister(broken));
    let mut cv = canvases();
    host.redraw(&mut cv, &RenderEnv::default(), &draw_ctx()).unwrap();
    assert_eq!(cv.bg.fill_text_calls().count(), 1);
    assert_eq!(host.len(), 1);
}

#[test]
fn labels_skip_event_redraws() {
    let mut host = RedrawHost::new();
    host.register(Arc::new(Label::new().x(0.0).y(0.0).text("static")).render());
    let mut cv = canvases();
    host.redraw_on("mousemove", &mut cv, &RenderEnv::default(), &draw_ctx()).unwrap();
    assert!(cv.bg.ops().is_empty());
}
