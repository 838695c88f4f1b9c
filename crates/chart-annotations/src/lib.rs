// File: crates/chart-annotations/src/lib.rs
// Summary: Annotation library entry point; exports the label renderer and the canvas/host contracts it plugs into.

pub mod canvas;
pub mod component;
pub mod context;
pub mod error;
pub mod functor;
pub mod label;
pub mod recording;
pub mod scale;
pub mod style;
pub mod types;

pub use canvas::{DrawingContext, FillStyle, FontSpec, TextAlign, Transform};
pub use component::{CanvasLayer, Canvases, DrawRegistration, RedrawHost, SelectCanvas};
pub use context::{ChartConfig, DrawContext, PanelConfig, RenderEnv};
pub use error::{AnnotationError, Result};
pub use functor::Functor;
pub use label::{Label, ResolvedLabel, XContext, YContext};
pub use recording::{CanvasOp, RecordingContext};
pub use scale::{Scale, TimeScale, ValueScale};
pub use style::LabelStyle;
pub use types::Margin;
