// File: crates/chart-annotations/src/error.rs
// Summary: Error type shared by label resolution, drawing, and style loading.

use thiserror::Error;

pub type Result<T, E = AnnotationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AnnotationError {
    /// `y` has no default; callers must set it.
    #[error("label y position is not set")]
    MissingY,
    #[error("label text is not set")]
    MissingText,
    /// The default x position maps the datum through the accessor, so it needs one.
    #[error("label has no datum to derive the default x position from")]
    MissingDatum,
    #[error("device pixel ratio must be finite and positive, got {0}")]
    InvalidRatio(f64),
    #[error("invalid CSS color '{0}'")]
    InvalidColor(String),
    #[error("invalid text align '{0}'")]
    InvalidTextAlign(String),
    #[error("label style parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
