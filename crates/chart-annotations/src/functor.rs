// File: crates/chart-annotations/src/functor.rs
// Summary: Value-or-function configuration fields, resolved through a single routine.

use std::fmt;
use std::sync::Arc;

use crate::canvas::FillStyle;

/// A configuration value that is either fixed or computed from a context `C`.
///
/// Every label field that may depend on the datum (position, text, fill) goes
/// through [`Functor::resolve`], so constant and computed values share one rule.
pub enum Functor<C: ?Sized, T> {
    Constant(T),
    Computed(Arc<dyn Fn(&C) -> T + Send + Sync>),
}

impl<C: ?Sized, T: Clone> Functor<C, T> {
    pub fn computed(f: impl Fn(&C) -> T + Send + Sync + 'static) -> Self {
        Functor::Computed(Arc::new(f))
    }

    /// Invoke the function with `ctx`, or hand back a copy of the constant.
    #[inline]
    pub fn resolve(&self, ctx: &C) -> T {
        match self {
            Functor::Constant(v) => v.clone(),
            Functor::Computed(f) => f(ctx),
        }
    }

    /// Like [`Functor::resolve`] when the context may be absent: a constant
    /// still resolves, a computed value yields `None`.
    pub fn resolve_opt(&self, ctx: Option<&C>) -> Option<T> {
        match (self, ctx) {
            (Functor::Constant(v), _) => Some(v.clone()),
            (Functor::Computed(_), Some(c)) => Some(self.resolve(c)),
            (Functor::Computed(_), None) => None,
        }
    }
}

impl<C: ?Sized, T: Clone> Clone for Functor<C, T> {
    fn clone(&self) -> Self {
        match self {
            Functor::Constant(v) => Functor::Constant(v.clone()),
            Functor::Computed(f) => Functor::Computed(Arc::clone(f)),
        }
    }
}

impl<C: ?Sized, T: fmt::Debug> fmt::Debug for Functor<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Functor::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Functor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<C: ?Sized> From<f64> for Functor<C, f64> {
    fn from(v: f64) -> Self { Functor::Constant(v) }
}

impl<C: ?Sized> From<&str> for Functor<C, String> {
    fn from(v: &str) -> Self { Functor::Constant(v.to_owned()) }
}

impl<C: ?Sized> From<String> for Functor<C, String> {
    fn from(v: String) -> Self { Functor::Constant(v) }
}

impl<C: ?Sized> From<FillStyle> for Functor<C, FillStyle> {
    fn from(v: FillStyle) -> Self { Functor::Constant(v) }
}
