// File: crates/chart-annotations/src/scale.rs
// Summary: Scale contract (domain value -> pixel) used by label positioning, with time/value scales.

/// Logical X coordinate (e.g., bar index or timestamp).
pub type Logical = f64;
/// Value Y coordinate (e.g., price).
pub type Value = f64;

/// Maps a domain value to a pixel coordinate inside the plot area.
pub trait Scale {
    fn scale(&self, v: f64) -> f64;
    fn invert(&self, px: f64) -> f64;
}

/// Horizontal time scale controlled via logical start and bar spacing (px per logical).
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub left_px: f64,
    pub start_logical: Logical,
    pub bar_spacing: f64,
}

impl TimeScale {
    pub fn new(left_px: f64, start_logical: Logical, bar_spacing: f64) -> Self {
        Self { left_px, start_logical, bar_spacing: bar_spacing.max(0.01) }
    }
}

impl Scale for TimeScale {
    #[inline]
    fn scale(&self, x: Logical) -> f64 {
        self.left_px + (x - self.start_logical) * self.bar_spacing
    }
    #[inline]
    fn invert(&self, px: f64) -> Logical {
        self.start_logical + (px - self.left_px) / self.bar_spacing
    }
}

/// Vertical value scale mapping a data range to [top, bottom] pixels (top = vmax).
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: Value,
    pub vmax: Value,
    pub log: bool,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: Value, vmax: Value) -> Self {
        let vmax = if (vmax - vmin).abs() < 1e-12 { vmin + 1.0 } else { vmax };
        Self { top_px, bottom_px, vmin, vmax, log: false }
    }

    pub fn new_log10(top_px: f64, bottom_px: f64, vmin: Value, vmax: Value) -> Self {
        // log needs a strictly positive, non-empty range
        let vmin = vmin.max(1e-12);
        let vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        Self { top_px, bottom_px, vmin, vmax, log: true }
    }

    fn domain(&self, v: Value) -> f64 {
        if self.log { v.max(1e-12).log10() } else { v }
    }
}

impl Scale for ValueScale {
    fn scale(&self, y: Value) -> f64 {
        let (lo, hi) = (self.domain(self.vmin), self.domain(self.vmax));
        let t = (self.domain(y) - lo) / (hi - lo).max(1e-12);
        self.bottom_px - t * (self.bottom_px - self.top_px)
    }

    fn invert(&self, py: f64) -> Value {
        let (lo, hi) = (self.domain(self.vmin), self.domain(self.vmax));
        let t = (self.bottom_px - py) / (self.bottom_px - self.top_px);
        let d = lo + t * (hi - lo);
        if self.log { 10f64.powf(d) } else { d }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scale_round_trips_pixels() {
        let s = TimeScale::new(10.0, 100.0, 4.0);
        assert_eq!(s.scale(100.0), 10.0);
        assert_eq!(s.scale(105.0), 30.0);
        assert_eq!(s.invert(30.0), 105.0);
    }

    #[test]
    fn value_scale_is_flipped() {
        let s = ValueScale::new_linear(0.0, 200.0, 0.0, 100.0);
        assert_eq!(s.scale(0.0), 200.0);
        assert_eq!(s.scale(100.0), 0.0);
        assert_eq!(s.scale(25.0), 150.0);
        let l = ValueScale::new_log10(0.0, 100.0, 1.0, 100.0);
        assert!((l.scale(10.0) - 50.0).abs() < 1e-9);
        assert!((l.invert(50.0) - 10.0).abs() < 1e-9);
    }
}
