// File: crates/pathchart-core/src/scale.rs
// Summary: X (time/step) and Y (value) transforms from data space to pixels.

use crate::geometry::RectI32;

/// Logical X coordinate (elapsed time or step index).
pub type Logical = f64;
/// Value Y coordinate (asset price).
pub type Value = f64;

/// Horizontal scale controlled via logical start and spacing (px per logical unit).
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub left_px: f32,
    pub start_logical: Logical,
    pub spacing: f32,
}

impl TimeScale {
    pub fn new(left_px: f32, start_logical: Logical, spacing: f32) -> Self {
        Self { left_px, start_logical, spacing }
    }

    /// Map `[x_min, x_max]` onto the horizontal extent of `plot`.
    pub fn fit(plot: &RectI32, x_min: Logical, x_max: Logical) -> Self {
        // a negative span mirrors the axis instead of collapsing it
        let span = x_max - x_min;
        let span = if span.abs() < 1e-12 { 1e-12 } else { span };
        Self::new(plot.left as f32, x_min, (plot.width() as f64 / span) as f32)
    }

    #[inline]
    pub fn to_px(&self, x: Logical) -> f32 {
        self.left_px + ((x - self.start_logical) as f32) * self.spacing
    }
}

/// Vertical value scale mapping a data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    pub fn fit(plot: &RectI32, y_min: Value, y_max: Value) -> Self {
        Self::new_linear(plot.top as f32, plot.bottom as f32, y_min, y_max)
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}
