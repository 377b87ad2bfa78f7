// File: crates/pathchart-core/src/view.rs
// View state: visible data ranges, autoscale and the fixed x-limit policy.

use crate::Chart;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Tight x extent and y extent padded by `y_margin` (fraction of the span).
    pub fn from_chart(chart: &Chart, y_margin: f64) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in &chart.series {
            for &(x, y) in &s.data_xy {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 {
            y_min -= 0.5;
            y_max += 0.5;
        }
        let ym = (y_max - y_min) * y_margin;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    /// Pin the horizontal range to `[0, last]`. A zero `last` keeps a unit
    /// span so the scale stays invertible.
    pub fn with_x_from_zero(mut self, last: f64) -> Self {
        self.x_min = 0.0;
        self.x_max = last;
        if (self.x_max - self.x_min).abs() < 1e-9 { self.x_max = self.x_min + 1.0; }
        self
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}
