// File: crates/pathchart-core/src/axis.rs
// Summary: Axis model with label and visible range.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self {
        Self::new("Time", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("Asset Price", 0.0, 1.0)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}
