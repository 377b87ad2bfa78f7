// File: crates/pathchart-core/src/series.rs
// Summary: Line series model; one series per simulated path.

use crate::table::Column;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Legend/trace label, the source column name.
    pub name: String,
    pub data_xy: Vec<(f64, f64)>,
}

impl Series {
    pub fn with_data(name: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { name: name.into(), data_xy: data }
    }

    /// Pair `x` and `y` row by row. Both columns come from the same table and
    /// therefore have the same length.
    pub fn from_columns(x: &Column, y: &Column) -> Self {
        let data = x.values.iter().copied().zip(y.values.iter().copied()).collect();
        Self::with_data(y.name.clone(), data)
    }

    pub fn len(&self) -> usize {
        self.data_xy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_xy.is_empty()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_xy.iter().map(|&(x, _)| x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_xy.iter().map(|&(_, y)| y)
    }
}
