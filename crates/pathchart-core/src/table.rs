// File: crates/pathchart-core/src/table.rs
// Summary: Wide-format numeric table and the CSV loader that builds it.
// Notes:
// - Columns keep header order; every column has the same row count.
// - Values are finite f64. Anything else is rejected at load time.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ChartError, Result};

/// One named column of samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }

    /// Last sample, if the column has any rows.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// True when values never decrease from one row to the next.
    pub fn is_non_decreasing(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Immutable table of equally long numeric columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, enforcing: at least one column, unique non-empty names,
    /// equal row counts and finite values.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let malformed = |reason: String| ChartError::MalformedTable {
            path: PathBuf::from("<memory>"),
            line: 1,
            reason,
        };
        if columns.is_empty() {
            return Err(malformed("table has no columns".into()));
        }
        let mut seen = HashSet::new();
        for c in &columns {
            if c.name.is_empty() {
                return Err(malformed("empty column name".into()));
            }
            if !seen.insert(c.name.as_str()) {
                return Err(malformed(format!("duplicate column '{}'", c.name)));
            }
        }
        let rows = columns[0].values.len();
        for c in &columns {
            if c.values.len() != rows {
                return Err(malformed(format!(
                    "column '{}' has {} rows, expected {}",
                    c.name,
                    c.values.len(),
                    rows
                )));
            }
            if let Some(v) = c.values.iter().find(|v| !v.is_finite()) {
                return Err(malformed(format!("column '{}' holds non-finite value {}", c.name, v)));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// True when the table has columns but no data rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Preview of the first `n` rows, formatted like a console dataframe dump.
    pub fn head(&self, n: usize) -> TablePreview<'_> {
        TablePreview { table: self, rows: n.min(self.row_count()) }
    }
}

/// Text rendering of the leading rows of a [`Table`].
pub struct TablePreview<'a> {
    table: &'a Table,
    rows: usize,
}

impl fmt::Display for TablePreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self.rows.saturating_sub(1).to_string().len();
        let cells: Vec<Vec<String>> = self
            .table
            .columns
            .iter()
            .map(|c| c.values[..self.rows].iter().map(|v| format!("{v}")).collect())
            .collect();
        let widths: Vec<usize> = self
            .table
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, vals)| vals.iter().map(String::len).max().unwrap_or(0).max(c.name.len()))
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (c, w) in self.table.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", c.name, w = *w)?;
        }
        for row in 0..self.rows {
            writeln!(f)?;
            write!(f, "{row:<index_width$}")?;
            for (vals, w) in cells.iter().zip(&widths) {
                write!(f, "  {:>w$}", vals[row], w = *w)?;
            }
        }
        Ok(())
    }
}

/// Reads delimited text files into a [`Table`].
#[derive(Clone, Debug)]
pub struct TableLoader {
    delimiter: u8,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("load", path = %path.display()).entered();

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ChartError::NotFound { path: path.to_path_buf() },
            _ => ChartError::Read { path: path.to_path_buf(), source: e },
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| csv_error(path, e))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(malformed(path, 1, "missing header row"));
        }
        let mut seen = HashSet::new();
        for h in &headers {
            if h.is_empty() {
                return Err(malformed(path, 1, "empty column name in header"));
            }
            if !seen.insert(h.as_str()) {
                return Err(malformed(path, 1, format!("duplicate column '{h}'")));
            }
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        for rec in rdr.records() {
            let rec = rec.map_err(|e| csv_error(path, e))?;
            let line = rec.position().map_or(0, |p| p.line());
            if rec.len() != headers.len() {
                return Err(malformed(
                    path,
                    line,
                    format!("expected {} fields, found {}", headers.len(), rec.len()),
                ));
            }
            for (i, field) in rec.iter().enumerate() {
                let v: f64 = field.parse().map_err(|_| {
                    malformed(path, line, format!("column '{}': '{field}' is not numeric", headers[i]))
                })?;
                if !v.is_finite() {
                    return Err(malformed(
                        path,
                        line,
                        format!("column '{}': '{field}' is not a finite number", headers[i]),
                    ));
                }
                values[i].push(v);
            }
        }

        let columns = headers.into_iter().zip(values).map(|(name, values)| Column { name, values }).collect();
        let table = Table { columns };
        debug!(columns = table.column_count(), rows = table.row_count(), "table loaded");
        Ok(table)
    }
}

/// Load a comma-separated file with the default loader settings.
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    TableLoader::default().load(path)
}

fn malformed(path: &Path, line: u64, reason: impl Into<String>) -> ChartError {
    ChartError::MalformedTable { path: path.to_path_buf(), line, reason: reason.into() }
}

fn csv_error(path: &Path, err: csv::Error) -> ChartError {
    let line = err.position().map_or(0, |p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => ChartError::Read { path: path.to_path_buf(), source },
        _ => malformed(path, line, reason),
    }
}
