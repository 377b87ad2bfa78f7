// File: crates/pathchart-core/src/render.rs
// Summary: Series chart renderer; derives one trace per non-axis column and dispatches to a backend.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chart::{Chart, RenderOptions};
use crate::error::{ChartError, Result};
use crate::html::Figure;
use crate::output::{write_atomically, ImageFormat};
use crate::series::Series;
use crate::table::Table;
use crate::view::ViewState;
use crate::Axis;

/// Vertical padding applied when auto-scaling the value axis.
const Y_MARGIN: f64 = 0.02;

/// Horizontal range policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum XLimit {
    /// Fit the data extent.
    #[default]
    None,
    /// `[0, last value of the x column]`.
    FromZeroToLast,
}

/// Where the chart goes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum OutputMode {
    /// On-screen window; blocks until dismissed.
    StaticDisplay,
    /// Image file, format chosen by extension.
    StaticFile { path: PathBuf },
    /// Standalone HTML document with hoverable traces.
    InteractiveHtml { path: PathBuf },
}

impl OutputMode {
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputMode::StaticDisplay => None,
            OutputMode::StaticFile { path } | OutputMode::InteractiveHtml { path } => Some(path),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChartConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    #[serde(default)]
    pub x_limit: XLimit,
    #[serde(flatten)]
    pub mode: OutputMode,
}

impl ChartConfig {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            x_limit: XLimit::None,
            mode,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn x_limit(mut self, x_limit: XLimit) -> Self {
        self.x_limit = x_limit;
        self
    }
}

/// What will be drawn, derived from a table and a config. Holds names only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSpec {
    pub x_column: String,
    /// Table columns minus the x column, in table order.
    pub series: Vec<String>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_limit: XLimit,
    pub mode: OutputMode,
}

impl ChartSpec {
    pub fn derive(table: &Table, x_column: &str, config: &ChartConfig) -> Result<Self> {
        let x = table.column(x_column).ok_or_else(|| ChartError::UnknownColumn {
            name: x_column.to_string(),
            available: table.column_names().into_iter().map(str::to_string).collect(),
        })?;
        let series: Vec<String> = table
            .columns()
            .iter()
            .filter(|c| c.name != x_column)
            .map(|c| c.name.clone())
            .collect();
        if series.is_empty() {
            return Err(ChartError::EmptySeriesSet { x_column: x_column.to_string() });
        }
        if config.x_limit == XLimit::FromZeroToLast && x.values.is_empty() {
            return Err(ChartError::EmptyAxis { column: x_column.to_string() });
        }
        Ok(Self {
            x_column: x_column.to_string(),
            series,
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            x_limit: config.x_limit,
            mode: config.mode.clone(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Display,
    File,
    Html,
}

/// Description of what a render call produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub path: Option<PathBuf>,
    /// Trace labels in draw/legend order.
    pub traces: Vec<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl RenderedArtifact {
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }
}

/// Renders every non-axis column of a table as a line against the axis column.
#[derive(Clone, Debug, Default)]
pub struct SeriesChartRenderer {
    pub options: RenderOptions,
}

impl SeriesChartRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, table: &Table, x_column: &str, config: &ChartConfig) -> Result<RenderedArtifact> {
        let _span = tracing::debug_span!("render", x_column, mode = ?config.mode).entered();

        let spec = ChartSpec::derive(table, x_column, config)?;
        let chart = build_chart(table, &spec)?;
        debug!(traces = chart.series.len(), rows = table.row_count(), "chart built");

        let kind = match &spec.mode {
            OutputMode::StaticDisplay => {
                self.show(&chart)?;
                ArtifactKind::Display
            }
            OutputMode::StaticFile { path } => {
                let format = ImageFormat::from_path(path)?;
                let bytes = chart.render_to_image_bytes(&self.options, format)?;
                write_atomically(path, &bytes)?;
                info!(path = %path.display(), ?format, bytes = bytes.len(), "wrote chart image");
                ArtifactKind::File
            }
            OutputMode::InteractiveHtml { path } => {
                let html = Figure::from_chart(&chart, &spec.x_column, &self.options.theme).to_html()?;
                write_atomically(path, html.as_bytes())?;
                info!(path = %path.display(), bytes = html.len(), "wrote interactive chart");
                ArtifactKind::Html
            }
        };

        Ok(RenderedArtifact {
            kind,
            path: spec.mode.path().map(Path::to_path_buf),
            traces: spec.series,
            x_range: chart.x_axis.range(),
            y_range: chart.y_axis.range(),
        })
    }

    #[cfg(feature = "display")]
    fn show(&self, chart: &Chart) -> Result<()> {
        crate::display::show_blocking(chart, &self.options)
    }

    #[cfg(not(feature = "display"))]
    fn show(&self, _chart: &Chart) -> Result<()> {
        Err(ChartError::backend("display window", "built without the \"display\" feature"))
    }
}

/// Assemble traces, ranges and labels. Every row is plotted as loaded.
fn build_chart(table: &Table, spec: &ChartSpec) -> Result<Chart> {
    let x = table.column(&spec.x_column).ok_or_else(|| ChartError::UnknownColumn {
        name: spec.x_column.clone(),
        available: table.column_names().into_iter().map(str::to_string).collect(),
    })?;
    if !x.is_non_decreasing() {
        warn!(column = %x.name, "x column is not monotonically non-decreasing");
    }

    let mut chart = Chart::new();
    chart.title = spec.title.clone();
    for name in &spec.series {
        if let Some(col) = table.column(name) {
            chart.add_series(Series::from_columns(x, col));
        }
    }

    let mut view = ViewState::from_chart(&chart, Y_MARGIN);
    if spec.x_limit == XLimit::FromZeroToLast {
        let last = x.last().ok_or_else(|| ChartError::EmptyAxis { column: x.name.clone() })?;
        view = view.with_x_from_zero(last);
    }
    chart.x_axis = Axis::new(spec.x_label.clone(), view.x_min, view.x_max);
    chart.y_axis = Axis::new(spec.y_label.clone(), view.y_min, view.y_max);
    Ok(chart)
}
