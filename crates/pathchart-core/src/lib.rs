// File: crates/pathchart-core/src/lib.rs
// Summary: Core library entry point; loads path tables and renders them as line charts.

pub mod error;
pub mod table;
pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;
pub mod output;
pub mod html;
pub mod render;
#[cfg(feature = "display")]
pub mod display;

pub use error::{ChartError, Result, Stage};
pub use table::{load, Column, Table, TableLoader, TablePreview};
pub use chart::{Chart, DrawingContext, RenderOptions};
pub use series::Series;
pub use axis::Axis;
pub use view::ViewState;
pub use theme::Theme;
pub use output::ImageFormat;
pub use render::{
    ArtifactKind, ChartConfig, ChartSpec, OutputMode, RenderedArtifact, SeriesChartRenderer, XLimit,
};
