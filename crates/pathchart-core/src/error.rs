// File: crates/pathchart-core/src/error.rs
// Summary: Error taxonomy shared by the loader and the renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Load,
    Render,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Load => f.write_str("load"),
            Stage::Render => f.write_str("render"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("load: input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("load: malformed table {} at line {line}: {reason}", .path.display())]
    MalformedTable {
        path: PathBuf,
        /// 1-based line in the source file (the header is line 1).
        line: u64,
        reason: String,
    },

    #[error("load: failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render: unknown x column '{name}' (available: {})", .available.join(", "))]
    UnknownColumn { name: String, available: Vec<String> },

    #[error("render: x column '{column}' has no values to bound the axis")]
    EmptyAxis { column: String },

    #[error("render: table has no series besides the x column '{x_column}'")]
    EmptySeriesSet { x_column: String },

    #[error("render: cannot write {target}: {reason}")]
    RenderBackend { target: String, reason: String },
}

impl ChartError {
    pub fn stage(&self) -> Stage {
        match self {
            ChartError::NotFound { .. }
            | ChartError::MalformedTable { .. }
            | ChartError::Read { .. } => Stage::Load,
            ChartError::UnknownColumn { .. }
            | ChartError::EmptyAxis { .. }
            | ChartError::EmptySeriesSet { .. }
            | ChartError::RenderBackend { .. } => Stage::Render,
        }
    }

    pub(crate) fn backend(target: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ChartError::RenderBackend { target: target.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
