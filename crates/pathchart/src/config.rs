// File: crates/pathchart/src/config.rs
// Summary: Settings layering for the CLI: built-in defaults < preset < TOML file < flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use pathchart_core::{theme, ChartConfig, OutputMode, RenderOptions, XLimit};
use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "Simulated Option Price Paths Over Time";
pub const DEFAULT_Y_LABEL: &str = "Asset Price";

/// The two axis conventions the simulator writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Continuous `time` column in years, axis pinned to [0, last].
    Time,
    /// Discrete `time_step` column, auto-scaled.
    TimeStep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeArg {
    Display,
    File,
    Html,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum XLimitArg {
    None,
    FromZeroToLast,
}

impl From<XLimitArg> for XLimit {
    fn from(v: XLimitArg) -> Self {
        match v {
            XLimitArg::None => XLimit::None,
            XLimitArg::FromZeroToLast => XLimit::FromZeroToLast,
        }
    }
}

/// Optional overrides; both the TOML file and the command line produce one.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Overrides {
    pub preset: Option<Preset>,
    pub x_column: Option<String>,
    pub x_limit: Option<XLimitArg>,
    pub mode: Option<ModeArg>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub theme: Option<String>,
    pub delimiter: Option<char>,
    pub preview_rows: Option<usize>,
    pub legend: Option<bool>,
}

impl Overrides {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Fully resolved settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub x_column: String,
    pub x_limit: XLimit,
    pub mode: ModeArg,
    pub output: Option<PathBuf>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: i32,
    pub height: i32,
    pub theme: String,
    pub delimiter: u8,
    pub preview_rows: usize,
    pub legend: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let opts = RenderOptions::default();
        let mut s = Self {
            x_column: String::new(),
            x_limit: XLimit::None,
            mode: ModeArg::Display,
            output: None,
            title: DEFAULT_TITLE.to_string(),
            x_label: String::new(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            width: opts.width,
            height: opts.height,
            theme: opts.theme.name.to_string(),
            delimiter: b',',
            preview_rows: 5,
            legend: true,
        };
        s.apply_preset(Preset::Time);
        s
    }
}

impl Settings {
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Time => {
                self.x_column = "time".into();
                self.x_limit = XLimit::FromZeroToLast;
                self.x_label = "Time (in years)".into();
            }
            Preset::TimeStep => {
                self.x_column = "time_step".into();
                self.x_limit = XLimit::None;
                self.x_label = "Time Step".into();
            }
        }
    }

    /// Layer `o` on top. A preset is applied before the other fields so an
    /// explicit value in the same layer wins over it.
    pub fn apply(&mut self, o: Overrides) -> Result<()> {
        if let Some(p) = o.preset { self.apply_preset(p); }
        if let Some(v) = o.x_column { self.x_column = v; }
        if let Some(v) = o.x_limit { self.x_limit = v.into(); }
        if let Some(v) = o.output {
            // an output path without a mode picks the backend from its extension
            if o.mode.is_none() {
                self.mode = mode_for_output(&v);
            }
            self.output = Some(v);
        }
        if let Some(v) = o.mode { self.mode = v; }
        if let Some(v) = o.title { self.title = v; }
        if let Some(v) = o.x_label { self.x_label = v; }
        if let Some(v) = o.y_label { self.y_label = v; }
        if let Some(v) = o.width { self.width = v; }
        if let Some(v) = o.height { self.height = v; }
        if let Some(v) = o.theme { self.theme = v; }
        if let Some(c) = o.delimiter {
            if !c.is_ascii() {
                bail!("delimiter must be a single ASCII character, got '{c}'");
            }
            self.delimiter = c as u8;
        }
        if let Some(v) = o.preview_rows { self.preview_rows = v; }
        if let Some(v) = o.legend { self.legend = v; }
        Ok(())
    }

    pub fn chart_config(&self) -> ChartConfig {
        let mode = match self.mode {
            ModeArg::Display => OutputMode::StaticDisplay,
            ModeArg::File => OutputMode::StaticFile {
                path: self.output.clone().unwrap_or_else(|| PathBuf::from("chart.png")),
            },
            ModeArg::Html => OutputMode::InteractiveHtml {
                path: self.output.clone().unwrap_or_else(|| PathBuf::from("chart.html")),
            },
        };
        ChartConfig::new(mode)
            .title(self.title.clone())
            .labels(self.x_label.clone(), self.y_label.clone())
            .x_limit(self.x_limit)
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        if self.width <= 0 || self.height <= 0 {
            bail!("chart size must be positive, got {}x{}", self.width, self.height);
        }
        let Some(theme) = theme::find(&self.theme) else {
            let names: Vec<_> = theme::presets().iter().map(|t| t.name).collect();
            bail!("unknown theme '{}' (available: {})", self.theme, names.join(", "));
        };
        Ok(RenderOptions {
            width: self.width,
            height: self.height,
            theme,
            legend: self.legend,
            ..RenderOptions::default()
        })
    }
}

fn mode_for_output(path: &Path) -> ModeArg {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => ModeArg::Html,
        _ => ModeArg::File,
    }
}
