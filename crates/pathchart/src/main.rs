// File: crates/pathchart/src/main.rs
// Summary: CLI that loads a simulated path table and renders it (window, image file or HTML).

mod config;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pathchart_core::{ArtifactKind, SeriesChartRenderer, TableLoader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ModeArg, Overrides, Preset, Settings, XLimitArg};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render simulated asset-price paths as a chart", long_about = None)]
struct Cli {
    /// Input CSV: one time/step column plus one column per path
    #[arg(default_value = "dist/Data.csv")]
    input: PathBuf,

    /// TOML file with default settings (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Axis convention of the input
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Column used as the horizontal axis
    #[arg(long)]
    x_column: Option<String>,

    #[arg(long, value_enum)]
    x_limit: Option<XLimitArg>,

    /// Output backend; inferred from --output when omitted
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Image or HTML path for the file/html modes
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    x_label: Option<String>,

    #[arg(long)]
    y_label: Option<String>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// light, dark, solarized-dark, solarized-light, high-contrast-dark
    #[arg(long)]
    theme: Option<String>,

    #[arg(long)]
    delimiter: Option<char>,

    /// Rows of the table printed after rendering
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Hide the legend in static output
    #[arg(long)]
    no_legend: bool,

    /// -v for info, -vv for debug (RUST_LOG takes precedence)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            preset: self.preset,
            x_column: self.x_column.clone(),
            x_limit: self.x_limit,
            mode: self.mode,
            output: self.output.clone(),
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            width: self.width,
            height: self.height,
            theme: self.theme.clone(),
            delimiter: self.delimiter,
            preview_rows: self.preview_rows,
            legend: self.no_legend.then_some(false),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::default();
    if let Some(path) = &cli.config {
        settings.apply(Overrides::from_toml_file(path)?)?;
    }
    settings.apply(cli.overrides())?;
    let opts = settings.render_options()?;
    let chart_config = settings.chart_config();

    let table = TableLoader::new()
        .delimiter(settings.delimiter)
        .load(&cli.input)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;
    info!(columns = table.column_count(), rows = table.row_count(), "loaded {}", cli.input.display());

    let renderer = SeriesChartRenderer::new(opts);
    let artifact = renderer
        .render(&table, &settings.x_column, &chart_config)
        .with_context(|| format!("failed to render '{}'", cli.input.display()))?;

    match (artifact.kind, &artifact.path) {
        (ArtifactKind::Display, _) => println!("Displayed {} paths", artifact.trace_count()),
        (_, Some(path)) => println!("Wrote {} ({} paths)", path.display(), artifact.trace_count()),
        (_, None) => {}
    }

    if settings.preview_rows > 0 {
        println!("{}", table.head(settings.preview_rows));
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
