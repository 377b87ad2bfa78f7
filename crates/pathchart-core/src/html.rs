// File: crates/pathchart-core/src/html.rs
// Summary: Interactive HTML backend; figure data embedded as JSON into a self-contained page.

use serde::Serialize;

use crate::chart::Chart;
use crate::error::{ChartError, Result};
use crate::theme::{css_hex, Theme};

const TEMPLATE: &str = include_str!("assets/interactive.html");
const FIGURE_PLACEHOLDER: &str = "\"__FIGURE__\"";
const TITLE_PLACEHOLDER: &str = "__PAGE_TITLE__";

/// Everything the page script needs to draw the chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure<'a> {
    pub title: &'a str,
    pub x_column: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    /// Shared x values; every trace is sampled at the same rows.
    pub x: Vec<f64>,
    pub traces: Vec<Trace<'a>>,
    pub theme: PageTheme,
}

#[derive(Debug, Serialize)]
pub struct Trace<'a> {
    pub name: &'a str,
    pub color: String,
    pub y: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTheme {
    pub background: String,
    pub grid: String,
    pub axis: String,
    pub tick: String,
    pub text: String,
    pub legend_background: String,
}

impl From<&Theme> for PageTheme {
    fn from(t: &Theme) -> Self {
        Self {
            background: css_hex(t.background),
            grid: css_hex(t.grid),
            axis: css_hex(t.axis_line),
            tick: css_hex(t.tick),
            text: css_hex(t.axis_label),
            legend_background: css_hex(t.legend_background),
        }
    }
}

impl<'a> Figure<'a> {
    /// Build the figure from a chart whose series share the x samples of `x_column`.
    pub fn from_chart(chart: &'a Chart, x_column: &'a str, theme: &Theme) -> Self {
        let x = chart.series.first().map(|s| s.xs().collect()).unwrap_or_default();
        let traces = chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| Trace { name: &s.name, color: css_hex(theme.series_color(i)), y: s.ys().collect() })
            .collect();
        Self {
            title: &chart.title,
            x_column,
            x_label: &chart.x_axis.label,
            y_label: &chart.y_axis.label,
            x_range: [chart.x_axis.min, chart.x_axis.max],
            y_range: [chart.y_axis.min, chart.y_axis.max],
            x,
            traces,
            theme: PageTheme::from(theme),
        }
    }

    /// Render the standalone document. Output depends only on the figure.
    pub fn to_html(&self) -> Result<String> {
        let json = serde_json::to_string(self).map_err(|e| ChartError::backend("HTML figure", e))?;
        let json = escape_script_json(&json);
        let page_title = if self.title.is_empty() { "Chart" } else { self.title };
        Ok(TEMPLATE
            .replace(TITLE_PLACEHOLDER, &escape_html(page_title))
            .replace(FIGURE_PLACEHOLDER, &json))
    }
}

/// Make JSON safe to inline in a `<script>` element. `<`, `>` and `&` only
/// occur inside JSON strings, where `\uXXXX` escapes decode to the same text,
/// so no markup (`</script>`, `<!--`, `<script`) can reach the HTML tokenizer.
fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
