// File: crates/pathchart-core/tests/html.rs
// Purpose: Interactive HTML output is standalone, deterministic and carries every trace.

use pathchart_core::{ChartConfig, Column, OutputMode, SeriesChartRenderer, Table, XLimit};

fn paths_table() -> Table {
    Table::new(vec![
        Column::new("time", vec![0.0, 0.5, 1.0]),
        Column::new("path_1", vec![100.0, 103.25, 99.5]),
        Column::new("path_2", vec![100.0, 97.0, 101.75]),
    ])
    .expect("valid table")
}

fn render_html(table: &Table, name: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join(name);
    let cfg = ChartConfig::new(OutputMode::InteractiveHtml { path: out.clone() })
        .title("Simulated Option Price Paths Over Time")
        .labels("Time (in years)", "Asset Price")
        .x_limit(XLimit::FromZeroToLast);
    SeriesChartRenderer::default().render(table, "time", &cfg).expect("render html");
    std::fs::read_to_string(&out).expect("read html")
}

/// Pull the embedded figure JSON back out of the page.
fn figure_json(html: &str) -> serde_json::Value {
    let start = html.find("var FIG = ").expect("figure assignment") + "var FIG = ".len();
    let end = start + html[start..].find(";\n").expect("end of figure");
    serde_json::from_str(&html[start..end]).expect("figure is json")
}

#[test]
fn identical_inputs_give_identical_documents() {
    let t = paths_table();
    let a = render_html(&t, "a.html");
    let b = render_html(&t, "b.html");
    assert_eq!(a, b);
}

#[test]
fn document_is_self_contained() {
    let html = render_html(&paths_table(), "paths.html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("__FIGURE__"));
    assert!(!html.contains("__PAGE_TITLE__"));
    assert!(!html.contains("<script src"), "no external scripts");
    assert!(!html.contains("http://") && !html.contains("https://"), "no network references");
    assert!(html.contains("<title>Simulated Option Price Paths Over Time</title>"));
}

#[test]
fn figure_carries_traces_in_order() {
    let fig = figure_json(&render_html(&paths_table(), "paths.html"));

    assert_eq!(fig["title"], "Simulated Option Price Paths Over Time");
    assert_eq!(fig["xLabel"], "Time (in years)");
    assert_eq!(fig["yLabel"], "Asset Price");
    assert_eq!(fig["xColumn"], "time");
    assert_eq!(fig["xRange"], serde_json::json!([0.0, 1.0]));
    assert_eq!(fig["x"], serde_json::json!([0.0, 0.5, 1.0]));

    let traces = fig["traces"].as_array().expect("traces array");
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["name"], "path_1");
    assert_eq!(traces[0]["y"], serde_json::json!([100.0, 103.25, 99.5]));
    assert_eq!(traces[1]["name"], "path_2");
    assert_ne!(traces[0]["color"], traces[1]["color"]);
}

#[test]
fn markup_in_names_cannot_break_out() {
    let names = ["</script><b>", "<!--<script>", "a & b > c"];
    let mut cols = vec![Column::new("time", vec![0.0, 1.0])];
    cols.extend(names.iter().map(|n| Column::new(*n, vec![1.0, 2.0])));
    let html = render_html(&Table::new(cols).unwrap(), "x.html");

    assert_eq!(html.matches("</script>").count(), 1, "only the real closing tag");
    assert_eq!(html.matches("<script").count(), 1, "only the real opening tag");
    assert!(!html.contains("<!--"), "no comment opener inside the script");

    let fig = figure_json(&html);
    for (i, name) in names.iter().enumerate() {
        assert_eq!(fig["traces"][i]["name"], *name);
    }
}
