// File: crates/pathchart-core/tests/smoke.rs
// Purpose: End-to-end smoke test: CSV on disk to a labelled PNG through the public API.

use pathchart_core::{load, ChartConfig, OutputMode, RenderOptions, SeriesChartRenderer, Theme, XLimit};

#[test]
fn render_smoke_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Data.csv");
    let mut csv = String::from("time,path_1,path_2,path_3\n");
    for i in 0..=50 {
        let t = i as f64 / 50.0;
        csv.push_str(&format!(
            "{t},{},{},{}\n",
            100.0 + (t * 6.0).sin() * 5.0,
            100.0 + t * 8.0,
            100.0 - t * 4.0 + (t * 11.0).cos()
        ));
    }
    std::fs::write(&input, csv).unwrap();

    let table = load(&input).expect("load");
    let out = dir.path().join("out/paths.png");
    let cfg = ChartConfig::new(OutputMode::StaticFile { path: out.clone() })
        .title("Simulated Option Price Paths Over Time")
        .labels("Time (in years)", "Asset Price")
        .x_limit(XLimit::FromZeroToLast);

    // labels on: exercises text layout even when no fonts are installed
    let opts = RenderOptions { theme: Theme::dark(), ..RenderOptions::default() };
    let artifact = SeriesChartRenderer::new(opts).render(&table, "time", &cfg).expect("render should succeed");

    assert_eq!(artifact.traces, vec!["path_1", "path_2", "path_3"]);
    assert_eq!(artifact.x_range, (0.0, 1.0));
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}
