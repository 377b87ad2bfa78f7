// File: crates/pathchart-core/tests/display.rs
// Purpose: The window backend reports an unreachable display server as an error instead of panicking.
// Kept as its own test binary: it clears display variables for the whole process.

#![cfg(all(feature = "display", target_os = "linux"))]

use pathchart_core::{ChartConfig, ChartError, Column, OutputMode, SeriesChartRenderer, Stage, Table};

#[test]
fn no_display_server_is_a_backend_error() {
    std::env::remove_var("DISPLAY");
    std::env::remove_var("WAYLAND_DISPLAY");

    let table = Table::new(vec![
        Column::new("time", vec![0.0, 1.0]),
        Column::new("path_1", vec![100.0, 101.0]),
    ])
    .expect("valid table");
    let cfg = ChartConfig::new(OutputMode::StaticDisplay);

    // runs on a test worker thread, which must not trip winit's main-thread check either
    let err = SeriesChartRenderer::default().render(&table, "time", &cfg).unwrap_err();
    assert!(matches!(err, ChartError::RenderBackend { .. }), "{err:?}");
    assert_eq!(err.stage(), Stage::Render);
    assert!(err.to_string().contains("display"), "{err}");
}
