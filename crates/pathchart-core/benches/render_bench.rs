use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pathchart_core::{load, ChartConfig, Column, OutputMode, RenderOptions, SeriesChartRenderer, Table};

/// `paths` random-walk-ish columns of `steps` rows plus a time column.
fn build_table(paths: usize, steps: usize) -> Table {
    let time: Vec<f64> = (0..steps).map(|i| i as f64 / steps as f64).collect();
    let mut columns = vec![Column::new("time", time)];
    for p in 0..paths {
        let values = (0..steps)
            .map(|i| 100.0 + ((i as f64 * 0.01 + p as f64).sin() * 10.0) + (i as f64 * 0.0001))
            .collect();
        columns.push(Column::new(format!("path_{p}"), values));
    }
    Table::new(columns).expect("valid table")
}

fn bench_render(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut group = c.benchmark_group("render_png");
    for &(paths, steps) in &[(10usize, 252usize), (100, 252), (20, 10_000)] {
        group.bench_function(format!("p{paths}_s{steps}"), |b| {
            let table = build_table(paths, steps);
            let opts = RenderOptions { width: 800, height: 500, draw_labels: false, ..RenderOptions::default() };
            let renderer = SeriesChartRenderer::new(opts);
            let cfg = ChartConfig::new(OutputMode::StaticFile { path: dir.path().join("bench.png") });
            b.iter(|| black_box(renderer.render(&table, "time", &cfg).expect("render")));
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("paths.csv");
    let table = build_table(100, 252);
    let mut csv = table.column_names().join(",");
    for r in 0..table.row_count() {
        csv.push('\n');
        let row: Vec<String> = table.columns().iter().map(|col| col.values[r].to_string()).collect();
        csv.push_str(&row.join(","));
    }
    std::fs::write(&path, csv).expect("write csv");

    c.bench_function("load_p100_s252", |b| {
        b.iter(|| black_box(load(&path).expect("load")));
    });
}

criterion_group!(benches, bench_render, bench_load);
criterion_main!(benches);
