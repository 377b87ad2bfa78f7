// File: crates/pathchart-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small path chart to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, checks the decoded image for the expected size and drawn traces,
//   and notes that no golden exists yet.

use pathchart_core::{Axis, Chart, RenderOptions, Series, Theme};

const WIDTH: i32 = 400;
const HEIGHT: i32 = 260;

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(path: &std::path::Path, bytes: &[u8]) {
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        let got = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        assert_eq!(got.dimensions(), (WIDTH as u32, HEIGHT as u32));
        let background = *got.get_pixel(0, 0);
        let trace = Theme::default().series_color(0);
        let near_trace = |p: &image::Rgba<u8>| {
            let d = |a: u8, b: u8| (i16::from(a) - i16::from(b)).abs();
            d(p[0], trace.r()) <= 16 && d(p[1], trace.g()) <= 16 && d(p[2], trace.b()) <= 16
        };
        assert!(got.pixels().any(|p| *p != background), "chart is blank");
        assert!(got.pixels().any(near_trace), "first trace colour not drawn");
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn render_bytes(series: Vec<Series>) -> Vec<u8> {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("Time", 0.0, 4.0);
    chart.y_axis = Axis::new("Price", 95.0, 106.0);
    for s in series {
        chart.add_series(s);
    }

    let opts = RenderOptions { width: WIDTH, height: HEIGHT, draw_labels: false, ..RenderOptions::default() };
    chart.render_to_png_bytes(&opts).expect("render bytes")
}

#[test]
fn golden_two_paths() {
    let bytes = render_bytes(vec![
        Series::with_data("path_1", vec![(0.0, 100.0), (1.0, 102.0), (2.0, 101.0), (3.0, 104.5), (4.0, 103.0)]),
        Series::with_data("path_2", vec![(0.0, 100.0), (1.0, 98.5), (2.0, 97.0), (3.0, 99.0), (4.0, 96.5)]),
    ]);
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/two_paths.png");
    write_or_compare(&path, &bytes);
}

#[test]
fn golden_single_point_path() {
    let bytes = render_bytes(vec![Series::with_data("path_1", vec![(2.0, 100.0)])]);
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/single_point.png");
    write_or_compare(&path, &bytes);
}
