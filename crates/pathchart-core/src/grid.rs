// File: crates/pathchart-core/src/grid.rs
// Summary: Grid line positions and tick label formatting.

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Format a tick value with just enough decimals to tell neighbouring ticks
/// `spacing` apart.
pub fn format_tick(value: f64, spacing: f64) -> String {
    let spacing = spacing.abs();
    let decimals = if spacing > 0.0 && spacing.is_finite() {
        (-spacing.log10().floor() + 1.0).clamp(0.0, 6.0) as usize
    } else {
        2
    };
    let s = format!("{value:.decimals$}");
    // "-0.00" reads badly on an axis
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}
