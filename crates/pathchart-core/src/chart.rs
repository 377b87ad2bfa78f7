// File: crates/pathchart-core/src/chart.rs
// Summary: Chart struct and the static rendering pipeline on Skia CPU raster and SVG canvases.

use skia_safe as skia;
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::geometry::{Insets, RectI32, HEIGHT, WIDTH};
use crate::grid::{format_tick, linspace};
use crate::output::ImageFormat;
use crate::scale::{TimeScale, ValueScale};
use crate::series::Series;
use crate::text::{Anchor, TextShaper, TextSpec};
use crate::theme::Theme;
use crate::view::ViewState;
use crate::Axis;

const X_TICKS: usize = 6;
const Y_TICKS: usize = 6;
const TITLE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 14.0;
const TICK_SIZE: f32 = 11.0;
const LEGEND_SIZE: f32 = 12.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Title, axis labels, tick labels and legend text. Off gives
    /// font-independent output.
    pub draw_labels: bool,
    pub legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
            legend: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the data; `y_margin` pads the y range by that
    /// fraction of its span.
    pub fn autoscale_axes(&mut self, y_margin: f64) {
        ViewState::from_chart(self, y_margin).apply_to_chart(self);
    }

    /// Draw the whole chart onto `canvas`, which must be `opts.width` x `opts.height`.
    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = opts.insets.plot_rect(opts.width, opts.height);
        let xs = TimeScale::fit(&plot, self.x_axis.min, self.x_axis.max);
        let ys = ValueScale::fit(&plot, self.y_axis.min, self.y_axis.max);

        draw_grid(canvas, &plot, theme);

        canvas.save();
        canvas.clip_rect(
            skia::Rect::from_ltrb(plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32),
            None,
            Some(true),
        );
        for (i, s) in self.series.iter().enumerate() {
            debug!(series = %s.name, points = s.len(), "drawing trace");
            draw_line_series(canvas, &xs, &ys, s, theme.series_color(i));
        }
        canvas.restore();

        draw_axes(canvas, &plot, theme);

        if opts.draw_labels {
            let shaper = TextShaper::new();
            draw_tick_labels(canvas, &shaper, &plot, &self.x_axis, &self.y_axis, theme);
            draw_titles(canvas, &shaper, opts, &plot, self);
            if opts.legend {
                draw_legend(canvas, &shaper, &plot, &self.series, theme);
            }
        }
    }

    /// Render into a tightly packed RGBA8 buffer: `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut ctx = DrawingContext::raster(opts.width, opts.height)?;
        self.draw(ctx.canvas(), opts);
        ctx.read_rgba8()
    }

    /// Encode the chart in a raster format (everything but SVG).
    pub fn render_to_image_bytes(&self, opts: &RenderOptions, format: ImageFormat) -> Result<Vec<u8>> {
        if format == ImageFormat::Svg {
            return self.render_to_svg_bytes(opts);
        }
        let (pixels, w, h, _) = self.render_to_rgba8(opts)?;
        format.encode_rgba8(pixels, w, h)
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        self.render_to_image_bytes(opts, ImageFormat::Png)
    }

    pub fn render_to_svg_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let canvas = skia::svg::Canvas::new(
            skia::Rect::from_wh(opts.width.max(1) as f32, opts.height.max(1) as f32),
            None,
        );
        self.draw(&canvas, opts);
        let data = canvas.end();
        Ok(data.as_bytes().to_vec())
    }
}

/// CPU raster surface owned by a single render call; released on drop.
pub struct DrawingContext {
    surface: skia::Surface,
    width: i32,
    height: i32,
}

impl DrawingContext {
    pub fn raster(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::backend("raster surface", format!("invalid size {width}x{height}")));
        }
        let surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| ChartError::backend("raster surface", "failed to create raster surface"))?;
        Ok(Self { surface, width, height })
    }

    pub fn canvas(&mut self) -> &skia::Canvas {
        self.surface.canvas()
    }

    pub fn read_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let info = skia::ImageInfo::new(
            (self.width, self.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = self.width as usize * 4;
        let mut pixels = vec![0u8; stride * self.height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::backend("raster surface", "reading pixels failed"));
        }
        Ok((pixels, self.width as u32, self.height as u32, stride))
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f64, plot.top as f64, plot.right as f64, plot.bottom as f64);
    // verticals
    for x in linspace(l, r, X_TICKS) {
        canvas.draw_line((x as f32, t as f32), (x as f32, b as f32), &paint);
    }
    // horizontals
    for y in linspace(t, b, Y_TICKS) {
        canvas.draw_line((l as f32, y as f32), (r as f32, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, plot: &RectI32, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);
}

fn draw_tick_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    plot: &RectI32,
    x_axis: &Axis,
    y_axis: &Axis,
    theme: &Theme,
) {
    let tick = TextSpec::numeric(TICK_SIZE, theme.tick);
    let x_values = linspace(x_axis.min, x_axis.max, X_TICKS);
    let x_pixels = linspace(plot.left as f64, plot.right as f64, X_TICKS);
    let x_step = (x_axis.max - x_axis.min) / (X_TICKS - 1) as f64;
    for (v, px) in x_values.iter().zip(&x_pixels) {
        let text = format_tick(*v, x_step);
        shaper.draw(canvas, &text, *px as f32, plot.bottom as f32 + 18.0, Anchor::Center, tick);
    }

    // pixel rows run top-down, values bottom-up
    let y_values = linspace(y_axis.max, y_axis.min, Y_TICKS);
    let y_pixels = linspace(plot.top as f64, plot.bottom as f64, Y_TICKS);
    let y_step = (y_axis.max - y_axis.min) / (Y_TICKS - 1) as f64;
    for (v, py) in y_values.iter().zip(&y_pixels) {
        let text = format_tick(*v, y_step);
        shaper.draw(canvas, &text, plot.left as f32 - 6.0, *py as f32 + 4.0, Anchor::Right, tick);
    }
}

fn draw_titles(canvas: &skia::Canvas, shaper: &TextShaper, opts: &RenderOptions, plot: &RectI32, chart: &Chart) {
    let theme = &opts.theme;
    let center_x = (plot.left + plot.right) as f32 * 0.5;
    let label = TextSpec::new(LABEL_SIZE, theme.axis_label);
    if !chart.title.is_empty() {
        let baseline = (plot.top as f32 * 0.5 + TITLE_SIZE * 0.4).max(TITLE_SIZE);
        shaper.draw(canvas, &chart.title, center_x, baseline, Anchor::Center, TextSpec::new(TITLE_SIZE, theme.title));
    }
    if !chart.x_axis.label.is_empty() {
        shaper.draw(canvas, &chart.x_axis.label, center_x, opts.height as f32 - 14.0, Anchor::Center, label);
    }
    if !chart.y_axis.label.is_empty() {
        let center_y = (plot.top + plot.bottom) as f32 * 0.5;
        shaper.draw_vertical(canvas, &chart.y_axis.label, 18.0, center_y, label);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, plot: &RectI32, series: &[Series], theme: &Theme) {
    if series.is_empty() {
        return;
    }
    let row_h = LEGEND_SIZE + 6.0;
    let swatch = 18.0;
    let pad = 8.0;
    // rows that fit in the plot, keeping one for the overflow note
    let capacity = (((plot.height() as f32 - 2.0 * pad) / row_h).floor() as usize).max(1);
    let shown = if series.len() > capacity { capacity.saturating_sub(1).max(1) } else { series.len() };
    let hidden = series.len() - shown;
    let overflow = (hidden > 0).then(|| format!("+{hidden} more"));

    let text_w = series[..shown]
        .iter()
        .map(|s| shaper.measure_width(&s.name, LEGEND_SIZE, false))
        .chain(overflow.iter().map(|o| shaper.measure_width(o, LEGEND_SIZE, false)))
        .fold(0.0_f32, f32::max);
    let rows = shown + usize::from(overflow.is_some());
    let box_w = pad * 3.0 + swatch + text_w;
    let box_h = pad * 2.0 + row_h * rows as f32;
    let right = plot.right as f32 - pad;
    let top = plot.top as f32 + pad;
    let left = right - box_w;
    let text_x = left + pad * 2.0 + swatch;

    let mut bg = skia::Paint::default();
    bg.set_anti_alias(true);
    bg.set_color(theme.legend_background);
    canvas.draw_rect(skia::Rect::from_ltrb(left, top, right, top + box_h), &bg);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    for (i, s) in series[..shown].iter().enumerate() {
        let cy = top + pad + row_h * (i as f32 + 0.5);
        stroke.set_color(theme.series_color(i));
        canvas.draw_line((left + pad, cy), (left + pad + swatch, cy), &stroke);
        shaper.draw(canvas, &s.name, text_x, cy + LEGEND_SIZE * 0.35, Anchor::Left, TextSpec::new(LEGEND_SIZE, theme.axis_label));
    }
    if let Some(note) = overflow {
        let cy = top + pad + row_h * (shown as f32 + 0.5);
        shaper.draw(canvas, &note, text_x, cy + LEGEND_SIZE * 0.35, Anchor::Left, TextSpec::new(LEGEND_SIZE, theme.tick));
    }
}

fn draw_line_series(canvas: &skia::Canvas, xs: &TimeScale, ys: &ValueScale, series: &Series, color: skia::Color) {
    let data = &series.data_xy;
    if data.is_empty() {
        return;
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_color(color);

    if data.len() == 1 {
        let (x, y) = data[0];
        stroke.set_style(skia::paint::Style::Fill);
        canvas.draw_circle((xs.to_px(x), ys.to_px(y)), 2.5, &stroke);
        return;
    }

    let mut path = skia::Path::new();
    let (x0, y0) = data[0];
    path.move_to((xs.to_px(x0), ys.to_px(y0)));
    for &(x, y) in data.iter().skip(1) {
        path.line_to((xs.to_px(x), ys.to_px(y)));
    }

    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(1.5);
    stroke.set_stroke_join(skia::paint::Join::Round);
    canvas.draw_path(&path, &stroke);
}
