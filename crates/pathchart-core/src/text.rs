// File: crates/pathchart-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout, scoped to one render call.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

const BASELINE_RATIO: f32 = 0.8;

/// Horizontal anchor of a drawn line of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// Size, colour and family class of a run of text.
#[derive(Clone, Copy, Debug)]
pub struct TextSpec {
    pub size: f32,
    pub color: skia::Color,
    /// Prefer tabular digits (tick labels).
    pub mono_numeric: bool,
}

impl TextSpec {
    pub fn new(size: f32, color: skia::Color) -> Self {
        Self { size, color, mono_numeric: false }
    }

    pub fn numeric(size: f32, color: skia::Color) -> Self {
        Self { size, color, mono_numeric: true }
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, mono_numeric: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        if mono_numeric {
            ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        } else {
            ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, mono_numeric: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color, mono_numeric);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, mono_numeric: bool) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT, mono_numeric).longest_line()
    }

    /// Draw a single line with its baseline at `y`; `anchor` picks which
    /// edge (or the centre) lands on `x`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, anchor: Anchor, style: TextSpec) {
        let p = self.layout(text, style.size, style.color, style.mono_numeric);
        let w = p.longest_line();
        let left = match anchor {
            Anchor::Left => x,
            Anchor::Center => x - w * 0.5,
            Anchor::Right => x - w,
        };
        // paragraphs paint from their top-left corner
        p.paint(canvas, (left, y - style.size * BASELINE_RATIO));
    }

    /// Draw rotated 90 degrees counter-clockwise, centred on (`x`, `cy`).
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, x: f32, cy: f32, style: TextSpec) {
        canvas.save();
        canvas.rotate(-90.0, Some(skia::Point::new(x, cy)));
        self.draw(canvas, text, x, cy, Anchor::Center, style);
        canvas.restore();
    }
}
