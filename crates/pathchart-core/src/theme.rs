// File: crates/pathchart-core/src/theme.rs
// Summary: Light/Dark theming and the per-series colour cycle.

use skia_safe as skia;

/// Colour cycle applied to series in table order (tab10).
const TAB10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

/// Brighter cycle for dark backgrounds.
const SOLARIZED_ACCENTS: [(u8, u8, u8); 8] = [
    (0x26, 0x8b, 0xd2),
    (0xcb, 0x4b, 0x16),
    (0x85, 0x99, 0x00),
    (0xdc, 0x32, 0x2f),
    (0x6c, 0x71, 0xc4),
    (0xb5, 0x89, 0x00),
    (0xd3, 0x36, 0x82),
    (0x2a, 0xa1, 0x98),
];

#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub legend_background: skia::Color,
    pub palette: Vec<skia::Color>,
}

fn rgb_cycle(colors: &[(u8, u8, u8)]) -> Vec<skia::Color> {
    colors.iter().map(|&(r, g, b)| skia::Color::from_rgb(r, g, b)).collect()
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 245, 245, 250),
            legend_background: skia::Color::from_argb(200, 28, 28, 32),
            palette: rgb_cycle(&TAB10),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            title: skia::Color::from_argb(255, 10, 10, 20),
            legend_background: skia::Color::from_argb(220, 255, 255, 255),
            palette: rgb_cycle(&TAB10),
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            grid: skia::Color::from_argb(255, 0x07, 0x36, 0x42),       // base02
            axis_line: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),  // base1
            axis_label: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5), // base2
            tick: skia::Color::from_argb(255, 0x83, 0x94, 0x96),       // base0
            title: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3),      // base3
            legend_background: skia::Color::from_argb(210, 0x07, 0x36, 0x42),
            palette: rgb_cycle(&SOLARIZED_ACCENTS),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3), // base3
            grid: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),       // base2
            axis_line: skia::Color::from_argb(255, 0x65, 0x7b, 0x83),  // base00
            axis_label: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            tick: skia::Color::from_argb(255, 0x58, 0x6e, 0x75),       // base01
            title: skia::Color::from_argb(255, 0x00, 0x2b, 0x36),
            legend_background: skia::Color::from_argb(220, 0xee, 0xe8, 0xd5),
            palette: rgb_cycle(&SOLARIZED_ACCENTS),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            title: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            legend_background: skia::Color::from_argb(230, 0x00, 0x00, 0x00),
            palette: rgb_cycle(&[
                (0x00, 0xff, 0xff),
                (0xff, 0xff, 0x00),
                (0x00, 0xff, 0x00),
                (0xff, 0x40, 0x40),
                (0xff, 0x80, 0xff),
                (0xff, 0xff, 0xff),
            ]),
        }
    }

    /// Colour of the `index`-th series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> skia::Color {
        if self.palette.is_empty() {
            return self.axis_line;
        }
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// CSS `#rrggbb` notation, alpha dropped.
pub fn css_hex(color: skia::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::light(),
        Theme::dark(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name` (case-insensitive).
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
