// File: crates/pathchart-core/src/geometry.rs
// Summary: Pixel geometry for the chart layout (margins and plot rectangle).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Screen margins around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Plot rectangle for a `width` x `height` surface. Degenerate sizes
    /// collapse to a one pixel rectangle instead of inverting.
    pub fn plot_rect(&self, width: i32, height: i32) -> RectI32 {
        let left = self.left as i32;
        let top = self.top as i32;
        let right = (width - self.right as i32).max(left + 1);
        let bottom = (height - self.bottom as i32).max(top + 1);
        RectI32::from_ltrb(left, top, right, bottom)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(80, 24, 48, 64)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}
