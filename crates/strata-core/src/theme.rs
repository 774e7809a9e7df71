// File: crates/strata-core/src/theme.rs
// Summary: Light/Dark theming for chart outline, axes and data marks.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub border: skia::Color,
    pub title: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub zero_line: skia::Color,
    pub bar_fill: skia::Color,
    pub bar_edge: skia::Color,
    pub male: skia::Color,
    pub female: skia::Color,
    pub box_fill: skia::Color,
    pub whisker: skia::Color,
    pub median: skia::Color,
    pub point: skia::Color,
    pub regression: skia::Color,
    /// Cycled for multi-series charts.
    pub palette: [skia::Color; 6],
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            border: skia::Color::from_argb(255, 200, 200, 205),
            title: skia::Color::from_argb(255, 20, 20, 30),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            zero_line: skia::Color::from_argb(255, 170, 170, 180),
            bar_fill: skia::Color::from_argb(255, 40, 120, 200),
            bar_edge: skia::Color::from_argb(255, 20, 70, 130),
            male: skia::Color::from_argb(255, 32, 120, 200),
            female: skia::Color::from_argb(255, 200, 60, 90),
            box_fill: skia::Color::from_argb(255, 190, 215, 240),
            whisker: skia::Color::from_argb(255, 50, 50, 60),
            median: skia::Color::from_argb(255, 200, 60, 60),
            point: skia::Color::from_argb(255, 32, 120, 200),
            regression: skia::Color::from_argb(255, 200, 60, 60),
            palette: [
                skia::Color::from_argb(255, 32, 120, 200),
                skia::Color::from_argb(255, 200, 60, 60),
                skia::Color::from_argb(255, 20, 160, 90),
                skia::Color::from_argb(255, 230, 140, 20),
                skia::Color::from_argb(255, 130, 70, 180),
                skia::Color::from_argb(255, 90, 90, 90),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            border: skia::Color::from_argb(255, 40, 40, 45),
            title: skia::Color::from_argb(255, 235, 235, 245),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            zero_line: skia::Color::from_argb(255, 70, 70, 80),
            bar_fill: skia::Color::from_argb(255, 96, 156, 255),
            bar_edge: skia::Color::from_argb(255, 64, 110, 200),
            male: skia::Color::from_argb(255, 64, 160, 255),
            female: skia::Color::from_argb(255, 240, 100, 130),
            box_fill: skia::Color::from_argb(255, 40, 70, 110),
            whisker: skia::Color::from_argb(255, 200, 200, 210),
            median: skia::Color::from_argb(255, 255, 230, 70),
            point: skia::Color::from_argb(255, 64, 160, 255),
            regression: skia::Color::from_argb(255, 255, 230, 70),
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 220, 80, 80),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 255, 180, 60),
                skia::Color::from_argb(255, 180, 120, 255),
                skia::Color::from_argb(255, 200, 200, 200),
            ],
        }
    }

    pub fn high_contrast() -> Self {
        let black = skia::Color::from_argb(255, 0x00, 0x00, 0x00);
        Self {
            name: "high-contrast",
            background: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            border: black,
            title: black,
            axis_line: black,
            axis_label: black,
            tick: black,
            zero_line: skia::Color::from_argb(255, 0x88, 0x88, 0x88),
            bar_fill: skia::Color::from_argb(255, 0x00, 0x00, 0xcc),
            bar_edge: black,
            male: skia::Color::from_argb(255, 0x00, 0x00, 0xcc),
            female: skia::Color::from_argb(255, 0xcc, 0x00, 0x00),
            box_fill: skia::Color::from_argb(255, 0xdd, 0xdd, 0xdd),
            whisker: black,
            median: skia::Color::from_argb(255, 0xcc, 0x00, 0x00),
            point: black,
            regression: skia::Color::from_argb(255, 0xcc, 0x00, 0x00),
            palette: [
                black,
                skia::Color::from_argb(255, 0xcc, 0x00, 0x00),
                skia::Color::from_argb(255, 0x00, 0x00, 0xcc),
                skia::Color::from_argb(255, 0x00, 0x88, 0x00),
                skia::Color::from_argb(255, 0xaa, 0x55, 0x00),
                skia::Color::from_argb(255, 0x66, 0x00, 0x99),
            ],
        }
    }

    /// Palette colour for series `i`, cycling.
    pub fn series_color(&self, i: usize) -> skia::Color {
        self.palette[i % self.palette.len()]
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::high_contrast()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
