// File: crates/strata-core/src/text.rs
// Summary: Text measurement seam plus the Skia textlayout shaper used for real rendering.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Text metrics the layout engine needs. Sizes are font sizes in pixels.
pub trait TextMeasure {
    fn text_width(&self, text: &str, size: f32) -> i32;
    fn line_height(&self, size: f32) -> i32;
}

/// Deterministic metrics: every glyph is `advance × size` wide.
///
/// Used for layout tests and anywhere font availability must not matter.
#[derive(Clone, Copy, Debug)]
pub struct MonoMetrics {
    pub advance: f32,
    pub leading: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        Self { advance: 0.6, leading: 1.25 }
    }
}

impl TextMeasure for MonoMetrics {
    fn text_width(&self, text: &str, size: f32) -> i32 {
        (text.chars().count() as f32 * size * self.advance).ceil() as i32
    }

    fn line_height(&self, size: f32) -> i32 {
        (size * self.leading).ceil() as i32
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
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint with `(x, y)` as the left end of the baseline.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Paint rotated 90° counter-clockwise, reading bottom to top, with
    /// `(x, y)` as the bottom end of the baseline.
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        canvas.save();
        canvas.rotate(-90.0, Some(skia::Point::new(x, y)));
        self.draw_left(canvas, text, x, y, size, color);
        canvas.restore();
    }
}

impl TextMeasure for TextShaper {
    fn text_width(&self, text: &str, size: f32) -> i32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        // width of the longest line
        p.longest_line().ceil() as i32
    }

    fn line_height(&self, size: f32) -> i32 {
        let p = self.layout("Ag", size, skia::Color::from_argb(0, 0, 0, 0));
        p.height().ceil() as i32
    }
}
