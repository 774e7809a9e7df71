// File: crates/strata-core/src/surface.rs
// Summary: Drawing surface seam: a recording surface for layout passes/tests and a Skia raster surface.

use skia_safe as skia;

use crate::error::{ChartError, ChartResult};
use crate::geometry::{ImageSize, RectI32};
use crate::text::{TextMeasure, TextShaper};

/// Drawing calls a chart pass issues. Coordinates are whole pixels; text is
/// positioned by the left end of its baseline.
pub trait Surface: TextMeasure {
    fn fill_rect(&mut self, rect: RectI32, color: skia::Color);
    fn stroke_rect(&mut self, rect: RectI32, color: skia::Color);
    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: skia::Color);
    fn text(&mut self, text: &str, x: i32, baseline: i32, size: f32, color: skia::Color);
    /// Text rotated to read bottom-to-top; `(x, y)` is the baseline's bottom end.
    fn vertical_text(&mut self, text: &str, x: i32, y: i32, size: f32, color: skia::Color);
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, size: f32) -> i32 { (**self).text_width(text, size) }
    fn line_height(&self, size: f32) -> i32 { (**self).line_height(size) }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect { rect: RectI32, color: skia::Color },
    StrokeRect { rect: RectI32, color: skia::Color },
    Line { from: (i32, i32), to: (i32, i32), color: skia::Color },
    Text { text: String, x: i32, y: i32, size: f32, vertical: bool },
}

/// Surface that records calls instead of painting. Layout passes run on it,
/// and tests inspect what a pass would have drawn.
pub struct RecordingSurface<M: TextMeasure> {
    metrics: M,
    ops: Vec<DrawOp>,
}

impl<M: TextMeasure> RecordingSurface<M> {
    pub fn new(metrics: M) -> Self {
        Self { metrics, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] { &self.ops }

    pub fn clear(&mut self) { self.ops.clear(); }

    /// Horizontal text runs as `(text, x, baseline)`.
    pub fn texts(&self) -> impl Iterator<Item = (&str, i32, i32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, vertical: false, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }
}

impl<M: TextMeasure> TextMeasure for RecordingSurface<M> {
    fn text_width(&self, text: &str, size: f32) -> i32 { self.metrics.text_width(text, size) }
    fn line_height(&self, size: f32) -> i32 { self.metrics.line_height(size) }
}

impl<M: TextMeasure> Surface for RecordingSurface<M> {
    fn fill_rect(&mut self, rect: RectI32, color: skia::Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }
    fn stroke_rect(&mut self, rect: RectI32, color: skia::Color) {
        self.ops.push(DrawOp::StrokeRect { rect, color });
    }
    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: skia::Color) {
        self.ops.push(DrawOp::Line { from, to, color });
    }
    fn text(&mut self, text: &str, x: i32, baseline: i32, size: f32, _color: skia::Color) {
        self.ops.push(DrawOp::Text { text: text.to_string(), x, y: baseline, size, vertical: false });
    }
    fn vertical_text(&mut self, text: &str, x: i32, y: i32, size: f32, _color: skia::Color) {
        self.ops.push(DrawOp::Text { text: text.to_string(), x, y, size, vertical: true });
    }
}

/// Off-screen CPU raster backed by Skia.
pub struct RasterSurface<'a> {
    surface: skia::Surface,
    shaper: &'a TextShaper,
    size: ImageSize,
}

impl<'a> RasterSurface<'a> {
    /// Allocate a raster of `size`. Allocation failure maps to
    /// [`ChartError::OutOfResources`].
    pub fn new(size: ImageSize, shaper: &'a TextShaper) -> ChartResult<Self> {
        if size.width <= 0 || size.height <= 0 {
            return Err(ChartError::DegenerateGeometry(format!("canvas {}x{}", size.width, size.height)));
        }
        let surface = skia::surfaces::raster_n32_premul((size.width, size.height)).ok_or_else(|| {
            ChartError::OutOfResources(format!("failed to create {}x{} raster surface", size.width, size.height))
        })?;
        Ok(Self { surface, shaper, size })
    }

    pub fn size(&self) -> ImageSize { self.size }

    /// Copy out unpremultiplied RGBA8 pixels as `(pixels, width, height, stride)`.
    pub fn read_rgba8(&mut self) -> ChartResult<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = (self.size.width, self.size.height);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !self.surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(ChartError::Encode("failed to read raster pixels".into()));
        }
        Ok((px, w as u32, h as u32, stride))
    }

    fn stroke(color: skia::Color) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_color(color);
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(1.0);
        paint
    }
}

impl TextMeasure for RasterSurface<'_> {
    fn text_width(&self, text: &str, size: f32) -> i32 { self.shaper.text_width(text, size) }
    fn line_height(&self, size: f32) -> i32 { self.shaper.line_height(size) }
}

impl Surface for RasterSurface<'_> {
    fn fill_rect(&mut self, rect: RectI32, color: skia::Color) {
        let r = rect.sorted();
        let mut paint = skia::Paint::default();
        paint.set_color(color);
        paint.set_style(skia::paint::Style::Fill);
        let rect = skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32);
        self.surface.canvas().draw_rect(rect, &paint);
    }

    fn stroke_rect(&mut self, rect: RectI32, color: skia::Color) {
        let r = rect.sorted();
        // half-pixel offset keeps 1px strokes crisp
        let rect = skia::Rect::from_ltrb(
            r.left as f32 + 0.5,
            r.top as f32 + 0.5,
            r.right as f32 - 0.5,
            r.bottom as f32 - 0.5,
        );
        self.surface.canvas().draw_rect(rect, &Self::stroke(color));
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: skia::Color) {
        let a = (from.0 as f32 + 0.5, from.1 as f32 + 0.5);
        let b = (to.0 as f32 + 0.5, to.1 as f32 + 0.5);
        self.surface.canvas().draw_line(a, b, &Self::stroke(color));
    }

    fn text(&mut self, text: &str, x: i32, baseline: i32, size: f32, color: skia::Color) {
        let shaper = self.shaper;
        shaper.draw_left(self.surface.canvas(), text, x as f32, baseline as f32, size, color);
    }

    fn vertical_text(&mut self, text: &str, x: i32, y: i32, size: f32, color: skia::Color) {
        let shaper = self.shaper;
        shaper.draw_vertical(self.surface.canvas(), text, x as f32, y as f32, size, color);
    }
}
