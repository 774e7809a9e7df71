// File: crates/strata-core/src/legend.rs
// Summary: Single-row legend block drawn under the X axis band.

use skia_safe as skia;

use crate::geometry::RectI32;
use crate::surface::Surface;

const PADDING: i32 = 6;
const SWATCH_GAP: i32 = 4;
const ENTRY_SPACING: i32 = 14;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: skia::Color,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: skia::Color) -> Self {
        Self { label: label.into(), color }
    }
}

/// Pixel size of the legend block, padding included.
pub fn measure(surface: &dyn Surface, entries: &[LegendEntry], size: f32) -> (i32, i32) {
    if entries.is_empty() {
        return (0, 0);
    }
    let lh = surface.line_height(size);
    let swatch = swatch_px(lh);
    let content: i32 = entries.iter().map(|e| swatch + SWATCH_GAP + surface.text_width(&e.label, size)).sum();
    let spacing = ENTRY_SPACING * (entries.len() as i32 - 1);
    (content + spacing + 2 * PADDING, lh + 2 * PADDING)
}

/// Draw entries left to right, centred in `image_width`, starting at `top`.
pub fn draw(
    surface: &mut dyn Surface,
    entries: &[LegendEntry],
    top: i32,
    image_width: i32,
    size: f32,
    text_color: skia::Color,
    draw_text: bool,
) {
    let (width, _) = measure(surface, entries, size);
    let lh = surface.line_height(size);
    let swatch = swatch_px(lh);
    let mut x = (image_width - width) / 2 + PADDING;
    let row = top + PADDING;
    for entry in entries {
        let sw = RectI32::from_ltwh(x, row + (lh - swatch) / 2, swatch, swatch);
        surface.fill_rect(sw, entry.color);
        x += swatch + SWATCH_GAP;
        if draw_text {
            surface.text(&entry.label, x, row + lh - lh / 5, size, text_color);
        }
        x += surface.text_width(&entry.label, size) + ENTRY_SPACING;
    }
}

fn swatch_px(line_height: i32) -> i32 {
    (line_height * 4 / 5).max(4)
}
