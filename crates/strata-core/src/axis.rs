// File: crates/strata-core/src/axis.rs
// Summary: Shared axis renderer: tick marks, decluttered labels and axis titles, reporting the space used.

use rust_decimal::Decimal;

use crate::chart::DrawContext;
use crate::config::AxisConfig;
use crate::error::ChartResult;
use crate::ticks::{self, RowDeclutter, SpanDeclutter};

/// A tick at data value `value` carrying `label`.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: Decimal,
    pub label: String,
}

impl AxisTick {
    pub fn new(value: Decimal, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }
}

/// Space an axis needs outside the data rectangle.
///
/// `thickness` is the band perpendicular to the axis (Y: width left of the
/// data, X: height below it). Overflows are label pixels that stick out past
/// the data rectangle's ends along the axis (Y: above the top row, X: past
/// the right column).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisExtent {
    pub thickness: i32,
    pub overflow_before: i32,
    pub overflow_after: i32,
}

/// Numeric ticks over `[min, max]` labelled with display precision.
pub fn numeric_ticks(ctx: &DrawContext<'_>, min: Decimal, max: Decimal, axis: &AxisConfig) -> ChartResult<Vec<AxisTick>> {
    let precision = &ctx.config.precision;
    let inc = ticks::increment(min, max, ctx.config.tick_count, axis.increment, precision);
    let pin = ticks::resolve_pin(min, max, axis.pin);
    let values = ticks::numeric_ticks(min, max, inc, pin)?;
    Ok(values.into_iter().map(|v| AxisTick::new(v, precision.label(v))).collect())
}

/// Draw the Y axis left of the data rectangle.
///
/// Ticks are visited in order; a label whose row bucket is already claimed
/// is skipped along with its tick mark.
pub fn draw_y_axis(ctx: &mut DrawContext<'_>, ticks: &[AxisTick]) -> ChartResult<AxisExtent> {
    let cfg = ctx.config;
    let theme = &cfg.theme;
    let rect = *ctx.mapper.rect();
    let size = cfg.fonts.tick;
    let lh = ctx.surface.line_height(size);
    let axis_col = rect.start_col - 1;

    ctx.surface.line((axis_col, rect.start_row), (axis_col, rect.end_row), theme.axis_line);

    let mut declutter = RowDeclutter::new(lh, cfg.declutter_factor);
    let mut widest = 0;
    let mut overflow_top = 0;
    for tick in ticks {
        let row = ctx.mapper.value_to_row(tick.value)?;
        if !declutter.admit(row - rect.start_row) {
            tracing::trace!(label = %tick.label, row, "y tick suppressed");
            continue;
        }
        let w = ctx.surface.text_width(&tick.label, size);
        widest = widest.max(w);
        // label is vertically centred on the tick row
        let baseline = row + lh / 2 - lh / 5;
        overflow_top = overflow_top.max(rect.start_row - (row - lh / 2));
        ctx.surface.line((axis_col - cfg.tick_len, row), (axis_col, row), theme.tick);
        if cfg.draw_text {
            let x = axis_col - cfg.tick_len - cfg.label_gap - w;
            ctx.surface.text(&tick.label, x, baseline, size, theme.axis_label);
        }
    }

    let mut thickness = 1 + cfg.tick_len + cfg.label_gap + widest + cfg.label_gap;
    if !cfg.y_label.is_empty() {
        let label_lh = ctx.surface.line_height(cfg.fonts.axis_label);
        let label_w = ctx.surface.text_width(&cfg.y_label, cfg.fonts.axis_label);
        let x = rect.start_col - thickness - label_lh / 5;
        let y = rect.start_row + (rect.height + label_w) / 2;
        if cfg.draw_text {
            ctx.surface.vertical_text(&cfg.y_label, x, y, cfg.fonts.axis_label, theme.axis_label);
        }
        thickness += label_lh + cfg.label_gap;
        overflow_top = overflow_top.max((label_w - rect.height) / 2);
    }

    Ok(AxisExtent { thickness, overflow_before: overflow_top.max(0), overflow_after: 0 })
}

/// Draw the X axis below the data rectangle, skipping labels that would
/// overlap an already drawn one.
pub fn draw_x_axis(ctx: &mut DrawContext<'_>, ticks: &[AxisTick]) -> ChartResult<AxisExtent> {
    let cfg = ctx.config;
    let theme = &cfg.theme;
    let rect = *ctx.mapper.rect();
    let size = cfg.fonts.tick;
    let lh = ctx.surface.line_height(size);
    let axis_row = rect.end_row + 1;

    ctx.surface.line((rect.start_col, axis_row), (rect.end_col, axis_row), theme.axis_line);

    let mut declutter = SpanDeclutter::new(cfg.label_gap);
    let mut overflow_left = 0;
    let mut overflow_right = 0;
    let baseline = axis_row + cfg.tick_len + cfg.label_gap + lh - lh / 5;
    for tick in ticks {
        let col = ctx.mapper.value_to_col(tick.value)?;
        let w = ctx.surface.text_width(&tick.label, size);
        let left = col - w / 2;
        if !declutter.admit(left, left + w) {
            tracing::trace!(label = %tick.label, col, "x tick suppressed");
            continue;
        }
        overflow_left = overflow_left.max(rect.start_col - left);
        overflow_right = overflow_right.max(left + w - rect.end_col);
        ctx.surface.line((col, axis_row), (col, axis_row + cfg.tick_len), theme.tick);
        if cfg.draw_text {
            ctx.surface.text(&tick.label, left, baseline, size, theme.axis_label);
        }
    }

    let mut thickness = 1 + cfg.tick_len + cfg.label_gap + lh + cfg.label_gap;
    if !cfg.x_label.is_empty() {
        let label_lh = ctx.surface.line_height(cfg.fonts.axis_label);
        let label_w = ctx.surface.text_width(&cfg.x_label, cfg.fonts.axis_label);
        let x = rect.start_col + (rect.width - label_w) / 2;
        let y = rect.end_row + thickness + label_lh - label_lh / 5;
        if cfg.draw_text {
            ctx.surface.text(&cfg.x_label, x, y, cfg.fonts.axis_label, theme.axis_label);
        }
        thickness += label_lh + cfg.label_gap;
        overflow_right = overflow_right.max((label_w - rect.width) / 2);
    }

    Ok(AxisExtent { thickness, overflow_before: overflow_left.max(0), overflow_after: overflow_right.max(0) })
}
