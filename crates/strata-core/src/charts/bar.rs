// File: crates/strata-core/src/charts/bar.rs
// Summary: Bar chart over labelled intervals, bars rising from a zero baseline.

use rust_decimal::Decimal;

use crate::axis::AxisTick;
use crate::chart::{ChartStrategy, DrawContext};
use crate::config::ChartConfig;
use crate::decimal::Precision;
use crate::error::{ChartError, ChartResult};
use crate::extent::DataExtent;
use crate::geometry::RectI32;
use crate::legend::LegendEntry;
use crate::mapper::CoordinateMapper;

/// Count observed over `[lower, upper)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BarInterval {
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: Decimal,
}

impl BarInterval {
    pub fn new(lower: Decimal, upper: Decimal, count: Decimal) -> ChartResult<Self> {
        if lower >= upper {
            return Err(ChartError::InvalidExtent(format!("interval [{lower}, {upper}) is empty")));
        }
        Ok(Self { lower, upper, count })
    }

    pub fn width(&self) -> Decimal {
        self.upper - self.lower
    }
}

#[derive(Clone, Debug)]
pub struct BarChart {
    intervals: Vec<BarInterval>,
    /// Legend caption; no legend when `None`.
    pub series_name: Option<String>,
}

impl BarChart {
    pub fn new(intervals: Vec<BarInterval>) -> ChartResult<Self> {
        if intervals.is_empty() {
            return Err(ChartError::EmptyData("bar chart needs at least one interval"));
        }
        Ok(Self { intervals, series_name: None })
    }

    /// Consecutive equal-width intervals starting at `start`.
    pub fn from_counts(start: Decimal, width: Decimal, counts: &[Decimal]) -> ChartResult<Self> {
        let intervals = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let lower = start + width * Decimal::from(i as u64);
                BarInterval::new(lower, lower + width, count)
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(intervals)
    }

    pub fn with_series_name(mut self, name: impl Into<String>) -> Self {
        self.series_name = Some(name.into());
        self
    }

    pub fn intervals(&self) -> &[BarInterval] {
        &self.intervals
    }
}

/// Pixel width of a bar: the interval's pixel span less `gap` on each side,
/// never narrower than one pixel.
pub fn bar_width_px(interval_width: Decimal, cell_width: Decimal, gap: i32, precision: &Precision) -> i32 {
    let span = match precision.div(interval_width, cell_width) {
        Some(cells) => precision.to_px(cells),
        None => 0,
    };
    (span - 2 * gap).max(1)
}

impl ChartStrategy for BarChart {
    fn kind(&self) -> &'static str {
        "bar"
    }

    fn extent(&self, _config: &ChartConfig) -> ChartResult<DataExtent> {
        let mut e = DataExtent::from_points(self.intervals.iter().map(|iv| (iv.lower, iv.count)))?;
        for iv in &self.intervals {
            e.include_x(iv.upper);
        }
        e.include_y(Decimal::ZERO);
        Ok(e)
    }

    fn default_y_pin(&self) -> Option<Decimal> {
        Some(Decimal::ZERO)
    }

    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32> {
        Ok(mapper.rect().start_col)
    }

    fn x_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> {
        if ctx.x_axis.increment.is_some() {
            return crate::axis::numeric_ticks(ctx, ctx.extent.min_x, ctx.extent.max_x, &ctx.x_axis);
        }
        let mut bounds: Vec<Decimal> = self.intervals.iter().flat_map(|iv| [iv.lower, iv.upper]).collect();
        bounds.sort();
        bounds.dedup();
        let precision = &ctx.config.precision;
        Ok(bounds.into_iter().map(|v| AxisTick::new(v, precision.label(v))).collect())
    }

    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let cfg = ctx.config;
        let theme = &cfg.theme;
        let Some(cell) = ctx.mapper.cell().copied() else {
            return Err(ChartError::InvalidExtent("no extent configured".into()));
        };
        let base = ctx.origin.row;
        for iv in &self.intervals {
            let left = ctx.mapper.value_to_col(iv.lower)? + cfg.bar_gap;
            let width = bar_width_px(iv.width(), cell.cell_width, cfg.bar_gap, &cfg.precision);
            let top = ctx.mapper.value_to_row(iv.count)?;
            let bar = RectI32::from_ltrb(left, top, left + width, base).sorted();
            if bar.height() == 0 {
                continue;
            }
            ctx.surface.fill_rect(bar, theme.bar_fill);
            ctx.surface.stroke_rect(bar, theme.bar_edge);
        }
        Ok(())
    }

    fn legend_entries(&self, config: &ChartConfig) -> Vec<LegendEntry> {
        self.series_name.iter().map(|n| LegendEntry::new(n.clone(), config.theme.bar_fill)).collect()
    }
}
