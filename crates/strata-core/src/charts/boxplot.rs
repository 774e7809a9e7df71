// File: crates/strata-core/src/charts/boxplot.rs
// Summary: Box-and-whisker plot per category with Tukey whiskers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::axis::AxisTick;
use crate::chart::{ChartStrategy, DrawContext};
use crate::config::ChartConfig;
use crate::decimal::Precision;
use crate::error::{ChartError, ChartResult};
use crate::extent::DataExtent;
use crate::geometry::RectI32;
use crate::mapper::CoordinateMapper;

/// Five-number summary plus the samples outside the whiskers.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSummary {
    pub min: Decimal,
    pub q1: Decimal,
    pub median: Decimal,
    pub q3: Decimal,
    pub max: Decimal,
    /// Lowest sample within `q1 - 1.5 × IQR`.
    pub whisker_low: Decimal,
    /// Highest sample within `q3 + 1.5 × IQR`.
    pub whisker_high: Decimal,
    pub outliers: Vec<Decimal>,
}

impl BoxSummary {
    /// `None` for an empty sample.
    pub fn from_samples(samples: &[Decimal], precision: &Precision) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut vals = samples.to_vec();
        vals.sort();
        let q1 = quantile(&vals, Decimal::new(25, 2), precision);
        let median = quantile(&vals, Decimal::new(50, 2), precision);
        let q3 = quantile(&vals, Decimal::new(75, 2), precision);
        let fence = (q3 - q1) * Decimal::new(15, 1);
        let (lo_fence, hi_fence) = (q1 - fence, q3 + fence);
        let whisker_low = vals.iter().copied().find(|v| *v >= lo_fence).unwrap_or(vals[0]);
        let whisker_high = vals.iter().rev().copied().find(|v| *v <= hi_fence).unwrap_or(vals[vals.len() - 1]);
        let outliers = vals.iter().copied().filter(|v| *v < whisker_low || *v > whisker_high).collect();
        Some(Self {
            min: vals[0],
            q1,
            median,
            q3,
            max: vals[vals.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Linear interpolation between closest ranks over sorted `vals`.
fn quantile(vals: &[Decimal], p: Decimal, precision: &Precision) -> Decimal {
    if vals.len() == 1 {
        return vals[0];
    }
    let idx = Decimal::from(vals.len() as u64 - 1) * p;
    let lo = idx.floor();
    let i0 = lo.to_usize().unwrap_or(0).min(vals.len() - 1);
    let i1 = (i0 + 1).min(vals.len() - 1);
    let t = idx - lo;
    precision.calc(vals[i0] + (vals[i1] - vals[i0]) * t)
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxCategory {
    pub name: String,
    pub samples: Vec<Decimal>,
}

impl BoxCategory {
    pub fn new(name: impl Into<String>, samples: Vec<Decimal>) -> Self {
        Self { name: name.into(), samples }
    }
}

#[derive(Clone, Debug)]
pub struct BoxPlot {
    categories: Vec<BoxCategory>,
}

impl BoxPlot {
    pub fn new(categories: Vec<BoxCategory>) -> ChartResult<Self> {
        if categories.iter().all(|c| c.samples.is_empty()) {
            return Err(ChartError::EmptyData("box plot needs at least one sample"));
        }
        Ok(Self { categories })
    }

    pub fn summaries(&self, precision: &Precision) -> Vec<Option<BoxSummary>> {
        self.categories.iter().map(|c| BoxSummary::from_samples(&c.samples, precision)).collect()
    }

    fn band_center(i: usize) -> Decimal {
        Decimal::from(i as u64) + Decimal::new(5, 1)
    }
}

impl ChartStrategy for BoxPlot {
    fn kind(&self) -> &'static str {
        "box"
    }

    fn extent(&self, _config: &ChartConfig) -> ChartResult<DataExtent> {
        let n = Decimal::from(self.categories.len() as u64);
        let mut ys = self.categories.iter().flat_map(|c| c.samples.iter().copied());
        let first = ys.next().ok_or(ChartError::EmptyData("box plot needs at least one sample"))?;
        let (min_y, max_y) = ys.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        DataExtent::new(Decimal::ZERO, n, min_y, max_y)
    }

    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32> {
        Ok(mapper.rect().start_col)
    }

    fn x_ticks(&self, _ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> {
        Ok(self
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| AxisTick::new(Self::band_center(i), c.name.clone()))
            .collect())
    }

    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let theme = ctx.config.theme;
        let mapper = ctx.mapper;
        let band = mapper.x_len_px(Decimal::ONE)?;
        let half = (band / 4).max(2);
        for (i, summary) in self.summaries(&ctx.config.precision).into_iter().enumerate() {
            let Some(s) = summary else { continue };
            let col = mapper.value_to_col(Self::band_center(i))?;
            let row = |v: Decimal| mapper.value_to_row(v);
            let (lo, q1, med, q3, hi) = (row(s.whisker_low)?, row(s.q1)?, row(s.median)?, row(s.q3)?, row(s.whisker_high)?);

            ctx.surface.line((col, hi), (col, q3), theme.whisker);
            ctx.surface.line((col, q1), (col, lo), theme.whisker);
            ctx.surface.line((col - half / 2, hi), (col + half / 2, hi), theme.whisker);
            ctx.surface.line((col - half / 2, lo), (col + half / 2, lo), theme.whisker);

            let body = RectI32::from_ltrb(col - half, q3, col + half, q1).sorted();
            ctx.surface.fill_rect(body, theme.box_fill);
            ctx.surface.stroke_rect(body, theme.whisker);
            ctx.surface.line((col - half, med), (col + half, med), theme.median);

            for v in &s.outliers {
                let r = mapper.value_to_row(*v)?;
                ctx.surface.stroke_rect(RectI32::from_ltwh(col - 2, r - 2, 4, 4), theme.whisker);
            }
        }
        Ok(())
    }
}
