// File: crates/strata-core/src/charts/scatter.rs
// Summary: Scatter plot with a least-squares regression line.

use rust_decimal::Decimal;

use crate::chart::{ChartStrategy, DrawContext};
use crate::config::ChartConfig;
use crate::decimal::Precision;
use crate::error::{ChartError, ChartResult};
use crate::extent::DataExtent;
use crate::geometry::RectI32;
use crate::legend::LegendEntry;
use crate::mapper::CoordinateMapper;

/// `y = intercept + slope · x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearFit {
    pub slope: Decimal,
    pub intercept: Decimal,
    /// Coefficient of determination; 1 when every `y` is equal.
    pub r_squared: Decimal,
}

impl LinearFit {
    /// Ordinary least squares. `Ok(None)` with fewer than two distinct `x`;
    /// [`ChartError::Overflow`] when the sums leave the decimal range.
    pub fn fit(points: &[(Decimal, Decimal)], precision: &Precision) -> ChartResult<Option<Self>> {
        if points.len() < 2 {
            return Ok(None);
        }
        Self::least_squares(points, precision).ok_or(ChartError::Overflow("regression sums"))
    }

    fn least_squares(points: &[(Decimal, Decimal)], precision: &Precision) -> Option<Option<Self>> {
        let n = Decimal::from(points.len() as u64);
        let (sum_x, sum_y) = points
            .iter()
            .try_fold((Decimal::ZERO, Decimal::ZERO), |(sx, sy), &(x, y)| Some((sx.checked_add(x)?, sy.checked_add(y)?)))?;
        let mean_x = precision.div(sum_x, n)?;
        let mean_y = precision.div(sum_y, n)?;
        let (mut sxx, mut sxy, mut syy) = (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        for &(x, y) in points {
            let (dx, dy) = (x.checked_sub(mean_x)?, y.checked_sub(mean_y)?);
            sxx = sxx.checked_add(dx.checked_mul(dx)?)?;
            sxy = sxy.checked_add(dx.checked_mul(dy)?)?;
            syy = syy.checked_add(dy.checked_mul(dy)?)?;
        }
        let Some(slope) = precision.div(sxy, sxx) else {
            return Some(None);
        };
        let intercept = precision.calc(mean_y.checked_sub(slope.checked_mul(mean_x)?)?);
        // r² as (sxy / sxx) · (sxy / syy), never forming sxy²
        let r_squared = match precision.div(sxy, syy) {
            Some(q) => precision.calc(slope.checked_mul(q)?),
            None => Decimal::ONE,
        };
        Some(Some(Self { slope, intercept, r_squared }))
    }

    /// Fitted `y` at `x`.
    pub fn at(&self, x: Decimal) -> ChartResult<Decimal> {
        self.slope
            .checked_mul(x)
            .and_then(|v| v.checked_add(self.intercept))
            .ok_or(ChartError::Overflow("regression line"))
    }

    /// Display form such as `y = 1.5x + 2`.
    pub fn equation(&self, precision: &Precision) -> String {
        let slope = precision.label(self.slope);
        let b = precision.label(self.intercept.abs());
        let sign = if self.intercept.is_sign_negative() && b != "0" { '-' } else { '+' };
        format!("y = {slope}x {sign} {b}")
    }
}

#[derive(Clone, Debug)]
pub struct ScatterPlot {
    points: Vec<(Decimal, Decimal)>,
    pub draw_regression: bool,
}

impl ScatterPlot {
    pub fn new(points: Vec<(Decimal, Decimal)>) -> ChartResult<Self> {
        if points.is_empty() {
            return Err(ChartError::EmptyData("scatter plot needs at least one point"));
        }
        Ok(Self { points, draw_regression: true })
    }

    pub fn points(&self) -> &[(Decimal, Decimal)] {
        &self.points
    }

    pub fn fit(&self, precision: &Precision) -> ChartResult<Option<LinearFit>> {
        if !self.draw_regression {
            return Ok(None);
        }
        LinearFit::fit(&self.points, precision)
    }
}

impl ChartStrategy for ScatterPlot {
    fn kind(&self) -> &'static str {
        "scatter"
    }

    /// Point extent, widened on Y so the regression line stays inside.
    fn extent(&self, config: &ChartConfig) -> ChartResult<DataExtent> {
        let mut e = DataExtent::from_points(self.points.iter().copied())?;
        if let Some(fit) = self.fit(&config.precision)? {
            e.include_y(fit.at(e.min_x)?);
            e.include_y(fit.at(e.max_x)?);
        }
        Ok(e)
    }

    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32> {
        mapper.zero_crossing_col()
    }

    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let theme = ctx.config.theme;
        for &(x, y) in &self.points {
            let (c, r) = (ctx.mapper.value_to_col(x)?, ctx.mapper.value_to_row(y)?);
            ctx.surface.fill_rect(RectI32::from_ltwh(c - 1, r - 1, 3, 3), theme.point);
        }
        if let Some(fit) = self.fit(&ctx.config.precision)? {
            let (x0, x1) = (ctx.extent.min_x, ctx.extent.max_x);
            let a = (ctx.mapper.value_to_col(x0)?, ctx.mapper.value_to_row(fit.at(x0)?)?);
            let b = (ctx.mapper.value_to_col(x1)?, ctx.mapper.value_to_row(fit.at(x1)?)?);
            ctx.surface.line(a, b, theme.regression);
        }
        Ok(())
    }

    fn legend_entries(&self, config: &ChartConfig) -> Vec<LegendEntry> {
        let theme = &config.theme;
        let mut entries = vec![LegendEntry::new("Data", theme.point)];
        // an overflowing fit already failed in extent()
        if let Ok(Some(fit)) = self.fit(&config.precision) {
            entries.push(LegendEntry::new(fit.equation(&config.precision), theme.regression));
        }
        entries
    }
}
