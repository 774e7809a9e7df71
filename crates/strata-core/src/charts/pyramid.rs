// File: crates/strata-core/src/charts/pyramid.rs
// Summary: Age/gender population pyramid: male bars left of a centred origin, female right.

use rust_decimal::Decimal;

use crate::axis::{self, AxisTick};
use crate::chart::{ChartStrategy, DrawContext};
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::extent::DataExtent;
use crate::geometry::RectI32;
use crate::legend::LegendEntry;
use crate::mapper::CoordinateMapper;

/// Population of one single-year age.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeCount {
    pub age: u32,
    pub male: Decimal,
    pub female: Decimal,
}

impl AgeCount {
    pub fn new(age: u32, male: Decimal, female: Decimal) -> Self {
        Self { age, male, female }
    }
}

/// Summed counts over an age band, e.g. `"0-4"` or `"85+"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgeBand {
    pub label: String,
    pub lower: u32,
    /// Inclusive; `None` for the open top band.
    pub upper: Option<u32>,
    pub male: Decimal,
    pub female: Decimal,
}

impl AgeBand {
    fn peak(&self) -> Decimal {
        self.male.max(self.female)
    }
}

/// Oldest single-year age a pyramid accepts.
pub const MAX_AGE: u32 = 150;

#[derive(Clone, Debug)]
pub struct PopulationPyramid {
    ages: Vec<AgeCount>,
    /// Ages at or above this fold into one `"N+"` band.
    pub open_age: Option<u32>,
}

impl PopulationPyramid {
    pub fn new(mut ages: Vec<AgeCount>) -> ChartResult<Self> {
        if ages.is_empty() {
            return Err(ChartError::EmptyData("pyramid needs at least one age"));
        }
        if let Some(bad) = ages.iter().find(|a| a.age > MAX_AGE) {
            return Err(ChartError::InvalidExtent(format!("age {} is above {MAX_AGE}", bad.age)));
        }
        ages.sort_by_key(|a| a.age);
        Ok(Self { ages, open_age: None })
    }

    pub fn with_open_age(mut self, age: u32) -> ChartResult<Self> {
        if age > MAX_AGE {
            return Err(ChartError::InvalidExtent(format!("open age {age} is above {MAX_AGE}")));
        }
        self.open_age = Some(age);
        Ok(self)
    }

    pub fn ages(&self) -> &[AgeCount] {
        &self.ages
    }

    /// Group single-year counts into bands `interval` years wide, youngest first.
    /// An interval of zero is treated as one.
    pub fn bands(&self, interval: u32) -> Vec<AgeBand> {
        let interval = interval.max(1);
        let oldest = self.ages.last().map_or(0, |a| a.age);
        let closed_limit = match self.open_age {
            Some(open) => open,
            None => oldest.saturating_add(1),
        };
        let mut bands = Vec::new();
        let mut lower = 0;
        while lower < closed_limit {
            let upper = lower.saturating_add(interval - 1).min(closed_limit - 1);
            let label = if upper == lower { lower.to_string() } else { format!("{lower}-{upper}") };
            bands.push(AgeBand { label, lower, upper: Some(upper), male: Decimal::ZERO, female: Decimal::ZERO });
            lower = lower.saturating_add(interval);
        }
        if let Some(open) = self.open_age {
            bands.push(AgeBand {
                label: format!("{open}+"),
                lower: open,
                upper: None,
                male: Decimal::ZERO,
                female: Decimal::ZERO,
            });
        }
        for a in &self.ages {
            let idx = match self.open_age {
                Some(open) if a.age >= open => bands.len() - 1,
                _ => (a.age / interval) as usize,
            };
            if let Some(band) = bands.get_mut(idx) {
                band.male += a.male;
                band.female += a.female;
            }
        }
        bands
    }

    fn band_center(i: usize) -> Decimal {
        Decimal::from(i as u64) + Decimal::new(5, 1)
    }
}

impl ChartStrategy for PopulationPyramid {
    fn kind(&self) -> &'static str {
        "pyramid"
    }

    /// Symmetric X extent around zero sized by the largest band on either side.
    fn extent(&self, config: &ChartConfig) -> ChartResult<DataExtent> {
        let bands = self.bands(config.age_interval);
        let peak = bands.iter().map(AgeBand::peak).max().unwrap_or(Decimal::ZERO);
        DataExtent::new(-peak, peak, Decimal::ZERO, Decimal::from(bands.len() as u64))
    }

    fn default_x_pin(&self) -> Option<Decimal> {
        Some(Decimal::ZERO)
    }

    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32> {
        Ok(mapper.rect().center_col())
    }

    fn x_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> {
        let precision = &ctx.config.precision;
        let ticks = axis::numeric_ticks(ctx, ctx.extent.min_x, ctx.extent.max_x, &ctx.x_axis)?;
        Ok(ticks.into_iter().map(|t| AxisTick::new(t.value, precision.label(t.value.abs()))).collect())
    }

    fn y_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> {
        Ok(self
            .bands(ctx.config.age_interval)
            .into_iter()
            .enumerate()
            .map(|(i, b)| AxisTick::new(Self::band_center(i), b.label))
            .collect())
    }

    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let cfg = ctx.config;
        let theme = cfg.theme;
        let center = ctx.origin.col;
        for (i, band) in self.bands(cfg.age_interval).iter().enumerate() {
            let bottom = ctx.mapper.value_to_row(Decimal::from(i as u64))? - cfg.bar_gap;
            let top = ctx.mapper.value_to_row(Decimal::from(i as u64 + 1))? + cfg.bar_gap;
            if bottom <= top {
                continue;
            }
            let male_left = ctx.mapper.value_to_col(-band.male)?;
            let female_right = ctx.mapper.value_to_col(band.female)?;
            if male_left < center {
                let bar = RectI32::from_ltrb(male_left, top, center, bottom);
                ctx.surface.fill_rect(bar, theme.male);
                ctx.surface.stroke_rect(bar, theme.bar_edge);
            }
            if female_right > center {
                let bar = RectI32::from_ltrb(center, top, female_right, bottom);
                ctx.surface.fill_rect(bar, theme.female);
                ctx.surface.stroke_rect(bar, theme.bar_edge);
            }
        }
        Ok(())
    }

    fn legend_entries(&self, config: &ChartConfig) -> Vec<LegendEntry> {
        vec![LegendEntry::new("Male", config.theme.male), LegendEntry::new("Female", config.theme.female)]
    }
}
