// File: crates/strata-core/src/charts/line.rs
// Summary: Multi-series line graph with cross markers at each key.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::chart::{ChartStrategy, DrawContext};
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::extent::DataExtent;
use crate::legend::LegendEntry;
use crate::mapper::CoordinateMapper;

/// Key-ordered values of one series.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: BTreeMap<Decimal, Decimal>,
}

impl LineSeries {
    pub fn new(name: impl Into<String>, points: impl IntoIterator<Item = (Decimal, Decimal)>) -> Self {
        Self { name: name.into(), points: points.into_iter().collect() }
    }
}

#[derive(Clone, Debug)]
pub struct LineChart {
    series: Vec<LineSeries>,
}

impl LineChart {
    pub fn new(series: Vec<LineSeries>) -> ChartResult<Self> {
        if series.iter().all(|s| s.points.is_empty()) {
            return Err(ChartError::EmptyData("line chart needs at least one point"));
        }
        Ok(Self { series })
    }

    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }
}

impl ChartStrategy for LineChart {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn extent(&self, _config: &ChartConfig) -> ChartResult<DataExtent> {
        DataExtent::from_points(self.series.iter().flat_map(|s| s.points.iter().map(|(k, v)| (*k, *v))))
    }

    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32> {
        mapper.zero_crossing_col()
    }

    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        let arm = ctx.config.cross_len;
        for (i, series) in self.series.iter().enumerate() {
            let color = ctx.theme().series_color(i);
            let mut prev: Option<(i32, i32)> = None;
            for (k, v) in &series.points {
                let p = (ctx.mapper.value_to_col(*k)?, ctx.mapper.value_to_row(*v)?);
                if let Some(q) = prev {
                    ctx.surface.line(q, p, color);
                }
                ctx.surface.line((p.0 - arm, p.1), (p.0 + arm, p.1), color);
                ctx.surface.line((p.0, p.1 - arm), (p.0, p.1 + arm), color);
                prev = Some(p);
            }
        }
        Ok(())
    }

    fn legend_entries(&self, config: &ChartConfig) -> Vec<LegendEntry> {
        let theme = &config.theme;
        self.series
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.name.is_empty())
            .map(|(i, s)| LegendEntry::new(s.name.clone(), theme.series_color(i)))
            .collect()
    }
}
