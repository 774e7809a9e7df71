// File: crates/strata-core/src/mapper.rs
// Summary: Data-space <-> pixel-space conversion over a DataRect using exact decimals.

use rust_decimal::Decimal;

use crate::decimal::Precision;
use crate::error::{ChartError, ChartResult};
use crate::extent::{CellSize, DataExtent};
use crate::geometry::{clamp, DataRect, Origin};

/// Maps data values to pixel rows/columns.
///
/// Columns grow with X. Rows are inverted: data Y grows upward while screen
/// rows grow downward, so `max_y` lands on `start_row` and `min_y` on
/// `end_row`.
///
/// A mapper built with [`CoordinateMapper::unconfigured`] has no extent and
/// every conversion returns [`ChartError::InvalidExtent`].
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    extent: Option<DataExtent>,
    cell: Option<CellSize>,
    rect: DataRect,
    precision: Precision,
}

impl CoordinateMapper {
    pub fn new(extent: DataExtent, rect: DataRect, precision: Precision, placeholder: Decimal) -> Self {
        let cell = CellSize::resolve(&extent, &rect, &precision, placeholder);
        Self { extent: Some(extent), cell: Some(cell), rect, precision }
    }

    pub fn unconfigured(rect: DataRect, precision: Precision) -> Self {
        Self { extent: None, cell: None, rect, precision }
    }

    fn configured(&self) -> ChartResult<(&DataExtent, &CellSize)> {
        match (&self.extent, &self.cell) {
            (Some(e), Some(c)) => Ok((e, c)),
            _ => Err(ChartError::InvalidExtent("no extent configured".into())),
        }
    }

    pub fn extent(&self) -> Option<&DataExtent> { self.extent.as_ref() }
    pub fn cell(&self) -> Option<&CellSize> { self.cell.as_ref() }
    pub fn rect(&self) -> &DataRect { &self.rect }
    pub fn precision(&self) -> &Precision { &self.precision }

    /// `round((x - min_x) / cell_width) + start_col`; `start_col` when the
    /// cell width is zero.
    pub fn value_to_col(&self, x: Decimal) -> ChartResult<i32> {
        let (e, c) = self.configured()?;
        if c.cell_width.is_zero() {
            return Ok(self.rect.start_col);
        }
        let cells = (x - e.min_x) / c.cell_width;
        Ok(self.precision.to_px(cells).saturating_add(self.rect.start_col))
    }

    /// `height - round((y - min_y) / cell_height) + start_row`; the bottom row
    /// when the cell height is zero.
    pub fn value_to_row(&self, y: Decimal) -> ChartResult<i32> {
        let (e, c) = self.configured()?;
        if c.cell_height.is_zero() {
            return Ok(self.rect.end_row);
        }
        let cells = (y - e.min_y) / c.cell_height;
        Ok(self.rect.height - self.precision.to_px(cells) + self.rect.start_row)
    }

    pub fn col_to_value(&self, col: i32) -> ChartResult<Decimal> {
        let (e, c) = self.configured()?;
        Ok(e.min_x + Decimal::from(col - self.rect.start_col) * c.cell_width)
    }

    pub fn row_to_value(&self, row: i32) -> ChartResult<Decimal> {
        let (e, c) = self.configured()?;
        Ok(e.min_y + Decimal::from(self.rect.height - (row - self.rect.start_row)) * c.cell_height)
    }

    /// Pixel length of a data-space X span.
    pub fn x_len_px(&self, span: Decimal) -> ChartResult<i32> {
        let (_, c) = self.configured()?;
        if c.cell_width.is_zero() {
            return Ok(0);
        }
        Ok(self.precision.to_px(span / c.cell_width))
    }

    /// Pixel length of a data-space Y span.
    pub fn y_len_px(&self, span: Decimal) -> ChartResult<i32> {
        let (_, c) = self.configured()?;
        if c.cell_height.is_zero() {
            return Ok(0);
        }
        Ok(self.precision.to_px(span / c.cell_height))
    }

    /// Row of data value 0. Falls back to the bottom of the data rect when
    /// `max_y` is zero or the cell height is zero.
    pub fn origin_row(&self) -> ChartResult<i32> {
        let (e, c) = self.configured()?;
        if e.max_y.is_zero() || c.cell_height.is_zero() {
            return Ok(self.rect.end_row);
        }
        self.value_to_row(Decimal::ZERO)
    }

    /// Column of data value 0, clamped to the data rect.
    pub fn zero_crossing_col(&self) -> ChartResult<i32> {
        let col = self.value_to_col(Decimal::ZERO)?;
        Ok(clamp(col, self.rect.start_col, self.rect.end_col))
    }

    pub fn origin(&self, col: i32) -> ChartResult<Origin> {
        Ok(Origin { row: self.origin_row()?, col })
    }
}
