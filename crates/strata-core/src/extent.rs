// File: crates/strata-core/src/extent.rs
// Summary: Data-space extrema and the derived per-pixel cell size.

use rust_decimal::Decimal;

use crate::decimal::Precision;
use crate::error::{ChartError, ChartResult};
use crate::geometry::DataRect;

/// Minimum/maximum data values both axes must span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataExtent {
    pub min_x: Decimal,
    pub max_x: Decimal,
    pub min_y: Decimal,
    pub max_y: Decimal,
}

impl DataExtent {
    pub fn new(min_x: Decimal, max_x: Decimal, min_y: Decimal, max_y: Decimal) -> ChartResult<Self> {
        if min_x > max_x {
            return Err(ChartError::InvalidExtent(format!("min_x {min_x} > max_x {max_x}")));
        }
        if min_y > max_y {
            return Err(ChartError::InvalidExtent(format!("min_y {min_y} > max_y {max_y}")));
        }
        Ok(Self { min_x, max_x, min_y, max_y })
    }

    /// Smallest extent covering every `(x, y)` point.
    pub fn from_points<I>(points: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = (Decimal, Decimal)>,
    {
        let mut it = points.into_iter();
        let (x0, y0) = it.next().ok_or(ChartError::EmptyData("extent needs at least one point"))?;
        let mut e = Self { min_x: x0, max_x: x0, min_y: y0, max_y: y0 };
        for (x, y) in it {
            e.include(x, y);
        }
        Ok(e)
    }

    pub fn include(&mut self, x: Decimal, y: Decimal) {
        self.include_x(x);
        self.include_y(y);
    }

    pub fn include_x(&mut self, x: Decimal) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
    }

    pub fn include_y(&mut self, y: Decimal) {
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Lower `min_y` to reach `pin`. A pin above `max_y` is a configuration error.
    pub fn accommodate_y_pin(&mut self, pin: Decimal) -> ChartResult<()> {
        if pin > self.max_y {
            return Err(ChartError::InvalidPin { pin, max: self.max_y });
        }
        self.min_y = self.min_y.min(pin);
        Ok(())
    }

    pub fn accommodate_x_pin(&mut self, pin: Decimal) -> ChartResult<()> {
        if pin > self.max_x {
            return Err(ChartError::InvalidPin { pin, max: self.max_x });
        }
        self.min_x = self.min_x.min(pin);
        Ok(())
    }

    pub fn x_span(&self) -> Decimal { self.max_x - self.min_x }
    pub fn y_span(&self) -> Decimal { self.max_y - self.min_y }

    pub fn x_contains(&self, x: Decimal) -> bool { x >= self.min_x && x <= self.max_x }
    pub fn y_contains(&self, y: Decimal) -> bool { y >= self.min_y && y <= self.max_y }
}

/// Data units represented by one pixel on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub cell_width: Decimal,
    pub cell_height: Decimal,
}

impl CellSize {
    /// Strict computation: a zero-pixel data area is reported, not papered over.
    pub fn compute(extent: &DataExtent, rect: &DataRect, precision: &Precision) -> ChartResult<Self> {
        let cell_width = precision
            .div(extent.x_span(), Decimal::from(rect.width))
            .ok_or_else(|| ChartError::DegenerateGeometry(format!("data area width is {} px", rect.width)))?;
        let cell_height = precision
            .div(extent.y_span(), Decimal::from(rect.height))
            .ok_or_else(|| ChartError::DegenerateGeometry(format!("data area height is {} px", rect.height)))?;
        Ok(Self { cell_width, cell_height })
    }

    /// Like [`CellSize::compute`], but a zero-pixel axis gets `placeholder`
    /// data units per pixel. The substitution is logged.
    pub fn resolve(extent: &DataExtent, rect: &DataRect, precision: &Precision, placeholder: Decimal) -> Self {
        match Self::compute(extent, rect, precision) {
            Ok(cell) => cell,
            Err(err) => {
                tracing::warn!(%err, %placeholder, "substituting placeholder cell size");
                let cell_width = precision.div(extent.x_span(), Decimal::from(rect.width)).unwrap_or(placeholder);
                let cell_height = precision.div(extent.y_span(), Decimal::from(rect.height)).unwrap_or(placeholder);
                Self { cell_width, cell_height }
            }
        }
    }
}
