// File: crates/strata-core/src/error.rs
// Summary: Error taxonomy for layout, mapping and rendering.

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while laying out or rendering a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Extent is missing or inverted (`min > max`).
    #[error("invalid data extent: {0}")]
    InvalidExtent(String),

    /// A pinned axis value lies above the axis maximum.
    #[error("pinned value {pin} lies beyond the axis maximum {max}")]
    InvalidPin { pin: Decimal, max: Decimal },

    /// Zero-sized pixel area or zero cell size. Callers usually substitute a
    /// placeholder and continue.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Chart input has nothing to plot.
    #[error("no data to plot: {0}")]
    EmptyData(&'static str),

    /// Data too large for exact decimal arithmetic.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    #[error("render I/O error: {0}")]
    RenderIo(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Encode(String),

    /// Raster allocation failed; retried by the render queue's policy.
    #[error("out of resources: {0}")]
    OutOfResources(String),

    #[error("render queue is closed")]
    QueueClosed,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl ChartError {
    /// Whether a retry with backoff might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChartError::OutOfResources(_))
    }
}

impl From<image::ImageError> for ChartError {
    fn from(err: image::ImageError) -> Self {
        ChartError::Encode(err.to_string())
    }
}

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
