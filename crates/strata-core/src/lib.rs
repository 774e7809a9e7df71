// File: crates/strata-core/src/lib.rs
// Summary: Core library entry point; exports the coordinate engine, layout negotiator and chart strategies.

pub mod axis;
pub mod chart;
pub mod charts;
pub mod config;
pub mod decimal;
pub mod error;
pub mod extent;
pub mod geometry;
pub mod layout;
pub mod legend;
pub mod mapper;
pub mod output;
pub mod queue;
pub mod surface;
pub mod text;
pub mod theme;
pub mod ticks;

pub use chart::{Chart, ChartStrategy, DrawContext, PassTrace};
pub use config::{AxisConfig, ChartConfig, FontSizes};
pub use decimal::{Precision, Rounding};
pub use error::{ChartError, ChartResult};
pub use extent::{CellSize, DataExtent};
pub use geometry::{DataRect, ImageSize, Origin, RectI32};
pub use layout::{LayoutSnapshot, LayoutState, Margins};
pub use mapper::CoordinateMapper;
pub use output::{OutputFormat, RenderedImage};
pub use queue::{RenderHandle, RenderQueue, RetryPolicy};
pub use surface::{DrawOp, RasterSurface, RecordingSurface, Surface};
pub use text::{MonoMetrics, TextMeasure, TextShaper};
pub use theme::Theme;
pub use rust_decimal::Decimal;
