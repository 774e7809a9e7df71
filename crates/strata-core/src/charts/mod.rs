// File: crates/strata-core/src/charts/mod.rs
// Summary: Per-family chart strategies composed by the generic driver.

pub mod bar;
pub mod boxplot;
pub mod line;
pub mod pyramid;
pub mod scatter;

pub use bar::{bar_width_px, BarChart, BarInterval};
pub use boxplot::{BoxCategory, BoxPlot, BoxSummary};
pub use line::{LineChart, LineSeries};
pub use pyramid::{AgeBand, AgeCount, PopulationPyramid, MAX_AGE};
pub use scatter::{LinearFit, ScatterPlot};
