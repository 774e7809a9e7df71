// File: crates/strata-core/src/config.rs
// Summary: Per-chart configuration surface with defaults.

use rust_decimal::Decimal;

use crate::decimal::{Precision, Rounding};
use crate::theme::Theme;

/// Default data-area width in pixels.
pub const DATA_WIDTH: i32 = 600;
/// Default data-area height in pixels.
pub const DATA_HEIGHT: i32 = 400;

/// Font sizes in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    pub title: f32,
    pub axis_label: f32,
    pub tick: f32,
    pub legend: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self { title: 16.0, axis_label: 13.0, tick: 11.0, legend: 12.0 }
    }
}

/// Knobs for one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisConfig {
    /// Explicit tick step; derived from `tick_count` when `None`.
    pub increment: Option<Decimal>,
    /// Value that must carry a tick.
    pub pin: Option<Decimal>,
}

#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Data-area size; the image grows around it.
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub precision: Precision,
    pub tick_count: u32,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub draw_zero_lines: bool,
    pub draw_legend: bool,
    pub draw_text: bool,
    /// Pixels left empty on each side of a bar.
    pub bar_gap: i32,
    /// Years per pyramid band.
    pub age_interval: u32,
    /// Arm length of line-chart cross markers.
    pub cross_len: i32,
    pub tick_len: i32,
    /// Space between tick marks, labels and axis titles.
    pub label_gap: i32,
    /// Horizontal padding added on both sides of the title.
    pub title_padding: i32,
    /// Y-label decluttering bucket, in line heights.
    pub declutter_factor: f32,
    /// Top margin reserved for the title, in line heights.
    pub title_margin_lines: f32,
    /// Data units per pixel used when the data area has no pixels.
    pub degenerate_cell: Decimal,
    pub max_layout_passes: u32,
    pub fonts: FontSizes,
    pub theme: Theme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DATA_WIDTH,
            height: DATA_HEIGHT,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            precision: Precision::default(),
            tick_count: 10,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            draw_zero_lines: false,
            draw_legend: true,
            draw_text: true,
            bar_gap: 1,
            age_interval: 5,
            cross_len: 3,
            tick_len: 5,
            label_gap: 4,
            title_padding: 10,
            declutter_factor: 1.5,
            title_margin_lines: 3.0,
            degenerate_cell: Decimal::TWO,
            max_layout_passes: 8,
            fonts: FontSizes::default(),
            theme: Theme::default(),
        }
    }
}

impl ChartConfig {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.precision.rounding = rounding;
        self
    }

    pub fn with_scales(mut self, calc_scale: u32, display_scale: u32) -> Self {
        self.precision.calc_scale = calc_scale;
        self.precision.display_scale = display_scale;
        self
    }

    pub fn with_y_pin(mut self, pin: Decimal) -> Self {
        self.y_axis.pin = Some(pin);
        self
    }

    pub fn with_y_increment(mut self, inc: Decimal) -> Self {
        self.y_axis.increment = Some(inc);
        self
    }

    pub fn with_x_increment(mut self, inc: Decimal) -> Self {
        self.x_axis.increment = Some(inc);
        self
    }

    pub fn with_zero_lines(mut self, on: bool) -> Self {
        self.draw_zero_lines = on;
        self
    }

    pub fn with_legend(mut self, on: bool) -> Self {
        self.draw_legend = on;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
