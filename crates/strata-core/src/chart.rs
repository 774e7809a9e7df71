// File: crates/strata-core/src/chart.rs
// Summary: Chart strategy seam and the generic driver running outline → title → axes → data → legend.

use std::path::Path;

use rust_decimal::Decimal;

use crate::axis::{self, AxisExtent, AxisTick};
use crate::config::{AxisConfig, ChartConfig};
use crate::error::ChartResult;
use crate::extent::DataExtent;
use crate::geometry::{ImageSize, Origin, RectI32};
use crate::layout::{LayoutSnapshot, LayoutState};
use crate::legend::{self, LegendEntry};
use crate::mapper::CoordinateMapper;
use crate::output::{self, OutputFormat, RenderedImage};
use crate::surface::{RasterSurface, RecordingSurface, Surface};
use crate::text::{TextMeasure, TextShaper};
use crate::theme::Theme;

/// Everything a strategy may read while drawing one step of a pass.
pub struct DrawContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub mapper: &'a CoordinateMapper,
    pub config: &'a ChartConfig,
    pub extent: DataExtent,
    pub origin: Origin,
    /// Axis settings with the strategy's default pins folded in.
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
}

impl DrawContext<'_> {
    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }
}

/// Per-chart-family behaviour composed by [`Chart`].
pub trait ChartStrategy {
    fn kind(&self) -> &'static str;

    /// Data extent derived from the chart's input.
    fn extent(&self, config: &ChartConfig) -> ChartResult<DataExtent>;

    /// Value that must carry a Y tick when the configuration names none.
    fn default_y_pin(&self) -> Option<Decimal> {
        None
    }

    fn default_x_pin(&self) -> Option<Decimal> {
        None
    }

    /// Pixel column of data value 0 on the X axis.
    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32>;

    fn x_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> {
        axis::numeric_ticks(ctx, ctx.extent.min_x, ctx.extent.max_x, &ctx.x_axis)
    }

    fn y_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> {
        axis::numeric_ticks(ctx, ctx.extent.min_y, ctx.extent.max_y, &ctx.y_axis)
    }

    fn draw_x_axis(&self, ctx: &mut DrawContext<'_>) -> ChartResult<AxisExtent> {
        let ticks = self.x_ticks(ctx)?;
        axis::draw_x_axis(ctx, &ticks)
    }

    fn draw_y_axis(&self, ctx: &mut DrawContext<'_>) -> ChartResult<AxisExtent> {
        let ticks = self.y_ticks(ctx)?;
        axis::draw_y_axis(ctx, &ticks)
    }

    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()>;

    fn legend_entries(&self, _config: &ChartConfig) -> Vec<LegendEntry> {
        Vec::new()
    }
}

impl<T: ChartStrategy + ?Sized> ChartStrategy for Box<T> {
    fn kind(&self) -> &'static str { (**self).kind() }
    fn extent(&self, config: &ChartConfig) -> ChartResult<DataExtent> { (**self).extent(config) }
    fn default_y_pin(&self) -> Option<Decimal> { (**self).default_y_pin() }
    fn default_x_pin(&self) -> Option<Decimal> { (**self).default_x_pin() }
    fn origin_col(&self, mapper: &CoordinateMapper) -> ChartResult<i32> { (**self).origin_col(mapper) }
    fn x_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> { (**self).x_ticks(ctx) }
    fn y_ticks(&self, ctx: &DrawContext<'_>) -> ChartResult<Vec<AxisTick>> { (**self).y_ticks(ctx) }
    fn draw_x_axis(&self, ctx: &mut DrawContext<'_>) -> ChartResult<AxisExtent> { (**self).draw_x_axis(ctx) }
    fn draw_y_axis(&self, ctx: &mut DrawContext<'_>) -> ChartResult<AxisExtent> { (**self).draw_y_axis(ctx) }
    fn draw_data(&self, ctx: &mut DrawContext<'_>) -> ChartResult<()> { (**self).draw_data(ctx) }
    fn legend_entries(&self, config: &ChartConfig) -> Vec<LegendEntry> { (**self).legend_entries(config) }
}

/// Layout state after each step of a pass, in draw order.
#[derive(Clone, Debug, Default)]
pub struct PassTrace {
    pub steps: Vec<(&'static str, LayoutSnapshot)>,
}

impl PassTrace {
    fn record(&mut self, step: &'static str, layout: &LayoutState) {
        self.steps.push((step, layout.snapshot()));
    }

    /// True when no step shrank anything a previous step had grown.
    pub fn is_monotonic(&self) -> bool {
        self.steps.windows(2).all(|w| w[1].1.dominates(&w[0].1))
    }
}

/// Generic driver: one strategy plus its configuration.
pub struct Chart<S: ChartStrategy> {
    pub strategy: S,
    pub config: ChartConfig,
}

impl<S: ChartStrategy> Chart<S> {
    pub fn new(strategy: S, config: ChartConfig) -> Self {
        Self { strategy, config }
    }

    /// Strategy extent with configured or default pins accommodated.
    pub fn resolved_extent(&self) -> ChartResult<DataExtent> {
        let mut extent = self.strategy.extent(&self.config)?;
        if let Some(pin) = self.y_axis().pin {
            extent.accommodate_y_pin(pin)?;
        }
        if let Some(pin) = self.x_axis().pin {
            extent.accommodate_x_pin(pin)?;
        }
        Ok(extent)
    }

    fn x_axis(&self) -> AxisConfig {
        AxisConfig { pin: self.config.x_axis.pin.or(self.strategy.default_x_pin()), ..self.config.x_axis }
    }

    fn y_axis(&self) -> AxisConfig {
        AxisConfig { pin: self.config.y_axis.pin.or(self.strategy.default_y_pin()), ..self.config.y_axis }
    }

    pub fn mapper(&self, layout: &LayoutState, extent: &DataExtent) -> CoordinateMapper {
        CoordinateMapper::new(*extent, layout.data_rect(), self.config.precision, self.config.degenerate_cell)
    }

    fn context<'a>(
        &'a self,
        surface: &'a mut dyn Surface,
        mapper: &'a CoordinateMapper,
        extent: &DataExtent,
    ) -> ChartResult<DrawContext<'a>> {
        let origin = mapper.origin(self.strategy.origin_col(mapper)?)?;
        Ok(DrawContext {
            surface,
            mapper,
            config: &self.config,
            extent: *extent,
            origin,
            x_axis: self.x_axis(),
            y_axis: self.y_axis(),
        })
    }

    /// Run one full draw pass, growing `layout` as text demands.
    pub fn draw_pass(
        &self,
        surface: &mut dyn Surface,
        layout: &mut LayoutState,
        extent: &DataExtent,
        trace: &mut PassTrace,
    ) -> ChartResult<()> {
        let cfg = &self.config;
        let theme = &cfg.theme;
        trace.record("start", layout);

        // outline
        let image = layout.image_size();
        let frame = RectI32::from_ltwh(0, 0, image.width, image.height);
        surface.fill_rect(frame, theme.background);
        surface.stroke_rect(frame, theme.border);
        trace.record("outline", layout);

        // title
        if !cfg.title.is_empty() {
            let size = cfg.fonts.title;
            let lh = surface.line_height(size);
            let text_w = surface.text_width(&cfg.title, size);
            layout.grow_for_title(text_w + 2 * cfg.title_padding, lh, cfg.title_margin_lines);
            if cfg.draw_text {
                let x = (layout.image_size().width - text_w) / 2;
                surface.text(&cfg.title, x, 2 * lh, size, theme.title);
            }
        }
        trace.record("title", layout);

        // Y axis first so the X axis sees the final left band
        let mapper = self.mapper(layout, extent);
        let y = {
            let mut ctx = self.context(&mut *surface, &mapper, extent)?;
            self.strategy.draw_y_axis(&mut ctx)?
        };
        layout.grow_y_axis_width(y.thickness);
        layout.ensure_top(y.overflow_before);
        trace.record("y_axis", layout);

        let mapper = self.mapper(layout, extent);
        let x = {
            let mut ctx = self.context(&mut *surface, &mapper, extent)?;
            self.strategy.draw_x_axis(&mut ctx)?
        };
        layout.grow_x_axis_height(x.thickness);
        layout.ensure_right(x.overflow_after);
        layout.ensure_left(x.overflow_before);
        trace.record("x_axis", layout);

        // data
        let mapper = self.mapper(layout, extent);
        {
            let mut ctx = self.context(&mut *surface, &mapper, extent)?;
            if cfg.draw_zero_lines {
                draw_zero_lines(&mut ctx);
            }
            self.strategy.draw_data(&mut ctx)?;
        }
        trace.record("data", layout);

        // legend
        if cfg.draw_legend {
            let entries = self.strategy.legend_entries(cfg);
            if !entries.is_empty() {
                layout.ensure_bottom(cfg.label_gap);
                let (w, h) = legend::measure(&*surface, &entries, cfg.fonts.legend);
                layout.grow_for_legend(w, h);
                let m = *layout.margins();
                let top = layout.data_rect().end_row + m.axis_height + m.extra_height_bottom;
                let width = layout.image_size().width;
                legend::draw(surface, &entries, top, width, cfg.fonts.legend, theme.axis_label, cfg.draw_text);
            }
        }
        trace.record("legend", layout);
        Ok(())
    }

    /// Measure-only passes until the layout stops growing.
    ///
    /// Each pass starts from the previous pass's state; since margins only
    /// grow, the first pass that changes nothing is a fixed point.
    pub fn layout<M: TextMeasure>(&self, metrics: M) -> ChartResult<LayoutState> {
        let extent = self.resolved_extent()?;
        let mut state = LayoutState::new(self.config.width, self.config.height);
        let mut scratch = RecordingSurface::new(metrics);
        let passes = self.config.max_layout_passes.max(1);
        for pass in 1..=passes {
            let before = state;
            scratch.clear();
            self.draw_pass(&mut scratch, &mut state, &extent, &mut PassTrace::default())?;
            if state == before {
                tracing::debug!(chart = self.strategy.kind(), pass, "layout converged");
                return Ok(state);
            }
        }
        tracing::warn!(chart = self.strategy.kind(), passes, "layout did not converge; using last pass");
        Ok(state)
    }

    /// Lay out with `surface`'s own metrics, then draw the final pass on it.
    /// Returns the final layout and the per-step trace of the drawn pass.
    pub fn draw(&self, surface: &mut dyn Surface) -> ChartResult<(LayoutState, PassTrace)> {
        let mut layout = self.layout(&*surface)?;
        let extent = self.resolved_extent()?;
        let settled = layout;
        let mut trace = PassTrace::default();
        self.draw_pass(surface, &mut layout, &extent, &mut trace)?;
        if layout != settled {
            tracing::warn!(chart = self.strategy.kind(), "final pass grew the layout");
        }
        Ok((layout, trace))
    }

    /// Render onto an off-screen raster sized by the converged layout.
    pub fn render(&self) -> ChartResult<RenderedImage> {
        let shaper = TextShaper::new();
        let layout = self.layout(&shaper)?;
        let extent = self.resolved_extent()?;
        let mut raster = RasterSurface::new(layout.image_size(), &shaper)?;
        let mut final_layout = layout;
        self.draw_pass(&mut raster, &mut final_layout, &extent, &mut PassTrace::default())?;
        if final_layout != layout {
            tracing::warn!(chart = self.strategy.kind(), "final pass grew the layout");
        }
        let (pixels, width, height, stride) = raster.read_rgba8()?;
        Ok(RenderedImage { pixels, width, height, stride })
    }

    /// Render to RGBA8 as `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self) -> ChartResult<(Vec<u8>, u32, u32, usize)> {
        let img = self.render()?;
        Ok((img.pixels, img.width, img.height, img.stride))
    }

    pub fn render_to_png_bytes(&self) -> ChartResult<Vec<u8>> {
        self.render()?.encode(OutputFormat::Png)
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(&self, output_png_path: impl AsRef<Path>) -> ChartResult<ImageSize> {
        self.render_to_file(output_png_path, OutputFormat::Png)
    }

    /// Render and write in `format`; returns the image size.
    pub fn render_to_file(&self, path: impl AsRef<Path>, format: OutputFormat) -> ChartResult<ImageSize> {
        let img = self.render()?;
        let bytes = img.encode(format)?;
        output::write_atomic(path.as_ref(), &bytes)?;
        tracing::info!(chart = self.strategy.kind(), path = %path.as_ref().display(), width = img.width, height = img.height, "wrote chart");
        Ok(ImageSize::new(img.width as i32, img.height as i32))
    }
}

fn draw_zero_lines(ctx: &mut DrawContext<'_>) {
    let rect = *ctx.mapper.rect();
    let color = ctx.config.theme.zero_line;
    if ctx.extent.y_contains(Decimal::ZERO) && rect.contains_row(ctx.origin.row) {
        ctx.surface.line((rect.start_col, ctx.origin.row), (rect.end_col, ctx.origin.row), color);
    }
    if ctx.extent.x_contains(Decimal::ZERO) && rect.contains_col(ctx.origin.col) {
        ctx.surface.line((ctx.origin.col, rect.start_row), (ctx.origin.col, rect.end_row), color);
    }
}
