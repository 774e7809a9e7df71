// File: crates/strata-core/src/layout.rs
// Summary: Margin negotiation. Every operation only grows the canvas; nothing ever shrinks.

use crate::geometry::{DataRect, ImageSize};

/// Reserved pixel bands around the data rectangle.
///
/// Horizontal layout, left to right:
/// `max(extra_width_left, axis_width) | data | extra_width_right`.
/// The Y axis band sits right-aligned inside the left margin, so a margin
/// already widened by a title absorbs the axis.
/// Vertical layout, top to bottom:
/// `extra_height_top | data | axis_height | extra_height_bottom | legend_height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub extra_width_left: i32,
    pub extra_width_right: i32,
    pub extra_height_top: i32,
    pub extra_height_bottom: i32,
    pub axis_width: i32,
    pub axis_height: i32,
    pub legend_width: i32,
    pub legend_height: i32,
}

impl Margins {
    fn fields(&self) -> [i32; 8] {
        [
            self.extra_width_left,
            self.extra_width_right,
            self.extra_height_top,
            self.extra_height_bottom,
            self.axis_width,
            self.axis_height,
            self.legend_width,
            self.legend_height,
        ]
    }
}

/// Owned layout state threaded through one draw pass.
///
/// The data rectangle keeps the configured width and height; growing a
/// margin on the left or top shifts it, growing any margin widens or
/// heightens the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutState {
    data_width: i32,
    data_height: i32,
    margins: Margins,
}

/// Point-in-time copy of everything a draw step may grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub margins: Margins,
    pub data: DataRect,
    pub image: ImageSize,
}

impl LayoutSnapshot {
    /// True when no field of `self` is smaller than in `earlier`.
    pub fn dominates(&self, earlier: &LayoutSnapshot) -> bool {
        let grown = self
            .margins
            .fields()
            .iter()
            .zip(earlier.margins.fields().iter())
            .all(|(now, then)| now >= then);
        grown
            && self.data.start_col >= earlier.data.start_col
            && self.data.start_row >= earlier.data.start_row
            && self.data.end_col >= earlier.data.end_col
            && self.data.end_row >= earlier.data.end_row
            && self.image.width >= earlier.image.width
            && self.image.height >= earlier.image.height
    }
}

impl LayoutState {
    pub fn new(data_width: i32, data_height: i32) -> Self {
        Self { data_width: data_width.max(0), data_height: data_height.max(0), margins: Margins::default() }
    }

    pub fn margins(&self) -> &Margins { &self.margins }

    pub fn data_rect(&self) -> DataRect {
        let m = &self.margins;
        DataRect::new(self.left_band(), m.extra_height_top, self.data_width, self.data_height)
    }

    /// Pixels left of the data rectangle.
    pub fn left_band(&self) -> i32 {
        self.margins.extra_width_left.max(self.margins.axis_width)
    }

    pub fn image_size(&self) -> ImageSize {
        let m = &self.margins;
        let data = self.data_rect();
        ImageSize::new(
            data.end_col + m.extra_width_right,
            data.end_row + m.axis_height + m.extra_height_bottom + m.legend_height,
        )
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot { margins: self.margins, data: self.data_rect(), image: self.image_size() }
    }

    /// Widen the Y axis band. Returns how far the image widened: 0 when
    /// `width` already fits the axis band or the left margin.
    pub fn grow_y_axis_width(&mut self, width: i32) -> i32 {
        if width <= self.margins.axis_width {
            return 0;
        }
        let widened = (width - self.left_band()).max(0);
        self.margins.axis_width = width;
        tracing::debug!(width, widened, "y axis band grew");
        widened
    }

    /// Heighten the X axis band. Returns the growth in pixels.
    pub fn grow_x_axis_height(&mut self, height: i32) -> i32 {
        let delta = height - self.margins.axis_height;
        if delta <= 0 {
            return 0;
        }
        self.margins.axis_height = height;
        tracing::debug!(height, delta, "x axis band grew");
        delta
    }

    /// Fit a centred title of `title_width` pixels (padding included) and
    /// reserve `lines × line_height` pixels above the data for it.
    ///
    /// Overflow is split with the right margin taking half (rounded down) and
    /// the left margin the remainder, so the image ends up exactly as wide as
    /// the title.
    pub fn grow_for_title(&mut self, title_width: i32, line_height: i32, lines: f32) -> bool {
        let widened = self.fit_width(title_width);
        let top = (lines.max(0.0) * line_height as f32).ceil() as i32;
        let heightened = self.ensure_top(top);
        widened || heightened
    }

    /// Reserve a legend block below the X axis band.
    pub fn grow_for_legend(&mut self, width: i32, height: i32) -> bool {
        let mut changed = false;
        if width > self.margins.legend_width {
            self.margins.legend_width = width;
            changed = true;
        }
        if height > self.margins.legend_height {
            tracing::debug!(height, "legend band grew");
            self.margins.legend_height = height;
            changed = true;
        }
        self.fit_width(width) || changed
    }

    /// Make the top margin at least `px` tall.
    pub fn ensure_top(&mut self, px: i32) -> bool {
        if px > self.margins.extra_height_top {
            tracing::debug!(px, "top margin grew");
            self.margins.extra_height_top = px;
            return true;
        }
        false
    }

    /// Make the right margin at least `px` wide.
    pub fn ensure_right(&mut self, px: i32) -> bool {
        if px > self.margins.extra_width_right {
            tracing::debug!(px, "right margin grew");
            self.margins.extra_width_right = px;
            return true;
        }
        false
    }

    /// Make the bottom margin (between X axis band and legend) at least `px`.
    pub fn ensure_bottom(&mut self, px: i32) -> bool {
        if px > self.margins.extra_height_bottom {
            tracing::debug!(px, "bottom margin grew");
            self.margins.extra_height_bottom = px;
            return true;
        }
        false
    }

    /// Make the left margin at least `px` wide.
    pub fn ensure_left(&mut self, px: i32) -> bool {
        if px > self.margins.extra_width_left {
            tracing::debug!(px, "left margin grew");
            self.margins.extra_width_left = px;
            return true;
        }
        false
    }

    fn fit_width(&mut self, needed: i32) -> bool {
        let delta = needed - self.image_size().width;
        if delta <= 0 {
            return false;
        }
        let right = delta / 2;
        let left = delta - right;
        self.margins.extra_width_right += right;
        self.margins.extra_width_left = self.left_band() + left;
        tracing::debug!(needed, left, right, "image widened to fit");
        true
    }
}
