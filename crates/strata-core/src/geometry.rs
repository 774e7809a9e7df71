// File: crates/strata-core/src/geometry.rs
// Summary: Pixel-space geometry: rectangles, the plotted data rectangle, image size and origin.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    /// Normalise so that left <= right and top <= bottom.
    pub fn sorted(self) -> Self {
        Self {
            left: self.left.min(self.right),
            right: self.left.max(self.right),
            top: self.top.min(self.bottom),
            bottom: self.top.max(self.bottom),
        }
    }
}

/// Pixel rectangle reserved for plotted data. Rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataRect {
    pub start_row: i32,
    pub end_row: i32,
    pub start_col: i32,
    pub end_col: i32,
    pub width: i32,
    pub height: i32,
}

impl DataRect {
    pub const fn new(start_col: i32, start_row: i32, width: i32, height: i32) -> Self {
        Self {
            start_row,
            end_row: start_row + height,
            start_col,
            end_col: start_col + width,
            width,
            height,
        }
    }

    pub const fn as_rect(&self) -> RectI32 {
        RectI32::from_ltrb(self.start_col, self.start_row, self.end_col, self.end_row)
    }

    pub const fn center_col(&self) -> i32 {
        (self.start_col + self.end_col) / 2
    }

    pub fn contains_col(&self, col: i32) -> bool {
        col >= self.start_col && col <= self.end_col
    }

    pub fn contains_row(&self, row: i32) -> bool {
        row >= self.start_row && row <= self.end_row
    }
}

/// Total canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageSize {
    pub width: i32,
    pub height: i32,
}

impl ImageSize {
    pub const fn new(width: i32, height: i32) -> Self { Self { width, height } }
}

/// Pixel location of data value (0, 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Origin {
    pub row: i32,
    pub col: i32,
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
