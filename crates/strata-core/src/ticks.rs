// File: crates/strata-core/src/ticks.rs
// Summary: Tick increment policy, pinned tick generation and label decluttering.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::Precision;
use crate::error::{ChartError, ChartResult};

/// Upper bound on ticks generated for one side of a pin.
const MAX_TICKS_PER_SIDE: u32 = 4096;

/// Step between ticks: the explicit increment when it is positive, otherwise
/// `(max - min) / desired_count` rounded up to display precision.
///
/// Returns zero for a zero-width range; callers then emit a single tick.
pub fn increment(
    min: Decimal,
    max: Decimal,
    desired_count: u32,
    explicit: Option<Decimal>,
    precision: &Precision,
) -> Decimal {
    if let Some(inc) = explicit.filter(|i| i.is_sign_positive() && !i.is_zero()) {
        return inc;
    }
    let span = max - min;
    if span <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let raw = span / Decimal::from(desired_count.max(1));
    let rounded = raw.round_dp_with_strategy(precision.display_scale, RoundingStrategy::ToPositiveInfinity);
    if rounded.is_zero() { precision.display_unit() } else { rounded }
}

/// Anchor tick: the configured pin, else zero when the range straddles it,
/// else the minimum.
pub fn resolve_pin(min: Decimal, max: Decimal, configured: Option<Decimal>) -> Decimal {
    match configured {
        Some(p) => p,
        None if min < Decimal::ZERO && max > Decimal::ZERO => Decimal::ZERO,
        None => min,
    }
}

/// Ticks at `pin + k * increment` within `[min, max]`, in priority order:
/// the pin, then ascending above it, then descending below it.
///
/// The count on each side is computed independently, so the pin always sits
/// exactly on a tick. A pin above `max` is rejected.
pub fn numeric_ticks(min: Decimal, max: Decimal, increment: Decimal, pin: Decimal) -> ChartResult<Vec<Decimal>> {
    if pin > max {
        return Err(ChartError::InvalidPin { pin, max });
    }
    let mut out = Vec::new();
    if pin >= min {
        out.push(pin);
    }
    if increment <= Decimal::ZERO {
        return Ok(out);
    }
    let above = steps(max - pin, increment);
    let below = steps(pin - min, increment);
    out.extend((1..=above).map(|k| pin + increment * Decimal::from(k)));
    out.extend((1..=below).map(|k| pin - increment * Decimal::from(k)));
    out.retain(|v| *v >= min && *v <= max);
    Ok(out)
}

fn steps(distance: Decimal, increment: Decimal) -> u32 {
    if distance <= Decimal::ZERO {
        return 0;
    }
    (distance / increment).floor().to_u32().unwrap_or(MAX_TICKS_PER_SIDE).min(MAX_TICKS_PER_SIDE)
}

/// Row-bucket bitset for Y-axis labels.
///
/// Rows are bucketed by `offset / (factor × line_height)`. A label is admitted
/// only if its bucket and both neighbours are free, which keeps admitted
/// labels more than one bucket apart. Rejected labels are skipped.
#[derive(Clone, Debug)]
pub struct RowDeclutter {
    bucket_px: f32,
    words: Vec<u64>,
}

impl RowDeclutter {
    pub fn new(line_height: i32, factor: f32) -> Self {
        Self { bucket_px: (line_height.max(1) as f32 * factor).max(1.0), words: Vec::new() }
    }

    pub fn bucket_px(&self) -> f32 { self.bucket_px }

    fn bucket(&self, offset_px: i32) -> usize {
        (offset_px.max(0) as f32 / self.bucket_px).floor() as usize
    }

    fn is_set(&self, bit: usize) -> bool {
        self.words.get(bit / 64).is_some_and(|w| w & (1u64 << (bit % 64)) != 0)
    }

    fn set(&mut self, bit: usize) {
        let word = bit / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (bit % 64);
    }

    /// Claim the bucket for a label `offset_px` rows below the data top.
    pub fn admit(&mut self, offset_px: i32) -> bool {
        let b = self.bucket(offset_px);
        let taken = self.is_set(b) || self.is_set(b + 1) || (b > 0 && self.is_set(b - 1));
        if taken {
            return false;
        }
        self.set(b);
        true
    }
}

/// Horizontal label spans for X-axis labels; a label must not overlap any
/// previously admitted label (plus `gap`).
#[derive(Clone, Debug, Default)]
pub struct SpanDeclutter {
    gap: i32,
    spans: Vec<(i32, i32)>,
}

impl SpanDeclutter {
    pub fn new(gap: i32) -> Self { Self { gap, spans: Vec::new() } }

    pub fn admit(&mut self, left: i32, right: i32) -> bool {
        let clash = self.spans.iter().any(|&(l, r)| left < r + self.gap && right + self.gap > l);
        if clash {
            return false;
        }
        self.spans.push((left, right));
        true
    }
}
