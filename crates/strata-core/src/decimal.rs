// File: crates/strata-core/src/decimal.rs
// Summary: Exact decimal helpers shared by the mapper, tick generator and chart strategies.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounding applied whenever an exact value is truncated to an integer pixel
/// or to a fixed number of decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ties away from zero.
    #[default]
    HalfUp,
    /// Ties toward zero.
    HalfDown,
    /// Ties to the even neighbour.
    HalfEven,
    /// Away from zero.
    Up,
    /// Toward zero.
    Down,
    Ceiling,
    Floor,
}

impl Rounding {
    pub const ALL: [Rounding; 7] = [
        Rounding::HalfUp,
        Rounding::HalfDown,
        Rounding::HalfEven,
        Rounding::Up,
        Rounding::Down,
        Rounding::Ceiling,
        Rounding::Floor,
    ];

    pub fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfDown => RoundingStrategy::MidpointTowardZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Rounding::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

/// Decimal places used for internal arithmetic vs. for rendered labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    pub calc_scale: u32,
    pub display_scale: u32,
    pub rounding: Rounding,
}

impl Default for Precision {
    fn default() -> Self {
        Self { calc_scale: 12, display_scale: 2, rounding: Rounding::HalfUp }
    }
}

impl Precision {
    /// Round to the calculation scale.
    pub fn calc(&self, v: Decimal) -> Decimal {
        v.round_dp_with_strategy(self.calc_scale, self.rounding.strategy())
    }

    /// `a / b` at calculation scale, `None` when `b` is zero.
    pub fn div(&self, a: Decimal, b: Decimal) -> Option<Decimal> {
        a.checked_div(b).map(|q| self.calc(q))
    }

    /// Round to a whole pixel with the configured rounding mode.
    pub fn to_px(&self, v: Decimal) -> i32 {
        round_to_i32(v, self.rounding)
    }

    /// Human-facing label: display scale, trailing zeros stripped, no `-0`.
    pub fn label(&self, v: Decimal) -> String {
        format_decimal(v, self.display_scale, self.rounding)
    }

    /// Smallest positive step representable at display scale.
    pub fn display_unit(&self) -> Decimal {
        Decimal::new(1, self.display_scale)
    }
}

/// Round to an integer, saturating at the `i32` bounds.
pub fn round_to_i32(v: Decimal, rounding: Rounding) -> i32 {
    let r = v.round_dp_with_strategy(0, rounding.strategy());
    r.to_i32().unwrap_or(if r.is_sign_negative() { i32::MIN } else { i32::MAX })
}

pub fn format_decimal(v: Decimal, scale: u32, rounding: Rounding) -> String {
    let r = v.round_dp_with_strategy(scale, rounding.strategy()).normalize();
    if r.is_zero() {
        return "0".to_string();
    }
    r.to_string()
}
