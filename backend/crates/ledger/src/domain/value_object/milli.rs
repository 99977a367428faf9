//! Milli-unit amounts
//!
//! Stored balances are integers scaled by 1000 relative to the display
//! currency: `Milli(2500)` is shown as `2.5`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale between stored units and display units
pub const MILLI_PER_UNIT: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milli(i64);

impl Milli {
    pub const ZERO: Milli = Milli(0);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Convert a display-unit amount (e.g. `0.5` USDT) into stored units,
    /// rounding half away from zero. Non-finite or negative input yields zero.
    pub fn from_display(amount: f64) -> Self {
        scale_non_negative(amount, MILLI_PER_UNIT as f64)
    }

    /// Value divided by 1000 for API responses
    #[inline]
    pub fn to_display(&self) -> f64 {
        self.0 as f64 / MILLI_PER_UNIT as f64
    }

    #[inline]
    pub fn saturating_add(self, other: Milli) -> Milli {
        Milli(self.0.saturating_add(other.0))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// `round(base × factor)`, clamped to `[0, i64::MAX]`.
///
/// `f64::round` rounds half away from zero; `as` saturates on overflow.
pub(crate) fn scale_non_negative(base: f64, factor: f64) -> Milli {
    let raw = (base * factor).round();
    if raw.is_nan() || raw <= 0.0 {
        Milli::ZERO
    } else {
        Milli(raw as i64)
    }
}

impl From<i64> for Milli {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Milli> for i64 {
    fn from(value: Milli) -> Self {
        value.0
    }
}

impl fmt::Display for Milli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_conversion() {
        assert_eq!(Milli::new(3).to_display(), 0.003);
        assert_eq!(Milli::new(2500).to_display(), 2.5);
        assert_eq!(Milli::from_display(0.5), Milli::new(500));
    }

    #[test]
    fn test_from_display_clamps() {
        assert_eq!(Milli::from_display(-1.0), Milli::ZERO);
        assert_eq!(Milli::from_display(f64::NAN), Milli::ZERO);
        assert_eq!(Milli::from_display(f64::INFINITY), Milli::new(i64::MAX));
    }

    #[test]
    fn test_scale_rounds_half_away_from_zero() {
        assert_eq!(scale_non_negative(2.0, 1.5), Milli::new(3));
        assert_eq!(scale_non_negative(5.0, 0.5), Milli::new(3));
        assert_eq!(scale_non_negative(3.0, 0.5), Milli::new(2));
        assert_eq!(scale_non_negative(1.0, 0.49), Milli::ZERO);
    }

    #[test]
    fn test_saturating_add() {
        assert_eq!(Milli::new(i64::MAX).saturating_add(Milli::new(1)), Milli::new(i64::MAX));
    }
}
