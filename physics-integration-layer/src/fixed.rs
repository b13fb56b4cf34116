//! Q32.32 fixed-point scalar for deterministic pipelines.
//!
//! The value is an `i64` storing the real value scaled by `2^32`. Arithmetic saturates instead
//! of wrapping, and multiplication rounds to nearest.

use std::fmt;
use std::ops::{Add, Mul};

const FRAC_BITS: u32 = 32;
const ONE_RAW: i64 = 1 << FRAC_BITS;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Fix64(i64);

impl Fix64 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(ONE_RAW);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert from `f32`, rounding to the nearest representable value.
    ///
    /// `NaN` maps to zero and out-of-range values saturate.
    pub fn from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        // `as` saturates on overflow and maps infinities to the bounds.
        Self((f64::from(value) * ONE_RAW as f64).round() as i64)
    }

    pub fn to_f32(self) -> f32 {
        (self.0 as f64 / ONE_RAW as f64) as f32
    }

    pub fn half(self) -> Self {
        // Arithmetic shift rounds toward negative infinity; add the dropped bit back for
        // round-half-up on the last place.
        Self((self.0 >> 1) + (self.0 & 1))
    }
}

impl Add for Fix64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul for Fix64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let product = i128::from(self.0) * i128::from(rhs.0);
        let rounded = (product + (1_i128 << (FRAC_BITS - 1))) >> FRAC_BITS;
        Self(i64::try_from(rounded).unwrap_or(if rounded.is_negative() {
            i64::MIN
        } else {
            i64::MAX
        }))
    }
}

impl fmt::Debug for Fix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fix64({})", self.to_f32())
    }
}

impl fmt::Display for Fix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}
