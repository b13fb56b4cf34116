use std::fmt::Debug;
use std::ops::{Add, Mul};

use crate::fixed::Fix64;

#[cfg(feature = "f64")]
pub type Float = f64;
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// The numeric representation used for contact response coefficients.
///
/// The rules are evaluated in whatever representation the surrounding physics pipeline uses -
/// native floating point for most engines, or a deterministic fixed-point type for lockstep
/// simulations. Everything in [`materials`](crate::materials) is generic over this trait.
pub trait ContactScalar:
    'static
    + Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Mul<Output = Self>
{
    /// Half of `self`. Used by [`CombineMode::Average`](crate::materials::CombineMode::Average).
    fn half(self) -> Self;

    /// Convert from the `f32` values scene assets are authored with.
    fn from_f32(value: f32) -> Self;

    /// Convert back to `f32`, for diagnostics and for comparisons in tests.
    fn to_f32(self) -> f32;

    fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }
}

impl ContactScalar for f32 {
    fn half(self) -> Self {
        self * 0.5
    }

    fn from_f32(value: f32) -> Self {
        value
    }

    fn to_f32(self) -> f32 {
        self
    }
}

impl ContactScalar for f64 {
    fn half(self) -> Self {
        self * 0.5
    }

    fn from_f32(value: f32) -> Self {
        value.into()
    }

    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl ContactScalar for Fix64 {
    fn half(self) -> Self {
        Fix64::half(self)
    }

    fn from_f32(value: f32) -> Self {
        Fix64::from_f32(value)
    }

    fn to_f32(self) -> f32 {
        Fix64::to_f32(self)
    }
}
