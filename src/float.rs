//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Trait abstracting floating-point operations needed by the simulator.
///
/// Implemented for `f32` and `f64` on top of `libm`, so the crate stays
/// `no_std`.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
    + core::fmt::Display
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Pi (~3.14159).
    fn pi() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// Arc cosine. Input is clamped to [-1, 1] first.
    fn acos(self) -> Self;
    /// Arc sine. Input is clamped to [-1, 1] first.
    fn asin(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Convert from f64. Lossy for `f32`, used for high-precision fit constants.
    fn from_f64(v: f64) -> Self;
    /// True when neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }

    /// Degrees to radians.
    fn to_radians(self) -> Self {
        self * Self::pi() / Self::from_f32(180.0)
    }

    /// Radians to degrees.
    fn to_degrees(self) -> Self {
        self * Self::from_f32(180.0) / Self::pi()
    }

    /// Convert a grid coordinate or count.
    fn from_usize(v: usize) -> Self {
        Self::from_f64(v as f64)
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f32::consts::PI }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn acos(self) -> Self { libm::acosf(Float::clamp(self, -1.0, 1.0)) }
    fn asin(self) -> Self { libm::asinf(Float::clamp(self, -1.0, 1.0)) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v }
    fn from_f64(v: f64) -> Self { v as f32 }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f64::consts::PI }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn acos(self) -> Self { libm::acos(Float::clamp(self, -1.0, 1.0)) }
    fn asin(self) -> Self { libm::asin(Float::clamp(self, -1.0, 1.0)) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn from_f64(v: f64) -> Self { v }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acos_clamps_out_of_range_input() {
        assert_eq!(Float::acos(1.5f64), 0.0);
        assert!((Float::acos(-3.0f64) - core::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn degree_round_trip() {
        let rad = 90.0f64.to_radians();
        assert!((rad - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((Float::to_degrees(rad) - 90.0).abs() < 1e-9);
    }
}
