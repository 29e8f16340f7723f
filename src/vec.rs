//! Vector types for the simulation.

use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Guard below which a length is treated as zero.
pub(crate) fn length_epsilon<F: Float>() -> F {
    F::from_f32(1e-10)
}

/// One of the three world axes. Used by per-axis collision code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// 3D vector. `y` is up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }

    /// World up, `+y`.
    pub fn unit_y() -> Self { Vec3 { x: F::zero(), y: F::one(), z: F::zero() } }

    /// Lift from `f32` components; handy for constants.
    pub fn from_f32(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x: F::from_f32(x), y: F::from_f32(y), z: F::from_f32(z) }
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// 3D cross product.
    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns the zero vector if length is near zero.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or_else(Self::zero)
    }

    /// Normalize, or `None` for a (near) zero-length vector.
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if len.is_near_zero(length_epsilon()) || !len.is_finite() {
            None
        } else {
            Some(self.scale(F::one() / len))
        }
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    pub fn distance_sq(self, other: Self) -> F {
        (self - other).length_sq()
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }

    /// The component along `axis`.
    pub fn get(self, axis: Axis) -> F {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy of self with the `axis` component replaced.
    pub fn with(mut self, axis: Axis, value: F) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    /// Projection onto the horizontal (`xz`) plane.
    pub fn horizontal(self) -> Self {
        Vec3 { x: self.x, y: F::zero(), z: self.z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotate about a unit `axis` through the origin by `angle` radians
    /// (Rodrigues' formula).
    pub fn rotate_about(self, axis: Self, angle: F) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        self.scale(c) + axis.cross(self).scale(s) + axis.scale(axis.dot(self) * (F::one() - c))
    }

    /// Rotate about a unit `axis` passing through `pivot`.
    pub fn rotate_around(self, pivot: Self, axis: Self, angle: F) -> Self {
        pivot + (self - pivot).rotate_about(axis, angle)
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> AddAssign for Vec3<F> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<F: Float> SubAssign for Vec3<F> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

/// 2D vector, used for water-surface gradients over the `xz` plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_cross() {
        let i = Vec3::new(1.0f32, 0.0, 0.0);
        let j = Vec3::new(0.0f32, 1.0, 0.0);
        let k = i.cross(j);
        assert!((k.x - 0.0).abs() < 1e-6);
        assert!((k.y - 0.0).abs() < 1e-6);
        assert!((k.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let v = Vec3::<f32>::zero();
        assert_eq!(v.normalize(), Vec3::zero());
        assert!(v.try_normalize().is_none());
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let v = Vec3::new(1.0f64, 0.0, 0.0);
        let r = v.rotate_about(Vec3::unit_y(), core::f64::consts::FRAC_PI_2);
        // Right-handed: +x goes to -z.
        assert!(r.x.abs() < 1e-12);
        assert!((r.z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotate_around_pivot_keeps_distance() {
        let pivot = Vec3::new(1.0f64, 2.0, 3.0);
        let p = Vec3::new(4.0f64, 2.0, 3.0);
        let axis = Vec3::new(0.0, 0.0, 1.0);
        let r = p.rotate_around(pivot, axis, 0.7);
        assert!((r.distance(pivot) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn axis_accessors() {
        let v = Vec3::new(1.0f32, 2.0, 3.0);
        assert_eq!(v.get(Axis::Y), 2.0);
        assert_eq!(v.with(Axis::Z, 9.0), Vec3::new(1.0, 2.0, 9.0));
    }
}
