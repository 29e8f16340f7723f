//! Wind and aerodynamic lift on sail faces.
//!
//! Each triangle gets a pressure force along its normal, `n (n . w)`, and a
//! lift force perpendicular to the wind on the downwind side. The lift
//! coefficient is a polynomial fit over the angle of attack in degrees; it is
//! zero below stall onset and never negative.

use crate::config::WindConfig;
use crate::float::Float;
use crate::vec::Vec3;

/// Polynomial coefficients of the lift curve, constant term first.
const LIFT_FIT: [f64; 11] = [
    28.64,
    -10.54,
    1.426,
    -0.10058,
    0.004266,
    -0.0001160,
    0.000002075,
    -2.433e-8,
    1.800e-10,
    -7.626e-13,
    1.412e-15,
];

/// Lift coefficient at `angle_degrees` angle of attack.
pub fn lift_coefficient<F: Float>(angle_degrees: F, stall_onset_degrees: F) -> F {
    if angle_degrees < stall_onset_degrees {
        return F::zero();
    }
    // Horner, highest power first.
    let d = angle_degrees;
    let poly = LIFT_FIT
        .iter()
        .rev()
        .fold(F::zero(), |acc, &c| acc * d + F::from_f64(c));
    poly.max(F::zero())
}

/// Wind velocity at `time`. The direction is fixed in the horizontal plane;
/// gusts modulate the strength sinusoidally.
pub fn wind_vector<F: Float>(config: &WindConfig<F>, time: F) -> Vec3<F> {
    let angle = config.direction_degrees.to_radians();
    let gust = F::one() + config.gust_amplitude * (config.gust_frequency * time).sin();
    Vec3::new(angle.cos(), F::zero(), angle.sin()).scale(config.strength * gust)
}

/// Angle between the wind and the face plane, in degrees, within [0, 90].
pub fn angle_of_attack<F: Float>(unit_normal: Vec3<F>, wind: Vec3<F>) -> F {
    match wind.try_normalize() {
        Some(dir) => unit_normal.dot(dir).abs().asin().to_degrees(),
        None => F::zero(),
    }
}

/// Pressure force on a face: the wind's component along the normal.
pub fn pressure_force<F: Float>(unit_normal: Vec3<F>, wind: Vec3<F>) -> Vec3<F> {
    unit_normal.scale(unit_normal.dot(wind))
}

/// Lift force on a face of `area`.
pub fn lift_force<F: Float>(
    unit_normal: Vec3<F>,
    wind: Vec3<F>,
    area: F,
    config: &WindConfig<F>,
) -> Vec3<F> {
    let Some(dir) = wind.try_normalize() else {
        return Vec3::zero();
    };
    let coefficient = lift_coefficient(angle_of_attack(unit_normal, wind), config.stall_onset_degrees);
    if coefficient <= F::zero() {
        return Vec3::zero();
    }
    let downwind = if unit_normal.dot(dir) < F::zero() { -unit_normal } else { unit_normal };
    let Some(lift_dir) = (downwind - dir.scale(downwind.dot(dir))).try_normalize() else {
        return Vec3::zero();
    };
    lift_dir.scale(config.lift_multiplier * coefficient * wind.length_sq() * area)
}
