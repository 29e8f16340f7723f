//! Pairwise distance constraints between cloth particles.

use crate::config::ConstraintMode;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::length_epsilon;

/// What a link spans on the grid. Sets the rest distance multiplier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkKind {
    /// Adjacent particles, 1x.
    Structural,
    /// Diagonal neighbours, sqrt(2)x.
    Shear,
    /// Two apart along a row or column, 2x.
    Bending,
}

impl LinkKind {
    pub fn rest_multiplier<F: Float>(self) -> F {
        match self {
            LinkKind::Structural => F::one(),
            LinkKind::Shear => F::two().sqrt(),
            LinkKind::Bending => F::two(),
        }
    }
}

/// Keeps particles `a` and `b` at `rest_distance`. Indices refer into the
/// owning mesh's particle list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_distance: F,
    pub kind: LinkKind,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_distance: F, kind: LinkKind) -> Self {
        DistanceConstraint { a, b, rest_distance, kind }
    }

    /// Build a link of `kind` from the base (adjacent) rest distance.
    pub fn link(a: usize, b: usize, base_rest: F, kind: LinkKind) -> Self {
        DistanceConstraint { a, b, rest_distance: base_rest * kind.rest_multiplier(), kind }
    }

    /// Current length error, positive when stretched.
    pub fn error(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position) - self.rest_distance
    }

    /// Enforce once. `stiffness` only matters in [`ConstraintMode::SpringForce`].
    pub fn enforce(&self, particles: &mut [Particle<F>], mode: ConstraintMode, stiffness: F) {
        let delta = particles[self.b].position - particles[self.a].position;
        let len = delta.length();
        if len.is_near_zero(length_epsilon()) {
            return;
        }
        let diff = len - self.rest_distance;
        match mode {
            ConstraintMode::Positional => {
                let wa = particles[self.a].weight();
                let wb = particles[self.b].weight();
                let total = wa + wb;
                if total.is_near_zero(length_epsilon()) {
                    return; // both locked
                }
                let correction = delta.scale(diff / len);
                particles[self.a].position += correction.scale(wa / total);
                particles[self.b].position -= correction.scale(wb / total);
            }
            ConstraintMode::SpringForce => {
                let force = delta.scale(stiffness * diff / len);
                particles[self.a].add_force(force);
                particles[self.b].add_force(-force);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    fn pair(a: Vec3<f64>, b: Vec3<f64>) -> [Particle<f64>; 2] {
        [Particle::new(a, 1.0), Particle::new(b, 1.0)]
    }

    #[test]
    fn positional_splits_the_error() {
        let mut ps = pair(Vec3::zero(), Vec3::new(12.0, 0.0, 0.0));
        let c = DistanceConstraint::new(0, 1, 10.0, LinkKind::Structural);
        c.enforce(&mut ps, ConstraintMode::Positional, 0.0);
        assert!((ps[0].position.x - 1.0).abs() < 1e-12);
        assert!((ps[1].position.x - 11.0).abs() < 1e-12);
    }

    #[test]
    fn locked_end_does_not_move() {
        let mut ps = pair(Vec3::zero(), Vec3::new(12.0, 0.0, 0.0));
        ps[0].lock();
        let c = DistanceConstraint::new(0, 1, 10.0, LinkKind::Structural);
        c.enforce(&mut ps, ConstraintMode::Positional, 0.0);
        assert_eq!(ps[0].position, Vec3::zero());
        assert!((ps[1].position.x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn spring_mode_only_adds_forces() {
        let mut ps = pair(Vec3::zero(), Vec3::new(12.0, 0.0, 0.0));
        let c = DistanceConstraint::new(0, 1, 10.0, LinkKind::Structural);
        c.enforce(&mut ps, ConstraintMode::SpringForce, 3.0);
        assert_eq!(ps[0].position, Vec3::zero());
        assert!((ps[0].net_force.x - 6.0).abs() < 1e-12);
        assert!((ps[1].net_force.x + 6.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_particles_are_skipped() {
        let mut ps = pair(Vec3::zero(), Vec3::zero());
        let c = DistanceConstraint::new(0, 1, 10.0, LinkKind::Structural);
        c.enforce(&mut ps, ConstraintMode::Positional, 0.0);
        assert!(ps[1].position.is_finite());
        assert_eq!(ps[1].position, Vec3::zero());
    }

    #[test]
    fn rest_multipliers() {
        let c = DistanceConstraint::<f64>::link(0, 1, 2.0, LinkKind::Shear);
        assert!((c.rest_distance - 2.0 * 2.0f64.sqrt()).abs() < 1e-12);
        let b = DistanceConstraint::<f64>::link(0, 1, 2.0, LinkKind::Bending);
        assert_eq!(b.rest_distance, 4.0);
    }
}
