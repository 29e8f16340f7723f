//! Verlet particles with implicit velocity.

use crate::float::Float;
use crate::vec::Vec3;

/// Smallest mass used for integration; lighter particles are floored to this.
pub fn min_mass<F: Float>() -> F {
    F::from_f32(1e-4)
}

/// A cloth particle. Velocity is implicit in `position - previous`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub previous: Vec3<F>,
    /// Rest position at construction.
    pub original: Vec3<F>,
    /// Force accumulator, cleared by every integration step.
    pub net_force: Vec3<F>,
    pub mass: F,
    /// Locked particles are driven by the rigid body, never by the solver.
    pub locked: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(position: Vec3<F>, mass: F) -> Self {
        Particle {
            position,
            previous: position,
            original: position,
            net_force: Vec3::zero(),
            mass,
            locked: false,
        }
    }

    pub fn locked(position: Vec3<F>, mass: F) -> Self {
        Particle { locked: true, ..Particle::new(position, mass) }
    }

    pub fn add_force(&mut self, force: Vec3<F>) {
        self.net_force += force;
    }

    /// Advance one Verlet step.
    ///
    /// Free particles move and return `None`. Locked particles stay put and
    /// return the force they accumulated, which is the load they pass on to
    /// whatever holds them. With `enabled == false` the particle is frozen:
    /// it keeps no velocity and the accumulated force is dropped.
    pub fn integrate(&mut self, dt: F, damping: F, enabled: bool) -> Option<Vec3<F>> {
        if !enabled {
            self.net_force = Vec3::zero();
            self.previous = self.position;
            return None;
        }
        let force = self.net_force;
        self.net_force = Vec3::zero();
        if self.locked {
            self.previous = self.position;
            return Some(force);
        }
        let mass = self.effective_mass();
        let velocity = (self.position - self.previous).scale(F::one() - damping);
        let next = self.position + velocity + force.scale(dt * dt / mass);
        self.previous = self.position;
        self.position = next;
        None
    }

    /// Mass used by the integrator, floored at [`min_mass`].
    pub fn effective_mass(&self) -> F {
        if self.mass.is_finite() && self.mass >= min_mass() {
            self.mass
        } else {
            min_mass()
        }
    }

    /// Inverse-mass weight for positional corrections; zero when locked.
    pub fn weight(&self) -> F {
        if self.locked { F::zero() } else { F::one() }
    }

    /// Displacement over the last step.
    pub fn velocity_raw(&self) -> Vec3<F> {
        self.position - self.previous
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.previous = self.position;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        self.previous = self.position;
    }

    /// Snap back to the rest position with zero velocity.
    pub fn lock_to_original(&mut self) {
        self.position = self.original;
        self.previous = self.original;
    }

    /// Shift both position and history, leaving the velocity unchanged.
    pub fn translate(&mut self, delta: Vec3<F>) {
        self.position += delta;
        self.previous += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_particle_returns_its_load() {
        let mut p = Particle::locked(Vec3::new(1.0f64, 2.0, 3.0), 0.1);
        p.add_force(Vec3::new(0.0, 5.0, 0.0));
        p.add_force(Vec3::new(1.0, 0.0, 0.0));
        let load = p.integrate(0.1, 0.0, true);
        assert_eq!(load, Some(Vec3::new(1.0, 5.0, 0.0)));
        assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.net_force, Vec3::zero());
    }

    #[test]
    fn disabled_integration_freezes_and_drops_force() {
        let mut p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0);
        p.previous = Vec3::new(-1.0, 0.0, 0.0);
        p.add_force(Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(p.integrate(0.1, 0.0, false), None);
        assert_eq!(p.position, Vec3::zero());
        assert_eq!(p.velocity_raw(), Vec3::zero());
        assert_eq!(p.net_force, Vec3::zero());
    }

    #[test]
    fn zero_mass_is_floored() {
        let mut p = Particle::new(Vec3::<f64>::zero(), 0.0);
        p.add_force(Vec3::new(0.0, 1.0, 0.0));
        p.integrate(0.01, 0.0, true);
        assert!(p.position.is_finite());
        assert!(p.position.y > 0.0);
    }
}
