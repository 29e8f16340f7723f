//! Static and moving obstacles the cloth collides with.
//!
//! Collision is discrete: a particle found inside an obstacle after
//! integration is projected back out to the surface plus a small skin. If the
//! particle was still outside on the previous step, the projection is blended
//! with a "stick" position weighted by friction.

use crate::config::CollisionConfig;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Axis, Vec3};

/// Infinite horizontal plane. Particles are kept above `height`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor<F: Float> {
    pub height: F,
    pub active: bool,
}

impl<F: Float> Floor<F> {
    pub fn new(height: F) -> Self {
        Floor { height, active: true }
    }

    /// One-sided clamp on `y`. Returns whether the particle was moved.
    pub fn resolve(&self, particle: &mut Particle<F>, config: &CollisionConfig<F>) -> bool {
        if !self.active {
            return false;
        }
        let limit = self.height + config.floor_epsilon;
        if particle.position.y < limit {
            particle.position.y = limit;
            true
        } else {
            false
        }
    }
}

/// Axis-aligned box.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisBox<F: Float> {
    pub min: Vec3<F>,
    pub max: Vec3<F>,
    pub active: bool,
}

impl<F: Float> AxisBox<F> {
    pub fn new(min: Vec3<F>, max: Vec3<F>) -> Self {
        AxisBox { min, max, active: true }
    }

    pub fn contains(&self, p: Vec3<F>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Push the point out through the nearest face. Ties go to the first face
    /// checked, in the order `+x, -x, -y, -z, +y, +z`.
    fn project_out(&self, p: Vec3<F>, skin: F) -> Vec3<F> {
        let mut best = p.with(Axis::X, self.max.x + skin);
        let mut depth = self.max.x - p.x;
        let candidates = [
            (p.x - self.min.x, Axis::X, self.min.x - skin),
            (p.y - self.min.y, Axis::Y, self.min.y - skin),
            (p.z - self.min.z, Axis::Z, self.min.z - skin),
            (self.max.y - p.y, Axis::Y, self.max.y + skin),
            (self.max.z - p.z, Axis::Z, self.max.z + skin),
        ];
        for (d, axis, value) in candidates {
            if d < depth {
                depth = d;
                best = p.with(axis, value);
            }
        }
        best
    }

    pub fn resolve(&self, particle: &mut Particle<F>, config: &CollisionConfig<F>) -> bool {
        if !self.active || !self.contains(particle.position) {
            return false;
        }
        let inside = particle.position;
        let pushed = self.project_out(inside, config.box_epsilon);
        particle.position = if self.contains(particle.previous) {
            pushed
        } else {
            blend(particle.previous, pushed, config.friction)
        };
        particle.previous = inside;
        true
    }
}

/// Sphere that may be moved between steps; the motion drags touching cloth
/// along through friction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    pub previous_center: Vec3<F>,
    pub radius: F,
    pub active: bool,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Sphere { center, previous_center: center, radius, active: true }
    }

    /// Move the sphere, remembering where it was for the friction drag.
    pub fn move_to(&mut self, center: Vec3<F>) {
        self.previous_center = self.center;
        self.center = center;
    }

    pub fn resolve(&self, particle: &mut Particle<F>, config: &CollisionConfig<F>) -> bool {
        if !self.active {
            return false;
        }
        let radius_sq = self.radius * self.radius;
        let offset = particle.position - self.center;
        if offset.length_sq() >= radius_sq {
            return false;
        }
        // A particle sitting exactly on the centre is pushed straight up.
        let normal = offset.try_normalize().unwrap_or_else(Vec3::unit_y);
        let surface = self.center + normal.scale(self.radius + config.sphere_epsilon);
        let was_outside = (particle.previous - self.center).length_sq() >= radius_sq;
        let next = if was_outside {
            let dragged = particle.previous + (self.center - self.previous_center);
            blend(dragged, surface, config.friction)
        } else {
            surface
        };
        particle.previous = particle.position;
        particle.position = next;
        true
    }
}

/// Any obstacle the cloth can hit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Obstacle<F: Float> {
    Floor(Floor<F>),
    Box(AxisBox<F>),
    Sphere(Sphere<F>),
}

impl<F: Float> Obstacle<F> {
    pub fn is_active(&self) -> bool {
        match self {
            Obstacle::Floor(o) => o.active,
            Obstacle::Box(o) => o.active,
            Obstacle::Sphere(o) => o.active,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        match self {
            Obstacle::Floor(o) => o.active = active,
            Obstacle::Box(o) => o.active = active,
            Obstacle::Sphere(o) => o.active = active,
        }
    }

    /// Resolve one particle against this obstacle. Inactive obstacles and
    /// locked particles are left alone.
    pub fn resolve(&self, particle: &mut Particle<F>, config: &CollisionConfig<F>) -> bool {
        if particle.locked {
            return false;
        }
        match self {
            Obstacle::Floor(o) => o.resolve(particle, config),
            Obstacle::Box(o) => o.resolve(particle, config),
            Obstacle::Sphere(o) => o.resolve(particle, config),
        }
    }
}

/// `stick * friction + slide * (1 - friction)`.
fn blend<F: Float>(stick: Vec3<F>, slide: Vec3<F>, friction: F) -> Vec3<F> {
    stick.scale(friction) + slide.scale(F::one() - friction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CollisionConfig<f64> {
        CollisionConfig::new().with_friction(0.0)
    }

    #[test]
    fn box_pushes_through_nearest_face() {
        let b = AxisBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(100.0, 100.0, 100.0));
        let mut p = Particle::new(Vec3::new(50.0, 95.0, 50.0), 1.0);
        p.previous = p.position;
        assert!(b.resolve(&mut p, &cfg()));
        assert_eq!(p.position, Vec3::new(50.0, 110.0, 50.0));
    }

    #[test]
    fn box_friction_sticks_to_previous() {
        let b = AxisBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(100.0, 100.0, 100.0));
        let mut p = Particle::new(Vec3::new(50.0, 95.0, 50.0), 1.0);
        p.previous = Vec3::new(50.0, 120.0, 50.0);
        let config = CollisionConfig::new().with_friction(1.0);
        b.resolve(&mut p, &config);
        assert_eq!(p.position, Vec3::new(50.0, 120.0, 50.0));
        assert_eq!(p.previous, Vec3::new(50.0, 95.0, 50.0));
    }

    #[test]
    fn sphere_at_centre_goes_up() {
        let s = Sphere::new(Vec3::new(0.0, 0.0, 0.0), 10.0);
        let mut p = Particle::new(Vec3::zero(), 1.0);
        assert!(s.resolve(&mut p, &cfg()));
        assert!((p.position.y - 15.0).abs() < 1e-12);
    }

    #[test]
    fn inactive_obstacle_is_ignored() {
        let mut o = Obstacle::Floor(Floor::new(0.0f32));
        o.set_active(false);
        let mut p = Particle::new(Vec3::new(0.0, -10.0, 0.0), 1.0);
        assert!(!o.resolve(&mut p, &CollisionConfig::new()));
        assert_eq!(p.position.y, -10.0);
    }
}
