//! Triangular sail cloth built from Verlet particles.
//!
//! Particles sit on a triangular grid: row `v` (counted down from the
//! masthead) holds the particles `u = 0..=v`, so a mesh with `h` rows below
//! the head has `(h + 1)(h + 2) / 2` particles. `u == 0` is the luff (along
//! the mast), `v == h` is the foot (along the boom) and `u == v` is the leech.
//!
//! Links come in three groups:
//! - Boundary: luff and foot (structural) and leech (shear). Always present.
//! - Interior structural and shear links, each toggled by config.
//! - Bending links two apart along a row or column, off by default.

use alloc::vec::Vec;

use crate::aero;
use crate::collision::Obstacle;
use crate::config::{AttachmentPattern, ClothConfig, CollisionConfig, ConstraintMode, SimConfig};
use crate::constraint::{DistanceConstraint, LinkKind};
use crate::error::SimError;
use crate::float::Float;
use crate::particle::{min_mass, Particle};
use crate::vec::{length_epsilon, Vec3};

/// A triangle of particle indices. Winding is consistent across the mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// Index of grid cell `(u, v)` with `u <= v`.
pub fn grid_index(u: usize, v: usize) -> usize {
    v * (v + 1) / 2 + u
}

/// Particle count of a triangle with `h` rows below the head.
pub fn particle_count_for(h: usize) -> usize {
    (h + 1) * (h + 2) / 2
}

/// Build the link list for a triangle of `h` rows below the head.
pub fn build_links<F: Float>(h: usize, base_rest: F, config: &ClothConfig<F>) -> Vec<DistanceConstraint<F>> {
    let mut links = Vec::new();
    let mut push = |a: (usize, usize), b: (usize, usize), kind: LinkKind| {
        links.push(DistanceConstraint::link(grid_index(a.0, a.1), grid_index(b.0, b.1), base_rest, kind));
    };

    // Boundary: luff, foot, leech.
    for v in 0..h {
        push((0, v), (0, v + 1), LinkKind::Structural);
    }
    for u in 0..h {
        push((u, h), (u + 1, h), LinkKind::Structural);
    }
    for v in 0..h {
        push((v, v), (v + 1, v + 1), LinkKind::Shear);
    }

    if config.structural_links {
        for v in 0..h {
            for u in 1..=v {
                push((u, v), (u, v + 1), LinkKind::Structural);
            }
            for u in 0..v {
                push((u, v), (u + 1, v), LinkKind::Structural);
            }
        }
    }

    if config.shear_links {
        for v in 0..h {
            for u in 0..v {
                push((u, v), (u + 1, v + 1), LinkKind::Shear);
                push((u + 1, v), (u, v + 1), LinkKind::Shear);
            }
        }
    }

    if config.bending_links {
        for v in 0..=h {
            if v + 2 <= h {
                for u in 0..=v {
                    push((u, v), (u, v + 2), LinkKind::Bending);
                }
            }
            for u in 0..v.saturating_sub(1) {
                push((u, v), (u + 2, v), LinkKind::Bending);
            }
        }
    }

    links
}

/// Build the face list for a triangle of `h` rows below the head.
pub fn build_faces(h: usize) -> Vec<Face> {
    let mut faces = Vec::with_capacity(h * h);
    for v in 1..=h {
        for u in 1..=v {
            faces.push(Face {
                a: grid_index(u, v),
                b: grid_index(u - 1, v),
                c: grid_index(u - 1, v - 1),
            });
            if u < v {
                faces.push(Face {
                    a: grid_index(u, v),
                    b: grid_index(u - 1, v - 1),
                    c: grid_index(u, v - 1),
                });
            }
        }
    }
    faces
}

/// The sail: particles, distance constraints and faces.
#[derive(Clone, Debug)]
pub struct ClothMesh<F: Float> {
    particles: Vec<Particle<F>>,
    constraints: Vec<DistanceConstraint<F>>,
    faces: Vec<Face>,
    /// `(u, v)` of each particle, parallel to `particles`.
    coords: Vec<(usize, usize)>,
    width_segments: usize,
    height_segments: usize,
    rest_distance: F,
}

impl<F: Float> ClothMesh<F> {
    /// Build a sail with `w` segments across and `h` rows below the head.
    ///
    /// The luff hangs straight down from `config.masthead`; rows spread out
    /// horizontally in the direction given by `config.sail_angle_degrees`.
    pub fn new(w: usize, h: usize, config: &ClothConfig<F>) -> Result<Self, SimError> {
        if !config.fabric_length.is_finite() || config.fabric_length <= F::zero() {
            return Err(SimError::InvalidRestDistance);
        }
        if !config.sail_width.is_finite()
            || !config.sail_height.is_finite()
            || config.sail_width <= F::zero()
            || config.sail_height <= F::zero()
        {
            return Err(SimError::InvalidDimensions);
        }
        if !config.particle_mass.is_finite() || config.particle_mass < F::zero() {
            return Err(SimError::InvalidMass);
        }
        let mut mass = config.particle_mass;
        if mass < min_mass() {
            log::warn!("particle mass {} below minimum, flooring to {}", mass, min_mass::<F>());
            mass = min_mass();
        }

        let rest_distance = config.base_rest_distance(w);
        let angle = config.sail_angle_degrees.to_radians();
        let across = Vec3::new(angle.cos(), F::zero(), angle.sin())
            .scale(config.sail_width / F::from_usize(w.max(1)));
        let down = Vec3::new(F::zero(), -(config.sail_height / F::from_usize(h.max(1))), F::zero());

        let count = particle_count_for(h);
        let mut particles = Vec::with_capacity(count);
        let mut coords = Vec::with_capacity(count);
        for v in 0..=h {
            for u in 0..=v {
                let position = config.masthead
                    + across.scale(F::from_usize(u))
                    + down.scale(F::from_usize(v));
                particles.push(Particle::new(position, mass));
                coords.push((u, v));
            }
        }

        let constraints = build_links(h, rest_distance, config);
        let faces = build_faces(h);
        log::debug!(
            "built sail mesh: {} particles, {} links, {} faces",
            particles.len(),
            constraints.len(),
            faces.len()
        );

        let mut mesh = ClothMesh {
            particles,
            constraints,
            faces,
            coords,
            width_segments: w,
            height_segments: h,
            rest_distance,
        };
        mesh.apply_attachment(config.attachment);
        Ok(mesh)
    }

    /// Build with the segment counts stored in `config`.
    pub fn from_config(config: &ClothConfig<F>) -> Result<Self, SimError> {
        Self::new(config.width_segments, config.height_segments, config)
    }

    pub fn index(&self, u: usize, v: usize) -> usize {
        grid_index(u, v)
    }

    fn check(&self, index: usize) -> Result<(), SimError> {
        if index < self.particles.len() {
            Ok(())
        } else {
            Err(SimError::ParticleOutOfBounds { index, count: self.particles.len() })
        }
    }

    /// Lock exactly the particles `pattern` names and free all others.
    pub fn apply_attachment(&mut self, pattern: AttachmentPattern) {
        let h = self.height_segments;
        for (p, &(u, v)) in self.particles.iter_mut().zip(self.coords.iter()) {
            let locked = match pattern {
                AttachmentPattern::None => false,
                AttachmentPattern::Luff => u == 0,
                AttachmentPattern::LuffAndFoot => u == 0 || v == h,
            };
            if locked {
                p.lock();
            } else {
                p.unlock();
            }
        }
    }

    pub fn lock(&mut self, index: usize) -> Result<(), SimError> {
        self.check(index)?;
        self.particles[index].lock();
        Ok(())
    }

    pub fn unlock(&mut self, index: usize) -> Result<(), SimError> {
        self.check(index)?;
        self.particles[index].unlock();
        Ok(())
    }

    pub fn lock_to_original(&mut self, index: usize) -> Result<(), SimError> {
        self.check(index)?;
        self.particles[index].lock_to_original();
        Ok(())
    }

    /// Shove one particle by `offset`, the way a user nudges a picked point.
    pub fn displace(&mut self, index: usize, offset: Vec3<F>) -> Result<(), SimError> {
        self.check(index)?;
        self.particles[index].position += offset;
        Ok(())
    }

    fn face_points(&self, face: &Face) -> (Vec3<F>, Vec3<F>, Vec3<F>) {
        (
            self.particles[face.a].position,
            self.particles[face.b].position,
            self.particles[face.c].position,
        )
    }

    /// Unit normal of `face`, zero when the triangle is degenerate.
    pub fn face_normal(&self, face: &Face) -> Vec3<F> {
        let (a, b, c) = self.face_points(face);
        (b - a).cross(c - a).normalize()
    }

    pub fn face_area(&self, face: &Face) -> F {
        let (a, b, c) = self.face_points(face);
        (b - a).cross(c - a).length() * F::half()
    }

    /// Accumulate gravity, wind pressure and lift for this tick.
    ///
    /// A frozen cloth (integration off) accumulates nothing.
    pub fn apply_forces(&mut self, config: &SimConfig<F>, time: F) {
        if !config.cloth.integrate {
            return;
        }
        let g = config.effective_gravity();
        if g != F::zero() {
            for p in self.particles.iter_mut() {
                let weight = -g * p.effective_mass();
                p.add_force(Vec3::new(F::zero(), weight, F::zero()));
            }
        }

        let cloth = &config.cloth;
        if !cloth.wind && !cloth.lift {
            return;
        }
        let wind = aero::wind_vector(&config.wind, time);
        let third = F::one() / F::from_f32(3.0);
        for i in 0..self.faces.len() {
            let face = self.faces[i];
            let (a, b, c) = self.face_points(&face);
            let Some(normal) = (b - a).cross(c - a).try_normalize() else {
                continue;
            };
            let mut force = Vec3::zero();
            if cloth.wind {
                force += aero::pressure_force(normal, wind);
            }
            if cloth.lift {
                force += aero::lift_force(normal, wind, self.face_area(&face), &config.wind);
            }
            let share = force.scale(third);
            self.particles[face.a].add_force(share);
            self.particles[face.b].add_force(share);
            self.particles[face.c].add_force(share);
        }
    }

    /// Integrate every particle and collect the load the locked ones pass on.
    ///
    /// Returns the total reaction force and its torque about `reference`.
    pub fn update(&mut self, dt: F, config: &ClothConfig<F>, reference: Vec3<F>) -> (Vec3<F>, Vec3<F>) {
        let mut force = Vec3::zero();
        let mut torque = Vec3::zero();
        for p in self.particles.iter_mut() {
            if let Some(load) = p.integrate(dt, config.damping, config.integrate) {
                force += load;
                torque += (p.position - reference).cross(load);
            }
        }
        (force, torque)
    }

    /// One Gauss-Seidel pass over all constraints.
    pub fn enforce_constraints(&mut self, mode: ConstraintMode, stiffness: F) {
        for c in self.constraints.iter() {
            c.enforce(&mut self.particles, mode, stiffness);
        }
    }

    /// Push apart particle pairs closer than `threshold`.
    ///
    /// With `window == None` every pair is checked. With `Some(k)` a particle
    /// is only checked against particles at most `k` rows further down, which
    /// keeps the pass close to linear for tall sails. Returns the number of
    /// pairs moved.
    pub fn handle_self_intersections(&mut self, threshold: F, window: Option<usize>) -> usize {
        let n = self.particles.len();
        let mut moved = 0;
        for i in 0..n {
            let end = match window {
                None => n,
                Some(k) => {
                    let (_, v) = self.coords[i];
                    particle_count_for(v + k).min(n)
                }
            };
            for j in (i + 1)..end {
                if separate(&mut self.particles, i, j, threshold) {
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Resolve every free particle against every active obstacle.
    pub fn handle_collisions(&mut self, obstacles: &[Obstacle<F>], config: &CollisionConfig<F>) -> usize {
        let mut hits = 0;
        for obstacle in obstacles.iter().filter(|o| o.is_active()) {
            for p in self.particles.iter_mut() {
                if obstacle.resolve(p, config) {
                    hits += 1;
                }
            }
        }
        hits
    }

    /// Reset non-finite particles and clamp runaway ones to `limit`.
    /// Returns how many particles were touched.
    pub fn sanitize(&mut self, limit: F) -> usize {
        let mut fixed = 0;
        for p in self.particles.iter_mut() {
            if !p.position.is_finite() || !p.previous.is_finite() {
                let reset = if p.previous.is_finite() { p.previous } else { p.original };
                p.position = reset;
                p.previous = reset;
                p.net_force = Vec3::zero();
                fixed += 1;
            } else if p.position.length() > limit {
                p.position = p.position.normalize().scale(limit);
                p.previous = p.position;
                fixed += 1;
            }
        }
        if fixed > 0 {
            log::warn!("sanitized {} runaway particles", fixed);
        }
        fixed
    }

    /// Mutable view over the locked particles, for the rigid body that
    /// carries them.
    pub fn locked_particles(&mut self) -> LockedParticles<'_, F> {
        LockedParticles { particles: &mut self.particles }
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle<F>> {
        self.particles.get(index)
    }

    pub fn constraints(&self) -> &[DistanceConstraint<F>] {
        &self.constraints
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn positions(&self) -> Vec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Largest absolute constraint error, a convergence measure.
    pub fn max_constraint_error(&self) -> F {
        self.constraints
            .iter()
            .map(|c| c.error(&self.particles).abs())
            .fold(F::zero(), F::max)
    }

    pub fn width_segments(&self) -> usize { self.width_segments }
    pub fn height_segments(&self) -> usize { self.height_segments }
    pub fn rest_distance(&self) -> F { self.rest_distance }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}

/// Push `i` and `j` apart to `threshold`. Locked particles don't move.
fn separate<F: Float>(particles: &mut [Particle<F>], i: usize, j: usize, threshold: F) -> bool {
    let delta = particles[i].position - particles[j].position;
    let len = delta.length();
    if len >= threshold || len.is_near_zero(length_epsilon()) {
        return false;
    }
    let wi = particles[i].weight();
    let wj = particles[j].weight();
    let total = wi + wj;
    if total.is_near_zero(length_epsilon()) {
        return false;
    }
    let push = delta.scale((threshold - len) / len);
    particles[i].position += push.scale(wi / total);
    particles[j].position -= push.scale(wj / total);
    true
}

/// The locked subset of a cloth, borrowed by whatever drives it.
pub struct LockedParticles<'a, F: Float> {
    particles: &'a mut [Particle<F>],
}

impl<'a, F: Float> LockedParticles<'a, F> {
    pub fn len(&self) -> usize {
        self.particles.iter().filter(|p| p.locked).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3<F>> + '_ {
        self.particles.iter().filter(|p| p.locked).map(|p| p.position)
    }

    pub fn translate(&mut self, delta: Vec3<F>) {
        for p in self.particles.iter_mut().filter(|p| p.locked) {
            p.translate(delta);
        }
    }

    /// Rotate about the unit `axis` through `pivot`.
    pub fn rotate(&mut self, pivot: Vec3<F>, axis: Vec3<F>, angle: F) {
        for p in self.particles.iter_mut().filter(|p| p.locked) {
            p.position = p.position.rotate_around(pivot, axis, angle);
            p.previous = p.previous.rotate_around(pivot, axis, angle);
        }
    }
}
