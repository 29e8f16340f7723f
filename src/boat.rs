//! The boat: a rigid body carrying the sail's locked particles.
//!
//! Translation is Verlet-integrated like a particle. Rotation keeps an
//! angular "velocity" vector whose length is the angle turned per step and
//! whose direction is the axis; it is damped and driven by torque the same
//! way position is driven by force.
//!
//! Loads come from four places each tick: the sail's reaction at its locked
//! particles, buoyancy (with a righting torque), gravity and the keel, which
//! cancels most of the sideways force.

use alloc::vec::Vec;

use crate::cloth::{ClothMesh, LockedParticles};
use crate::config::{BoatConfig, BuoyancyModel, SimConfig};
use crate::error::SimError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::vec::{length_epsilon, Vec3};
use crate::water::WaterField;

/// Points on the hull's lower half, sampled per station.
const HULL_SECTION_POINTS: usize = 7;

/// Lightest boat the integrator moves. Lighter settings are raised to this.
pub fn min_boat_mass<F: Float>() -> F {
    F::from_f32(10.0)
}

/// Smallest rotational inertia used by the angular update.
pub fn min_boat_inertia<F: Float>() -> F {
    F::from_f32(10.0)
}

/// Cylindrical hull approximation.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull<F: Float> {
    pub radius: F,
    pub length: F,
    /// Outline points in world space, moved along with the boat.
    pub points: Vec<Vec3<F>>,
}

impl<F: Float> Hull<F> {
    /// Hull centred on `center`, lying along `heading`.
    ///
    /// The outline is three half-circle sections (stern, midship, bow) below
    /// the centre line.
    pub fn new(radius: F, length: F, center: Vec3<F>, heading: Vec3<F>) -> Self {
        let up = Vec3::unit_y();
        let side = heading.cross(up).normalize();
        let mut points = Vec::with_capacity(3 * HULL_SECTION_POINTS);
        for station in [-F::half(), F::zero(), F::half()] {
            let mid = center + heading.scale(station * length);
            for k in 0..HULL_SECTION_POINTS {
                let phi = F::pi() * F::from_usize(k) / F::from_usize(HULL_SECTION_POINTS - 1);
                let offset = side.scale(phi.cos()) - up.scale(phi.sin());
                points.push(mid + offset.scale(radius));
            }
        }
        Hull { radius, length, points }
    }

    fn translate(&mut self, delta: Vec3<F>) {
        for p in self.points.iter_mut() {
            *p += delta;
        }
    }

    fn rotate(&mut self, pivot: Vec3<F>, axis: Vec3<F>, angle: F) {
        for p in self.points.iter_mut() {
            *p = p.rotate_around(pivot, axis, angle);
        }
    }
}

/// Submerged cross-section area at `depth` below the waterline.
///
/// Depth is measured from the bottom of the hull and clamped to the full
/// diameter.
pub fn submerged_area<F: Float>(depth: F, radius: F, model: BuoyancyModel) -> F {
    if depth <= F::zero() {
        return F::zero();
    }
    let d = depth.min(F::two() * radius);
    match model {
        BuoyancyModel::Flat => d * F::two() * radius,
        BuoyancyModel::Wave => {
            let theta = F::two() * (F::one() - d / radius).acos();
            F::half() * radius * radius * (theta - theta.sin())
        }
    }
}

/// Magnitude of the buoyant force, `rho * V * g`. Zero when not submerged.
pub fn buoyant_force<F: Float>(depth: F, hull: &Hull<F>, density: F, gravity: F, model: BuoyancyModel) -> F {
    submerged_area(depth, hull.radius, model) * hull.length * density * gravity
}

/// Remove `(1 - slip)` of the horizontal force across `heading`.
pub fn keel_force<F: Float>(force: Vec3<F>, heading: Vec3<F>, slip: F) -> Vec3<F> {
    let Some(forward) = heading.horizontal().try_normalize() else {
        return force;
    };
    let horizontal = force.horizontal();
    let across = horizontal - forward.scale(horizontal.dot(forward));
    force - across.scale(F::one() - slip.clamp(F::zero(), F::one()))
}

/// How the boat moved in one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseDelta<F: Float> {
    pub translation: Vec3<F>,
    /// Unit rotation axis through the boat position; zero when not rotated.
    pub rotation_axis: Vec3<F>,
    pub rotation_angle: F,
}

/// Loads and motion of one boat step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoatStep<F: Float> {
    pub pose: PoseDelta<F>,
    pub sail_force: Vec3<F>,
    pub sail_torque: Vec3<F>,
    pub buoyant_force: Vec3<F>,
}

#[derive(Clone, Debug)]
pub struct Boat<F: Float> {
    pub position: Vec3<F>,
    pub previous: Vec3<F>,
    /// Starting position.
    pub origin: Vec3<F>,
    pub heading: Vec3<F>,
    pub up: Vec3<F>,
    pub angular_velocity: Vec3<F>,
    pub net_force: Vec3<F>,
    pub torque: Vec3<F>,
    /// Mass in use, after flooring.
    pub mass: F,
    /// Rotational inertia in use, after flooring.
    pub inertia: F,
    pub hull: Hull<F>,
    requested_mass: F,
    requested_inertia: F,
}

impl<F: Float> Boat<F> {
    pub fn new(config: &BoatConfig<F>) -> Result<Self, SimError> {
        if !config.hull_radius.is_finite()
            || !config.hull_length.is_finite()
            || config.hull_radius <= F::zero()
            || config.hull_length <= F::zero()
        {
            return Err(SimError::InvalidHull);
        }
        if !config.mass.is_finite() || config.mass < F::zero() {
            return Err(SimError::InvalidMass);
        }
        let angle = config.heading_degrees.to_radians();
        let heading = Vec3::new(angle.cos(), F::zero(), angle.sin());
        Ok(Boat {
            position: config.origin,
            previous: config.origin,
            origin: config.origin,
            heading,
            up: Vec3::unit_y(),
            angular_velocity: Vec3::zero(),
            net_force: Vec3::zero(),
            torque: Vec3::zero(),
            mass: floored("mass", config.mass, min_boat_mass()),
            inertia: floored("rotational inertia", config.rotational_inertia, min_boat_inertia()),
            hull: Hull::new(config.hull_radius, config.hull_length, config.origin, heading),
            requested_mass: config.mass,
            requested_inertia: config.rotational_inertia,
        })
    }

    /// Pick up mass and inertia changes from `config`.
    fn sync_mass(&mut self, config: &BoatConfig<F>) {
        if !same(config.mass, self.requested_mass) {
            self.requested_mass = config.mass;
            self.mass = floored("mass", config.mass, min_boat_mass());
        }
        if !same(config.rotational_inertia, self.requested_inertia) {
            self.requested_inertia = config.rotational_inertia;
            self.inertia = floored("rotational inertia", config.rotational_inertia, min_boat_inertia());
        }
    }

    pub fn add_force(&mut self, force: Vec3<F>) {
        self.net_force += force;
    }

    pub fn add_torque(&mut self, torque: Vec3<F>) {
        self.torque += torque;
    }

    /// Depth of the hull bottom below `water_level`.
    pub fn submersion(&self, water_level: F) -> F {
        water_level - (self.position.y - self.hull.radius)
    }

    /// Add buoyancy and its righting torque. Returns the buoyant force.
    pub fn apply_buoyancy(&mut self, water: &WaterField<F>, config: &SimConfig<F>) -> Vec3<F> {
        let boat = &config.boat;
        let (level, target, coefficient) = match boat.buoyancy {
            BuoyancyModel::Flat => (water.base_level, Vec3::unit_y(), boat.righting_coefficient),
            BuoyancyModel::Wave => (
                water.height_at_world(self.position.x, self.position.z),
                water.normal_at_world(self.position.x, self.position.z),
                boat.wave_torque,
            ),
        };
        let magnitude = buoyant_force(
            self.submersion(level),
            &self.hull,
            boat.water_density,
            config.effective_gravity(),
            boat.buoyancy,
        );
        let force = Vec3::new(F::zero(), magnitude, F::zero());
        self.add_force(force);
        self.add_torque(self.up.cross(target).scale(coefficient * magnitude * self.hull.radius));
        force
    }

    pub fn apply_gravity(&mut self, config: &SimConfig<F>) {
        self.sync_mass(&config.boat);
        let attenuation = match config.boat.buoyancy {
            BuoyancyModel::Flat => F::one(),
            BuoyancyModel::Wave => config.boat.gravity_attenuation,
        };
        let weight = config.effective_gravity() * self.mass * attenuation;
        self.add_force(Vec3::new(F::zero(), -weight, F::zero()));
    }

    /// The keel resists sideways motion and yaw.
    pub fn apply_keel_force(&mut self, slip: F) {
        self.net_force = keel_force(self.net_force, self.heading, slip);
        self.torque.y = F::zero();
    }

    /// Move the boat, its hull and the locked particles by `delta`.
    pub fn translate(&mut self, delta: Vec3<F>, locked: &mut LockedParticles<'_, F>) {
        self.hull.translate(delta);
        locked.translate(delta);
    }

    /// Turn the hull, the locked particles and the orientation vectors by
    /// `angle` about the unit `axis` through the boat position.
    pub fn rotate(&mut self, axis: Vec3<F>, angle: F, locked: &mut LockedParticles<'_, F>) {
        let pivot = self.position;
        self.hull.rotate(pivot, axis, angle);
        locked.rotate(pivot, axis, angle);
        self.heading = self.heading.rotate_about(axis, angle).normalize();
        self.up = self.up.rotate_about(axis, angle).normalize();
    }

    /// Integrate the accumulated loads, carry the locked particles along and
    /// clear the accumulators.
    pub fn integrate(&mut self, dt: F, config: &BoatConfig<F>, cloth: &mut ClothMesh<F>) -> PoseDelta<F> {
        self.sync_mass(config);
        let mut locked = cloth.locked_particles();

        let accel = self.net_force.scale(config.acceleration_multiplier / self.mass);
        let next = self.position
            + (self.position - self.previous).scale(F::one() - config.damping)
            + accel.scale(dt * dt);
        let translation = next - self.position;
        self.previous = self.position;
        self.position = next;
        self.translate(translation, &mut locked);

        let mut pose = PoseDelta { translation, ..PoseDelta::default() };
        if config.rotation_enabled {
            self.angular_velocity = self.angular_velocity.scale(F::one() - config.angular_damping)
                + self.torque.scale(dt * dt * config.torque_multiplier / self.inertia);
            let angle = self.angular_velocity.length();
            if angle > length_epsilon() && angle.is_finite() {
                let axis = self.angular_velocity.scale(F::one() / angle);
                self.rotate(axis, angle, &mut locked);
                pose.rotation_axis = axis;
                pose.rotation_angle = angle;
            }
        } else {
            self.angular_velocity = Vec3::zero();
        }

        self.net_force = Vec3::zero();
        self.torque = Vec3::zero();
        pose
    }

    /// One full boat step: sail loads, buoyancy, gravity, keel, motion.
    pub fn step(
        &mut self,
        cloth: &mut ClothMesh<F>,
        water: &WaterField<F>,
        config: &SimConfig<F>,
        time: F,
        dt: F,
    ) -> BoatStep<F> {
        self.step_observed(cloth, water, config, time, dt, &mut NoOpStepObserver)
    }

    /// [`Boat::step`], reporting the force and integration phases to `observer`.
    pub fn step_observed<O: StepObserver<F>>(
        &mut self,
        cloth: &mut ClothMesh<F>,
        water: &WaterField<F>,
        config: &SimConfig<F>,
        time: F,
        dt: F,
        observer: &mut O,
    ) -> BoatStep<F> {
        self.net_force = Vec3::zero();
        self.torque = Vec3::zero();

        cloth.apply_forces(config, time);
        observer.on_forces();
        let (sail_force, sail_torque) = cloth.update(dt, &config.cloth, self.position);
        self.add_force(sail_force);
        self.add_torque(sail_torque);

        let buoyant_force = self.apply_buoyancy(&water.at_time(time), config);
        self.apply_gravity(config);
        self.apply_keel_force(config.boat.slip);

        let pose = self.integrate(dt, &config.boat, cloth);
        observer.on_integrate();
        log::trace!(
            "boat at ({}, {}, {}), buoyancy {}",
            self.position.x,
            self.position.y,
            self.position.z,
            buoyant_force.y
        );
        BoatStep { pose, sail_force, sail_torque, buoyant_force }
    }

    /// Reset a non-finite pose to the origin and clamp one further than
    /// `limit` from the world origin. The hull and the locked particles follow.
    /// Returns 1 when the pose was touched.
    pub fn sanitize(&mut self, limit: F, cloth: &mut ClothMesh<F>) -> usize {
        let target = if !self.position.is_finite() || !self.previous.is_finite() {
            self.origin
        } else if self.position.length() > limit {
            self.position.normalize().scale(limit)
        } else {
            return 0;
        };
        log::warn!(
            "boat pose ({}, {}, {}) ran away, moving it to ({}, {}, {})",
            self.position.x,
            self.position.y,
            self.position.z,
            target.x,
            target.y,
            target.z
        );
        if !self.heading.is_finite() || !self.up.is_finite() {
            self.heading = Vec3::new(F::one(), F::zero(), F::zero());
            self.up = Vec3::unit_y();
        }
        let delta = target - self.position;
        if delta.is_finite() {
            self.translate(delta, &mut cloth.locked_particles());
        } else {
            self.hull = Hull::new(self.hull.radius, self.hull.length, target, self.heading);
        }
        self.position = target;
        self.previous = target;
        self.angular_velocity = Vec3::zero();
        self.net_force = Vec3::zero();
        self.torque = Vec3::zero();
        1
    }
}

/// `value`, or `floor` when it is below the floor or not finite.
fn floored<F: Float>(what: &str, value: F, floor: F) -> F {
    if value.is_finite() && value >= floor {
        value
    } else {
        log::warn!("boat {} {} below minimum, using {}", what, value, floor);
        floor
    }
}

/// Equal, or both non-finite.
fn same<F: Float>(a: F, b: F) -> bool {
    a == b || (!a.is_finite() && !b.is_finite())
}
