//! Configuration records for the simulator.
//!
//! Every component reads an explicit configuration value passed to its
//! constructor or per-tick call. Nothing is global, so several simulations can
//! run side by side.
//!
//! # Builder Pattern
//! ```
//! use sailsim::config::{SimConfig, ClothConfig, ConstraintMode};
//!
//! let config: SimConfig<f32> = SimConfig::new()
//!     .with_timestep(1.0 / 60.0)
//!     .with_sub_steps(2)
//!     .with_cloth(
//!         ClothConfig::new()
//!             .with_segments(10, 10)
//!             .with_constraint_mode(ConstraintMode::SpringForce),
//!     );
//! assert!(config.validate().is_ok());
//! ```

use crate::error::SimError;
use crate::float::Float;
use crate::vec::Vec3;
use alloc::string::ToString;

/// How distance constraints are enforced. One mode applies to the whole set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintMode {
    /// Move both particles directly by half of the length error.
    Positional,
    /// Apply a restoring force proportional to the length error; the force is
    /// integrated with everything else on the next step.
    SpringForce,
}

/// Which cloth particles are bound to the rigid body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachmentPattern {
    /// Nothing is locked; the cloth is free.
    None,
    /// The luff (mast edge, `u == 0`).
    Luff,
    /// The luff and the foot (boom edge, `v == h`).
    LuffAndFoot,
}

/// Buoyancy model used by the rigid body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuoyancyModel {
    /// Static waterline, rectangular hull section.
    Flat,
    /// Wave-sampled waterline, circular hull section.
    Wave,
}

/// Sail cloth configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Segments along the foot. Sets the horizontal particle spacing.
    pub width_segments: usize,
    /// Segments along the luff. The triangle has `height_segments + 1` rows.
    pub height_segments: usize,
    /// Fabric length; the base rest distance is `fabric_length / width_segments`.
    pub fabric_length: F,
    pub sail_width: F,
    pub sail_height: F,
    /// Top of the luff, where row `v == 0` sits.
    pub masthead: Vec3<F>,
    /// Rotation of the sail about the mast, in degrees.
    pub sail_angle_degrees: F,
    pub particle_mass: F,
    /// Fractional velocity loss per step, in [0, 1].
    pub damping: F,
    pub structural_links: bool,
    pub shear_links: bool,
    pub bending_links: bool,
    pub attachment: AttachmentPattern,
    pub constraint_mode: ConstraintMode,
    /// Spring constant for [`ConstraintMode::SpringForce`].
    pub spring_stiffness: F,
    /// Constraint passes per sub-step.
    pub constraint_iterations: usize,
    pub self_collision: bool,
    /// Restrict self-collision checks to particles within this many rows.
    /// `None` checks all pairs.
    pub self_collision_window: Option<usize>,
    pub wind: bool,
    pub lift: bool,
    /// Global switch; when off particles are frozen in place.
    pub integrate: bool,
}

impl<F: Float> ClothConfig<F> {
    pub fn new() -> Self {
        ClothConfig {
            width_segments: 15,
            height_segments: 15,
            fabric_length: F::from_f32(480.0),
            sail_width: F::from_f32(480.0),
            sail_height: F::from_f32(480.0),
            masthead: Vec3::from_f32(0.0, 490.0, 0.0),
            sail_angle_degrees: F::zero(),
            particle_mass: F::from_f32(0.1),
            damping: F::from_f32(0.03),
            structural_links: true,
            shear_links: true,
            bending_links: false,
            attachment: AttachmentPattern::LuffAndFoot,
            constraint_mode: ConstraintMode::Positional,
            spring_stiffness: F::from_f32(15.0),
            constraint_iterations: 4,
            self_collision: false,
            self_collision_window: None,
            wind: true,
            lift: true,
            integrate: true,
        }
    }

    /// Set the grid resolution.
    pub fn with_segments(mut self, width: usize, height: usize) -> Self {
        self.width_segments = width;
        self.height_segments = height;
        self
    }

    /// Set the fabric length used to derive the rest distance.
    pub fn with_fabric_length(mut self, fabric_length: F) -> Self {
        self.fabric_length = fabric_length;
        self
    }

    /// Set the sail width and height.
    pub fn with_sail_size(mut self, width: F, height: F) -> Self {
        self.sail_width = width;
        self.sail_height = height;
        self
    }

    /// Set the masthead position.
    pub fn with_masthead(mut self, masthead: Vec3<F>) -> Self {
        self.masthead = masthead;
        self
    }

    /// Set the sail angle about the mast, in degrees.
    pub fn with_sail_angle(mut self, degrees: F) -> Self {
        self.sail_angle_degrees = degrees;
        self
    }

    /// Set the mass of each particle.
    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Toggle interior structural, shear and bending links.
    pub fn with_links(mut self, structural: bool, shear: bool, bending: bool) -> Self {
        self.structural_links = structural;
        self.shear_links = shear;
        self.bending_links = bending;
        self
    }

    /// Set which particles are locked to the boat.
    pub fn with_attachment(mut self, attachment: AttachmentPattern) -> Self {
        self.attachment = attachment;
        self
    }

    /// Set the constraint mode.
    pub fn with_constraint_mode(mut self, mode: ConstraintMode) -> Self {
        self.constraint_mode = mode;
        self
    }

    /// Set the spring stiffness used in spring-force mode.
    pub fn with_spring_stiffness(mut self, stiffness: F) -> Self {
        self.spring_stiffness = stiffness;
        self
    }

    /// Set the number of constraint iterations.
    pub fn with_constraint_iterations(mut self, iterations: usize) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    /// Toggle self-collision, optionally limited to a row window.
    pub fn with_self_collision(mut self, enabled: bool, window: Option<usize>) -> Self {
        self.self_collision = enabled;
        self.self_collision_window = window;
        self
    }

    /// Toggle the wind and lift forces.
    pub fn with_aero(mut self, wind: bool, lift: bool) -> Self {
        self.wind = wind;
        self.lift = lift;
        self
    }

    /// Toggle particle integration. Off freezes the cloth.
    pub fn with_integration(mut self, enabled: bool) -> Self {
        self.integrate = enabled;
        self
    }

    /// Rest distance of adjacent particles.
    pub fn base_rest_distance(&self, width_segments: usize) -> F {
        self.fabric_length / F::from_usize(width_segments.max(1))
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wind and aerodynamic lift parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindConfig<F: Float> {
    pub strength: F,
    /// Direction the wind blows toward, in degrees in the `xz` plane.
    /// 0° is `+x`, 90° is `+z`.
    pub direction_degrees: F,
    /// Relative gust amplitude; strength oscillates by this fraction.
    pub gust_amplitude: F,
    /// Gust angular frequency, radians per second of simulation time.
    pub gust_frequency: F,
    /// Scale applied to the lift coefficient curve.
    pub lift_multiplier: F,
    /// Angle of attack (degrees) below which the sail produces no lift.
    pub stall_onset_degrees: F,
}

impl<F: Float> WindConfig<F> {
    pub fn new() -> Self {
        WindConfig {
            strength: F::from_f32(20.0),
            direction_degrees: F::zero(),
            gust_amplitude: F::from_f32(0.5),
            gust_frequency: F::one(),
            lift_multiplier: F::from_f32(0.0005),
            stall_onset_degrees: F::from_f32(16.0),
        }
    }

    /// Set the wind strength.
    pub fn with_strength(mut self, strength: F) -> Self {
        self.strength = strength;
        self
    }

    /// Set the wind direction, in degrees.
    pub fn with_direction(mut self, degrees: F) -> Self {
        self.direction_degrees = degrees;
        self
    }

    /// Set the gust amplitude and frequency.
    pub fn with_gust(mut self, amplitude: F, frequency: F) -> Self {
        self.gust_amplitude = amplitude;
        self.gust_frequency = frequency;
        self
    }

    /// Set the lift multiplier.
    pub fn with_lift_multiplier(mut self, multiplier: F) -> Self {
        self.lift_multiplier = multiplier;
        self
    }
}

impl<F: Float> Default for WindConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rigid body ("boat") parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoatConfig<F: Float> {
    pub mass: F,
    pub rotational_inertia: F,
    pub damping: F,
    pub angular_damping: F,
    pub hull_radius: F,
    pub hull_length: F,
    /// Initial centre of mass.
    pub origin: Vec3<F>,
    /// Heading in degrees in the `xz` plane, same convention as the wind.
    pub heading_degrees: F,
    /// Fraction of lateral force the keel lets through, in [0, 1].
    pub slip: F,
    pub buoyancy: BuoyancyModel,
    pub water_density: F,
    /// Gravity scale under [`BuoyancyModel::Wave`].
    pub gravity_attenuation: F,
    /// Righting torque per unit of buoyant force and hull radius, aligning
    /// the up axis with world up under [`BuoyancyModel::Flat`].
    pub righting_coefficient: F,
    /// Same as `righting_coefficient` but aligning with the local water
    /// normal under [`BuoyancyModel::Wave`].
    pub wave_torque: F,
    pub rotation_enabled: bool,
    pub acceleration_multiplier: F,
    pub torque_multiplier: F,
}

impl<F: Float> BoatConfig<F> {
    pub fn new() -> Self {
        BoatConfig {
            mass: F::from_f32(50.0),
            rotational_inertia: F::from_f32(100.0),
            damping: F::from_f32(0.03),
            angular_damping: F::from_f32(0.1),
            hull_radius: F::from_f32(140.0),
            hull_length: F::from_f32(295.0),
            origin: Vec3::from_f32(0.0, -109.0, 0.0),
            heading_degrees: F::zero(),
            slip: F::from_f32(0.01),
            buoyancy: BuoyancyModel::Flat,
            water_density: F::from_f32(5e-6),
            gravity_attenuation: F::one(),
            righting_coefficient: F::from_f32(0.5),
            wave_torque: F::from_f32(0.5),
            rotation_enabled: true,
            acceleration_multiplier: F::one(),
            torque_multiplier: F::from_f32(1e-3),
        }
    }

    /// Set the boat mass.
    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    /// Set the rotational inertia.
    pub fn with_rotational_inertia(mut self, inertia: F) -> Self {
        self.rotational_inertia = inertia;
        self
    }

    /// Set the linear and angular damping.
    pub fn with_damping(mut self, linear: F, angular: F) -> Self {
        self.damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Set the hull radius and length.
    pub fn with_hull(mut self, radius: F, length: F) -> Self {
        self.hull_radius = radius;
        self.hull_length = length;
        self
    }

    /// Set the starting position.
    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self
    }

    /// Set the heading, in degrees.
    pub fn with_heading(mut self, degrees: F) -> Self {
        self.heading_degrees = degrees;
        self
    }

    /// Set the fraction of sideways force the keel lets through.
    pub fn with_slip(mut self, slip: F) -> Self {
        self.slip = slip;
        self
    }

    /// Set the buoyancy model.
    pub fn with_buoyancy(mut self, model: BuoyancyModel) -> Self {
        self.buoyancy = model;
        self
    }

    /// Set the water density.
    pub fn with_water_density(mut self, density: F) -> Self {
        self.water_density = density;
        self
    }

    /// Set the gravity attenuation used by the wave model.
    pub fn with_gravity_attenuation(mut self, attenuation: F) -> Self {
        self.gravity_attenuation = attenuation;
        self
    }

    /// Set the righting coefficient used by the flat model.
    pub fn with_righting_coefficient(mut self, coefficient: F) -> Self {
        self.righting_coefficient = coefficient;
        self
    }

    /// Set the wave torque coefficient used by the wave model.
    pub fn with_wave_torque(mut self, coefficient: F) -> Self {
        self.wave_torque = coefficient;
        self
    }

    /// Toggle rotation.
    pub fn with_rotation(mut self, enabled: bool) -> Self {
        self.rotation_enabled = enabled;
        self
    }

    /// Set the acceleration and torque multipliers.
    pub fn with_multipliers(mut self, acceleration: F, torque: F) -> Self {
        self.acceleration_multiplier = acceleration;
        self.torque_multiplier = torque;
        self
    }
}

impl<F: Float> Default for BoatConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Water surface parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterConfig<F: Float> {
    /// Still-water level; the flat waterline and the wave base level.
    pub level: F,
    /// Domain extent along `x`, centred on the origin.
    pub width: F,
    /// Domain extent along `z`, centred on the origin.
    pub depth: F,
    pub wave_height: F,
    pub period_x: F,
    pub period_z: F,
    pub waves_on_x: bool,
    pub waves_on_z: bool,
    /// Phase speed of the wave train, world units per second.
    pub wave_speed: F,
}

impl<F: Float> WaterConfig<F> {
    pub fn new() -> Self {
        WaterConfig {
            level: F::from_f32(-109.0),
            width: F::from_f32(10000.0),
            depth: F::from_f32(10000.0),
            wave_height: F::from_f32(10.0),
            period_x: F::from_f32(500.0),
            period_z: F::from_f32(500.0),
            waves_on_x: true,
            waves_on_z: false,
            wave_speed: F::from_f32(50.0),
        }
    }

    /// Set the base water level.
    pub fn with_level(mut self, level: F) -> Self {
        self.level = level;
        self
    }

    /// Set the width and depth of the water domain.
    pub fn with_domain(mut self, width: F, depth: F) -> Self {
        self.width = width;
        self.depth = depth;
        self
    }

    /// Set the wave height.
    pub fn with_wave_height(mut self, height: F) -> Self {
        self.wave_height = height;
        self
    }

    /// Set the wave periods along x and z.
    pub fn with_periods(mut self, period_x: F, period_z: F) -> Self {
        self.period_x = period_x;
        self.period_z = period_z;
        self
    }

    /// Toggle waves along x and z.
    pub fn with_wave_axes(mut self, on_x: bool, on_z: bool) -> Self {
        self.waves_on_x = on_x;
        self.waves_on_z = on_z;
        self
    }

    /// Set the wave speed.
    pub fn with_wave_speed(mut self, speed: F) -> Self {
        self.wave_speed = speed;
        self
    }
}

impl<F: Float> Default for WaterConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision response parameters shared by all obstacles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionConfig<F: Float> {
    /// Friction in [0, 1]; 1 sticks a particle to a moving surface.
    pub friction: F,
    pub floor_epsilon: F,
    pub sphere_epsilon: F,
    pub box_epsilon: F,
}

impl<F: Float> CollisionConfig<F> {
    pub fn new() -> Self {
        CollisionConfig {
            friction: F::from_f32(0.9),
            floor_epsilon: F::from_f32(3.0),
            sphere_epsilon: F::from_f32(5.0),
            box_epsilon: F::from_f32(10.0),
        }
    }

    /// Set the friction factor.
    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }
}

impl<F: Float> Default for CollisionConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete parameter snapshot for one simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig<F: Float> {
    /// Frame timestep in seconds.
    pub timestep: F,
    /// Sub-steps per frame. At least 1.
    pub sub_steps: usize,
    /// Gravitational acceleration magnitude.
    pub gravity: F,
    pub gravity_enabled: bool,
    /// Positions beyond this magnitude are clamped and reported.
    pub max_position_magnitude: F,
    pub cloth: ClothConfig<F>,
    pub wind: WindConfig<F>,
    pub boat: BoatConfig<F>,
    pub water: WaterConfig<F>,
    pub collision: CollisionConfig<F>,
}

impl<F: Float> SimConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimConfig {
            timestep: F::from_f32(0.018),
            sub_steps: 1,
            gravity: F::from_f32(9.8 * 140.0),
            gravity_enabled: true,
            max_position_magnitude: F::from_f32(1e6),
            cloth: ClothConfig::new(),
            wind: WindConfig::new(),
            boat: BoatConfig::new(),
            water: WaterConfig::new(),
            collision: CollisionConfig::new(),
        }
    }

    /// Set the frame timestep.
    pub fn with_timestep(mut self, timestep: F) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the number of sub-steps.
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Set the gravity magnitude and toggle it.
    pub fn with_gravity(mut self, gravity: F, enabled: bool) -> Self {
        self.gravity = gravity;
        self.gravity_enabled = enabled;
        self
    }

    /// Set the distance past which positions are clamped.
    pub fn with_max_position_magnitude(mut self, limit: F) -> Self {
        self.max_position_magnitude = limit;
        self
    }

    /// Set the cloth configuration.
    pub fn with_cloth(mut self, cloth: ClothConfig<F>) -> Self {
        self.cloth = cloth;
        self
    }

    /// Set the wind configuration.
    pub fn with_wind(mut self, wind: WindConfig<F>) -> Self {
        self.wind = wind;
        self
    }

    /// Set the boat configuration.
    pub fn with_boat(mut self, boat: BoatConfig<F>) -> Self {
        self.boat = boat;
        self
    }

    /// Set the water configuration.
    pub fn with_water(mut self, water: WaterConfig<F>) -> Self {
        self.water = water;
        self
    }

    /// Set the collision configuration.
    pub fn with_collision(mut self, collision: CollisionConfig<F>) -> Self {
        self.collision = collision;
        self
    }

    /// Gravity magnitude if enabled, zero otherwise.
    pub fn effective_gravity(&self) -> F {
        if self.gravity_enabled { self.gravity } else { F::zero() }
    }

    /// Check values that would make the solver meaningless.
    ///
    /// Masses are not checked here: a zero mass coming from a GUI slider is
    /// floored at use instead of rejected.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.timestep.is_finite() || self.timestep <= F::zero() {
            return Err(SimError::InvalidTimestep);
        }
        let cloth = &self.cloth;
        if !cloth.fabric_length.is_finite() || cloth.fabric_length <= F::zero() {
            return Err(SimError::InvalidRestDistance);
        }
        if !cloth.sail_width.is_finite()
            || !cloth.sail_height.is_finite()
            || cloth.sail_width <= F::zero()
            || cloth.sail_height <= F::zero()
        {
            return Err(SimError::InvalidDimensions);
        }
        let boat = &self.boat;
        if !boat.hull_radius.is_finite()
            || !boat.hull_length.is_finite()
            || boat.hull_radius <= F::zero()
            || boat.hull_length <= F::zero()
        {
            return Err(SimError::InvalidHull);
        }
        Ok(())
    }

    /// Set one parameter by name, the way a parameter dashboard would.
    ///
    /// Returns whether the change applies on the next tick or needs the cloth
    /// to be rebuilt (topology and rest geometry).
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<ParamEffect, SimError> {
        use ParamEffect::{Live, Rebuild};
        let effect = match name {
            "timestep" => { self.timestep = value.number("timestep")?; Live }
            "sub_steps" => { self.sub_steps = value.count("sub_steps")?.max(1); Live }
            "gravity" => { self.gravity = value.number("gravity")?; Live }
            "gravity_enabled" => { self.gravity_enabled = value.flag("gravity_enabled")?; Live }

            "damping" => { self.cloth.damping = value.number("damping")?; Live }
            "particle_mass" => { self.cloth.particle_mass = value.number("particle_mass")?; Rebuild }
            "spring_stiffness" => { self.cloth.spring_stiffness = value.number("spring_stiffness")?; Live }
            "spring_mode" => {
                self.cloth.constraint_mode = if value.flag("spring_mode")? {
                    ConstraintMode::SpringForce
                } else {
                    ConstraintMode::Positional
                };
                Live
            }
            "constraint_iterations" => {
                self.cloth.constraint_iterations = value.count("constraint_iterations")?;
                Live
            }
            "self_collision" => { self.cloth.self_collision = value.flag("self_collision")?; Live }
            "integrate" => { self.cloth.integrate = value.flag("integrate")?; Live }
            "wind" => { self.cloth.wind = value.flag("wind")?; Live }
            "lift" => { self.cloth.lift = value.flag("lift")?; Live }
            "structural_links" => { self.cloth.structural_links = value.flag("structural_links")?; Rebuild }
            "shear_links" => { self.cloth.shear_links = value.flag("shear_links")?; Rebuild }
            "bending_links" => { self.cloth.bending_links = value.flag("bending_links")?; Rebuild }
            "fabric_length" => { self.cloth.fabric_length = value.number("fabric_length")?; Rebuild }
            "sail_angle" => { self.cloth.sail_angle_degrees = value.number("sail_angle")?; Rebuild }

            "wind_strength" => { self.wind.strength = value.number("wind_strength")?; Live }
            "wind_direction" => { self.wind.direction_degrees = value.number("wind_direction")?; Live }
            "lift_multiplier" => { self.wind.lift_multiplier = value.number("lift_multiplier")?; Live }

            "boat_mass" => { self.boat.mass = value.number("boat_mass")?; Live }
            "rotational_inertia" => { self.boat.rotational_inertia = value.number("rotational_inertia")?; Live }
            "boat_angle" => { self.boat.heading_degrees = value.number("boat_angle")?; Rebuild }
            "slip" => { self.boat.slip = value.number("slip")?; Live }
            "water_density" => { self.boat.water_density = value.number("water_density")?; Live }
            "advanced_buoyancy" => {
                self.boat.buoyancy = if value.flag("advanced_buoyancy")? {
                    BuoyancyModel::Wave
                } else {
                    BuoyancyModel::Flat
                };
                Live
            }
            "wave_torque" => { self.boat.wave_torque = value.number("wave_torque")?; Live }
            "torque_enabled" => { self.boat.rotation_enabled = value.flag("torque_enabled")?; Live }
            "torque_multiplier" => { self.boat.torque_multiplier = value.number("torque_multiplier")?; Live }
            "acceleration_multiplier" => {
                self.boat.acceleration_multiplier = value.number("acceleration_multiplier")?;
                Live
            }
            "righting_coefficient" => {
                self.boat.righting_coefficient = value.number("righting_coefficient")?;
                Live
            }

            "wave_height" => { self.water.wave_height = value.number("wave_height")?; Live }
            "wave_period_x" => { self.water.period_x = value.number("wave_period_x")?; Live }
            "wave_period_z" => { self.water.period_z = value.number("wave_period_z")?; Live }
            "waves_on_x" => { self.water.waves_on_x = value.flag("waves_on_x")?; Live }
            "waves_on_z" => { self.water.waves_on_z = value.flag("waves_on_z")?; Live }

            "friction" => { self.collision.friction = value.number("friction")?; Live }
            _ => return Err(SimError::UnknownParameter(name.to_string())),
        };
        Ok(effect)
    }
}

impl<F: Float> Default for SimConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A value for [`SimConfig::set_param`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
    Count(usize),
}

impl ParamValue {
    fn number<F: Float>(self, name: &'static str) -> Result<F, SimError> {
        match self {
            ParamValue::Number(v) => Ok(F::from_f64(v)),
            _ => Err(SimError::ParameterType { name, expected: "number" }),
        }
    }

    fn flag(self, name: &'static str) -> Result<bool, SimError> {
        match self {
            ParamValue::Flag(v) => Ok(v),
            _ => Err(SimError::ParameterType { name, expected: "boolean" }),
        }
    }

    fn count(self, name: &'static str) -> Result<usize, SimError> {
        match self {
            ParamValue::Count(v) => Ok(v),
            _ => Err(SimError::ParameterType { name, expected: "count" }),
        }
    }
}

/// What a parameter change requires from the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamEffect {
    /// Picked up on the next tick.
    Live,
    /// The cloth must be rebuilt (see `Simulation::rebuild`).
    Rebuild,
}
