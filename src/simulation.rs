//! The full scene: sail, boat, water and obstacles, advanced tick by tick.

use alloc::vec;
use alloc::vec::Vec;

use crate::boat::Boat;
use crate::cloth::ClothMesh;
use crate::collision::{Floor, Obstacle};
use crate::config::{ParamEffect, ParamValue, SimConfig};
use crate::error::SimError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver, StepReport};
use crate::query::{self, Ray};
use crate::vec::Vec3;
use crate::water::WaterField;

/// Default floor height, below the hull.
fn default_floor<F: Float>() -> Obstacle<F> {
    Obstacle::Floor(Floor::new(F::from_f32(-249.0)))
}

/// Owns every simulated object and runs the tick in a fixed order:
///
/// 1. sail forces, sail integration and the boat step (which carries the
///    locked particles along)
/// 2. obstacle collisions
/// 3. self-intersection repulsion, if enabled
/// 4. constraint passes
/// 5. position sanitizing, boat first
pub struct Simulation<F: Float> {
    config: SimConfig<F>,
    cloth: ClothMesh<F>,
    boat: Boat<F>,
    water: WaterField<F>,
    obstacles: Vec<Obstacle<F>>,
    time: F,
}

impl<F: Float> Simulation<F> {
    pub fn new(config: SimConfig<F>) -> Result<Self, SimError> {
        config.validate()?;
        let cloth = ClothMesh::from_config(&config.cloth)?;
        let boat = Boat::new(&config.boat)?;
        let water = WaterField::new(&config.water);
        Ok(Simulation {
            config,
            cloth,
            boat,
            water,
            obstacles: vec![default_floor()],
            time: F::zero(),
        })
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle<F>>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle<F>) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    /// Rebuild the sail and the boat from the current config, keeping time.
    pub fn rebuild(&mut self) -> Result<(), SimError> {
        let cloth = ClothMesh::from_config(&self.config.cloth)?;
        let boat = Boat::new(&self.config.boat)?;
        self.cloth = cloth;
        self.boat = boat;
        self.water = WaterField::new(&self.config.water);
        Ok(())
    }

    /// Change one named parameter, rebuilding when the change needs it.
    /// An invalid value leaves the simulation untouched.
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<ParamEffect, SimError> {
        let mut next = self.config.clone();
        let effect = next.set_param(name, value)?;
        next.validate()?;
        let previous = core::mem::replace(&mut self.config, next);
        self.water = WaterField::new(&self.config.water);
        if effect == ParamEffect::Rebuild {
            if let Err(e) = self.rebuild() {
                self.config = previous;
                self.water = WaterField::new(&self.config.water);
                return Err(e);
            }
        }
        Ok(effect)
    }

    /// Advance one frame of `config.timestep`, split into sub-steps.
    pub fn step(&mut self) -> StepReport<F> {
        self.step_observed(&mut NoOpStepObserver)
    }

    /// [`Simulation::step`] with an observer. The report covers the whole
    /// frame: counts are summed over sub-steps, loads are from the last one.
    pub fn step_observed<O: StepObserver<F>>(&mut self, observer: &mut O) -> StepReport<F> {
        let sub_steps = self.config.sub_steps.max(1);
        let dt = self.config.timestep / F::from_usize(sub_steps);
        let mut frame = StepReport::default();
        for _ in 0..sub_steps {
            let report = self.tick(dt, observer);
            frame.collisions += report.collisions;
            frame.self_collisions += report.self_collisions;
            frame.sanitized += report.sanitized;
            frame.translation += report.translation;
            frame.sail_force = report.sail_force;
            frame.sail_torque = report.sail_torque;
            frame.buoyant_force = report.buoyant_force;
            frame.time = report.time;
        }
        frame
    }

    /// One sub-step of `dt`.
    pub fn tick<O: StepObserver<F>>(&mut self, dt: F, observer: &mut O) -> StepReport<F> {
        let config = &self.config;
        let boat = self.boat.step_observed(&mut self.cloth, &self.water, config, self.time, dt, observer);

        let collisions = self.cloth.handle_collisions(&self.obstacles, &config.collision);
        observer.on_collisions(collisions);

        let self_collisions = if config.cloth.self_collision {
            let threshold = self.cloth.rest_distance();
            self.cloth.handle_self_intersections(threshold, config.cloth.self_collision_window)
        } else {
            0
        };

        for i in 0..config.cloth.constraint_iterations {
            self.cloth.enforce_constraints(config.cloth.constraint_mode, config.cloth.spring_stiffness);
            observer.on_constraint_iteration(i);
        }

        let limit = config.max_position_magnitude;
        let sanitized = self.boat.sanitize(limit, &mut self.cloth) + self.cloth.sanitize(limit);
        self.time = self.time + dt;

        let report = StepReport {
            time: self.time,
            sail_force: boat.sail_force,
            sail_torque: boat.sail_torque,
            buoyant_force: boat.buoyant_force,
            translation: boat.pose.translation,
            collisions,
            self_collisions,
            sanitized,
        };
        log::trace!(
            "t={} collisions={} self={} sanitized={}",
            report.time,
            collisions,
            self_collisions,
            sanitized
        );
        observer.on_step_complete(&report);
        report
    }

    /// First sail particle hit by `ray`, if any.
    pub fn pick(&self, ray: &Ray<F>) -> Option<usize> {
        query::pick(&self.cloth, ray).map(|hit| hit.particle)
    }

    /// Nudge the sail particle under `ray` by `offset`. Returns the particle
    /// moved.
    pub fn nudge(&mut self, ray: &Ray<F>, offset: Vec3<F>) -> Option<usize> {
        let index = self.pick(ray)?;
        self.cloth.displace(index, offset).ok()?;
        Some(index)
    }

    /// The water surface at the current time.
    pub fn water(&self) -> WaterField<F> {
        self.water.at_time(self.time)
    }

    pub fn config(&self) -> &SimConfig<F> { &self.config }
    pub fn cloth(&self) -> &ClothMesh<F> { &self.cloth }
    pub fn cloth_mut(&mut self) -> &mut ClothMesh<F> { &mut self.cloth }
    pub fn boat(&self) -> &Boat<F> { &self.boat }
    pub fn obstacles(&self) -> &[Obstacle<F>] { &self.obstacles }
    pub fn obstacles_mut(&mut self) -> &mut [Obstacle<F>] { &mut self.obstacles }
    pub fn time(&self) -> F { self.time }
}
