//! Step observer trait for monitoring simulation progress.

use crate::float::Float;
use crate::vec::Vec3;

/// Summary of one sub-step, handed to [`StepObserver::on_step_complete`] and
/// returned from `Simulation::step`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport<F: Float> {
    /// Simulation time after the step.
    pub time: F,
    /// Net reaction force the sail put on the boat.
    pub sail_force: Vec3<F>,
    /// Net reaction torque the sail put on the boat, about the boat position.
    pub sail_torque: Vec3<F>,
    /// Buoyant force applied to the boat.
    pub buoyant_force: Vec3<F>,
    /// Boat translation over the step.
    pub translation: Vec3<F>,
    /// Particles pushed out of an obstacle.
    pub collisions: usize,
    /// Particle pairs separated by the self-intersection pass.
    pub self_collisions: usize,
    /// Particles and boat poses reset or clamped because they ran away.
    pub sanitized: usize,
}

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor solver progress (debugging, visualization,
/// profiling). All methods have default no-op implementations.
pub trait StepObserver<F: Float> {
    /// Called after gravity, wind and lift have been accumulated on the cloth,
    /// before anything is integrated.
    fn on_forces(&mut self) {}

    /// Called after the cloth and the boat have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after obstacle collision resolution, with the number of
    /// particles that were pushed out.
    fn on_collisions(&mut self, _resolved: usize) {}

    /// Called after each constraint iteration.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when a step is fully complete.
    fn on_step_complete(&mut self, _report: &StepReport<F>) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
