use sailsim::{
    AxisBox, ClothConfig, Obstacle, ParamEffect, ParamValue, Ray, SimConfig, SimError, Simulation, Sphere,
    StepObserver, StepReport, Vec3,
};

fn small() -> SimConfig<f64> {
    SimConfig::new().with_cloth(ClothConfig::new().with_segments(6, 6))
}

#[derive(Default)]
struct Recorder {
    phases: Vec<&'static str>,
    iterations: usize,
    reports: usize,
}

impl StepObserver<f64> for Recorder {
    fn on_forces(&mut self) {
        self.phases.push("forces");
    }
    fn on_integrate(&mut self) {
        self.phases.push("integrate");
    }
    fn on_collisions(&mut self, _resolved: usize) {
        self.phases.push("collisions");
    }
    fn on_constraint_iteration(&mut self, _iteration: usize) {
        self.iterations += 1;
    }
    fn on_step_complete(&mut self, _report: &StepReport<f64>) {
        self.reports += 1;
    }
}

#[test]
fn default_scene_stays_finite() {
    let mut sim = Simulation::new(SimConfig::<f32>::new()).unwrap();
    for _ in 0..300 {
        let report = sim.step();
        assert_eq!(report.sanitized, 0);
    }
    assert!(sim.cloth().positions().iter().all(|p| p.is_finite()));
    assert!(sim.boat().position.is_finite());
}

#[test]
fn observer_sees_phases_in_order() {
    let mut sim = Simulation::new(small().with_sub_steps(3)).unwrap();
    let mut recorder = Recorder::default();
    sim.step_observed(&mut recorder);

    assert_eq!(recorder.reports, 3);
    assert_eq!(recorder.iterations, 3 * sim.config().cloth.constraint_iterations);
    assert_eq!(&recorder.phases[..3], &["forces", "integrate", "collisions"]);
}

#[test]
fn time_advances_by_timestep_per_frame() {
    let mut sim = Simulation::new(small().with_timestep(0.02).with_sub_steps(4)).unwrap();
    let report = sim.step();
    assert!((report.time - 0.02).abs() < 1e-12);
    sim.step();
    assert!((sim.time() - 0.04).abs() < 1e-12);
}

#[test]
fn locked_particles_follow_the_boat() {
    let mut sim = Simulation::new(small()).unwrap();
    let offsets: Vec<_> = sim
        .cloth()
        .particles()
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.position - sim.boat().position)
        .collect();
    let mut config = sim.config().clone();
    config.boat.rotation_enabled = false;
    let mut sim = Simulation::new(config).unwrap();

    for _ in 0..50 {
        sim.step();
    }

    let boat = sim.boat().position;
    let now: Vec<_> = sim
        .cloth()
        .particles()
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.position - boat)
        .collect();
    for (a, b) in offsets.iter().zip(now.iter()) {
        assert!(a.distance(*b) < 1e-6);
    }
}

#[test]
fn set_param_live_and_rebuild() {
    let mut sim = Simulation::new(small()).unwrap();
    assert_eq!(sim.set_param("wind_strength", ParamValue::Number(5.0)), Ok(ParamEffect::Live));
    assert_eq!(sim.config().wind.strength, 5.0);

    let before = sim.cloth().constraint_count();
    assert_eq!(sim.set_param("bending_links", ParamValue::Flag(true)), Ok(ParamEffect::Rebuild));
    assert!(sim.cloth().constraint_count() > before);
}

#[test]
fn invalid_param_leaves_the_simulation_untouched() {
    let mut sim = Simulation::new(small()).unwrap();
    let count = sim.cloth().particle_count();
    assert_eq!(
        sim.set_param("fabric_length", ParamValue::Number(-1.0)),
        Err(SimError::InvalidRestDistance)
    );
    assert_eq!(sim.config().cloth.fabric_length, 480.0);
    assert_eq!(sim.cloth().particle_count(), count);
    assert_eq!(sim.set_param("timestep", ParamValue::Number(0.0)), Err(SimError::InvalidTimestep));
}

#[test]
fn obstacles_push_the_sail() {
    let mut sim = Simulation::new(small().with_gravity(1372.0, false)).unwrap();
    // A box swallowing the lower half of the free sail.
    let index = sim.add_obstacle(Obstacle::Box(AxisBox::new(
        Vec3::new(60.0, -200.0, -50.0),
        Vec3::new(600.0, 300.0, 50.0),
    )));
    let report = sim.step();
    assert!(report.collisions > 0);

    sim.obstacles_mut()[index].set_active(false);
    sim.add_obstacle(Obstacle::Sphere(Sphere::new(Vec3::new(10_000.0, 0.0, 0.0), 10.0)));
    let report = sim.step();
    assert_eq!(report.collisions, 0);
}

#[test]
fn nudge_moves_the_picked_particle() {
    let mut sim = Simulation::new(small().with_gravity(1372.0, false)).unwrap();
    let ray = Ray::new(Vec3::new(150.0, 200.0, 500.0), Vec3::new(0.0, 0.0, -1.0));
    let index = sim.pick(&ray).unwrap();
    let before = sim.cloth().particle(index).map(|p| p.position).unwrap();
    assert_eq!(sim.nudge(&ray, Vec3::new(0.0, 0.0, 30.0)), Some(index));
    let after = sim.cloth().particle(index).map(|p| p.position).unwrap();
    assert_eq!(after, before + Vec3::new(0.0, 0.0, 30.0));
}

#[test]
fn self_collision_reports_pairs() {
    let config = small()
        .with_gravity(1372.0, false)
        .with_cloth(ClothConfig::new().with_segments(6, 6).with_self_collision(true, None));
    let mut sim = Simulation::new(config).unwrap();
    let i = sim.cloth().index(3, 5);
    let j = sim.cloth().index(3, 6);
    let gap = sim.cloth().particle(j).map(|p| p.position).unwrap()
        - sim.cloth().particle(i).map(|p| p.position).unwrap();
    sim.cloth_mut().displace(i, gap.scale(0.99)).unwrap();
    let report = sim.step();
    assert!(report.self_collisions > 0);
}

#[test]
fn frozen_cloth_resumes_without_a_jolt() {
    let mut sim = Simulation::new(small()).unwrap();
    assert_eq!(sim.set_param("integrate", ParamValue::Flag(false)), Ok(ParamEffect::Live));
    for _ in 0..100 {
        sim.step();
    }
    assert!(sim.cloth().particles().iter().all(|p| p.net_force == Vec3::zero()));

    sim.set_param("integrate", ParamValue::Flag(true)).unwrap();
    let before = sim.cloth().positions();
    sim.step();
    let jump = sim
        .cloth()
        .positions()
        .iter()
        .zip(before.iter())
        .map(|(a, b)| a.distance(*b))
        .fold(0.0, f64::max);
    assert!(jump < 10.0, "first step after unfreezing moved {}", jump);
}
