use sailsim::boat::{buoyant_force, keel_force, min_boat_inertia, min_boat_mass, submerged_area};
use sailsim::{
    AttachmentPattern, Boat, BoatConfig, BuoyancyModel, ClothConfig, ClothMesh, Hull, ParamEffect, ParamValue,
    SimConfig, Simulation, Vec3, WaterConfig, WaterField,
};

fn hull() -> Hull<f64> {
    Hull::new(140.0, 295.0, Vec3::zero(), Vec3::new(1.0, 0.0, 0.0))
}

#[test]
fn buoyancy_grows_with_depth() {
    for model in [BuoyancyModel::Flat, BuoyancyModel::Wave] {
        let f = |d: f64| buoyant_force(d, &hull(), 5e-6, 1372.0, model);
        assert_eq!(f(0.0), 0.0);
        assert!(f(0.0) < f(50.0), "{:?}", model);
        assert!(f(50.0) < f(140.0), "{:?}", model);
    }
}

#[test]
fn buoyancy_is_zero_out_of_the_water() {
    assert_eq!(buoyant_force(-10.0, &hull(), 5e-6, 1372.0, BuoyancyModel::Wave), 0.0);
    assert_eq!(submerged_area(-1.0f64, 140.0, BuoyancyModel::Flat), 0.0);
}

#[test]
fn buoyancy_is_continuous_at_the_surface() {
    let tiny = buoyant_force(1e-9, &hull(), 5e-6, 1372.0, BuoyancyModel::Wave);
    assert!(tiny >= 0.0 && tiny < 1e-6);
}

#[test]
fn keel_removes_sideways_force() {
    let f = keel_force(Vec3::new(5.0f64, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
    assert!(f.distance(Vec3::new(0.0, 0.0, 5.0)) < 1e-12);
}

#[test]
fn full_slip_keeps_the_force() {
    let f = keel_force(Vec3::new(5.0f64, -2.0, 5.0), Vec3::new(0.0, 0.0, 1.0), 1.0);
    assert_eq!(f, Vec3::new(5.0, -2.0, 5.0));
}

fn rig(model: BuoyancyModel) -> (SimConfig<f64>, Boat<f64>, ClothMesh<f64>, WaterField<f64>) {
    let config = SimConfig::new()
        .with_boat(BoatConfig::new().with_buoyancy(model))
        .with_water(WaterConfig::new().with_wave_height(0.0))
        .with_cloth(
            ClothConfig::new()
                .with_segments(4, 4)
                .with_fabric_length(200.0)
                .with_sail_size(200.0, 200.0)
                .with_attachment(AttachmentPattern::LuffAndFoot),
        );
    let boat = Boat::new(&config.boat).unwrap();
    let cloth = ClothMesh::from_config(&config.cloth).unwrap();
    let water = WaterField::new(&config.water);
    (config, boat, cloth, water)
}

#[test]
fn translation_carries_locked_particles() {
    let (config, mut boat, mut cloth, _) = rig(BuoyancyModel::Flat);
    let before: Vec<_> = cloth.particles().iter().map(|p| (p.locked, p.position)).collect();

    boat.add_force(Vec3::new(1e6, 0.0, 0.0));
    let mut boat_config = config.boat.clone();
    boat_config.rotation_enabled = false;
    let pose = boat.integrate(0.018, &boat_config, &mut cloth);

    assert!(pose.translation.x > 0.0);
    for ((locked, old), p) in before.iter().zip(cloth.particles()) {
        if *locked {
            assert!(p.position.distance(*old + pose.translation) < 1e-9);
        } else {
            assert_eq!(p.position, *old);
        }
    }
    assert_eq!(boat.net_force, Vec3::zero());
}

#[test]
fn rotation_turns_locked_particles_about_the_boat() {
    let (config, mut boat, mut cloth, _) = rig(BuoyancyModel::Flat);
    let pivot = boat.position;
    let radii: Vec<_> = cloth
        .particles()
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.position.distance(pivot))
        .collect();

    boat.add_torque(Vec3::new(0.0, 0.0, 1e7));
    let pose = boat.integrate(0.018, &config.boat, &mut cloth);

    assert!(pose.rotation_angle > 0.0);
    assert!(pose.rotation_axis.distance(Vec3::new(0.0, 0.0, 1.0)) < 1e-12);
    let after: Vec<_> = cloth
        .particles()
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.position.distance(pivot))
        .collect();
    for (a, b) in radii.iter().zip(after.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
    assert!((boat.up.length() - 1.0).abs() < 1e-12);
    assert!(boat.up.x < 0.0, "positive z torque tips up toward -x");
}

#[test]
fn righting_torque_restores_a_heeled_boat() {
    let (config, mut boat, _, water) = rig(BuoyancyModel::Flat);
    boat.up = Vec3::new(0.2, 1.0, 0.0).normalize();
    boat.apply_buoyancy(&water, &config);
    // Up leans toward +x; the torque turns it back about +z.
    assert!(boat.torque.z > 0.0);
}

#[test]
fn no_righting_torque_when_dry() {
    let (config, mut boat, _, water) = rig(BuoyancyModel::Wave);
    boat.position.y = 10_000.0;
    boat.up = Vec3::new(0.2, 1.0, 0.0).normalize();
    let force = boat.apply_buoyancy(&water, &config);
    assert_eq!(force, Vec3::zero());
    assert_eq!(boat.torque, Vec3::zero());
}

#[test]
fn gravity_is_attenuated_under_wave_buoyancy() {
    let (mut config, mut boat, _, _) = rig(BuoyancyModel::Wave);
    config.boat.gravity_attenuation = 0.5;
    boat.apply_gravity(&config);
    let expected = -config.gravity * config.boat.mass * 0.5;
    assert!((boat.net_force.y - expected).abs() < 1e-9);
}

#[test]
fn keel_blocks_yaw() {
    let (_, mut boat, _, _) = rig(BuoyancyModel::Flat);
    boat.add_torque(Vec3::new(1.0, 2.0, 3.0));
    boat.apply_keel_force(0.1);
    assert_eq!(boat.torque, Vec3::new(1.0, 0.0, 3.0));
}

#[test]
fn zero_mass_and_inertia_are_floored() {
    let (mut config, _, _, _) = rig(BuoyancyModel::Flat);
    config.boat.mass = 0.0;
    config.boat.rotational_inertia = 0.0;
    let boat = Boat::new(&config.boat).unwrap();
    assert_eq!(boat.mass, min_boat_mass());
    assert_eq!(boat.inertia, min_boat_inertia());
}

#[test]
fn mass_changes_reach_a_running_boat() {
    let (mut config, mut boat, mut cloth, water) = rig(BuoyancyModel::Flat);
    config.boat.mass = 0.0;
    boat.step(&mut cloth, &water, &config, 0.0, 0.018);
    assert_eq!(boat.mass, min_boat_mass());
    config.boat.mass = 80.0;
    boat.step(&mut cloth, &water, &config, 0.018, 0.018);
    assert_eq!(boat.mass, 80.0);
}

fn weightless_boat_run(model: BuoyancyModel) {
    let config = SimConfig::new()
        .with_cloth(ClothConfig::new().with_segments(8, 8))
        .with_boat(BoatConfig::new().with_buoyancy(model));
    let mut sim: Simulation<f64> = Simulation::new(config).unwrap();
    assert_eq!(sim.set_param("boat_mass", ParamValue::Number(0.0)), Ok(ParamEffect::Live));
    assert_eq!(sim.set_param("rotational_inertia", ParamValue::Number(0.0)), Ok(ParamEffect::Live));

    let limit = sim.config().max_position_magnitude;
    let level = sim.config().water.level;
    for _ in 0..600 {
        let report = sim.step();
        assert_eq!(report.sanitized, 0, "{:?}", model);
        let boat = sim.boat().position;
        assert!(boat.is_finite() && boat.length() < limit, "{:?}", model);
        assert!((boat.y - level).abs() < 1000.0, "{:?} boat drifted to y={}", model, boat.y);
    }
}

#[test]
fn weightless_boat_stays_afloat_flat() {
    weightless_boat_run(BuoyancyModel::Flat);
}

#[test]
fn weightless_boat_stays_afloat_wave() {
    weightless_boat_run(BuoyancyModel::Wave);
}

#[test]
fn runaway_boat_is_pulled_back_with_its_sail() {
    let (_, mut boat, mut cloth, _) = rig(BuoyancyModel::Flat);
    let offsets: Vec<_> = cloth
        .particles()
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.position - boat.position)
        .collect();

    let far = Vec3::new(0.0, 5e6, 0.0);
    boat.translate(far - boat.position, &mut cloth.locked_particles());
    boat.position = far;
    boat.previous = far;
    assert_eq!(boat.sanitize(1e6, &mut cloth), 1);
    assert!((boat.position.y - 1e6).abs() < 1e-6);
    assert_eq!(boat.previous, boat.position);

    let now: Vec<_> = cloth
        .particles()
        .iter()
        .filter(|p| p.locked)
        .map(|p| p.position - boat.position)
        .collect();
    for (a, b) in offsets.iter().zip(now.iter()) {
        assert!(a.distance(*b) < 1e-6);
    }
    assert_eq!(boat.sanitize(1e6, &mut cloth), 0);
}

#[test]
fn non_finite_boat_returns_to_its_origin() {
    let (_, mut boat, mut cloth, _) = rig(BuoyancyModel::Flat);
    boat.position = Vec3::new(f64::NAN, 0.0, 0.0);
    assert_eq!(boat.sanitize(1e6, &mut cloth), 1);
    assert_eq!(boat.position, boat.origin);
    assert!(boat.hull.points.iter().all(|p| p.is_finite()));
}

#[test]
fn boat_floats_near_the_waterline() {
    let (config, mut boat, mut cloth, water) = rig(BuoyancyModel::Flat);
    let mut t = 0.0;
    for _ in 0..2000 {
        boat.step(&mut cloth, &water, &config, t, 0.018);
        t += 0.018;
    }
    let level = config.water.level;
    // Floating: the hull is neither sunk nor flying.
    let depth = boat.submersion(level);
    assert!(depth > 0.0 && depth < 2.0 * config.boat.hull_radius, "depth {}", depth);
}

#[derive(Default)]
struct Phases(Vec<&'static str>);

impl sailsim::StepObserver<f64> for Phases {
    fn on_forces(&mut self) {
        self.0.push("forces");
    }
    fn on_integrate(&mut self) {
        self.0.push("integrate");
    }
}

#[test]
fn boat_step_reports_forces_then_integration() {
    let (config, mut boat, mut cloth, water) = rig(BuoyancyModel::Flat);
    let mut phases = Phases::default();
    boat.step_observed(&mut cloth, &water, &config, 0.0, 0.018, &mut phases);
    assert_eq!(phases.0, ["forces", "integrate"]);
}
