use solsim::simulation::constants::{EARTH_MASS, EARTH_SPEED, EARTH_SUN_DISTANCE, G, SUN_MASS};
use solsim::simulation::diagnostics::{
    barycenter, inclination, momentum, relative_energy_drift, total_energy,
};
use solsim::{
    compute_acceleration, AccelSet, Acceleration, Body, Engine, Euler, Integrator, NVec3, NewtonianGravity,
    PairwiseGravity, Parameters, RungeKutta4, Scenario, ScenarioConfig, Scheme, StepOutcome,
    System, VectorExt, VelocityVerlet,
};

/// Build a simple 2-body system separated along x-axis, at rest
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = Body::new([-dist / 2.0, 0.0, 0.0].into(), NVec3::zeros(), m1);
    let b2 = Body::new([dist / 2.0, 0.0, 0.0].into(), NVec3::zeros(), m2);
    System::new(vec![b1, b2])
}

/// Sun at the origin, Earth on its (nearly circular) orbit
pub fn earth_sun(speed: f64) -> Vec<Body> {
    vec![
        Body::new(NVec3::zeros(), NVec3::zeros(), SUN_MASS),
        Body::new(
            NVec3::new(EARTH_SUN_DISTANCE, 0.0, 0.0),
            NVec3::new(0.0, 0.0, speed),
            EARTH_MASS,
        ),
    ]
}

/// A few bodies at unrelated positions, deterministic
pub fn scattered_bodies() -> Vec<Body> {
    (0..6)
        .map(|i| {
            let f = i as f64;
            Body::new(
                NVec3::new((f * 0.37).sin(), (f * 0.13).cos(), (f * 0.71).sin()) * 1.0e11,
                NVec3::new((f * 0.5).cos(), 0.0, (f * 0.9).sin()) * 1.0e4,
                1.0e24 * (1.0 + f),
            )
        })
        .collect()
}

/// Largest relative energy drift seen while stepping `steps` times
fn max_energy_drift(integrator: &dyn Integrator, mut bodies: Vec<Body>, dt: f64, steps: usize) -> f64 {
    let forces = AccelSet::gravity();
    let e0 = total_energy(&bodies);
    let mut worst: f64 = 0.0;

    for _ in 0..steps {
        integrator.step(&mut bodies, &forces, dt);
        worst = worst.max(relative_energy_drift(e0, total_energy(&bodies)));
    }
    worst
}

fn run(integrator: &dyn Integrator, mut bodies: Vec<Body>, dt: f64, steps: usize) -> Vec<Body> {
    let forces = AccelSet::gravity();
    for _ in 0..steps {
        integrator.step(&mut bodies, &forces, dt);
    }
    bodies
}

// ==================================================================================
// Vector tests
// ==================================================================================

#[test]
fn normalize_leaves_zero_vector_untouched() {
    let mut v = NVec3::zeros();
    v.normalize_in_place();
    assert_eq!(v, NVec3::zeros());

    let mut w = NVec3::new(3.0, 0.0, 4.0);
    w.normalize_in_place();
    assert!((w.norm() - 1.0).abs() < 1e-15);
    assert!((w.x - 0.6).abs() < 1e-15 && (w.z - 0.8).abs() < 1e-15);
}

#[test]
fn distance_is_symmetric() {
    let a = NVec3::new(1.0, 2.0, 3.0);
    let b = NVec3::new(4.0, 6.0, 3.0);
    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(b.distance(&a), 5.0);
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let a = Body::new(NVec3::new(1.0, 2.0, 3.0) * 1.0e10, NVec3::zeros(), 3.0e24);
    let b = Body::new(NVec3::new(-4.0, 5.0, 0.5) * 1.0e10, NVec3::zeros(), 7.0e28);

    let acc_a = compute_acceleration(&a, &b);
    let acc_b = compute_acceleration(&b, &a);

    let fa = acc_a.norm() * a.m;
    let fb = acc_b.norm() * b.m;
    assert!(((fa - fb) / fa).abs() < 1e-12, "Force magnitudes differ: {fa} vs {fb}");

    // and opposite in direction
    let net = acc_a * a.m + acc_b * b.m;
    assert!(net.norm() < 1e-12 * fa, "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0e9, 1.0e24, 1.0e24);
    let acc = AccelSet::gravity().accels(&sys.bodies);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0e9, 1.0e24, 1.0e24);
    let sys_2r = two_body_system(2.0e9, 1.0e24, 1.0e24);
    let forces = AccelSet::gravity();

    let ratio = forces.accels(&sys_r.bodies)[0].norm() / forces.accels(&sys_2r.bodies)[0].norm();

    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_magnitude_matches_newton() {
    let bodies = earth_sun(EARTH_SPEED);
    let a = compute_acceleration(&bodies[1], &bodies[0]);
    let expected = G * SUN_MASS / (EARTH_SUN_DISTANCE * EARTH_SUN_DISTANCE);

    assert!(((a.norm() - expected) / expected).abs() < 1e-12);
    assert!(a.x < 0.0, "Earth should be pulled toward the sun");
}

#[test]
fn coincident_bodies_give_finite_acceleration() {
    let a = Body::new(NVec3::new(5.0, 5.0, 5.0), NVec3::zeros(), SUN_MASS);
    let b = Body::new(NVec3::new(5.0, 5.0, 5.0), NVec3::zeros(), SUN_MASS);

    let acc = compute_acceleration(&a, &b);
    assert!(acc.iter().all(|c| c.is_finite()), "Got non-finite acceleration {:?}", acc);
    assert_eq!(acc, NVec3::zeros());
}

#[test]
fn sub_meter_separation_is_clamped() {
    let a = Body::new(NVec3::zeros(), NVec3::zeros(), 1.0);
    let b = Body::new(NVec3::new(0.25, 0.0, 0.0), NVec3::zeros(), 1.0e10);

    let acc = compute_acceleration(&a, &b);
    // distance floor of 1 m: |a| = G m / 1^2
    let expected = G * 1.0e10;
    assert!(((acc.norm() - expected) / expected).abs() < 1e-12, "Clamp failed: {}", acc.norm());
}

#[test]
fn pairwise_gravity_matches_direct() {
    let bodies = scattered_bodies();
    let n = bodies.len();

    let mut direct = vec![NVec3::zeros(); n];
    let mut pairwise = vec![NVec3::zeros(); n];
    NewtonianGravity::default().acceleration(&bodies, &mut direct);
    PairwiseGravity::default().acceleration(&bodies, &mut pairwise);

    for (d, p) in direct.iter().zip(pairwise.iter()) {
        assert!((d - p).norm() <= 1e-12 * d.norm(), "{:?} vs {:?}", d, p);
    }
}

#[test]
fn accel_set_sums_its_terms() {
    let bodies = scattered_bodies();
    let single = AccelSet::gravity().accels(&bodies);
    let doubled = AccelSet::new()
        .with(NewtonianGravity::default())
        .with(PairwiseGravity::default())
        .accels(&bodies);

    for (s, d) in single.iter().zip(doubled.iter()) {
        assert!((d - s * 2.0).norm() <= 1e-12 * s.norm());
    }
    assert!(AccelSet::new().accels(&bodies).iter().all(|a| *a == NVec3::zeros()));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn one_euler_hour_matches_taylor_prediction() {
    let mut bodies = earth_sun(EARTH_SPEED);
    let x0 = bodies[1].x;
    let v0 = bodies[1].v;
    let a0 = compute_acceleration(&bodies[1], &bodies[0]);
    let dt = 3600.0;

    Euler.integrate(&mut bodies, &AccelSet::gravity(), dt, 1.0);

    let x1 = bodies[1].x;
    let predicted = x0 + v0 * dt + a0 * (0.5 * dt * dt);
    let rel = (x1 - predicted).norm() / predicted.norm();
    assert!(rel < 1e-4, "Euler step off by {rel:e} relative");

    // moved by roughly v dt, the sun's pull is a small correction
    let drift = x1 - x0 - v0 * dt;
    assert!(drift.norm() < 1e-3 * (v0 * dt).norm());
    assert!(drift.x < 0.0, "Correction should point toward the sun");

    // semi-implicit: position used the updated velocity
    let expected_v = v0 + a0 * dt;
    assert!((bodies[1].v - expected_v).norm() < 1e-9);
    assert!((x1 - (x0 + expected_v * dt)).norm() < 1e-3);
}

#[test]
fn verlet_and_rk4_conserve_energy() {
    let bodies = earth_sun(EARTH_SPEED);

    let verlet = max_energy_drift(&VelocityVerlet, bodies.clone(), 3600.0, 10_000);
    let rk4 = max_energy_drift(&RungeKutta4, bodies, 3600.0, 10_000);

    assert!(verlet < 1e-2, "Verlet drifted {verlet:e}");
    assert!(rk4 < 1e-2, "RK4 drifted {rk4:e}");
}

#[test]
fn euler_drifts_more_than_verlet_on_eccentric_orbit() {
    let bodies = earth_sun(0.8 * EARTH_SPEED);

    let euler = max_energy_drift(&Euler, bodies.clone(), 3600.0, 10_000);
    let verlet = max_energy_drift(&VelocityVerlet, bodies, 3600.0, 10_000);

    assert!(euler > verlet, "Euler {euler:e} should drift more than Verlet {verlet:e}");
}

#[test]
fn accuracy_ordering_against_fine_reference() {
    let bodies = earth_sun(EARTH_SPEED);
    let reference = run(&RungeKutta4, bodies.clone(), 360.0, 20_000);

    let [euler, verlet, rk4] = Scheme::ALL.map(|scheme| {
        let end = run(scheme.integrator(), bodies.clone(), 3600.0, 2_000);
        (end[1].x - reference[1].x).norm()
    });

    assert!(rk4 <= verlet, "RK4 error {rk4} > Verlet error {verlet}");
    assert!(verlet < euler, "Verlet error {verlet} >= Euler error {euler}");
}

#[test]
fn zero_step_leaves_state_bit_identical() {
    let forces = AccelSet::gravity();

    for scheme in Scheme::ALL {
        let integrator = scheme.integrator();
        let before = scattered_bodies();

        let mut bodies = before.clone();
        integrator.integrate(&mut bodies, &forces, 3600.0, 0.0);
        assert_eq!(bodies, before, "{scheme} changed state for a zero frame delta");

        integrator.integrate(&mut bodies, &forces, 0.0, 0.016);
        assert_eq!(bodies, before, "{scheme} changed state for a zero time step");
    }
}

#[test]
fn single_body_stays_put() {
    let forces = AccelSet::gravity();

    for scheme in Scheme::ALL {
        let start = vec![Body::new(NVec3::new(1.0e11, -2.0e10, 3.0), NVec3::zeros(), SUN_MASS)];
        let mut bodies = start.clone();

        for _ in 0..100 {
            scheme.integrator().step(&mut bodies, &forces, 3600.0);
        }
        assert_eq!(bodies, start, "{scheme} moved a lone body");
    }
}

#[test]
fn empty_system_is_a_no_op() {
    let forces = AccelSet::gravity();
    for scheme in Scheme::ALL {
        let mut bodies: Vec<Body> = Vec::new();
        scheme.integrator().step(&mut bodies, &forces, 3600.0);
        assert!(bodies.is_empty());
    }
}

#[test]
fn runs_are_deterministic() {
    for scheme in Scheme::ALL {
        let a = run(scheme.integrator(), scattered_bodies(), 3600.0, 500);
        let b = run(scheme.integrator(), scattered_bodies(), 3600.0, 500);
        assert_eq!(a, b, "{scheme} is not deterministic");
    }
}

#[test]
fn schemes_conserve_momentum() {
    for scheme in Scheme::ALL {
        let start = scattered_bodies();
        let p0 = momentum(&start);
        let end = run(scheme.integrator(), start, 3600.0, 200);
        let p1 = momentum(&end);

        let scale = end.iter().map(|b| b.m * b.v.norm()).sum::<f64>();
        assert!((p1 - p0).norm() < 1e-9 * scale, "{scheme} lost momentum: {:?} -> {:?}", p0, p1);
    }
}

#[test]
fn switching_scheme_mid_run_is_safe() {
    let forces = AccelSet::gravity();
    let mut bodies = earth_sun(EARTH_SPEED);
    let e0 = total_energy(&bodies);

    for (i, scheme) in Scheme::ALL.iter().cycle().take(300).enumerate() {
        scheme.integrator().integrate(&mut bodies, &forces, 3600.0, 1.0 + (i % 3) as f32);
    }

    assert!(relative_energy_drift(e0, total_energy(&bodies)) < 1e-2);
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn slow_frames_are_skipped() {
    let engine = Engine::new(Scheme::Verlet);
    let params = Parameters::default();
    let forces = AccelSet::gravity();
    let mut sys = System::new(earth_sun(EARTH_SPEED));
    let before = sys.clone();

    // 10 FPS exactly is already too slow
    assert_eq!(engine.simulate(&params, &mut sys, &forces, 0.1), StepOutcome::Skipped);
    assert_eq!(engine.simulate(&params, &mut sys, &forces, 0.5), StepOutcome::Skipped);
    assert_eq!(engine.simulate(&params, &mut sys, &forces, f32::INFINITY), StepOutcome::Skipped);
    assert_eq!(sys, before);

    let outcome = engine.simulate(&params, &mut sys, &forces, 0.05);
    assert!(outcome.stepped());
    assert_ne!(sys.bodies, before.bodies);
}

#[test]
fn simulate_uses_rate_scaled_time_step() {
    let params = Parameters {
        time_step: 3600.0,
        rate: 2.5,
        min_fps: 10.0,
    };
    let forces = AccelSet::gravity();
    let frame = 0.02_f32;

    for scheme in Scheme::ALL {
        let engine = Engine::new(scheme);
        let mut sys = System::new(earth_sun(EARTH_SPEED));
        let mut manual = earth_sun(EARTH_SPEED);

        let outcome = engine.simulate(&params, &mut sys, &forces, frame);
        scheme.integrator().integrate(&mut manual, &forces, 3600.0 * 2.5, frame);

        let expected_dt = 3600.0 * 2.5 * f64::from(frame);
        match outcome {
            StepOutcome::Stepped { dt, .. } => assert_eq!(dt, expected_dt),
            StepOutcome::Skipped => panic!("{scheme} skipped a fast frame"),
        }
        assert_eq!(sys.bodies, manual);
        assert_eq!(sys.t, expected_dt);
    }
}

#[test]
fn rate_cannot_become_non_positive() {
    let mut params = Parameters::default();
    params.scale_rate(2.0);
    assert_eq!(params.rate, 2.0);
    params.scale_rate(0.0);
    params.scale_rate(-1.0);
    params.scale_rate(f64::NAN);
    assert_eq!(params.rate, 2.0);
    assert_eq!(params.effective_time_step(), params.time_step * 2.0);
}

#[test]
fn pairwise_engine_tracks_direct_engine() {
    let params = Parameters::default();
    let mut direct = Engine::new(Scheme::Rk4);
    direct.pairwise = false;
    let mut halved = Engine::new(Scheme::Rk4);
    halved.pairwise = true;

    let mut a = System::new(scattered_bodies());
    let mut b = System::new(scattered_bodies());
    let fa = direct.build_forces();
    let fb = halved.build_forces();

    for _ in 0..50 {
        direct.simulate(&params, &mut a, &fa, 0.016);
        halved.simulate(&params, &mut b, &fb, 0.016);
    }

    for (ba, bb) in a.bodies.iter().zip(b.bodies.iter()) {
        assert!((ba.x - bb.x).norm() <= 1e-9 * ba.x.norm());
    }
}

// ==================================================================================
// Diagnostics tests
// ==================================================================================

#[test]
fn barycenter_is_mass_weighted() {
    let sys = two_body_system(4.0, 1.0, 3.0);
    // bodies at -2 and +2: (-2 * 1 + 2 * 3) / 4 = 1
    assert!((barycenter(&sys.bodies) - NVec3::new(1.0, 0.0, 0.0)).norm() < 1e-15);
    assert_eq!(barycenter(&[]), NVec3::zeros());
}

#[test]
fn inclination_reads_angle_above_plane() {
    let b = Body::on_orbit(1.0e11, 1.0, 1.0, 30.0);
    assert!((inclination(&b) - 30f64.to_radians()).abs() < 1e-12);

    let origin = Body::new(NVec3::zeros(), NVec3::zeros(), 1.0);
    assert_eq!(inclination(&origin), 0.0);
}

#[test]
fn days_passed_follows_clock() {
    let mut sys = System::new(Vec::new());
    sys.t = 3.0 * 86_400.0;
    assert_eq!(sys.days_passed(), 3.0);
}

// ==================================================================================
// Scenario / configuration tests
// ==================================================================================

const MIXED_YAML: &str = r#"
engine:
  integrator: "rk4"
  pairwise: true
parameters:
  time_step: 7200.0
  rate: 0.5
  min_fps: 20.0
bodies:
  - label: "Star"
    m: 2.0e30
    radius: 7.0e8
    color: [1.0, 1.0, 0.0]
    x: [0.0, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
  - label: "Planet"
    m: 6.0e24
    distance: 1.0e11
    speed: 30000.0
    inclination: 90.0
"#;

#[test]
fn scenario_yaml_parses_both_body_forms() {
    let cfg = ScenarioConfig::from_yaml_str(MIXED_YAML).expect("valid yaml");
    let scenario = Scenario::build_scenario(cfg).expect("valid scenario");

    assert_eq!(scenario.engine.scheme, Scheme::Rk4);
    assert!(scenario.engine.pairwise);
    assert_eq!(scenario.parameters.time_step, 7200.0);
    assert_eq!(scenario.parameters.rate, 0.5);
    assert_eq!(scenario.parameters.min_fps, 20.0);

    assert_eq!(scenario.system.bodies.len(), 2);
    assert_eq!(scenario.label(0), "Star");
    assert_eq!(scenario.label(1), "Planet");
    assert_eq!(scenario.appearance[1].color, [1.0, 1.0, 1.0]);

    // 90 degrees puts the planet on +Y
    let planet = scenario.system.bodies[1];
    assert!((planet.x - NVec3::new(0.0, 1.0e11, 0.0)).norm() < 1.0);
    assert_eq!(planet.v, NVec3::new(0.0, 0.0, 30000.0));
    assert_eq!(scenario.system.t, 0.0);
}

#[test]
fn scenario_sections_default() {
    let yaml = r#"
bodies:
  - label: "Lonely"
    m: 1.0
    x: [1.0, 2.0, 3.0]
    v: [0.0, 0.0, 0.0]
"#;
    let scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert_eq!(scenario.engine.scheme, Scheme::Euler);
    assert!(!scenario.engine.pairwise);
    assert_eq!(scenario.parameters, Parameters::default());
}

#[test]
fn scenario_rejects_bad_input() {
    let zero_mass = r#"
bodies:
  - label: "Ghost"
    m: 0.0
    x: [0.0, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
"#;
    let err = Scenario::build_scenario(ScenarioConfig::from_yaml_str(zero_mass).unwrap());
    assert!(err.is_err());

    let no_bodies = "bodies: []";
    assert!(Scenario::build_scenario(ScenarioConfig::from_yaml_str(no_bodies).unwrap()).is_err());

    let bad_step = r#"
parameters:
  time_step: -1.0
bodies:
  - label: "A"
    m: 1.0
    distance: 1.0
    speed: 0.0
"#;
    assert!(Scenario::build_scenario(ScenarioConfig::from_yaml_str(bad_step).unwrap()).is_err());

    assert!(ScenarioConfig::from_yaml_str("engine:\n  integrator: \"leapfrog\"\nbodies: []").is_err());
}

#[test]
fn shipped_scenarios_load() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");

    for (file, bodies) in [("earth_sun.yaml", 2), ("earth_two_moons.yaml", 3), ("solar_system.yaml", 9)] {
        let cfg = ScenarioConfig::load(&dir.join(file)).unwrap_or_else(|e| panic!("{file}: {e:#}"));
        let scenario = Scenario::build_scenario(cfg).unwrap_or_else(|e| panic!("{file}: {e:#}"));
        assert_eq!(scenario.system.bodies.len(), bodies, "{file}");
    }

    assert!(ScenarioConfig::load(&dir.join("missing.yaml")).is_err());
}

#[test]
fn built_in_solar_system() {
    let mut scenario = Scenario::solar_system();

    assert_eq!(scenario.system.bodies.len(), 9);
    assert_eq!(scenario.appearance.len(), 9);
    assert_eq!(scenario.label(0), "Sun");
    assert_eq!(scenario.system.bodies[0].x, NVec3::zeros());
    assert!(scenario.system.bodies.iter().all(|b| b.m > 0.0));

    let earth = scenario.system.bodies[1];
    assert_eq!(scenario.label(1), "Earth");
    assert_eq!(earth.x, NVec3::new(EARTH_SUN_DISTANCE, 0.0, 0.0));
    assert_eq!(earth.v, NVec3::new(0.0, 0.0, EARTH_SPEED));

    // a simulated year at 60 FPS keeps every planet bound
    let e0 = total_energy(&scenario.system.bodies);
    scenario.engine.set_scheme(Scheme::Verlet);
    while scenario.system.days_passed() < 365.0 {
        assert!(scenario.simulate(1.0 / 60.0).stepped());
    }
    assert!(relative_energy_drift(e0, total_energy(&scenario.system.bodies)) < 1e-2);
    assert!(scenario.system.bodies[1..].iter().all(|b| b.x.norm() < 1.0e13));
}
