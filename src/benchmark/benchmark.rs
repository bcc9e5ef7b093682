use std::time::Instant;

use crate::simulation::constants::{EARTH_SUN_DISTANCE, EARTH_MASS, SUN_MASS};
use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity, PairwiseGravity};
use crate::simulation::integrator::Scheme;
use crate::simulation::states::{Body, NVec3};

/// Deterministic cloud of `n` bodies around a central star, no rand needed
fn make_bodies(n: usize) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(n);
    bodies.push(Body::new(NVec3::zeros(), NVec3::zeros(), SUN_MASS));

    for i in 1..n {
        let i_f = i as f64;
        let x = NVec3::new(
            (i_f * 0.37).sin() * EARTH_SUN_DISTANCE,
            (i_f * 0.13).cos() * EARTH_SUN_DISTANCE * 0.1,
            (i_f * 0.07).sin() * EARTH_SUN_DISTANCE,
        );
        bodies.push(Body::new(x, NVec3::zeros(), EARTH_MASS));
    }

    bodies
}

/// Time one force sweep, direct (ordered pairs) vs pair-halved
pub fn bench_gravity() {
    println!("N,direct_ms,pairwise_ms");

    for n in [10, 50, 100, 200, 400, 800, 1600] {
        let bodies = make_bodies(n);
        let mut out = vec![NVec3::zeros(); n];

        let direct = NewtonianGravity::default();
        let pairwise = PairwiseGravity::default();

        // Warm up
        direct.acceleration(&bodies, &mut out);
        pairwise.acceleration(&bodies, &mut out);

        let t0 = Instant::now();
        direct.acceleration(&bodies, &mut out);
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        pairwise.acceleration(&bodies, &mut out);
        let ms_pairwise = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_pairwise);
    }
}

/// Time one integration step per scheme for a range of n.
/// Paste output directly into a spreadsheet to graph
pub fn bench_schemes() {
    let header: Vec<String> = Scheme::ALL.iter().map(|s| format!("{s}_ms")).collect();
    println!("N,{}", header.join(","));

    let forces = AccelSet::gravity();
    let dt = 3600.0;

    for n in (50..=1000).step_by(50) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 200 { 5 } else { 1 };
        let template = make_bodies(n);

        let mut row = Vec::with_capacity(Scheme::ALL.len());
        for scheme in Scheme::ALL {
            let integrator = scheme.integrator();
            let mut bodies = template.clone();

            let t0 = Instant::now();
            for _ in 0..steps {
                integrator.step(&mut bodies, &forces, dt);
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
            row.push(format!("{ms:.6}"));
        }

        println!("{},{}", n, row.join(","));
    }
}
