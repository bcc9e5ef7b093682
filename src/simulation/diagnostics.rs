//! Read-only quantities derived from a body collection: energies, momentum,
//! barycenter and inclination. Used by tests, the headless runner and the
//! viewer's readouts, never by the integrators.

use crate::simulation::constants::{G, MIN_DISTANCE};
use crate::simulation::states::{Body, NVec3, VectorExt};

/// Sum of 1/2 m v^2
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}

/// Sum of -G m_i m_j / d_ij over unordered pairs, with the same distance
/// floor the force law uses
pub fn potential_energy(bodies: &[Body]) -> f64 {
    let mut pe = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let d = bi.x.distance(&bj.x).max(MIN_DISTANCE);
            pe -= G * bi.m * bj.m / d;
        }
    }
    pe
}

/// Total mechanical energy (J)
pub fn total_energy(bodies: &[Body]) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies)
}

/// |E - E0| / |E0|, or the absolute difference when E0 is zero
pub fn relative_energy_drift(e0: f64, e: f64) -> f64 {
    if e0 == 0.0 {
        (e - e0).abs()
    } else {
        ((e - e0) / e0).abs()
    }
}

/// Total linear momentum (kg m/s)
pub fn momentum(bodies: &[Body]) -> NVec3 {
    bodies.iter().fold(NVec3::zeros(), |p, b| p + b.v * b.m)
}

/// Mass-weighted mean position; the origin when there is no mass at all
pub fn barycenter(bodies: &[Body]) -> NVec3 {
    let total_mass: f64 = bodies.iter().map(|b| b.m).sum();
    if total_mass <= 0.0 {
        return NVec3::zeros();
    }

    let weighted = bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.x * b.m);
    weighted / total_mass
}

/// Angle of the body above the XZ plane seen from the origin (radians)
pub fn inclination(body: &Body) -> f64 {
    let dist = body.x.norm();
    if dist == 0.0 {
        return 0.0;
    }
    (body.x.y / dist).asin()
}
