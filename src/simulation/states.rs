//! Core state types for the N-body simulation.
//!
//! - `NVec3`  : double precision 3D vector (meters, meters/second)
//! - `Body`   : point mass with position, velocity and mass
//! - `System` : the ordered body collection plus the simulated clock `t`
//!
//! Display attributes (label, radius, color) are not stored here,
//! they live in the scenario's display table keyed by body index.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Vector helpers missing from nalgebra in the exact form the integrators want
pub trait VectorExt {
    /// Normalize in place, leaving a zero-length vector untouched
    fn normalize_in_place(&mut self) -> &mut Self;

    /// Euclidean distance to `other`
    fn distance(&self, other: &Self) -> f64;
}

impl VectorExt for NVec3 {
    fn normalize_in_place(&mut self) -> &mut Self {
        // try_normalize_mut leaves the vector unchanged when norm <= 0.0
        let _ = self.try_normalize_mut(0.0);
        self
    }

    fn distance(&self, other: &Self) -> f64 {
        self.metric_distance(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec3, // position (m)
    pub v: NVec3, // velocity (m/s)
    pub m: f64,   // mass (kg), must be > 0
}

impl Body {
    pub fn new(x: NVec3, v: NVec3, m: f64) -> Self {
        Self { x, v, m }
    }

    /// Body on a circular-orbit start: `distance` meters from the origin,
    /// lifted out of the XZ plane by `inclination_deg`, moving along +Z.
    pub fn on_orbit(distance: f64, speed: f64, m: f64, inclination_deg: f64) -> Self {
        let inc = inclination_deg.to_radians();
        Self {
            x: NVec3::new(distance * inc.cos(), distance * inc.sin(), 0.0),
            v: NVec3::new(0.0, 0.0, speed),
            m,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // index-stable collection of bodies
    pub t: f64,            // simulated time (s)
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Simulated days elapsed since the start of the run
    pub fn days_passed(&self) -> f64 {
        self.t / (60.0 * 60.0 * 24.0)
    }
}
