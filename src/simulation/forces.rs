//! Force / acceleration contributors for the n-body engine
//!
//! The pairwise law lives in [`compute_acceleration`]. Acceleration sources
//! implement [`Acceleration`] and are summed by [`AccelSet`], which is what the
//! integrators call once per force sweep.

use crate::simulation::constants::{G, MIN_DISTANCE};
use crate::simulation::states::{Body, NVec3, VectorExt};

/// Gravitational acceleration felt by a body at `x` due to a mass `m_other`
/// sitting at `x_other`, using gravitational constant `g`.
///
/// Separations below [`MIN_DISTANCE`] are clamped to it, and coincident
/// positions yield a zero direction, so the result is always finite.
pub fn gravitational_pull(g: f64, x: &NVec3, x_other: &NVec3, m_other: f64) -> NVec3 {
    let mut direction = x_other - x;
    let distance = direction.norm().max(MIN_DISTANCE);

    let magnitude = g * m_other / (distance * distance);
    direction.normalize_in_place();
    direction * magnitude
}

/// Acceleration experienced by `body` due to `other` (Newton, SI units)
pub fn compute_acceleration(body: &Body, other: &Body) -> NVec3 {
    gravitational_pull(G, &body.x, &other.x, other.m)
}

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// The usual set: direct Newtonian gravity only
    pub fn gravity() -> Self {
        Self::new().with(NewtonianGravity::default())
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [NVec3]) {
        debug_assert_eq!(bodies.len(), out.len());

        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, out);
        }
    }

    /// Allocating variant of [`AccelSet::accumulate_accels`]
    pub fn accels(&self, bodies: &[Body]) -> Vec<NVec3> {
        let mut out = vec![NVec3::zeros(); bodies.len()];
        self.accumulate_accels(bodies, &mut out);
        out
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::gravity()
    }
}

/// Acceleration sources operating on a slice of bodies.
/// Implementations add their contribution into `out[i]` for each body.
///
/// The slice may be live state or a scratch copy built by an integrator
/// stage, implementations must not care which.
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]);
}

/// Direct Newtonian gravity over every ordered pair (i, j), i != j.
/// Each side of a pair is evaluated from its own perspective.
pub struct NewtonianGravity {
    pub g: f64,
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self { g: G }
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) {
        for (i, bi) in bodies.iter().enumerate() {
            let mut acc = NVec3::zeros();
            for (j, bj) in bodies.iter().enumerate() {
                if i != j {
                    acc += gravitational_pull(self.g, &bi.x, &bj.x, bj.m);
                }
            }
            out[i] += acc;
        }
    }
}

/// Newtonian gravity evaluated once per unordered pair, with the
/// equal-and-opposite contribution applied to the partner.
/// Same result as [`NewtonianGravity`] up to rounding, half the distance work.
pub struct PairwiseGravity {
    pub g: f64,
}

impl Default for PairwiseGravity {
    fn default() -> Self {
        Self { g: G }
    }
}

impl Acceleration for PairwiseGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) {
        let n = bodies.len();

        for i in 0..n {
            let bi = &bodies[i];
            for j in (i + 1)..n {
                let bj = &bodies[j];

                // unit direction i -> j scaled by G / d^2, clamped like the direct law
                let mut r = bj.x - bi.x;
                let d = r.norm().max(MIN_DISTANCE);
                let coef = self.g / (d * d);
                r.normalize_in_place();

                out[i] += r * (coef * bj.m);
                out[j] -= r * (coef * bi.m);
            }
        }
    }
}
