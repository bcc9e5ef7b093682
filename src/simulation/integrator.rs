//! Fixed-step time integrators for the N-body system
//!
//! Three interchangeable strategies behind the [`Integrator`] trait, all driven
//! by an [`AccelSet`]:
//! - [`Euler`]          : semi-implicit (symplectic) Euler, one force sweep
//! - [`VelocityVerlet`] : two force sweeps, averaged old/new accelerations
//! - [`RungeKutta4`]    : classical RK4, four force sweeps on scratch states
//!
//! [`Scheme`] is the runtime selector the settings layer stores. Integrators
//! hold no state between calls, so switching scheme mid-run is always safe.
//! Masses are read once per step and treated as constant across all stages.

use clap::ValueEnum;
use serde::Deserialize;

use super::forces::AccelSet;
use super::states::{Body, NVec3};

/// One numerical method advancing positions and velocities by one step
pub trait Integrator {
    /// Human-readable name for logs and the viewer
    fn name(&self) -> &'static str;

    /// Advance `bodies` in place by `dt` simulated seconds
    fn step(&self, bodies: &mut [Body], forces: &AccelSet, dt: f64);

    /// Advance by `time_step * frame_delta`, i.e. `time_step` simulated seconds
    /// per real second for a frame that lasted `frame_delta` seconds
    fn integrate(&self, bodies: &mut [Body], forces: &AccelSet, time_step: f64, frame_delta: f32) {
        self.step(bodies, forces, time_step * f64::from(frame_delta));
    }
}

/// Which integrator the engine runs.
/// `integrator: "euler"`, `"verlet"` or `"rk4"` in scenario files
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[serde(rename = "euler")] // semi-implicit Euler, cheapest, energy wobbles at O(dt)
    #[default]
    Euler,

    #[serde(rename = "verlet")] // velocity Verlet, symplectic, two force sweeps
    Verlet,

    #[serde(rename = "rk4")] // classical 4th order Runge-Kutta, four force sweeps
    Rk4,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Euler, Scheme::Verlet, Scheme::Rk4];

    /// Resolve the selector to its strategy
    pub fn integrator(self) -> &'static dyn Integrator {
        match self {
            Scheme::Euler => &Euler,
            Scheme::Verlet => &VelocityVerlet,
            Scheme::Rk4 => &RungeKutta4,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.integrator().name())
    }
}

/// Semi-implicit Euler.
/// All accelerations are taken from the current positions first, then
/// `v += a dt` and `x += v dt` with the already-updated velocity.
pub struct Euler;

impl Integrator for Euler {
    fn name(&self) -> &'static str {
        "Euler"
    }

    fn step(&self, bodies: &mut [Body], forces: &AccelSet, dt: f64) {
        if bodies.is_empty() || dt == 0.0 {
            return;
        }

        let acc = forces.accels(bodies);

        for (b, a) in bodies.iter_mut().zip(acc.iter()) {
            b.v += a * dt;
            b.x += b.v * dt;
        }
    }
}

/// Velocity Verlet.
/// x_n+1 = x_n + v_n dt + 1/2 a_n dt^2
/// v_n+1 = v_n + 1/2 (a_n + a_n+1) dt
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn name(&self) -> &'static str {
        "Velocity Verlet"
    }

    fn step(&self, bodies: &mut [Body], forces: &AccelSet, dt: f64) {
        if bodies.is_empty() || dt == 0.0 {
            return;
        }
        let half_dt = 0.5 * dt;
        let half_dt2 = 0.5 * dt * dt;

        // a_n at x_n, kept until the velocity update
        let a_old = forces.accels(bodies);

        // Drift: full-step positions
        for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
            b.x += b.v * dt + a * half_dt2;
        }

        // a_n+1 at x_n+1
        let a_new = forces.accels(bodies);

        // Kick with the average of both accelerations
        for ((b, a0), a1) in bodies.iter_mut().zip(a_old.iter()).zip(a_new.iter()) {
            b.v += (a0 + a1) * half_dt;
        }
    }
}

/// Classical 4th order Runge-Kutta on the (position, velocity) state of
/// every body. Trial states are scratch copies, the live bodies are only
/// written by the final combination.
pub struct RungeKutta4;

/// Time derivative of the whole system state: dx/dt = v, dv/dt = a
struct Slope {
    dx: Vec<NVec3>,
    dv: Vec<NVec3>,
}

impl Slope {
    fn at(state: &[Body], forces: &AccelSet) -> Self {
        Self {
            dx: state.iter().map(|b| b.v).collect(),
            dv: forces.accels(state),
        }
    }
}

/// trial = start + h * k
fn advance(trial: &mut [Body], start: &[Body], k: &Slope, h: f64) {
    for (i, (t, s)) in trial.iter_mut().zip(start.iter()).enumerate() {
        t.x = s.x + k.dx[i] * h;
        t.v = s.v + k.dv[i] * h;
    }
}

impl Integrator for RungeKutta4 {
    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }

    fn step(&self, bodies: &mut [Body], forces: &AccelSet, dt: f64) {
        if bodies.is_empty() || dt == 0.0 {
            return;
        }
        let half_dt = 0.5 * dt;

        // Scratch state, masses copied once
        let mut trial = bodies.to_vec();

        let k1 = Slope::at(&trial, forces);

        advance(&mut trial, bodies, &k1, half_dt);
        let k2 = Slope::at(&trial, forces);

        advance(&mut trial, bodies, &k2, half_dt);
        let k3 = Slope::at(&trial, forces);

        advance(&mut trial, bodies, &k3, dt);
        let k4 = Slope::at(&trial, forces);

        // final = current + dt/6 (k1 + 2 k2 + 2 k3 + k4)
        let w = dt / 6.0;
        for (i, b) in bodies.iter_mut().enumerate() {
            b.x += (k1.dx[i] + k2.dx[i] * 2.0 + k3.dx[i] * 2.0 + k4.dx[i]) * w;
            b.v += (k1.dv[i] + k2.dv[i] * 2.0 + k3.dv[i] * 2.0 + k4.dv[i]) * w;
        }
    }
}
