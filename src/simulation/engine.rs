//! High-level runtime engine settings
//!
//! Holds the selected integration scheme and owns the per-frame entry point
//! [`Engine::simulate`]: frame-rate gate, effective step, dispatch.

use std::time::{Duration, Instant};

use crate::simulation::forces::{AccelSet, NewtonianGravity, PairwiseGravity};
use crate::simulation::integrator::Scheme;
use crate::simulation::params::Parameters;
use crate::simulation::states::System;

#[derive(Debug, Clone)]
pub struct Engine {
    pub scheme: Scheme, // euler, verlet or rk4
    pub pairwise: bool, // false = every ordered pair, true = each unordered pair once
}

/// What one call to [`Engine::simulate`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Integrated `dt` simulated seconds, taking `elapsed` wall time
    Stepped { dt: f64, elapsed: Duration },
    /// Frame was too slow to integrate safely
    Skipped,
}

impl StepOutcome {
    pub fn stepped(&self) -> bool {
        matches!(self, StepOutcome::Stepped { .. })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            pairwise: false,
        }
    }
}

impl Engine {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            ..Default::default()
        }
    }

    /// Gravity term matching the `pairwise` setting
    pub fn build_forces(&self) -> AccelSet {
        if self.pairwise {
            AccelSet::new().with(PairwiseGravity::default())
        } else {
            AccelSet::new().with(NewtonianGravity::default())
        }
    }

    pub fn set_scheme(&mut self, scheme: Scheme) {
        if self.scheme != scheme {
            log::debug!("switching integrator {} -> {}", self.scheme, scheme);
            self.scheme = scheme;
        }
    }

    /// Advance `sys` for a frame that lasted `frame_delta` real seconds.
    ///
    /// Frames at or above `1 / min_fps` seconds are skipped entirely rather
    /// than integrated with an oversized step. Otherwise the selected scheme
    /// runs with `time_step * rate` and the simulated clock moves on by
    /// `time_step * rate * frame_delta`.
    pub fn simulate(&self, params: &Parameters, sys: &mut System, forces: &AccelSet, frame_delta: f32) -> StepOutcome {
        if !params.accepts_frame(frame_delta) {
            log::trace!("frame took {frame_delta:.3} s, below {} FPS, not integrating", params.min_fps);
            return StepOutcome::Skipped;
        }

        let time_step = params.effective_time_step();
        let dt = time_step * f64::from(frame_delta);

        let t0 = Instant::now();
        self.scheme
            .integrator()
            .integrate(&mut sys.bodies, forces, time_step, frame_delta);
        let elapsed = t0.elapsed();

        sys.t += dt;

        StepOutcome::Stepped { dt, elapsed }
    }
}
