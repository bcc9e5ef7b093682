//! Numerical parameters for the simulation
//!
//! `Parameters` holds the runtime knobs the settings layer exposes:
//! - time step (simulated seconds per real second),
//! - simulation-rate multiplier on top of it,
//! - minimum frame rate below which frames are not integrated

use crate::simulation::constants::{MIN_FPS, TIME_STEP};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub time_step: f64, // simulated seconds per real second
    pub rate: f64,      // user multiplier on time_step, > 0
    pub min_fps: f32,   // frame-rate gate
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            time_step: TIME_STEP,
            rate: 1.0,
            min_fps: MIN_FPS,
        }
    }
}

impl Parameters {
    /// Time step actually handed to the integrator
    pub fn effective_time_step(&self) -> f64 {
        self.time_step * self.rate
    }

    /// Longest frame (seconds) that is still integrated
    pub fn max_frame_delta(&self) -> f32 {
        1.0 / self.min_fps
    }

    /// A frame is integrated only when it ran faster than `min_fps`
    pub fn accepts_frame(&self, frame_delta: f32) -> bool {
        frame_delta.is_finite() && frame_delta < self.max_frame_delta()
    }

    /// Multiply the rate, ignoring factors that would make it non-positive
    pub fn scale_rate(&mut self, factor: f64) {
        let rate = self.rate * factor;
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }
}
