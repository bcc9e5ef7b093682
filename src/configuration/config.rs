//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator selection and force evaluation mode
//! - [`ParametersConfig`] – time step, rate multiplier and frame-rate gate
//! - [`BodyConfig`]       – initial state and appearance of each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # "euler", "verlet" or "rk4"
//!   pairwise: false         # evaluate each unordered pair once
//!
//! parameters:
//!   time_step: 3600000.0    # simulated seconds per real second
//!   rate: 1.0               # multiplier on time_step
//!   min_fps: 10.0           # slower frames are skipped
//!
//! bodies:
//!   - label: "Sun"
//!     m: 1.988416e30
//!     radius: 6.9634e8
//!     color: [0.99, 0.98, 0.0]
//!     distance: 0.0         # orbit form
//!     speed: 0.0
//!     inclination: 0.0      # degrees
//!   - label: "Probe"
//!     m: 1000.0
//!     radius: 1.0
//!     color: [1.0, 1.0, 1.0]
//!     x: [1.0e11, 0.0, 0.0] # cartesian form
//!     v: [0.0, 0.0, 30000.0]
//! ```
//!
//! Every section except `bodies` may be omitted and falls back to the
//! defaults of the runtime types.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::simulation::integrator::Scheme;
use crate::simulation::params::Parameters;

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: Scheme, // time integrator used for advancing the system state
    pub pairwise: bool,     // `true` - one evaluation per unordered pair, `false` - every ordered pair
}

/// Numerical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub time_step: f64, // simulated seconds per real second
    pub rate: f64,      // simulation-rate multiplier
    pub min_fps: f32,   // frames below this rate are not integrated
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            time_step: p.time_step,
            rate: p.rate,
            min_fps: p.min_fps,
        }
    }
}

/// How a body's initial position and velocity are given
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum InitialState {
    /// Explicit position (m) and velocity (m/s)
    Cartesian { x: [f64; 3], v: [f64; 3] },
    /// Distance from the origin (m), orbital speed (m/s), inclination (degrees)
    Orbit {
        distance: f64,
        speed: f64,
        #[serde(default)]
        inclination: f64,
    },
}

/// Configuration for a single body's initial state and appearance
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub label: String, // shown next to the body
    pub m: f64,        // mass (kg)
    #[serde(default = "default_radius")]
    pub radius: f64, // display radius (m)
    #[serde(default = "default_color")]
    pub color: [f32; 3], // display color, linear RGB
    #[serde(flatten)]
    pub initial: InitialState,
}

fn default_radius() -> f64 {
    1.0
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // integrator selection
    #[serde(default)]
    pub parameters: ParametersConfig, // time step and gates
    pub bodies: Vec<BodyConfig>, // initial state of the system
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("invalid scenario YAML")
    }

    /// Read and parse a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg = serde_yaml::from_reader(reader).with_context(|| format!("parsing scenario {}", path.display()))?;
        Ok(cfg)
    }
}
