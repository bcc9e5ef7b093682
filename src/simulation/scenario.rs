//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) or the built-in solar system and
//! produces a runtime bundle containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//! - the display table (`Appearance` per body index)
//!
//! With the `viewer` feature the bundle is a Bevy `Resource`.

use anyhow::{bail, Result};

use crate::configuration::config::{BodyConfig, InitialState, ScenarioConfig};
use crate::simulation::constants::SOLAR_SYSTEM;
use crate::simulation::engine::{Engine, StepOutcome};
use crate::simulation::forces::AccelSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};

/// Display-only attributes, index-aligned with `System::bodies`.
/// Nothing in the simulation core reads these.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub label: String,
    pub radius: f64,     // m
    pub color: [f32; 3], // linear RGB
}

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub appearance: Vec<Appearance>,
}

impl Scenario {
    /// Validate `cfg` and turn it into a runtime scenario
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        if cfg.bodies.is_empty() {
            bail!("scenario has no bodies");
        }

        let p = &cfg.parameters;
        if !(p.time_step.is_finite() && p.time_step > 0.0) {
            bail!("time_step must be positive, got {}", p.time_step);
        }
        if !(p.rate.is_finite() && p.rate > 0.0) {
            bail!("rate must be positive, got {}", p.rate);
        }
        if !(p.min_fps.is_finite() && p.min_fps > 0.0) {
            bail!("min_fps must be positive, got {}", p.min_fps);
        }

        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        let mut appearance = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            bodies.push(body_from_config(bc)?);
            appearance.push(Appearance {
                label: bc.label.clone(),
                radius: bc.radius,
                color: bc.color,
            });
        }

        let parameters = Parameters {
            time_step: p.time_step,
            rate: p.rate,
            min_fps: p.min_fps,
        };

        let engine = Engine {
            scheme: cfg.engine.integrator,
            pairwise: cfg.engine.pairwise,
        };

        let scenario = Self::assemble(engine, parameters, bodies, appearance);
        log::info!(
            "built scenario: {} bodies, integrator {}, time step {} s/s",
            scenario.system.bodies.len(),
            scenario.engine.scheme,
            scenario.parameters.time_step
        );
        Ok(scenario)
    }

    /// The nine-body solar system with default engine settings
    pub fn solar_system() -> Self {
        let bodies = SOLAR_SYSTEM
            .iter()
            .map(|s| Body::on_orbit(s.distance, s.speed, s.mass, s.inclination))
            .collect();
        let appearance = SOLAR_SYSTEM
            .iter()
            .map(|s| Appearance {
                label: s.label.to_string(),
                radius: s.radius,
                color: s.color,
            })
            .collect();

        Self::assemble(Engine::default(), Parameters::default(), bodies, appearance)
    }

    fn assemble(engine: Engine, parameters: Parameters, bodies: Vec<Body>, appearance: Vec<Appearance>) -> Self {
        let forces = engine.build_forces();
        Self {
            engine,
            parameters,
            system: System::new(bodies),
            forces,
            appearance,
        }
    }

    /// Switch between direct and pair-halved gravity
    pub fn set_pairwise(&mut self, pairwise: bool) {
        self.engine.pairwise = pairwise;
        self.forces = self.engine.build_forces();
    }

    /// Per-frame entry point for the host loop
    pub fn simulate(&mut self, frame_delta: f32) -> StepOutcome {
        let Scenario {
            engine,
            parameters,
            system,
            forces,
            ..
        } = self;

        engine.simulate(parameters, system, forces, frame_delta)
    }

    pub fn label(&self, i: usize) -> &str {
        self.appearance.get(i).map_or("", |a| a.label.as_str())
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body> {
    if !(bc.m.is_finite() && bc.m > 0.0) {
        bail!("body '{}' must have a positive mass, got {}", bc.label, bc.m);
    }

    let body = match bc.initial {
        InitialState::Cartesian { x, v } => Body::new(NVec3::from(x), NVec3::from(v), bc.m),
        InitialState::Orbit {
            distance,
            speed,
            inclination,
        } => Body::on_orbit(distance, speed, bc.m, inclination),
    };
    Ok(body)
}
