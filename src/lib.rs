pub mod simulation;
pub mod configuration;
pub mod benchmark;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use simulation::states::{Body, System, NVec3, VectorExt};
pub use simulation::forces::{compute_acceleration, Acceleration, AccelSet, NewtonianGravity, PairwiseGravity};
pub use simulation::integrator::{Integrator, Scheme, Euler, VelocityVerlet, RungeKutta4};
pub use simulation::engine::{Engine, StepOutcome};
pub use simulation::params::Parameters;
pub use simulation::scenario::{Scenario, Appearance};

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, InitialState, ScenarioConfig};

#[cfg(feature = "viewer")]
pub use visualization::viewer::{run_viewer, DisplayScale};

pub use benchmark::benchmark::{bench_gravity, bench_schemes};
