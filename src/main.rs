use solsim::simulation::diagnostics;
use solsim::{bench_gravity, bench_schemes};
use solsim::{Scenario, ScenarioConfig, Scheme, StepOutcome};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Solar system N-body simulation")]
struct Args {
    /// Scenario file; looked up under ./scenarios when the path does not exist.
    /// The built-in solar system is used when omitted
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Override the scenario's integrator
    #[arg(short, long, global = true)]
    integrator: Option<Scheme>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the 3D viewer (default)
    View,
    /// Advance the scenario without a window and report energy drift
    Run {
        /// Number of frames to simulate
        #[arg(long, default_value_t = 1000)]
        steps: usize,
        /// Real seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        frame_delta: f32,
    },
    /// Print step timings as CSV
    Bench,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let mut scenario = match &args.file {
        None => Scenario::solar_system(),
        Some(path) => {
            let path = if path.exists() {
                path.clone()
            } else {
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(path)
            };
            Scenario::build_scenario(ScenarioConfig::load(&path)?)?
        }
    };

    if let Some(scheme) = args.integrator {
        scenario.engine.set_scheme(scheme);
    }
    Ok(scenario)
}

fn run_headless(mut scenario: Scenario, steps: usize, frame_delta: f32) -> Result<()> {
    if !scenario.parameters.accepts_frame(frame_delta) {
        bail!(
            "frame delta {frame_delta} s is below the {} FPS gate, nothing would be integrated",
            scenario.parameters.min_fps
        );
    }

    let e0 = diagnostics::total_energy(&scenario.system.bodies);
    let mut step_time = std::time::Duration::ZERO;

    for _ in 0..steps {
        if let StepOutcome::Stepped { elapsed, .. } = scenario.simulate(frame_delta) {
            step_time += elapsed;
        }
    }

    let e = diagnostics::total_energy(&scenario.system.bodies);
    log::info!(
        "{} frames with {}: {:.2} days simulated, {:.3} ms integrating",
        steps,
        scenario.engine.scheme,
        scenario.system.days_passed(),
        step_time.as_secs_f64() * 1000.0
    );
    log::info!("relative energy drift {:.3e}", diagnostics::relative_energy_drift(e0, e));

    for (i, b) in scenario.system.bodies.iter().enumerate() {
        println!(
            "{:<10} x = [{:.6e}, {:.6e}, {:.6e}] m  v = [{:.3}, {:.3}, {:.3}] m/s",
            scenario.label(i),
            b.x.x,
            b.x.y,
            b.x.z,
            b.v.x,
            b.v.y,
            b.v.z
        );
    }

    Ok(())
}

#[cfg(feature = "viewer")]
fn view(scenario: Scenario) -> Result<()> {
    solsim::run_viewer(scenario);
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn view(_scenario: Scenario) -> Result<()> {
    bail!("built without the `viewer` feature, use `run` instead")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match &args.command {
        Some(Command::Bench) => {
            bench_gravity();
            bench_schemes();
            Ok(())
        }
        Some(Command::Run { steps, frame_delta }) => run_headless(load_scenario(&args)?, *steps, *frame_delta),
        Some(Command::View) | None => view(load_scenario(&args)?),
    }
}
