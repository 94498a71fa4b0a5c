//! Command line interface for gravitas

use clap::Parser;
use thiserror::Error;

use crate::config::{ScenarioKind, SimulationConfig};
use crate::physics::integrators::IntegratorRegistry;
use crate::physics::math::Scalar;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),
    /// Invalid integrator name provided
    #[error("Invalid integrator: {0}")]
    InvalidIntegrator(String),
    /// Time step is zero, negative or not a number
    #[error("Invalid time step: {0} s")]
    InvalidTimeStep(Scalar),
}

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// gravitas - headless N-body gravity simulation
#[derive(Parser, Debug)]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Initial conditions to simulate (overrides config file)
    #[arg(long, value_enum, value_name = "KIND")]
    pub scenario: Option<ScenarioKind>,

    /// Number of bodies in the cluster scenario (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub bodies: Option<usize>,

    /// Integrator name or alias (e.g., semi_implicit_euler, rk4)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Seconds of simulated time per step
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub time_step: Option<Scalar>,

    /// Random seed for the cluster scenario
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Stop after this many steps
    #[arg(long, value_name = "COUNT")]
    pub steps: Option<u64>,

    /// Log a report every N steps
    #[arg(long, value_name = "N")]
    pub report_interval: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Handles the --list-integrators flag by printing available integrators and exiting
pub fn handle_list_integrators() {
    let registry = IntegratorRegistry::new().with_standard_integrators();
    println!("Available integrators:");
    for name in registry.list_available() {
        println!("  - {name}");
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        println!("\nAliases:");
        for (alias, target) in aliases {
            println!("  - {alias} -> {target}");
        }
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let config = if let Some(config_path) = &args.config {
        if !std::path::Path::new(config_path).exists() {
            return Err(CliError::ConfigLoad(format!("{config_path} does not exist")));
        }
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    apply_overrides(config, args)
}

fn apply_overrides(mut config: SimulationConfig, args: &Args) -> Result<SimulationConfig, CliError> {
    if let Some(kind) = args.scenario {
        println!("Using scenario: {kind:?}");
        config.scenario.kind = kind;
    }

    if let Some(body_count) = args.bodies {
        println!("Overriding body count to: {body_count}");
        config.scenario.body_count = body_count;
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.scenario.seed = Some(seed);
    }

    if let Some(time_step) = args.time_step {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(CliError::InvalidTimeStep(time_step));
        }
        println!("Using time step: {time_step} s");
        config.physics.time_step = time_step;
    }

    if let Some(integrator_type) = &args.integrator {
        config.physics.integrator = integrator_type.clone();
    }

    // Validate integrator name against registry, whichever source it came from
    IntegratorRegistry::new()
        .with_standard_integrators()
        .create(&config.physics.integrator)
        .map_err(CliError::InvalidIntegrator)?;
    if args.integrator.is_some() {
        println!("Using integrator: {}", config.physics.integrator);
    }

    if let Some(steps) = args.steps {
        println!("Stopping after {steps} steps");
        config.output.max_steps = Some(steps);
    }

    if let Some(interval) = args.report_interval {
        config.output.report_interval = interval.max(1);
    }

    Ok(config)
}
