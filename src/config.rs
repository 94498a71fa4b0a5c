use crate::physics::math::Scalar;
use crate::physics::units;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub scenario: ScenarioConfig,
    pub output: OutputConfig,
}

/// Parameters of the stepping loop. Fixed once the loop is built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Seconds of simulated time per step
    pub time_step: Scalar,
    /// Canonical name or alias understood by the integrator registry
    pub integrator: String,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            time_step: units::DAY,
            integrator: "semi_implicit_euler".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Two equal stars on a circular orbit
    Binary,
    /// One heavy star with two lighter companions
    #[default]
    ThreeBody,
    /// Seeded random cluster of `body_count` stars
    Cluster,
    /// Bodies listed in the config file
    Custom,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    /// Only used by the cluster scenario
    pub body_count: usize,
    /// Cluster seed, `None` draws a fresh one
    pub seed: Option<u64>,
    /// Only used by the custom scenario
    pub bodies: Vec<BodyConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::default(),
            body_count: 8,
            seed: None,
            bodies: Vec::new(),
        }
    }
}

/// One body of a custom scenario, in display units
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub position_solar_radii: [Scalar; 3],
    pub velocity_km_per_s: [Scalar; 3],
    pub mass_solar_masses: Scalar,
    pub radius_solar_radii: Scalar,
    /// Hex color such as `"#FF0000"`
    pub color: String,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            position_solar_radii: [0.0; 3],
            velocity_km_per_s: [0.0; 3],
            mass_solar_masses: 1.0,
            radius_solar_radii: 1.0,
            color: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Log a report every this many steps
    pub report_interval: u64,
    /// Exit after this many steps, run until interrupted when `None`
    pub max_steps: Option<u64>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_interval: 1000,
            max_steps: Some(100_000),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Location of `config.toml` in the platform's per-user config directory
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gravitas").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the per-user configuration, or defaults when there is none
    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(&path.to_string_lossy()),
            None => {
                warn!("No user config directory on this platform. Using defaults.");
                Self::default()
            }
        }
    }
}
