//! Simulation plugin
//!
//! Owns the stepping loop as a resource and advances it one step per
//! `Update`. Snapshots leave as events; commands come in as events.

use crate::physics::simulation::{SimulationLoop, StopSignal};
use crate::prelude::*;
use crate::scenarios::{self, ScenarioError};
use thiserror::Error;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Step,
    Report,
}

/// The running simulation
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSimulation(pub SimulationLoop);

/// Pause and stop flags shared by the command handler and the stepper
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationControl {
    pub paused: bool,
    pub stop: StopSignal,
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot build initial conditions: {0}")]
    Scenario(#[from] ScenarioError),
    #[error("cannot start simulation: {0}")]
    Simulation(#[from] SimulationError),
}

/// Builds the scenario and the loop described by `config`.
pub fn build_simulation(config: &SimulationConfig) -> Result<ActiveSimulation, SetupError> {
    let particles = scenarios::build(&config.scenario)?;
    let simulation = SimulationLoop::from_config(&config.physics, particles)?;
    Ok(ActiveSimulation(simulation))
}

/// Expects `SimulationConfig` and `ActiveSimulation` to be inserted before
/// the app runs.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if let Some(config) = app.world().get_resource::<SimulationConfig>() {
            match toml::to_string_pretty(config) {
                Ok(toml_string) => {
                    info!("=== Current Configuration (TOML) ===\n{}", toml_string);
                    info!("=== End Configuration ===");
                }
                Err(e) => {
                    error!("Failed to serialize configuration to TOML: {}", e);
                }
            }
        }

        app.init_resource::<SimulationControl>();

        app.add_event::<SimulationCommand>();
        app.add_event::<SnapshotEvent>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Step,
                SimulationSet::Report,
            )
                .chain(),
        );

        app.add_systems(Startup, start_simulation);
        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Input),
                step_simulation.in_set(SimulationSet::Step),
            ),
        );
    }
}

fn start_simulation(mut simulation: ResMut<ActiveSimulation>) {
    simulation.start();
}

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut control: ResMut<SimulationControl>,
    mut exit: EventWriter<AppExit>,
) {
    for command in commands_reader.read() {
        match command {
            SimulationCommand::TogglePause => {
                control.paused = !control.paused;
                info!(
                    "Simulation {}",
                    if control.paused { "paused" } else { "resumed" }
                );
            }
            SimulationCommand::Stop => {
                if !control.stop.is_stopped() {
                    info!("Stopping simulation");
                    control.stop.stop();
                    exit.write(AppExit::Success);
                }
            }
        }
    }
}

pub fn step_simulation(
    mut simulation: ResMut<ActiveSimulation>,
    control: Res<SimulationControl>,
    mut snapshots: EventWriter<SnapshotEvent>,
    mut exit: EventWriter<AppExit>,
) {
    if control.paused || control.stop.is_stopped() {
        return;
    }

    match simulation.step() {
        Ok(snapshot) => {
            snapshots.write(SnapshotEvent(snapshot));
        }
        Err(err) => {
            error!("Simulation stopped: {}", err);
            control.stop.stop();
            exit.write(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity::DirectGravity;
    use crate::physics::integrators::SemiImplicitEuler;
    use crate::physics::particle::{ParticleSet, ParticleSpec};

    fn app_with(particles: ParticleSet) -> App {
        let simulation = SimulationLoop::new(
            particles,
            Box::new(SemiImplicitEuler),
            Box::new(DirectGravity::new()),
            60.0,
        )
        .unwrap();

        let mut app = App::new();
        app.insert_resource(SimulationConfig::default());
        app.insert_resource(ActiveSimulation(simulation));
        app.add_plugins(SimulationPlugin);
        app
    }

    fn pair(separation: Scalar) -> ParticleSet {
        ParticleSet::from_specs([
            ParticleSpec::new(Vector::new(separation / 2.0, 0.0, 0.0), Vector::ZERO, 1.0e30),
            ParticleSpec::new(Vector::new(-separation / 2.0, 0.0, 0.0), Vector::ZERO, 1.0e30),
        ])
        .unwrap()
    }

    fn steps(app: &App) -> u64 {
        app.world().resource::<ActiveSimulation>().clock().steps()
    }

    #[test]
    fn test_steps_once_per_update() {
        let mut app = app_with(pair(1.0e9));

        for _ in 0..5 {
            app.update();
        }

        assert_eq!(steps(&app), 5);
        assert_eq!(app.should_exit(), None);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut app = app_with(pair(1.0e9));
        app.update();

        app.world_mut().send_event(SimulationCommand::TogglePause);
        app.update();
        app.update();
        assert_eq!(steps(&app), 1);

        app.world_mut().send_event(SimulationCommand::TogglePause);
        app.update();
        assert_eq!(steps(&app), 2);
    }

    #[test]
    fn test_stop_exits_between_steps() {
        let mut app = app_with(pair(1.0e9));
        app.update();

        app.world_mut().send_event(SimulationCommand::Stop);
        app.update();

        assert_eq!(steps(&app), 1);
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn test_failed_step_exits_with_error() {
        let mut app = app_with(pair(0.0));
        app.update();

        assert_eq!(steps(&app), 0);
        assert!(matches!(app.should_exit(), Some(AppExit::Error(_))));
    }

    #[test]
    fn test_build_simulation_from_default_config() {
        let simulation = build_simulation(&SimulationConfig::default()).unwrap();

        assert_eq!(simulation.particles().len(), 3);
        assert_eq!(simulation.integrator().name(), "semi_implicit_euler");
    }
}
