//! Headless stand-in for a renderer: logs snapshots as they arrive

use super::simulation::{ActiveSimulation, SimulationSet};
use crate::physics::diagnostics;
use crate::physics::units;
use crate::prelude::*;

/// Reporting cadence and the energy the run started with
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub interval: u64,
    pub max_steps: Option<u64>,
    initial_energy: Option<Scalar>,
}

impl ReportSettings {
    pub fn new(interval: u64, max_steps: Option<u64>) -> Self {
        Self {
            interval: interval.max(1),
            max_steps,
            initial_energy: None,
        }
    }

    /// Relative change of total energy since the first step
    pub fn energy_drift(&self, energy: Scalar) -> Option<Scalar> {
        self.initial_energy
            .filter(|initial| *initial != 0.0)
            .map(|initial| (energy - initial) / initial.abs())
    }
}

pub struct ReportingPlugin;

impl Plugin for ReportingPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<SimulationConfig>()
            .map(|config| ReportSettings::new(config.output.report_interval, config.output.max_steps))
            .unwrap_or_else(|| ReportSettings::new(1, None));

        app.insert_resource(settings);
        app.add_systems(Startup, record_initial_energy);
        app.add_systems(Update, report_snapshots.in_set(SimulationSet::Report));
    }
}

fn total_energy(simulation: &ActiveSimulation) -> Scalar {
    diagnostics::total_energy(
        simulation.particles().particles(),
        units::GRAVITATIONAL_CONSTANT,
    )
}

fn record_initial_energy(simulation: Res<ActiveSimulation>, mut settings: ResMut<ReportSettings>) {
    let energy = total_energy(&simulation);
    info!("Initial total energy: {:.6e} J", energy);
    settings.initial_energy = Some(energy);
}

pub fn report_snapshots(
    mut snapshots: EventReader<SnapshotEvent>,
    simulation: Res<ActiveSimulation>,
    settings: Res<ReportSettings>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for snapshot in snapshots.read() {
        if snapshot.step % settings.interval == 0 {
            let energy = total_energy(&simulation);
            info!(
                "Step {} (t = {:.4} yr), energy drift {:.3e}",
                snapshot.step,
                snapshot.elapsed_years(),
                settings.energy_drift(energy).unwrap_or(0.0)
            );

            for particle in &snapshot.particles {
                debug!(
                    "  #{} at {:?} AU moving {:.3} km/s",
                    particle.index,
                    (particle.position / units::ASTRONOMICAL_UNIT).to_array(),
                    particle.velocity.length() / units::KILOMETER
                );
            }
        }

        if settings
            .max_steps
            .is_some_and(|max_steps| snapshot.step >= max_steps)
        {
            info!("Reached step limit of {}", snapshot.step);
            commands.write(SimulationCommand::Stop);
        }
    }
}
