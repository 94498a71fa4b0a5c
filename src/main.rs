use bevy::app::ScheduleRunnerPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use gravitas::cli::{self, Args};
use gravitas::plugins::reporting::ReportingPlugin;
use gravitas::plugins::simulation::{SimulationPlugin, build_simulation};
use std::time::Duration;

fn main() -> AppExit {
    let args = Args::parse();

    if args.list_integrators {
        cli::handle_list_integrators();
        return AppExit::Success;
    }

    let config = match cli::load_and_apply_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return AppExit::error();
        }
    };

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
        LogPlugin {
            level,
            ..default()
        },
    ));

    // Built after logging is up so scenario and loop construction are logged
    let simulation = match build_simulation(&config) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!("{}", err);
            return AppExit::error();
        }
    };

    app.insert_resource(config);
    app.insert_resource(simulation);
    app.add_plugins((SimulationPlugin, ReportingPlugin));

    app.run()
}
