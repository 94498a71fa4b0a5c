//! gravitas library
//!
//! Newtonian N-body physics kernel plus the configuration, scenarios and
//! Bevy plugins used by the headless driver binary.

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod scenarios;
