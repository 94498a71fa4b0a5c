//! Centralized event definitions
//!
//! Events are the only way the simulation talks to the rest of the app.
//! Renderers and reporters read `SnapshotEvent`s, anything may send a
//! `SimulationCommand`.

use crate::physics::snapshot::Snapshot;
use bevy::prelude::*;

// Unified simulation command pattern
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    TogglePause,
    /// Stop stepping and exit once the current step is done
    Stop,
}

/// Emitted once per completed step
#[derive(Event, Debug, Clone, PartialEq, Deref)]
pub struct SnapshotEvent(pub Snapshot);
