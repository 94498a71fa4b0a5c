//! gravitas prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Events
pub use crate::events::{SimulationCommand, SnapshotEvent};

// Internal re-exports - Physics
pub use crate::physics::error::{PhysicsError, SimulationError};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::snapshot::Snapshot;
