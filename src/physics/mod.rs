//! The physics kernel: particles, gravity, integrators and the stepping loop
//!
//! Everything below works in SI units only. Conversions to and from
//! astronomical units happen in [`units`] and at the crate's edges.

pub mod diagnostics;
pub mod error;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod particle;
pub mod simulation;
pub mod snapshot;
pub mod units;
