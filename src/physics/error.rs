//! Error types for the physics kernel.

use super::math::Scalar;
use thiserror::Error;

/// Failures raised by particle construction, force evaluation and
/// integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("cannot construct particle {index}: {reason}")]
    InvalidConstruction { index: usize, reason: String },

    #[error("particles {first} and {second} are coincident, gravitational force is singular")]
    SingularForce { first: usize, second: usize },

    #[error("non-finite position or velocity for particles {indices:?}")]
    NonFiniteState { indices: Vec<usize> },

    #[error("no particle with index {index}")]
    UnknownParticle { index: usize },
}

/// Failures surfaced by the simulation loop to its caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("time step must be positive and finite, got {0} s")]
    InvalidTimeStep(Scalar),

    #[error("cannot simulate an empty particle set")]
    EmptyParticleSet,

    #[error("{0}")]
    UnknownIntegrator(String),

    #[error("simulation halted after step {step} and can no longer advance")]
    Halted { step: u64 },

    #[error("step {step} (t = {elapsed} s) failed: {source}")]
    Step {
        step: u64,
        elapsed: Scalar,
        #[source]
        source: PhysicsError,
    },
}

impl SimulationError {
    /// The underlying physics failure, if this error came from a step.
    pub fn physics(&self) -> Option<&PhysicsError> {
        match self {
            SimulationError::Step { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = PhysicsError> = std::result::Result<T, E>;
