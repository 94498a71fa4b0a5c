//! Read-only views of the simulation handed to renderers

use super::math::{Scalar, Vector};
use super::particle::{Particle, ParticleSet};
use super::units;

/// Kinematic state of one particle at the snapshot instant (SI units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub index: usize,
    pub position: Vector,
    pub velocity: Vector,
}

impl From<&Particle> for ParticleState {
    fn from(particle: &Particle) -> Self {
        Self {
            index: particle.index(),
            position: particle.position(),
            velocity: particle.velocity(),
        }
    }
}

/// Copy of the whole set after a completed step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Number of completed steps
    pub step: u64,
    /// Simulated seconds since the start of the run
    pub elapsed: Scalar,
    pub particles: Vec<ParticleState>,
}

impl Snapshot {
    pub fn capture(step: u64, elapsed: Scalar, set: &ParticleSet) -> Self {
        Self {
            step,
            elapsed,
            particles: set.iter().map(ParticleState::from).collect(),
        }
    }

    /// Elapsed time converted for display
    pub fn elapsed_years(&self) -> Scalar {
        units::seconds_to_years(self.elapsed)
    }

    pub fn get(&self, index: usize) -> Option<&ParticleState> {
        self.particles.get(index)
    }
}
