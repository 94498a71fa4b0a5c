//! Numerical integration methods for n-body simulation
//!
//! Every integrator advances the whole particle set at once. Accelerations
//! for a stage are always evaluated against one complete configuration of
//! positions, and the new state is returned in a fresh buffer. Nothing is
//! written back until the caller installs that buffer, so a failed step
//! leaves the previous state intact.

use crate::physics::error::Result;
use crate::physics::gravity::ForceModel;
use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::Particle;

pub mod explicit_euler;
pub mod registry;
pub mod runge_kutta;
pub mod semi_implicit_euler;

pub use explicit_euler::ExplicitEuler;
pub use registry::IntegratorRegistry;
pub use runge_kutta::RungeKuttaFourthOrder;
pub use semi_implicit_euler::SemiImplicitEuler;

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Clone this integrator into a box
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance every particle by one time step
    ///
    /// # Arguments
    /// * `particles` - Snapshot of the set at the start of the step
    /// * `force` - Acceleration source, evaluated on complete snapshots only
    /// * `dt` - Time step in seconds
    ///
    /// # Returns
    /// The particles at the end of the step, in the same order
    fn step(
        &self,
        particles: &[Particle],
        force: &dyn ForceModel,
        dt: Scalar,
    ) -> Result<Vec<Particle>>;

    /// Order of the global truncation error
    fn convergence_order(&self) -> usize;

    /// Canonical name used for lookup and display
    fn name(&self) -> &'static str;

    /// Alternative lookup names
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// `base[i] + slope[i] * h` for every particle
fn offset(base: &[Vector], slope: &[Vector], h: Scalar) -> Vec<Vector> {
    base.iter()
        .zip(slope)
        .map(|(&value, &rate)| value + rate * h)
        .collect()
}

/// The snapshot `particles` moved to `positions`
fn at_positions(particles: &[Particle], positions: &[Vector]) -> Vec<Particle> {
    particles
        .iter()
        .zip(positions)
        .map(|(particle, &position)| particle.displaced_to(position))
        .collect()
}
