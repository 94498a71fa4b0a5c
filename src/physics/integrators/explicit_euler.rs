//! Explicit Euler integration method (forward Euler)
//!
//! WARNING: This integrator is provided for comparison. It drifts in energy
//! on conservative systems; orbits spiral outward over time.

use super::Integrator;
use crate::physics::error::Result;
use crate::physics::gravity::ForceModel;
use crate::physics::math::Scalar;
use crate::physics::particle::Particle;

/// Explicit Euler integrator (forward Euler method)
///
/// Position is advanced with the velocity from the start of the step, and
/// velocity with the acceleration at the starting positions:
///
/// ```text
/// x(t+dt) = x(t) + v(t) * dt
/// v(t+dt) = v(t) + a(x(t)) * dt
/// ```
///
/// Same cost as semi-implicit Euler, but not symplectic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        particles: &[Particle],
        force: &dyn ForceModel,
        dt: Scalar,
    ) -> Result<Vec<Particle>> {
        let accelerations = force.accelerations(particles)?;

        Ok(particles
            .iter()
            .zip(accelerations)
            .map(|(particle, acceleration)| {
                let position = particle.position() + particle.velocity() * dt;
                let velocity = particle.velocity() + acceleration * dt;

                particle.with_state(position, velocity)
            })
            .collect())
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["forward_euler"]
    }
}
