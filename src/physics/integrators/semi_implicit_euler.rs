//! Semi-implicit Euler integration method (symplectic Euler)

use super::Integrator;
use crate::physics::error::Result;
use crate::physics::gravity::ForceModel;
use crate::physics::math::Scalar;
use crate::physics::particle::Particle;

/// Semi-implicit Euler integrator (also known as symplectic Euler)
///
/// This is a first-order symplectic integrator that updates velocities
/// before positions, keeping the energy error bounded over long runs
/// instead of drifting.
///
/// ```text
/// a(t)     = F(x(t)) / m        for every particle, one snapshot
/// v(t+dt)  = v(t) + a(t) * dt
/// x(t+dt)  = x(t) + v(t+dt) * dt
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
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
                // Update velocity first: v(t+dt) = v(t) + a(t) * dt
                let velocity = particle.velocity() + acceleration * dt;

                // Then update position using new velocity: x(t+dt) = x(t) + v(t+dt) * dt
                let position = particle.position() + velocity * dt;

                particle.with_state(position, velocity)
            })
            .collect())
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "semi_implicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["symplectic_euler", "euler"]
    }
}
