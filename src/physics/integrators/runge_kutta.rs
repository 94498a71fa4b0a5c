//! Runge-Kutta integration methods

use super::{Integrator, at_positions, offset};
use crate::physics::error::Result;
use crate::physics::gravity::ForceModel;
use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::Particle;

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// A classic multi-stage integrator that provides fourth-order accuracy
/// by combining four intermediate evaluations of the derivative.
///
/// The RK4 algorithm:
/// 1. k1 = f(t, y)
/// 2. k2 = f(t + dt/2, y + k1*dt/2)
/// 3. k3 = f(t + dt/2, y + k2*dt/2)
/// 4. k4 = f(t + dt, y + k3*dt)
/// 5. y(t+dt) = y(t) + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
///
/// Each stage moves *every* particle to its stage position before any
/// acceleration is evaluated, so a stage never sees a mix of neighbors at
/// different stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        particles: &[Particle],
        force: &dyn ForceModel,
        dt: Scalar,
    ) -> Result<Vec<Particle>> {
        let half_dt = dt * 0.5;
        let positions: Vec<Vector> = particles.iter().map(Particle::position).collect();
        let velocities: Vec<Vector> = particles.iter().map(Particle::velocity).collect();

        // Stage 1: k1 at current state
        let k1_a = force.accelerations(particles)?;

        // Stage 2: k2 at midpoint using k1
        let k2_v = offset(&velocities, &k1_a, half_dt);
        let k2_a = force.accelerations(&at_positions(
            particles,
            &offset(&positions, &velocities, half_dt),
        ))?;

        // Stage 3: k3 at midpoint using k2
        let k3_v = offset(&velocities, &k2_a, half_dt);
        let k3_a =
            force.accelerations(&at_positions(particles, &offset(&positions, &k2_v, half_dt)))?;

        // Stage 4: k4 at endpoint using k3
        let k4_v = offset(&velocities, &k3_a, dt);
        let k4_a = force.accelerations(&at_positions(particles, &offset(&positions, &k3_v, dt)))?;

        // Combine stages using RK4 weights: y_n+1 = y_n + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
        let weight = dt / 6.0;
        Ok(particles
            .iter()
            .enumerate()
            .map(|(i, particle)| {
                let position = positions[i]
                    + (velocities[i] + k2_v[i] * 2.0 + k3_v[i] * 2.0 + k4_v[i]) * weight;
                let velocity =
                    velocities[i] + (k1_a[i] + k2_a[i] * 2.0 + k3_a[i] * 2.0 + k4_a[i]) * weight;

                particle.with_state(position, velocity)
            })
            .collect())
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "runge_kutta_fourth_order"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk4"]
    }
}
