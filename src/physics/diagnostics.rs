//! Conserved quantities of a particle configuration
//!
//! Used by tests to check the integrators and by the driver to report drift.

use super::math::{Scalar, Vector};
use super::particle::Particle;

/// Σ mᵢvᵢ
pub fn total_momentum(particles: &[Particle]) -> Vector {
    particles.iter().map(Particle::momentum).sum()
}

/// Σ mᵢ (xᵢ × vᵢ) about the origin
pub fn total_angular_momentum(particles: &[Particle]) -> Vector {
    particles
        .iter()
        .map(|particle| particle.position().cross(particle.momentum()))
        .sum()
}

pub fn kinetic_energy(particles: &[Particle]) -> Scalar {
    particles.iter().map(Particle::kinetic_energy).sum()
}

/// Σ_{i<j} -G mᵢ mⱼ / rᵢⱼ
pub fn potential_energy(particles: &[Particle], gravitational_constant: Scalar) -> Scalar {
    let mut energy = 0.0;

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = libm::sqrt((b.position() - a.position()).length_squared());
            energy -= gravitational_constant * a.mass() * b.mass() / distance;
        }
    }

    energy
}

pub fn total_energy(particles: &[Particle], gravitational_constant: Scalar) -> Scalar {
    kinetic_energy(particles) + potential_energy(particles, gravitational_constant)
}

/// Mass-weighted mean position, `None` for an empty slice
pub fn barycenter(particles: &[Particle]) -> Option<Vector> {
    let (weighted_positions, total_mass): (Vector, Scalar) = particles
        .iter()
        .map(|particle| (particle.position(), particle.mass()))
        .fold((Vector::ZERO, 0.0), |(pos_acc, mass_acc), (pos, mass)| {
            (pos_acc + pos * mass, mass_acc + mass)
        });

    if total_mass <= 0.0 {
        return None;
    }

    Some(weighted_positions / total_mass)
}
