//! Direct-summation Newtonian gravity

use super::error::{PhysicsError, Result};
use super::math::{Scalar, Vector};
use super::particle::Particle;
use super::units::GRAVITATIONAL_CONSTANT;

/// Source of accelerations for the integrators
///
/// Implementations only read particle state. Every particle of a batch is
/// evaluated against the same slice, so a batch never mixes old and new
/// positions.
pub trait ForceModel: Send + Sync {
    /// Net acceleration on `target` due to every other particle in
    /// `particles`
    fn acceleration_on(&self, target: &Particle, particles: &[Particle]) -> Result<Vector>;

    /// Accelerations for the whole slice, in slice order
    fn accelerations(&self, particles: &[Particle]) -> Result<Vec<Vector>> {
        particles
            .iter()
            .map(|target| self.acceleration_on(target, particles))
            .collect()
    }
}

/// Brute-force pairwise gravity, O(n²) per full pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    gravitational_constant: Scalar,
}

impl DirectGravity {
    pub fn new() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
        }
    }

    #[inline]
    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    /// Acceleration contributed to `target` by `source` alone.
    ///
    /// Fails with `SingularForce` when the two share a position.
    pub fn pair_acceleration(&self, target: &Particle, source: &Particle) -> Result<Vector> {
        let displacement = source.position() - target.position();
        let distance = libm::sqrt(displacement.length_squared());

        if distance == 0.0 {
            return Err(PhysicsError::SingularForce {
                first: target.index(),
                second: source.index(),
            });
        }

        let force =
            self.gravitational_constant * target.mass() * source.mass() / (distance * distance);

        Ok(displacement / distance * (force / target.mass()))
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn acceleration_on(&self, target: &Particle, particles: &[Particle]) -> Result<Vector> {
        let mut acceleration = Vector::ZERO;

        for source in particles {
            if source.index() == target.index() {
                continue;
            }
            acceleration += self.pair_acceleration(target, source)?;
        }

        Ok(acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::units::SOLAR_MASS;

    fn particle(index: usize, position: Vector, mass: Scalar) -> Particle {
        Particle::new(index, position, Vector::ZERO, mass).unwrap()
    }

    #[test]
    fn test_single_particle_feels_nothing() {
        let gravity = DirectGravity::new();
        let particles = [particle(0, Vector::new(1.0, 2.0, 3.0), SOLAR_MASS)];

        let accelerations = gravity.accelerations(&particles).unwrap();

        assert_eq!(accelerations, vec![Vector::ZERO]);
    }

    #[test]
    fn test_inverse_square_magnitude_and_direction() {
        let gravity = DirectGravity::new();
        let target = particle(0, Vector::ZERO, 1.0);
        let source = particle(1, Vector::new(0.0, 2.0, 0.0), 4.0e10);

        let acceleration = gravity.pair_acceleration(&target, &source).unwrap();

        let expected = GRAVITATIONAL_CONSTANT * 4.0e10 / 4.0;
        assert!((acceleration.y - expected).abs() < expected * 1e-14);
        assert_eq!(acceleration.x, 0.0);
        assert_eq!(acceleration.z, 0.0);
    }

    #[test]
    fn test_pair_forces_are_antisymmetric() {
        let gravity = DirectGravity::new();
        let a = particle(0, Vector::new(1.0e11, -3.0e10, 2.0e9), 3.0e30);
        let b = particle(1, Vector::new(-4.0e10, 5.0e10, -1.0e10), 7.0e29);

        let on_a = gravity.pair_acceleration(&a, &b).unwrap();
        let on_b = gravity.pair_acceleration(&b, &a).unwrap();

        let force_on_a = on_a * a.mass();
        let force_on_b = on_b * b.mass();
        assert!(
            (force_on_a + force_on_b).length() <= force_on_a.length() * 1e-12,
            "forces should cancel: {force_on_a:?} vs {force_on_b:?}"
        );
        assert!(on_a.dot(b.position() - a.position()) > 0.0);
        assert!(on_b.dot(a.position() - b.position()) > 0.0);
    }

    #[test]
    fn test_coincident_particles_are_singular() {
        let gravity = DirectGravity::new();
        let position = Vector::new(5.0, 5.0, 5.0);
        let particles = [
            particle(0, position, SOLAR_MASS),
            particle(1, Vector::ZERO, SOLAR_MASS),
            particle(2, position, SOLAR_MASS),
        ];

        let result = gravity.accelerations(&particles);

        assert_eq!(
            result,
            Err(PhysicsError::SingularForce {
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_self_exclusion_is_by_index() {
        let gravity = DirectGravity::new();
        let target = particle(0, Vector::ZERO, 1.0);
        // A different particle at the same spot must still be detected.
        let others = [target, particle(1, Vector::ZERO, 1.0)];

        assert!(gravity.acceleration_on(&target, &others[..1]).is_ok());
        assert!(gravity.acceleration_on(&target, &others).is_err());
    }

    #[test]
    fn test_superposition() {
        let gravity = DirectGravity::new();
        let particles = [
            particle(0, Vector::ZERO, 1.0),
            particle(1, Vector::new(1.0, 0.0, 0.0), 1.0e9),
            particle(2, Vector::new(-1.0, 0.0, 0.0), 1.0e9),
        ];

        let acceleration = gravity.acceleration_on(&particles[0], &particles).unwrap();

        assert!(acceleration.length() < 1e-20, "{acceleration:?}");
    }
}
