//! Particle records and the index-stable particle set

use super::error::{PhysicsError, Result};
use super::math::{Scalar, Vector};
use bevy::color::Srgba;

/// Physical state of a single point mass
///
/// Mass and index are fixed at construction; position and velocity are
/// replaced wholesale by the integrator each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    index: usize,
    mass: Scalar,
    position: Vector,
    velocity: Vector,
}

impl Particle {
    /// Creates a particle, rejecting non-positive or non-finite mass and
    /// non-finite initial state.
    pub fn new(index: usize, position: Vector, velocity: Vector, mass: Scalar) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidConstruction {
                index,
                reason: format!("mass must be positive and finite, got {mass} kg"),
            });
        }

        if !position.is_finite() || !velocity.is_finite() {
            return Err(PhysicsError::InvalidConstruction {
                index,
                reason: "initial position and velocity must be finite".to_string(),
            });
        }

        Ok(Self {
            index,
            mass,
            position,
            velocity,
        })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    #[inline]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Same identity and mass, new kinematic state.
    #[inline]
    pub fn with_state(&self, position: Vector, velocity: Vector) -> Self {
        Self {
            position,
            velocity,
            ..*self
        }
    }

    /// Same identity, mass and velocity at a different position.
    #[inline]
    pub fn displaced_to(&self, position: Vector) -> Self {
        Self { position, ..*self }
    }
}

/// Presentation attributes; never read by the physics kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Display radius in meters
    pub radius: Scalar,
    pub color: Srgba,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            radius: 1.0,
            color: Srgba::WHITE,
        }
    }
}

/// Construction record supplied by an initial-condition source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    pub position: Vector,
    pub velocity: Vector,
    pub mass: Scalar,
    pub appearance: Appearance,
}

impl ParticleSpec {
    pub fn new(position: Vector, velocity: Vector, mass: Scalar) -> Self {
        Self {
            position,
            velocity,
            mass,
            appearance: Appearance::default(),
        }
    }

    pub fn with_appearance(mut self, radius: Scalar, color: Srgba) -> Self {
        self.appearance = Appearance { radius, color };
        self
    }
}

/// Ordered, index-stable collection of particles
///
/// A particle's index is its slot in the set. Appearance data lives in a
/// parallel vector keyed by the same index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    appearance: Vec<Appearance>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from construction records, failing on the first
    /// invalid record.
    pub fn from_specs(specs: impl IntoIterator<Item = ParticleSpec>) -> Result<Self> {
        let mut set = Self::new();
        for spec in specs {
            set.add(spec)?;
        }
        Ok(set)
    }

    /// Validates and appends a particle, returning its index.
    pub fn add(&mut self, spec: ParticleSpec) -> Result<usize> {
        let index = self.particles.len();
        let particle = Particle::new(index, spec.position, spec.velocity, spec.mass)?;

        self.particles.push(particle);
        self.appearance.push(spec.appearance);

        Ok(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    #[inline]
    pub fn appearance(&self, index: usize) -> Option<&Appearance> {
        self.appearance.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn total_mass(&self) -> Scalar {
        self.particles.iter().map(Particle::mass).sum()
    }

    /// Installs the result of a completed step.
    ///
    /// The new buffer must hold the same particles in the same order.
    pub(crate) fn replace(&mut self, particles: Vec<Particle>) {
        debug_assert_eq!(particles.len(), self.particles.len());
        debug_assert!(
            particles
                .iter()
                .zip(&self.particles)
                .all(|(new, old)| new.index() == old.index() && new.mass() == old.mass())
        );
        self.particles = particles;
    }

    pub(crate) fn set_position(&mut self, index: usize, position: Vector) -> Result<()> {
        if !position.is_finite() {
            return Err(PhysicsError::NonFiniteState {
                indices: vec![index],
            });
        }

        match self.particles.get_mut(index) {
            Some(particle) => {
                *particle = particle.displaced_to(position);
                Ok(())
            }
            None => Err(PhysicsError::UnknownParticle { index }),
        }
    }
}
