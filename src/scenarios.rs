//! Initial conditions
//!
//! Every scenario is described in display units (solar masses, solar radii,
//! km/s) and converted to SI here, before anything reaches the kernel.

use crate::config::{BodyConfig, ScenarioConfig, ScenarioKind};
use crate::physics::error::PhysicsError;
use crate::physics::math::{Scalar, Vector, random_point_in_ball, random_unit_vector};
use crate::physics::particle::{ParticleSet, ParticleSpec};
use crate::physics::units;
use bevy::color::Srgba;
use bevy::color::palettes::css;
use bevy::log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use thiserror::Error;

/// Radius of the sphere the cluster stars are scattered in
const CLUSTER_RADIUS_SOLAR_RADII: Scalar = 1000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("the {0:?} scenario has no bodies")]
    NoBodies(ScenarioKind),

    #[error("body {index} has invalid color {color:?}: {reason}")]
    InvalidColor {
        index: usize,
        color: String,
        reason: String,
    },

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Builds the particle set selected by `config`.
pub fn build(config: &ScenarioConfig) -> Result<ParticleSet, ScenarioError> {
    let particles = match config.kind {
        ScenarioKind::Binary => binary_circular_orbit(
            units::solar_masses(1.0),
            units::astronomical_units(1.0),
        )?,
        ScenarioKind::ThreeBody => three_body()?,
        ScenarioKind::Cluster => cluster(config.body_count, config.seed)?,
        ScenarioKind::Custom => custom(&config.bodies)?,
    };

    info!(
        "Built {:?} scenario with {} bodies ({:.3} solar masses)",
        config.kind,
        particles.len(),
        particles.total_mass() / units::SOLAR_MASS
    );

    Ok(particles)
}

/// Two bodies of `mass` each, `separation` apart, on a circular orbit
/// about their common barycenter in the xy plane.
pub fn binary_circular_orbit(
    mass: Scalar,
    separation: Scalar,
) -> Result<ParticleSet, ScenarioError> {
    let speed = circular_orbit_speed(2.0 * mass, separation);
    let radius = separation / 200.0;

    Ok(ParticleSet::from_specs([
        ParticleSpec::new(
            Vector::new(separation / 2.0, 0.0, 0.0),
            Vector::new(0.0, speed, 0.0),
            mass,
        )
        .with_appearance(radius, css::GOLD),
        ParticleSpec::new(
            Vector::new(-separation / 2.0, 0.0, 0.0),
            Vector::new(0.0, -speed, 0.0),
            mass,
        )
        .with_appearance(radius, css::ORANGE),
    ])?)
}

/// Orbital speed of each member of an equal-mass circular binary:
/// `sqrt(G·M_total / (4·separation))`.
pub fn circular_orbit_speed(total_mass: Scalar, separation: Scalar) -> Scalar {
    libm::sqrt(units::GRAVITATIONAL_CONSTANT * total_mass / (4.0 * separation))
}

/// Period of the orbit produced by [`binary_circular_orbit`].
pub fn circular_orbit_period(total_mass: Scalar, separation: Scalar) -> Scalar {
    TAU * (separation / 2.0) / circular_orbit_speed(total_mass, separation)
}

/// A 9.9 solar mass primary with 1.1 and 1.3 solar mass companions
/// at 1400 and 500 solar radii.
pub fn three_body() -> Result<ParticleSet, ScenarioError> {
    let bodies = [
        ([0.0, 0.0, 0.0], [0.0, -6.65, 0.0], 9.9, 300.0, css::RED),
        ([-1400.0, 0.0, 0.0], [0.0, 59.85, 0.0], 1.1, 30.0, css::LIME),
        ([-500.0, 0.0, 0.0], [0.0, 36.79, 0.0], 1.3, 30.0, css::BLUE),
    ];

    Ok(ParticleSet::from_specs(bodies.into_iter().map(
        |(position, velocity, mass, radius, color)| {
            display_units_spec(position, velocity, mass).with_appearance(
                units::solar_radii(radius),
                color,
            )
        },
    ))?)
}

/// `count` stars scattered uniformly in a sphere with random masses and
/// velocities, shifted into the barycentric frame.
///
/// The same seed always yields the same cluster.
pub fn cluster(count: usize, seed: Option<u64>) -> Result<ParticleSet, ScenarioError> {
    if count == 0 {
        return Err(ScenarioError::NoBodies(ScenarioKind::Cluster));
    }

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("Cluster seed: {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let radius = units::solar_radii(CLUSTER_RADIUS_SOLAR_RADII);
    let masses: Vec<Scalar> = (0..count)
        .map(|_| units::solar_masses(rng.random_range(0.5..2.0)))
        .collect();
    let total_mass: Scalar = masses.iter().sum();

    // Roughly virial speeds keep the cluster bound without collapsing at once
    let typical_speed = libm::sqrt(units::GRAVITATIONAL_CONSTANT * total_mass / radius) / 2.0;

    let mut specs: Vec<ParticleSpec> = masses
        .into_iter()
        .map(|mass| {
            let position = random_point_in_ball(&mut rng, radius);
            let velocity = random_unit_vector(&mut rng) * typical_speed * rng.random_range(0.0..1.0);
            let star_radius = units::solar_radii(libm::pow(mass / units::SOLAR_MASS, 0.8) * 10.0);
            let color = Srgba::rgb(
                1.0,
                rng.random_range(0.6..1.0),
                rng.random_range(0.4..1.0),
            );
            ParticleSpec::new(position, velocity, mass).with_appearance(star_radius, color)
        })
        .collect();

    let drift = specs
        .iter()
        .map(|spec| spec.velocity * spec.mass)
        .sum::<Vector>()
        / total_mass;
    for spec in &mut specs {
        spec.velocity -= drift;
    }

    Ok(ParticleSet::from_specs(specs)?)
}

/// Bodies listed in the config file.
pub fn custom(bodies: &[BodyConfig]) -> Result<ParticleSet, ScenarioError> {
    if bodies.is_empty() {
        return Err(ScenarioError::NoBodies(ScenarioKind::Custom));
    }

    let specs = bodies
        .iter()
        .enumerate()
        .map(|(index, body)| {
            let color = Srgba::hex(&body.color).map_err(|err| ScenarioError::InvalidColor {
                index,
                color: body.color.clone(),
                reason: err.to_string(),
            })?;

            Ok(display_units_spec(
                body.position_solar_radii,
                body.velocity_km_per_s,
                body.mass_solar_masses,
            )
            .with_appearance(units::solar_radii(body.radius_solar_radii), color))
        })
        .collect::<Result<Vec<_>, ScenarioError>>()?;

    Ok(ParticleSet::from_specs(specs)?)
}

fn display_units_spec(
    position_solar_radii: [Scalar; 3],
    velocity_km_per_s: [Scalar; 3],
    mass_solar_masses: Scalar,
) -> ParticleSpec {
    ParticleSpec::new(
        Vector::from_array(position_solar_radii) * units::SOLAR_RADIUS,
        units::kilometers_per_second(Vector::from_array(velocity_km_per_s)),
        units::solar_masses(mass_solar_masses),
    )
}
