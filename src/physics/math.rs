use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and accelerations
pub type Vector = bevy::math::DVec3;

/// Unit vector drawn uniformly from the surface of the sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Vector {
    let theta = rng.random_range(0.0..=2.0 * std::f64::consts::PI);
    let phi = libm::acos(rng.random_range(-1.0..=1.0));

    Vector::new(
        libm::sin(phi) * libm::cos(theta),
        libm::sin(phi) * libm::sin(theta),
        libm::cos(phi),
    )
}

/// Point drawn uniformly from the volume of a ball of the given radius.
pub fn random_point_in_ball(rng: &mut impl Rng, radius: Scalar) -> Vector {
    let r = radius * libm::cbrt(rng.random_range(0.0..=1.0));
    random_unit_vector(rng) * r
}
