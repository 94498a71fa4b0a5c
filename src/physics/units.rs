//! SI unit constants and boundary conversions
//!
//! The physics kernel works exclusively in meters, kilograms and seconds.
//! Astronomical units (solar masses, solar radii, km/s, years) only appear
//! at the edges: scenario definitions, the configuration file and whatever
//! displays a snapshot. Everything here is a fixed physical fact.

use super::math::{Scalar, Vector};

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.674e-11;

/// Solar mass (kg)
pub const SOLAR_MASS: Scalar = 1.9886e30;

/// Solar radius (m)
pub const SOLAR_RADIUS: Scalar = 6.957e8;

/// Earth mass (kg)
pub const EARTH_MASS: Scalar = 5.972e24;

/// Astronomical unit (m)
pub const ASTRONOMICAL_UNIT: Scalar = 1.4960e11;

/// Kilometer (m)
pub const KILOMETER: Scalar = 1.0e3;

/// Hour (s)
pub const HOUR: Scalar = 3600.0;

/// Day (s)
pub const DAY: Scalar = 86400.0;

/// Julian year (s)
pub const YEAR: Scalar = 31_557_600.0;

#[inline]
pub fn solar_masses(value: Scalar) -> Scalar {
    value * SOLAR_MASS
}

#[inline]
pub fn solar_radii(value: Scalar) -> Scalar {
    value * SOLAR_RADIUS
}

#[inline]
pub fn astronomical_units(value: Scalar) -> Scalar {
    value * ASTRONOMICAL_UNIT
}

/// Converts a velocity given in km/s to m/s.
#[inline]
pub fn kilometers_per_second(value: Vector) -> Vector {
    value * KILOMETER
}

#[inline]
pub fn seconds_to_years(seconds: Scalar) -> Scalar {
    seconds / YEAR
}

#[inline]
pub fn meters_to_solar_radii(meters: Scalar) -> Scalar {
    meters / SOLAR_RADIUS
}
