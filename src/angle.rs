//! Direction helpers for equirectangular maps.
//!
//! Image space is `(u, v) ∈ [0, 1]²` with `u` the column fraction and `v` the
//! row fraction (`v = 0` is the top row, the zenith). The mapping follows the
//! consumer renderer's convention, in which the top row lands on `-y`;
//! culling decisions are therefore made on `v`, not on the direction.
use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Map a normalized image position to a unit direction.
///
/// `phi = 2π·u − π/2` is the longitude and `theta = π·(1 − v)` the
/// colatitude, giving `(sin θ cos φ, cos θ, sin θ sin φ)`.
#[inline]
pub fn equirect_direction(u: f64, v: f64) -> Vector3<f64> {
    let phi = u * 2.0 * PI - FRAC_PI_2;
    let theta = (1.0 - v) * PI;
    let d = Vector3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
    d.try_normalize(f64::EPSILON).unwrap_or(d)
}

/// Unsigned angle between two directions in radians, in `[0, π]`.
#[inline]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let na = a.norm().max(1e-12);
    let nb = b.norm().max(1e-12);
    (a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos()
}

/// [`angle_between`] in degrees.
#[inline]
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    angle_between(a, b).to_degrees()
}

/// Whether `v` maps below the horizon.
#[inline]
pub fn is_lower_hemisphere(v: f64) -> bool {
    v >= 0.5
}
