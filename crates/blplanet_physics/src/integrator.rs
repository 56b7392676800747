//! Orbit integrators
//!
//! Both integrators are pure functions of `(state, dt)`: they take an
//! [`OrbitState`] by reference and return the advanced state. Only the
//! satellite moves; the primary is copied through unchanged.

use blplanet_math::Vec3;

use crate::body::CelestialBody;
use crate::orbit::{OrbitMarkers, OrbitState};

/// Unit direction of travel for a circular orbit in the XZ plane
///
/// `radial_out` points from the primary to the satellite. The orbit turns
/// counter-clockwise about +Y; if `radial_out` is parallel to Y the +Z axis is
/// used as the rotation axis instead.
pub fn orbital_plane_tangent(radial_out: Vec3) -> Vec3 {
    let tangent = Vec3::Y.cross(radial_out);
    if tangent.length_squared() > 1e-24 {
        tangent.normalized()
    } else {
        Vec3::Z.cross(radial_out).normalized()
    }
}

/// Velocity for a circular orbit of `satellite` around `primary`
///
/// Speed is `sqrt(G * m_primary / r)` along [`orbital_plane_tangent`].
pub fn circular_velocity(primary: &CelestialBody, satellite: &CelestialBody, g: f64) -> Vec3 {
    let offset = satellite.position - primary.position;
    let speed = (g * primary.mass / offset.length()).sqrt();
    orbital_plane_tangent(offset.normalized()) * speed
}

/// Radial/tangential marker directions for the current pair
pub fn orbit_markers(primary: &CelestialBody, satellite: &CelestialBody) -> OrbitMarkers {
    let radial = (primary.position - satellite.position).normalized();

    let tangential = satellite
        .velocity
        .map(|v| v.reject_from(radial).normalized())
        .filter(|t| t.length_squared() > 0.0)
        .unwrap_or_else(|| orbital_plane_tangent(-radial));

    OrbitMarkers { radial, tangential }
}

/// Advance the satellite under Newtonian gravity by one semi-implicit Euler step
///
/// ```text
/// r̂  = unit(primary - satellite)
/// F  = G * m_p * m_s / r²
/// a  = r̂ * F / m_s
/// v' = v + a dt
/// x' = x + v' dt
/// ```
///
/// There is no floor on `r²`; coincident bodies produce non-finite values.
/// An undefined satellite velocity is first initialized with
/// [`circular_velocity`].
pub fn gravity_step(state: &OrbitState, dt: f64, g: f64) -> OrbitState {
    let primary = state.primary;
    let mut satellite = state.satellite;

    let velocity = satellite
        .velocity
        .unwrap_or_else(|| circular_velocity(&primary, &satellite, g));

    let offset = primary.position - satellite.position;
    let radial = offset.normalized();
    let force = g * primary.mass * satellite.mass / offset.length_squared();
    let acceleration = radial * (force / satellite.mass);

    let velocity = velocity + acceleration * dt;
    satellite.position += velocity * dt;
    satellite.velocity = Some(velocity);

    OrbitState {
        primary,
        satellite,
        markers: orbit_markers(&primary, &satellite),
    }
}

/// Advance the satellite along a fixed circle at its `orbital_rate`
///
/// The offset from the primary is rotated about +Y by `orbital_rate * dt` and
/// the velocity is set to `ω × r`.
pub fn kinematic_step(state: &OrbitState, dt: f64) -> OrbitState {
    let primary = state.primary;
    let mut satellite = state.satellite;

    let offset = (satellite.position - primary.position).rotated_y(satellite.orbital_rate * dt);
    satellite.position = primary.position + offset;
    satellite.velocity = Some((Vec3::Y * satellite.orbital_rate).cross(offset));

    OrbitState {
        primary,
        satellite,
        markers: orbit_markers(&primary, &satellite),
    }
}
