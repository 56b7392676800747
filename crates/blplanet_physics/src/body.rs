//! Celestial body types for the two-body simulation

use blplanet_math::Vec3;
use serde::{Serialize, Deserialize};
use std::f64::consts::TAU;

/// Radius used when a scene leaves it unspecified
pub const DEFAULT_RADIUS: f64 = 1.0;
/// Mass used when a scene leaves it unspecified
pub const DEFAULT_MASS: f64 = 1.0;
/// Rotation rate (rad/s) used when a scene leaves it unspecified
pub const DEFAULT_ROTATION_RATE: f64 = 1.0;
/// Orbital rate (rad/s) used when a scene leaves it unspecified
pub const DEFAULT_ORBITAL_RATE: f64 = 1.0;

/// Which side of the two-body pair a body is on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRole {
    /// The stationary body the other one falls toward ("Earth")
    Primary,
    /// The body whose velocity and position are integrated ("Moon")
    Satellite,
}

impl BodyRole {
    /// Lowercase label used in logs
    pub fn label(self) -> &'static str {
        match self {
            BodyRole::Primary => "primary",
            BodyRole::Satellite => "satellite",
        }
    }
}

/// A point mass with a visual radius and fixed rotation/orbit rates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialBody {
    /// Position in simulation units
    pub position: Vec3,
    /// Velocity in units per simulated second; `None` until initialized
    pub velocity: Option<Vec3>,
    /// Mass in simulation mass units
    pub mass: f64,
    /// Visual radius
    pub radius: f64,
    /// Spin about +Y in rad/s
    pub rotation_rate: f64,
    /// Angular rate of the fixed-circle orbit in rad/s
    pub orbital_rate: f64,
    /// Accumulated spin angle in `[0, 2π)`
    pub spin: f64,
}

impl CelestialBody {
    /// Create a body at `position` with default mass, radius and rates
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: None,
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
            rotation_rate: DEFAULT_ROTATION_RATE,
            orbital_rate: DEFAULT_ORBITAL_RATE,
            spin: 0.0,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the visual radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the spin rate
    pub fn with_rotation_rate(mut self, rate: f64) -> Self {
        self.rotation_rate = rate;
        self
    }

    /// Set the fixed orbital rate
    pub fn with_orbital_rate(mut self, rate: f64) -> Self {
        self.orbital_rate = rate;
        self
    }

    /// Return this body with its spin advanced by `rotation_rate * dt`
    pub fn spun(mut self, dt: f64) -> Self {
        self.spin = (self.spin + self.rotation_rate * dt).rem_euclid(TAU);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let body = CelestialBody::new(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(body.velocity.is_none());
        assert_eq!(body.mass, DEFAULT_MASS);
        assert_eq!(body.radius, DEFAULT_RADIUS);
        assert_eq!(body.rotation_rate, DEFAULT_ROTATION_RATE);
        assert_eq!(body.orbital_rate, DEFAULT_ORBITAL_RATE);
        assert_eq!(body.spin, 0.0);
    }

    #[test]
    fn test_builder_methods() {
        let body = CelestialBody::new(Vec3::ZERO)
            .with_velocity(Vec3::new(0.0, 0.0, -1.0))
            .with_mass(7.342)
            .with_radius(1.737)
            .with_rotation_rate(2.0)
            .with_orbital_rate(0.5);

        assert_eq!(body.velocity, Some(Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(body.mass, 7.342);
        assert_eq!(body.radius, 1.737);
        assert_eq!(body.rotation_rate, 2.0);
        assert_eq!(body.orbital_rate, 0.5);
    }

    #[test]
    fn test_spin_wraps_into_full_turn() {
        let body = CelestialBody::new(Vec3::ZERO).with_rotation_rate(1.0);
        let spun = body.spun(TAU + 0.5);
        assert!((spun.spin - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_negative_dt_spins_backward_and_stays_in_range() {
        let body = CelestialBody::new(Vec3::ZERO).with_rotation_rate(1.0);
        let spun = body.spun(-0.25);
        assert!(spun.spin >= 0.0 && spun.spin < TAU);
        assert!((spun.spin - (TAU - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(BodyRole::Primary.label(), "primary");
        assert_eq!(BodyRole::Satellite.label(), "satellite");
    }
}
