//! Orbit state and physics configuration

use blplanet_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::body::{BodyRole, CelestialBody};
use crate::integrator::{gravity_step, kinematic_step, orbit_markers};

/// Gravitational constant for the shipped unit scale
///
/// Distances in 1000 km, masses in 1e22 kg, time in seconds:
/// `6.674e-11 * 1e22 / (1e6)^3`.
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 6.674e-7;

/// How the satellite is moved each tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitModel {
    /// Semi-implicit Euler integration of Newtonian gravity
    #[default]
    Gravity,
    /// Fixed circle at the satellite's `orbital_rate`
    Kinematic,
}

/// Configuration for the orbit simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravitational constant in simulation units
    pub gravitational_constant: f64,
    /// Orbit model used by [`OrbitState::advance`]
    pub model: OrbitModel,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            model: OrbitModel::default(),
        }
    }
}

impl PhysicsConfig {
    /// Create a gravity-model config with the given constant
    pub fn new(gravitational_constant: f64) -> Self {
        Self {
            gravitational_constant,
            model: OrbitModel::Gravity,
        }
    }

    /// Select the orbit model
    pub fn with_model(mut self, model: OrbitModel) -> Self {
        self.model = model;
        self
    }
}

/// Direction markers drawn next to the satellite
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitMarkers {
    /// Unit vector from the satellite toward the primary
    pub radial: Vec3,
    /// Unit direction of travel perpendicular to `radial`
    pub tangential: Vec3,
}

/// Complete physics state of the two-body pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    /// The stationary body
    pub primary: CelestialBody,
    /// The orbiting body
    pub satellite: CelestialBody,
    /// Markers recomputed by every step
    pub markers: OrbitMarkers,
}

impl OrbitState {
    /// Create a state from the two bodies, computing initial markers
    pub fn new(primary: CelestialBody, satellite: CelestialBody) -> Self {
        Self {
            primary,
            satellite,
            markers: orbit_markers(&primary, &satellite),
        }
    }

    /// Get a body by role
    pub fn body(&self, role: BodyRole) -> &CelestialBody {
        match role {
            BodyRole::Primary => &self.primary,
            BodyRole::Satellite => &self.satellite,
        }
    }

    /// Distance between the two bodies
    pub fn separation(&self) -> f64 {
        self.primary.position.distance(self.satellite.position)
    }

    /// Advance by `dt` simulated seconds and return the new state
    ///
    /// Moves the satellite with the configured [`OrbitModel`], then spins
    /// both bodies by their rotation rates.
    pub fn advance(&self, dt: f64, config: &PhysicsConfig) -> Self {
        let mut next = match config.model {
            OrbitModel::Gravity => gravity_step(self, dt, config.gravitational_constant),
            OrbitModel::Kinematic => kinematic_step(self, dt),
        };
        next.primary = next.primary.spun(dt);
        next.satellite = next.satellite.spun(dt);
        next
    }
}
