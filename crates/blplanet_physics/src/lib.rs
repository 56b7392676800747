//! Two-body orbital mechanics for BLPlanet
//!
//! This crate advances a stationary primary and an orbiting satellite:
//! - Celestial bodies with mass, radius and fixed rotation/orbit rates
//! - Semi-implicit Euler integration of Newtonian gravity
//! - A fixed-rate circular orbit for the kinematic demo variant
//! - Radial/tangential marker directions for visualization

pub mod body;
pub mod integrator;
pub mod orbit;

// Re-export commonly used types
pub use body::{BodyRole, CelestialBody, DEFAULT_MASS, DEFAULT_ORBITAL_RATE, DEFAULT_RADIUS, DEFAULT_ROTATION_RATE};
pub use integrator::{circular_velocity, gravity_step, kinematic_step, orbit_markers};
pub use orbit::{OrbitMarkers, OrbitModel, OrbitState, PhysicsConfig, DEFAULT_GRAVITATIONAL_CONSTANT};
