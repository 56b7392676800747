//! Vector math for BLPlanet
//!
//! - [`Vec3`] - double-precision 3D vector used for positions and velocities

mod vec3;

pub use vec3::Vec3;
