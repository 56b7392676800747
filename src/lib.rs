//! BLPlanet application library
//!
//! Configuration and the console-side systems used by the `blplanet` binary.

pub mod config;
pub mod systems;
