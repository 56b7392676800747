//! Core runtime for the BLPlanet demos
//!
//! This crate provides:
//! - The fixed 365-day calendar and the accumulated simulated clock
//! - Asset validation, caching and background loading
//! - RON scenes instantiated into a [`World`] of entities
//! - The [`FrameLoop`] state machine and the [`Renderer`] seam it drives

pub mod asset_cache;
pub mod asset_error;
pub mod asset_loader;
pub mod assets;
pub mod calendar;
pub mod clock;
mod entity;
pub mod frame_loop;
pub mod render;
pub mod scene;
mod world;

// Re-export commonly used types
pub use asset_cache::{Asset, AssetCache, AssetHandle, AssetId};
pub use asset_error::AssetError;
pub use asset_loader::{AssetLoader, LoadResult};
pub use assets::{AssetKind, LoadedAsset, ModelAsset, TextureAsset, TextureFormat};
pub use calendar::{CalendarDate, Month, SECONDS_PER_DAY, SECONDS_PER_YEAR, SIM_TIME_FLOOR};
pub use clock::SimClock;
pub use entity::{DirtyFlags, Entity, Material, Mesh, TextureSlot, Transform};
pub use frame_loop::{FrameLoop, LoopState, SimOptions, TickReport, DEFAULT_TIME_MULTIPLIER};
pub use render::{instance_bytes, Frame, InstanceData, Renderer};
pub use scene::{AssetRequest, AssetTarget, BodyTemplate, ModelTemplate, Scene, SceneError, SceneInstance, TextureSet};
pub use world::{EntityKey, World};

// Re-export the physics types scenes and worlds are built from
pub use blplanet_physics::{BodyRole, OrbitModel, OrbitState, PhysicsConfig};
