//! Renderer seam
//!
//! The frame loop hands a [`Frame`] to a [`Renderer`] once per running tick.
//! Renderers decide how to draw it; the crate itself never touches a window
//! or GPU.

use bytemuck::{Pod, Zeroable};

use blplanet_physics::OrbitMarkers;

use crate::world::World;

/// Per-instance data for one visible entity, laid out for GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub radius: f32,
    /// Rotation about +Y in radians
    pub spin: f32,
    pub _pad: [f32; 3],
}

/// Everything a renderer needs for one frame
pub struct Frame<'a> {
    pub world: &'a World,
    /// Formatted simulated date, when the date panel is shown
    pub date_panel: Option<String>,
    /// Orbit markers, when enabled and the world has an orbit
    pub markers: Option<OrbitMarkers>,
    /// Zero-based index of the rendered frame
    pub frame_index: u64,
    /// Accumulated simulated seconds
    pub sim_time: f64,
}

impl Frame<'_> {
    /// Build the instance buffer for all visible entities
    pub fn instances(&self) -> Vec<InstanceData> {
        self.world
            .iter()
            .filter(|(_, entity)| entity.is_visible())
            .map(|(_, entity)| InstanceData {
                position: entity.transform.position.to_f32_array(),
                radius: entity.radius() as f32,
                spin: entity.transform.spin as f32,
                _pad: [0.0; 3],
            })
            .collect()
    }
}

/// View an instance buffer as raw bytes
pub fn instance_bytes(instances: &[InstanceData]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// A drawing backend driven by the frame loop
pub trait Renderer {
    /// Draw one frame; called exactly once per running tick
    fn render(&mut self, frame: &Frame<'_>);

    /// Called once when the loop leaves the loading state
    fn hide_loading_indicator(&mut self);
}
