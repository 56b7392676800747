//! Logging renderer
//!
//! Stands in for a GPU backend: it builds the same instance buffer a GPU
//! renderer would upload and logs a summary of the frame.

use blplanet_core::{instance_bytes, Frame, Renderer};

/// Renderer that reports frames through `log`
pub struct ConsoleRenderer {
    /// Log every N-th frame (0 = never)
    log_every_frames: u64,
    frames_rendered: u64,
    last_upload_bytes: usize,
    loading_visible: bool,
}

impl ConsoleRenderer {
    pub fn new(log_every_frames: u64) -> Self {
        Self {
            log_every_frames,
            frames_rendered: 0,
            last_upload_bytes: 0,
            loading_visible: true,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Size of the last instance buffer in bytes
    pub fn last_upload_bytes(&self) -> usize {
        self.last_upload_bytes
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    fn should_log(&self, frame_index: u64) -> bool {
        self.log_every_frames > 0 && frame_index % self.log_every_frames == 0
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        let instances = frame.instances();
        let bytes = instance_bytes(&instances);
        self.last_upload_bytes = bytes.len();
        self.frames_rendered += 1;

        if !self.should_log(frame.frame_index) {
            return;
        }

        match &frame.date_panel {
            Some(date) => log::info!(
                "Frame {}: {} ({} instances, {} bytes)",
                frame.frame_index,
                date,
                instances.len(),
                bytes.len()
            ),
            None => log::info!(
                "Frame {}: t={:.1}s ({} instances)",
                frame.frame_index,
                frame.sim_time,
                instances.len()
            ),
        }

        if let Some(markers) = frame.markers {
            log::info!(
                "  radial ({:.3}, {:.3}, {:.3}) tangential ({:.3}, {:.3}, {:.3})",
                markers.radial.x,
                markers.radial.y,
                markers.radial.z,
                markers.tangential.x,
                markers.tangential.y,
                markers.tangential.z
            );
        }
    }

    fn hide_loading_indicator(&mut self) {
        self.loading_visible = false;
        log::info!("Loading finished");
    }
}
