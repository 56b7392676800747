//! Wall-clock frame timing

use std::time::{Duration, Instant};

/// Cap a raw frame delta to `[0, max_dt]`
pub fn cap_delta(raw_dt: f64, max_dt: f64) -> f64 {
    raw_dt.clamp(0.0, max_dt.max(0.0))
}

/// Measures wall-clock time between frames
///
/// Long stalls (first frame, debugger pauses) are capped so a single frame
/// never feeds the integrator a huge step.
pub struct FrameTimer {
    last_frame: Instant,
    max_dt: f64,
}

impl FrameTimer {
    /// Create a timer whose deltas never exceed `max_dt` seconds
    pub fn new(max_dt: f64) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt,
        }
    }

    /// Seconds since the previous call (or construction), capped
    pub fn delta(&mut self) -> f64 {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        cap_delta(raw_dt, self.max_dt)
    }

    /// Sleep out the rest of a frame of `frame_time`
    pub fn wait_for_next_frame(&self, frame_time: Duration) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}
