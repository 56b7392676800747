//! Accumulated simulated time

use crate::calendar::{clamp_sim_time, CalendarDate, SIM_TIME_FLOOR};

/// Running total of simulated seconds
///
/// The total moves backward when the time multiplier is negative but never
/// drops below [`SIM_TIME_FLOOR`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimClock {
    elapsed: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock {
    /// Start a clock at the floor
    pub fn new() -> Self {
        Self {
            elapsed: SIM_TIME_FLOOR,
        }
    }

    /// Start a clock at `seconds` (clamped to the floor)
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            elapsed: clamp_sim_time(seconds),
        }
    }

    /// Add `dt` simulated seconds and return the new total
    ///
    /// A non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite clock step {}", dt);
            return self.elapsed;
        }
        self.elapsed = clamp_sim_time(self.elapsed + dt);
        self.elapsed
    }

    /// Accumulated simulated seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Calendar reading of the accumulated time
    pub fn date(&self) -> CalendarDate {
        CalendarDate::from_seconds(self.elapsed)
    }
}
