//! Simulated calendar
//!
//! Converts accumulated simulated seconds into a year / month / day /
//! time-of-day reading. The calendar is fixed: every year has 365 days and
//! every month has the same length each year.

use std::fmt;
use std::ops::Range;

/// Seconds in one simulated day
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Days in one simulated year (no leap years)
pub const DAYS_PER_YEAR: u32 = 365;
/// Seconds in one simulated year
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;
/// Smallest accumulated time ever displayed
pub const SIM_TIME_FLOOR: f64 = 0.1;

/// Clamp accumulated simulated time to [`SIM_TIME_FLOOR`]
///
/// Negative, sub-floor and non-finite inputs all map to the floor.
pub fn clamp_sim_time(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds >= SIM_TIME_FLOOR {
        seconds
    } else {
        SIM_TIME_FLOOR
    }
}

/// A month of the fixed 365-day calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Three-letter display name
    pub fn name(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Number of days in this month
    pub fn days(self) -> u32 {
        match self {
            Month::Feb => 28,
            Month::Apr | Month::Jun | Month::Sep | Month::Nov => 30,
            _ => 31,
        }
    }

    /// Zero-based day of the year on which this month starts
    pub fn start_day(self) -> u32 {
        Month::ALL
            .iter()
            .take_while(|m| **m != self)
            .map(|m| m.days())
            .sum()
    }

    /// Half-open range of seconds-into-the-year covered by this month
    pub fn seconds_range(self) -> Range<f64> {
        let start = self.start_day() as f64 * SECONDS_PER_DAY;
        let end = (self.start_day() + self.days()) as f64 * SECONDS_PER_DAY;
        start..end
    }

    /// Month containing the zero-based `day_of_year`
    ///
    /// Days past the end of the year fall into December.
    pub fn containing_day(day_of_year: u32) -> Month {
        let mut start = 0;
        for month in Month::ALL {
            start += month.days();
            if day_of_year < start {
                return month;
            }
        }
        Month::Dec
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A calendar reading of accumulated simulated time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    /// Whole years elapsed
    pub year: u64,
    /// Month within the year
    pub month: Month,
    /// One-based day of the month
    pub day: u32,
    /// Hour of the day (0-23)
    pub hours: u32,
    /// Minute of the hour (0-59)
    pub minutes: u32,
    /// Second of the minute (0-59)
    pub seconds: u32,
}

impl CalendarDate {
    /// Decompose accumulated simulated seconds
    ///
    /// The input is clamped to [`SIM_TIME_FLOOR`] first.
    pub fn from_seconds(seconds: f64) -> Self {
        let seconds = clamp_sim_time(seconds);

        let year = (seconds / SECONDS_PER_YEAR).floor();
        let into_year = seconds.rem_euclid(SECONDS_PER_YEAR);

        let day_of_year = ((into_year / SECONDS_PER_DAY).floor() as u32).min(DAYS_PER_YEAR - 1);
        let month = Month::containing_day(day_of_year);
        let day = day_of_year - month.start_day() + 1;

        let into_day = (into_year - day_of_year as f64 * SECONDS_PER_DAY).floor() as u32;
        let into_day = into_day.min(SECONDS_PER_DAY as u32 - 1);

        Self {
            year: year as u64,
            month,
            day,
            hours: into_day / 3600,
            minutes: (into_day % 3600) / 60,
            seconds: into_day % 60,
        }
    }

    /// Zero-padded `HH:MM:SS`
    pub fn time_of_day(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Year {}, {} {}, {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hours, self.minutes, self.seconds
        )
    }
}
