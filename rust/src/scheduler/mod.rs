//! Temporal scheduler module.
//!
//! Turns per-channel quotas into concrete publication timestamps under a
//! frequency policy.

mod cadence;
mod core;

pub use cadence::spread_day_offsets;
pub use core::{parse_time_of_day, schedule, ScheduleError};
