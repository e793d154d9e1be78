// src/common/timing.rs

use core::time::Duration;

/// Minimum width of the active-high reset pulse.
pub const RESET_PULSE: Duration = Duration::from_micros(10);
