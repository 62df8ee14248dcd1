//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Simulated frame period (~50 FPS). Feeds derive their clock from it.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Simulated wall-clock hours that pass per real second of feed time.
pub const HOURS_PER_SECOND: u32 = 1;
