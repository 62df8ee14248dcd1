//! Render timing statistics.

use std::time::Duration;

/// Per-frame render cost and relayout counters.
pub struct FrameMetrics {
    // Frame timing (microseconds)
    pub render_time_us: u32,
    pub render_time_min_us: u32,
    pub render_time_max_us: u32,
    render_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    pub relayouts: u32,
    pub resets: u32,
}

impl FrameMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub const fn new() -> Self {
        Self {
            render_time_us: 0,
            render_time_min_us: u32::MAX,
            render_time_max_us: 0,
            render_time_avg_us: 0.0,
            total_frames: 0,
            relayouts: 0,
            resets: 0,
        }
    }

    /// Record one rendered frame and whether docking redrew it.
    pub fn record_frame(
        &mut self,
        render_time: Duration,
        relayout: bool,
    ) {
        let render_us = render_time.as_micros() as u32;
        self.render_time_us = render_us;
        self.render_time_min_us = self.render_time_min_us.min(render_us);
        self.render_time_max_us = self.render_time_max_us.max(render_us);

        if self.total_frames == 0 {
            self.render_time_avg_us = render_us as f32;
        } else {
            self.render_time_avg_us =
                Self::EMA_ALPHA.mul_add(render_us as f32, (1.0 - Self::EMA_ALPHA) * self.render_time_avg_us);
        }

        if relayout {
            self.relayouts += 1;
        }
        self.total_frames += 1;
    }

    #[inline]
    pub fn inc_resets(&mut self) { self.resets += 1; }

    /// Exponential moving average of the render time in microseconds.
    #[inline]
    pub const fn render_time_avg_us(&self) -> u32 { self.render_time_avg_us as u32 }

    pub fn summary(&self) -> String {
        let min = if self.total_frames == 0 { 0 } else { self.render_time_min_us };
        format!(
            "{} frames, {} relayouts, {} resets, render us min/avg/max {}/{}/{}",
            self.total_frames,
            self.relayouts,
            self.resets,
            min,
            self.render_time_avg_us(),
            self.render_time_max_us
        )
    }
}

impl Default for FrameMetrics {
    fn default() -> Self { Self::new() }
}
