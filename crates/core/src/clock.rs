//! Frame timing.

use std::time::Instant;

/// Measures the time between consecutive frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    previous: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            previous: now,
            frames: 0,
        }
    }

    /// Restart timing from `now`. Called once when the loop starts.
    pub fn reset(&mut self, now: Instant) {
        self.previous = now;
        self.frames = 0;
    }

    /// Seconds since the previous tick (or reset), then advance.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.previous);
        self.previous = now;
        self.frames += 1;
        elapsed.as_secs_f32()
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Ticks since the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantaneous frame rate for an elapsed time, `0.0` when no time passed.
pub fn frame_rate(elapsed_secs: f32) -> f32 {
    if elapsed_secs > 0.0 {
        1.0 / elapsed_secs
    } else {
        0.0
    }
}
