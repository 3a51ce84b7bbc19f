//! Tick clock and frame rate tracking.
//!
//! Playback runs on a fixed-rate clock decoupled from the redraw rate: each
//! redraw asks the clock how many playback ticks elapsed since the previous
//! one and runs that many.

use std::time::{Duration, Instant};

/// Most ticks run for a single redraw, so a stall cannot trigger a burst.
const MAX_TICKS_PER_FRAME: u32 = 10;

/// Largest delta accepted from the wall clock, in seconds.
const MAX_DT: f32 = 0.25;

/// Fixed-rate playback clock.
#[derive(Debug)]
pub struct TickClock {
    /// Seconds per tick
    tick_dt: f32,
    /// Time of the previous poll
    last_poll: Instant,
    /// Unconsumed time
    accumulator: f32,
}

impl TickClock {
    /// Create a clock ticking `rate_hz` times per second.
    #[must_use]
    pub fn new(rate_hz: u32) -> Self {
        Self {
            tick_dt: 1.0 / rate_hz.max(1) as f32,
            last_poll: Instant::now(),
            accumulator: 0.0,
        }
    }

    /// Number of ticks elapsed since the previous poll.
    pub fn poll(&mut self) -> u32 {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> u32 {
        let dt = now
            .saturating_duration_since(self.last_poll)
            .as_secs_f32()
            .min(MAX_DT);
        self.last_poll = now;
        self.accumulate(dt)
    }

    /// Add `dt` seconds and return how many whole ticks are due.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut count = 0;

        while self.accumulator >= self.tick_dt && count < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_dt;
            count += 1;
        }

        // Still behind after the cap: drop the backlog
        if self.accumulator > self.tick_dt * 2.0 {
            self.accumulator = 0.0;
        }

        count
    }

    /// Reset timing (call after window creation).
    pub fn reset(&mut self) {
        self.last_poll = Instant::now();
        self.accumulator = 0.0;
    }
}

/// Simple FPS counter for the viewport readout.
#[derive(Debug)]
pub struct FpsCounter {
    /// Frame count since last update
    frame_count: u32,
    /// Time of last FPS calculation
    last_update: Instant,
    /// Update interval
    update_interval: Duration,
    /// Current FPS value
    current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    /// Create a new FPS counter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(500),
            current_fps: 0.0,
        }
    }

    /// Count one rendered frame. Returns the current FPS.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;

        let elapsed = now.saturating_duration_since(self.last_update);
        if elapsed >= self.update_interval {
            self.current_fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_update = now;
        }

        self.current_fps
    }
}
