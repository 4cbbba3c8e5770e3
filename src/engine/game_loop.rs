//! Fixed timestep frame clock
//!
//! The caller reports how much wall time a frame took and gets back how many
//! fixed `update(dt)` steps to run. Rendering happens once per frame
//! regardless of the step count.
use std::time::Duration;

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of updates per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Frame pacing state
#[derive(Debug)]
pub struct FrameClock {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,
    paused: bool,
    frame_count: u64,
    step_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            paused: false,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Register a frame that took `frame_time`, returns the number of fixed updates to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop whatever the cap left behind so a stall does not replay later
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::trace!("frame clock dropped {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.step_count += steps as u64;
        steps
    }

    /// Seconds per fixed update
    pub fn timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation factor between the last two fixed steps
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.step_count(), 0);
        assert!(!clock.is_paused());
        assert!((clock.timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_one_step_per_sixtieth() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(clock.advance(Duration::from_millis(5)), 0);
        assert_eq!(clock.advance(Duration::from_millis(12)), 1);
        assert_eq!(clock.step_count(), 2);
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        // 300ms would allow 18 updates
        assert_eq!(clock.advance(Duration::from_millis(300)), MAX_STEPS_PER_FRAME);
        // The backlog is discarded rather than replayed
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_no_updates() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert_eq!(clock.advance(Duration::from_millis(50)), 0);
        assert_eq!(clock.frame_count(), 1);

        clock.toggle_pause();
        assert!(!clock.is_paused());
        assert_eq!(clock.advance(FIXED_TIMESTEP_DURATION), 1);
    }

    #[test]
    fn test_alpha_range() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(20));
        let alpha = clock.alpha();
        assert!((0.0..=1.0).contains(&alpha));
    }
}
