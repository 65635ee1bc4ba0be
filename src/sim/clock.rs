//! Fixed-timestep accumulator
//!
//! Turns wall-clock frame times into a whole number of simulation steps. The
//! simulation never advances by a partial step; leftover time carries over to
//! the next frame.

use serde::{Deserialize, Serialize};

use crate::settings::SimSettings;

/// Converts elapsed wall time into fixed steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedClock {
    /// Step size in seconds
    dt: f32,
    /// Cap on steps per frame
    max_substeps: u32,
    /// Time not yet consumed by a step
    accumulator: f32,
    /// Timestamp seen by the last `tick`
    last_time: Option<f64>,
}

impl FixedClock {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        debug_assert!(
            dt.is_finite() && dt > 0.0,
            "clock step must be positive and finite, got {dt}"
        );
        Self {
            dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn from_settings(settings: &SimSettings) -> Self {
        Self::new(settings.fixed_dt, settings.max_substeps)
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Steps to run for a frame spanning `previous..current` (seconds)
    pub fn advance(&mut self, previous: f64, current: f64) -> u32 {
        self.accumulate((current - previous) as f32)
    }

    /// Steps to run for a frame ending at `now`; the first call runs none
    pub fn tick(&mut self, now: f64) -> u32 {
        let steps = match self.last_time {
            Some(previous) => self.advance(previous, now),
            None => 0,
        };
        self.last_time = Some(now);
        steps
    }

    /// Add `elapsed` seconds and take as many whole steps as fit
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        let elapsed = if elapsed.is_finite() && elapsed >= 0.0 {
            elapsed
        } else {
            log::warn!("Ignoring non-monotonic frame time {elapsed}");
            0.0
        };

        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }

        if self.accumulator >= self.dt {
            let dropped = self.accumulator;
            self.accumulator %= self.dt;
            log::debug!(
                "Step cap of {} hit, dropping {:.4}s of backlog",
                self.max_substeps,
                dropped - self.accumulator
            );
        }

        steps
    }

    /// Fraction of a step sitting in the accumulator, for render blending
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// Forget carried time, e.g. after a level restart
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::from_settings(&SimSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Powers of two keep the arithmetic exact
    const DT: f32 = 0.125;

    #[test]
    fn test_short_frame_carries_over() {
        let mut clock = FixedClock::new(DT, 8);
        assert_eq!(clock.accumulate(0.0625), 0);
        assert_eq!(clock.accumulator(), 0.0625);
        assert_eq!(clock.accumulate(0.0625), 1);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_whole_steps_and_remainder() {
        let mut clock = FixedClock::new(DT, 8);
        assert_eq!(clock.accumulate(0.3125), 2);
        assert_eq!(clock.accumulator(), 0.0625);
    }

    #[test]
    fn test_advance_uses_timestamps() {
        let mut clock = FixedClock::new(DT, 8);
        assert_eq!(clock.advance(1.0, 1.5), 4);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_first_tick_runs_nothing() {
        let mut clock = FixedClock::new(DT, 8);
        assert_eq!(clock.tick(10.0), 0);
        assert_eq!(clock.tick(10.25), 2);
        assert_eq!(clock.tick(10.3125), 0);
        assert_eq!(clock.accumulator(), 0.0625);
    }

    #[test]
    fn test_cap_drops_backlog() {
        let mut clock = FixedClock::new(DT, 4);
        // 10 steps plus a half step of time
        assert_eq!(clock.accumulate(1.3125), 4);
        assert_eq!(clock.accumulator(), 0.0625);
        assert_eq!(clock.accumulate(0.0), 0);
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut clock = FixedClock::new(DT, 8);
        clock.accumulate(0.0625);
        assert_eq!(clock.advance(5.0, 4.0), 0);
        assert_eq!(clock.accumulator(), 0.0625);
        assert_eq!(clock.accumulate(f32::NAN), 0);
        assert_eq!(clock.accumulator(), 0.0625);
    }

    #[test]
    fn test_interpolation_alpha() {
        let mut clock = FixedClock::new(DT, 8);
        clock.accumulate(0.0625);
        assert!((clock.interpolation_alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "positive and finite")]
    fn test_rejects_zero_step() {
        FixedClock::new(0.0, 8);
    }

    #[test]
    fn test_reset() {
        let mut clock = FixedClock::new(DT, 8);
        clock.tick(1.0);
        clock.accumulate(0.0625);
        clock.reset();
        assert_eq!(clock.accumulator(), 0.0);
        assert_eq!(clock.tick(2.0), 0);
    }

    #[test]
    fn test_sixty_hertz_frames() {
        let mut clock = FixedClock::default();
        let mut steps = 0;
        // One second of 144 Hz frames
        for _ in 0..144 {
            steps += clock.accumulate(1.0 / 144.0);
        }
        assert!((59..=60).contains(&steps));
    }
}
