//! Writing timer: a stopwatch that survives pauses.
//!
//! Every operation has an `_at` form taking the current instant so the
//! arithmetic can be exercised without sleeping; the plain forms read
//! `Instant::now()`.

use std::time::{Duration, Instant};

/// What the label shows before the first start and after every reset.
pub const ZERO_DISPLAY: &str = "00:00:00.000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    /// `banked + (now - resumed_at)` is the elapsed time, i.e. the run's
    /// zero point sits at `resumed_at - banked`.
    Running { resumed_at: Instant, banked: Duration },
}

/// Stopwatch with start / pause / reset and a polled display string.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    phase: Phase,
    /// Valid while stopped; refreshed on every tick while running.
    elapsed: Duration,
    display: String,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            phase: Phase::Stopped,
            elapsed: Duration::ZERO,
            display: ZERO_DISPLAY.to_string(),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// No-op while already running.
    pub fn start_at(&mut self, now: Instant) {
        if let Phase::Stopped = self.phase {
            self.phase = Phase::Running { resumed_at: now, banked: self.elapsed };
            log::debug!("timer started at {}", format_elapsed(self.elapsed));
        }
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Freezes elapsed time and the display. No-op while stopped.
    pub fn pause_at(&mut self, now: Instant) {
        if let Phase::Running { .. } = self.phase {
            self.elapsed = self.elapsed_at(now);
            self.phase = Phase::Stopped;
            self.display = format_elapsed(self.elapsed);
            log::debug!("timer paused at {}", self.display);
        }
    }

    /// Back to zero and stopped, whatever the current state.
    pub fn reset(&mut self) {
        self.phase = Phase::Stopped;
        self.elapsed = Duration::ZERO;
        self.display = ZERO_DISPLAY.to_string();
    }

    pub fn tick(&mut self) -> &str {
        self.tick_at(Instant::now())
    }

    /// Called on every poll. While running, recomputes elapsed time and the
    /// display string; while stopped, returns the frozen display.
    pub fn tick_at(&mut self, now: Instant) -> &str {
        if let Phase::Running { .. } = self.phase {
            self.elapsed = self.elapsed_at(now);
            self.display = format_elapsed(self.elapsed);
        }
        &self.display
    }

    /// Stopped with nothing on the clock: fresh or just reset.
    pub fn is_zero(&self) -> bool {
        !self.is_running() && self.elapsed.is_zero()
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Stopped => self.elapsed,
            Phase::Running { resumed_at, banked } => banked + now.saturating_duration_since(resumed_at),
        }
    }

    /// Last value produced by `tick`, `pause` or `reset`.
    pub fn display(&self) -> &str {
        &self.display
    }
}

/// `HH:MM:SS.mmm`, hours unbounded and at least two digits.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs / 60) % 60;
    let secs = total_secs % 60;
    let millis = elapsed.subsec_millis();
    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_format_examples() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.000");
        assert_eq!(format_elapsed(ms(3_661_250)), "01:01:01.250");
        assert_eq!(format_elapsed(ms(59_999)), "00:00:59.999");
    }

    #[test]
    fn test_format_hours_unbounded() {
        assert_eq!(format_elapsed(Duration::from_secs(25 * 3600)), "25:00:00.000");
        assert_eq!(format_elapsed(Duration::from_secs(100 * 3600 + 61)), "100:01:01.000");
    }

    #[test]
    fn test_fresh_stopwatch_shows_zero() {
        let mut sw = Stopwatch::new();
        assert!(!sw.is_running());
        assert_eq!(sw.tick_at(Instant::now()), ZERO_DISPLAY);
    }

    #[test]
    fn test_tick_while_running() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        assert_eq!(sw.tick_at(t0 + ms(1_500)), "00:00:01.500");
        assert_eq!(sw.tick_at(t0 + ms(3_661_250)), "01:01:01.250");
    }

    #[test]
    fn test_pause_excludes_paused_interval() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        sw.pause_at(t0 + ms(2_000));
        assert_eq!(sw.display(), "00:00:02.000");
        assert!(!sw.is_zero());

        // frozen while stopped
        assert_eq!(sw.tick_at(t0 + ms(10_000)), "00:00:02.000");
        assert_eq!(sw.elapsed_at(t0 + ms(10_000)), ms(2_000));

        sw.start_at(t0 + ms(10_000));
        assert_eq!(sw.tick_at(t0 + ms(10_500)), "00:00:02.500");
    }

    #[test]
    fn test_start_and_pause_are_idempotent() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start_at(t0);
        sw.start_at(t0 + ms(900));
        assert_eq!(sw.elapsed_at(t0 + ms(1_000)), ms(1_000));

        sw.pause_at(t0 + ms(1_000));
        sw.pause_at(t0 + ms(5_000));
        assert_eq!(sw.elapsed_at(t0 + ms(5_000)), ms(1_000));
    }

    #[test]
    fn test_reset_from_any_state() {
        let t0 = Instant::now();

        let mut running = Stopwatch::new();
        running.start_at(t0);
        running.tick_at(t0 + ms(700));
        running.reset();
        assert!(!running.is_running());
        assert_eq!(running.elapsed_at(t0 + ms(800)), Duration::ZERO);
        assert_eq!(running.display(), ZERO_DISPLAY);
        assert_eq!(running.tick_at(t0 + ms(900)), ZERO_DISPLAY);

        let mut paused = Stopwatch::new();
        paused.start_at(t0);
        paused.pause_at(t0 + ms(300));
        paused.reset();
        assert_eq!(paused.elapsed_at(t0 + ms(400)), Duration::ZERO);
        assert_eq!(paused.display(), ZERO_DISPLAY);

        let mut idle = Stopwatch::new();
        idle.reset();
        assert_eq!(idle.display(), ZERO_DISPLAY);
        assert!(idle.is_zero());
        assert!(running.is_zero());
        assert!(paused.is_zero());
    }

    #[test]
    fn test_elapsed_monotonic_across_start_pause_sequence() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        let mut last = Duration::ZERO;
        let mut running = false;

        for step in 0..40u64 {
            let now = t0 + ms(step * 37);
            if step % 5 == 0 {
                if running {
                    sw.pause_at(now);
                } else {
                    sw.start_at(now);
                }
                running = !running;
            }
            let elapsed = sw.elapsed_at(now);
            assert!(elapsed >= last, "elapsed went backwards at step {step}");
            if !sw.is_running() {
                assert_eq!(sw.elapsed_at(now + ms(1_000)), elapsed);
            }
            last = elapsed;
        }
    }
}
