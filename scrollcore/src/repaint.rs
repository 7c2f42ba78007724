//! Repaint scheduling for the writing surface
//!
//! egui only runs `update()` when something wakes it. Most of the time that
//! is user input, but the writing timer needs the frame loop to keep
//! turning over while it runs so its label can advance.
//!
//! Input wakes egui by itself. On top of that the controller can:
//!
//! - **poll**: while continuous mode is on, request a repaint every
//!   `interval`. This is what drives the timer label.
//! - **one-shot**: `mark_needs_repaint()` asks for exactly one more frame,
//!   e.g. after a texture was replaced outside of an input event.
//!
//! Switching continuous mode off cancels the poll; the app does this when
//! its window is about to close.

use std::time::Duration;

/// Poll interval used when none is configured. Matches the timer refresh.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Controls when the egui context should request repaints.
///
/// Call [`RepaintController::end_frame`] at the bottom of `update()`.
#[derive(Debug)]
pub struct RepaintController {
    continuous: bool,
    needs_repaint: bool,
    interval: Duration,
}

impl RepaintController {
    /// Create a controller that polls at `interval` while continuous.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            continuous: false,
            needs_repaint: false,
            interval,
        }
    }

    /// Enable or disable the recurring poll.
    pub fn set_continuous(&mut self, continuous: bool) {
        if continuous != self.continuous {
            log::debug!("repaint poll {}", if continuous { "scheduled" } else { "cancelled" });
        }
        self.continuous = continuous;
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request a single repaint on the next opportunity.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Call at the **end** of `update()`. Consumes any pending one-shot.
    ///
    /// - continuous → repaint again after `interval`
    /// - one-shot pending → repaint immediately
    /// - otherwise → sleep until the next input event
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        let one_shot = std::mem::take(&mut self.needs_repaint);
        if self.continuous {
            ctx.request_repaint_after(self.interval);
        } else if one_shot {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_toggle() {
        let mut rc = RepaintController::with_interval(Duration::from_millis(20));
        assert_eq!(rc.interval(), Duration::from_millis(20));
        assert!(!rc.is_continuous());
        rc.set_continuous(true);
        assert!(rc.is_continuous());
        rc.set_continuous(false);
        assert!(!rc.is_continuous());
    }

    #[test]
    fn test_one_shot_consumed_by_end_frame() {
        let ctx = egui::Context::default();
        let mut rc = RepaintController::with_interval(DEFAULT_POLL_INTERVAL);
        assert!(!rc.needs_repaint());
        rc.mark_needs_repaint();
        assert!(rc.needs_repaint());
        rc.end_frame(&ctx);
        assert!(!rc.needs_repaint());
        rc.end_frame(&ctx);
        assert!(!rc.needs_repaint());
    }

    #[test]
    fn test_one_shot_consumed_while_polling() {
        let ctx = egui::Context::default();
        let mut rc = RepaintController::with_interval(DEFAULT_POLL_INTERVAL);
        rc.set_continuous(true);
        rc.mark_needs_repaint();
        rc.end_frame(&ctx);
        assert!(!rc.needs_repaint());
        assert!(rc.is_continuous());
    }
}
