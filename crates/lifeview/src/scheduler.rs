//! # Frame Scheduler
//!
//! Steady-rate animation ticks with an explicit start/stop lifecycle.
//!
//! ## Design
//!
//! The scheduler never sleeps. The event loop asks it when the next tick is
//! due, waits until then, and polls:
//!
//! ```text
//! start(now)           -> next_due = now
//! poll(now) >= due     -> tick, next_due += period
//! fell > 1 period late -> resync to now + period, count the miss
//! stop()               -> no ticks until start() again
//! ```
//!
//! Time is passed in, so tests drive it without a clock.

use std::time::{Duration, Instant};

/// Fixed-rate tick source for the render loop.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    period: Duration,
    next_due: Option<Instant>,
    ticks: u64,
    missed: u64,
}

impl FrameScheduler {
    /// Creates a stopped scheduler ticking `rate` times per second.
    ///
    /// A rate of zero is treated as one.
    #[must_use]
    pub fn new(rate: u32) -> Self {
        Self {
            period: Duration::from_micros(1_000_000 / u64::from(rate.max(1))),
            next_due: None,
            ticks: 0,
            missed: 0,
        }
    }

    /// Starts ticking. The first tick is due immediately.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now);
            tracing::debug!(period = ?self.period, "frame scheduler started");
        }
    }

    /// Stops ticking.
    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            tracing::debug!(ticks = self.ticks, missed = self.missed, "frame scheduler stopped");
        }
    }

    /// Returns true while started.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true if a tick is due at `now`, and consumes it.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.period;
        self.next_due = Some(if now >= next {
            self.missed += 1;
            now + self.period
        } else {
            next
        });
        self.ticks += 1;
        true
    }

    /// When the next tick is due, if running.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Ticks delivered since creation.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Times the scheduler fell a full period behind and resynced.
    #[must_use]
    pub const fn missed(&self) -> u64 {
        self.missed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_never_ticks() {
        let mut scheduler = FrameScheduler::new(60);
        let now = Instant::now();

        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(now));
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_steady_rate() {
        let mut scheduler = FrameScheduler::new(50);
        let start = Instant::now();
        scheduler.start(start);

        assert!(scheduler.poll(start));
        assert!(!scheduler.poll(start + Duration::from_millis(10)));
        assert!(scheduler.poll(start + Duration::from_millis(20)));
        assert!(!scheduler.poll(start + Duration::from_millis(39)));
        assert!(scheduler.poll(start + Duration::from_millis(40)));
        assert_eq!(scheduler.tick_count(), 3);
        assert_eq!(scheduler.missed(), 0);
        assert_eq!(
            scheduler.next_deadline(),
            Some(start + Duration::from_millis(60))
        );
    }

    #[test]
    fn test_resync_after_stall() {
        let mut scheduler = FrameScheduler::new(100);
        let start = Instant::now();
        scheduler.start(start);
        assert!(scheduler.poll(start));

        let late = start + Duration::from_millis(500);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.missed(), 1);
        assert_eq!(scheduler.next_deadline(), Some(late + Duration::from_millis(10)));
    }

    #[test]
    fn test_stop_and_restart() {
        let mut scheduler = FrameScheduler::new(60);
        let start = Instant::now();
        scheduler.start(start);
        assert!(scheduler.poll(start));

        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.poll(start + Duration::from_secs(1)));

        let restart = start + Duration::from_secs(2);
        scheduler.start(restart);
        assert!(scheduler.poll(restart));
        assert_eq!(scheduler.tick_count(), 2);
    }

    #[test]
    fn test_zero_rate() {
        let scheduler = FrameScheduler::new(0);
        assert_eq!(scheduler.period(), Duration::from_secs(1));
    }
}
