//! Periodic tick source for a running countdown

use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Emits one tick per period until stopped.
///
/// Ticks missed while the consumer was busy are skipped rather than
/// replayed; remaining time is always recomputed from the wall clock.
pub struct Clock {
    interval: Interval,
}

impl Clock {
    /// Start ticking; the first tick fires one period from now
    pub fn start(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    /// Wait for the next tick and return the instant it was scheduled for
    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }

    /// End the session's ticks. Dropping the interval is what stops them.
    pub fn stop(self) {
        drop(self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let start = Instant::now();
        let mut clock = Clock::start(Duration::from_secs(1));
        let at = clock.tick().await;
        assert_eq!(at - start, Duration::from_secs(1));
        let at = clock.tick().await;
        assert_eq!(at - start, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_do_not_queue() {
        let start = Instant::now();
        let mut clock = Clock::start(Duration::from_secs(1));
        time::advance(Duration::from_millis(3500)).await;

        // One late tick is delivered, then the schedule realigns instead of bursting
        clock.tick().await;
        clock.tick().await;
        assert!(Instant::now() - start >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_period() {
        let start = Instant::now();
        let mut clock = Clock::start(Duration::from_millis(250));
        let at = clock.tick().await;
        assert_eq!(at - start, Duration::from_millis(250));
        clock.stop();
    }
}
