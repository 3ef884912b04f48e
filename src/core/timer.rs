use std::future::pending;
use std::time::Duration;

use tokio::time::{self, Interval, MissedTickBehavior};

/// Cancellable repeating tick source.
///
/// Holds at most one interval; [`TickTimer::arm`] replaces any previous one
/// in a single assignment, so overlapping tick schedules cannot exist.
#[derive(Debug, Default)]
pub struct TickTimer {
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Install a fresh schedule firing every `period`, starting one full
    /// period from now. Any previous schedule is discarded.
    pub fn arm(&mut self, period: Duration) {
        let mut interval = time::interval_at(time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    /// Remove the current schedule, if any.
    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next firing. Pends forever while disarmed, which makes
    /// this safe to use as a `select!` branch.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Instant};

    #[tokio::test(start_paused = true)]
    async fn disarmed_timer_never_fires() {
        let mut timer = TickTimer::new();
        assert!(!timer.is_armed());
        let fired = timeout(Duration::from_secs(1), timer.tick()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn fires_one_period_after_arming() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(150));
        let start = Instant::now();
        timer.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(150));
        timer.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_schedule() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(150));
        timer.tick().await;

        timer.arm(Duration::from_millis(50));
        let start = Instant::now();
        timer.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_stops_firing() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(10));
        timer.tick().await;

        timer.disarm();
        let fired = timeout(Duration::from_secs(1), timer.tick()).await;
        assert!(fired.is_err());
    }
}
