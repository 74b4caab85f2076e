//! Wall-clock progress estimation.
//!
//! Nikto exposes no structured progress channel, so the only available
//! signal is elapsed time against the budget. The estimate is capped at
//! 99 until completion is observed; the terminal 100 is emitted exactly
//! once by the worker, never from here. Strictly a display aid: nothing
//! in the pipeline may branch on it.

use std::time::{Duration, Instant};

use tokio::time::{Interval, MissedTickBehavior, interval};

/// Cadence of display updates.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Ceiling before completion is confirmed.
const PRE_COMPLETION_CAP: f64 = 99.0;

/// Pure estimation law, kept free of timers so the monotonicity and
/// cap properties are testable directly.
pub fn estimate(elapsed: Duration, budget: Duration) -> f64 {
    if budget.is_zero() {
        return PRE_COMPLETION_CAP;
    }
    ((elapsed.as_secs_f64() / budget.as_secs_f64()) * 100.0).min(PRE_COMPLETION_CAP)
}

/// Periodic timer yielding the current estimate for one running scan.
pub struct ProgressTicker {
    started: Instant,
    budget: Duration,
    interval: Interval,
}

impl ProgressTicker {
    pub fn new(budget: Duration) -> Self {
        let mut interval = interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            started: Instant::now(),
            budget,
            interval,
        }
    }

    /// Waits for the next display tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Estimated completion percentage, in `[0, 99]`.
    pub fn percent(&self) -> f64 {
        estimate(self.started.elapsed(), self.budget)
    }
}

/// Display-only sink for progress updates.
///
/// Injected at orchestrator construction so the core stays free of any
/// terminal concern and tests can capture the emitted sequence. The
/// terminal value 100 arrives exactly once per target, after its
/// completion record exists.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, target: &str, percent: f64);
}

/// Observer that drops every update, for headless callers.
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&self, _target: &str, _percent: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_is_monotone_in_elapsed() {
        let budget = Duration::from_secs(100);
        let mut last = -1.0;
        for secs in [0u64, 1, 10, 50, 98, 99, 100, 500] {
            let now = estimate(Duration::from_secs(secs), budget);
            assert!(now >= last, "estimate regressed at {secs}s");
            last = now;
        }
    }

    #[test]
    fn estimate_never_reaches_100() {
        let budget = Duration::from_secs(10);
        assert_eq!(estimate(Duration::from_secs(10), budget), 99.0);
        assert_eq!(estimate(Duration::from_secs(3600), budget), 99.0);
    }

    #[test]
    fn estimate_scales_linearly_below_the_cap() {
        let budget = Duration::from_secs(200);
        let halfway = estimate(Duration::from_secs(100), budget);
        assert!((halfway - 50.0).abs() < 1e-9);
        assert_eq!(estimate(Duration::ZERO, budget), 0.0);
    }

    #[test]
    fn zero_budget_pins_to_the_cap() {
        assert_eq!(estimate(Duration::from_secs(5), Duration::ZERO), 99.0);
    }
}
