//! Lock-free metrics collection and periodic reporting
//!
//! Counters are atomics so the reader task, the controller and the action
//! sinks can record without locking. Reporting swaps the per-interval counters.
//!
//! NOTE: All atomics use Relaxed ordering. They are statistical counters
//! only; do not use them for coordination or logic decisions.

use crate::domain::types::SwipeDirection;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

#[inline]
fn direction_index(direction: SwipeDirection) -> usize {
    match direction {
        SwipeDirection::Left => 0,
        SwipeDirection::Right => 1,
        SwipeDirection::Up => 2,
        SwipeDirection::Down => 3,
    }
}

/// Lock-free metrics collector
pub struct Metrics {
    /// Samples read from the input (monotonic)
    samples_total: AtomicU64,
    /// Samples since last report (reset on report)
    samples_since_report: AtomicU64,
    /// Ticks with no hand present (monotonic)
    no_hand_total: AtomicU64,
    /// Samples dropped for going back in time (monotonic)
    out_of_order_total: AtomicU64,
    /// Input lines that failed to parse (monotonic)
    malformed_lines_total: AtomicU64,
    /// Accepted swipes (monotonic)
    swipes_total: AtomicU64,
    /// Accepted swipes per direction: left, right, up, down (monotonic)
    swipes_by_direction: [AtomicU64; 4],
    /// Swipes since last report (reset on report)
    swipes_since_report: AtomicU64,
    /// Key actions a sink could not deliver (monotonic)
    actions_dropped_total: AtomicU64,
    /// Start of the current report interval
    last_report: Mutex<Instant>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            samples_total: AtomicU64::new(0),
            samples_since_report: AtomicU64::new(0),
            no_hand_total: AtomicU64::new(0),
            out_of_order_total: AtomicU64::new(0),
            malformed_lines_total: AtomicU64::new(0),
            swipes_total: AtomicU64::new(0),
            swipes_by_direction: std::array::from_fn(|_| AtomicU64::new(0)),
            swipes_since_report: AtomicU64::new(0),
            actions_dropped_total: AtomicU64::new(0),
            last_report: Mutex::new(Instant::now()),
        }
    }

    #[inline]
    pub fn record_sample(&self) {
        self.samples_total.fetch_add(1, Ordering::Relaxed);
        self.samples_since_report.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_no_hand(&self) {
        self.no_hand_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_out_of_order(&self) {
        self.out_of_order_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_malformed_line(&self) {
        self.malformed_lines_total.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_swipe(&self, direction: SwipeDirection) {
        self.swipes_total.fetch_add(1, Ordering::Relaxed);
        self.swipes_since_report.fetch_add(1, Ordering::Relaxed);
        self.swipes_by_direction[direction_index(direction)].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_action_dropped(&self) {
        self.actions_dropped_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn samples_total(&self) -> u64 {
        self.samples_total.load(Ordering::Relaxed)
    }

    pub fn no_hand_total(&self) -> u64 {
        self.no_hand_total.load(Ordering::Relaxed)
    }

    pub fn out_of_order_total(&self) -> u64 {
        self.out_of_order_total.load(Ordering::Relaxed)
    }

    pub fn malformed_lines_total(&self) -> u64 {
        self.malformed_lines_total.load(Ordering::Relaxed)
    }

    pub fn swipes_total(&self) -> u64 {
        self.swipes_total.load(Ordering::Relaxed)
    }

    pub fn swipes_for(&self, direction: SwipeDirection) -> u64 {
        self.swipes_by_direction[direction_index(direction)].load(Ordering::Relaxed)
    }

    pub fn actions_dropped_total(&self) -> u64 {
        self.actions_dropped_total.load(Ordering::Relaxed)
    }

    /// Snapshot the counters and start a new report interval
    pub fn report(&self) -> MetricsSummary {
        let elapsed_secs = {
            let mut last = self.last_report.lock();
            let secs = last.elapsed().as_secs_f64();
            *last = Instant::now();
            secs
        };

        let samples_in_interval = self.samples_since_report.swap(0, Ordering::Relaxed);
        let swipes_in_interval = self.swipes_since_report.swap(0, Ordering::Relaxed);
        let samples_per_sec =
            if elapsed_secs > 0.0 { samples_in_interval as f64 / elapsed_secs } else { 0.0 };

        MetricsSummary {
            samples_total: self.samples_total(),
            samples_per_sec,
            no_hand_total: self.no_hand_total(),
            out_of_order_total: self.out_of_order_total(),
            malformed_lines_total: self.malformed_lines_total(),
            swipes_total: self.swipes_total(),
            swipes_in_interval,
            swipes_left: self.swipes_for(SwipeDirection::Left),
            swipes_right: self.swipes_for(SwipeDirection::Right),
            swipes_up: self.swipes_for(SwipeDirection::Up),
            swipes_down: self.swipes_for(SwipeDirection::Down),
            actions_dropped_total: self.actions_dropped_total(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub samples_total: u64,
    /// Sample rate over the last report interval
    pub samples_per_sec: f64,
    pub no_hand_total: u64,
    pub out_of_order_total: u64,
    pub malformed_lines_total: u64,
    pub swipes_total: u64,
    pub swipes_in_interval: u64,
    pub swipes_left: u64,
    pub swipes_right: u64,
    pub swipes_up: u64,
    pub swipes_down: u64,
    pub actions_dropped_total: u64,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            samples_total = %self.samples_total,
            samples_per_sec = format!("{:.1}", self.samples_per_sec),
            no_hand_total = %self.no_hand_total,
            out_of_order = %self.out_of_order_total,
            malformed_lines = %self.malformed_lines_total,
            swipes_total = %self.swipes_total,
            swipes_interval = %self.swipes_in_interval,
            left = %self.swipes_left,
            right = %self.swipes_right,
            up = %self.swipes_up,
            down = %self.swipes_down,
            actions_dropped = %self.actions_dropped_total,
            "metrics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.samples_total(), 0);
        assert_eq!(metrics.swipes_total(), 0);
        for direction in SwipeDirection::ALL {
            assert_eq!(metrics.swipes_for(direction), 0);
        }
    }

    #[test]
    fn test_record_swipe_by_direction() {
        let metrics = Metrics::new();

        metrics.record_swipe(SwipeDirection::Left);
        metrics.record_swipe(SwipeDirection::Left);
        metrics.record_swipe(SwipeDirection::Down);

        assert_eq!(metrics.swipes_total(), 3);
        assert_eq!(metrics.swipes_for(SwipeDirection::Left), 2);
        assert_eq!(metrics.swipes_for(SwipeDirection::Right), 0);
        assert_eq!(metrics.swipes_for(SwipeDirection::Down), 1);
    }

    #[test]
    fn test_report_resets_interval_counters() {
        let metrics = Metrics::new();

        metrics.record_sample();
        metrics.record_sample();
        metrics.record_swipe(SwipeDirection::Up);
        metrics.record_no_hand();

        let first = metrics.report();
        assert_eq!(first.samples_total, 2);
        assert_eq!(first.swipes_in_interval, 1);
        assert_eq!(first.swipes_up, 1);
        assert_eq!(first.no_hand_total, 1);

        let second = metrics.report();
        assert_eq!(second.samples_total, 2); // monotonic
        assert_eq!(second.swipes_in_interval, 0); // reset
        assert_eq!(second.swipes_total, 1);
    }

    #[test]
    fn test_drop_counters() {
        let metrics = Metrics::new();

        metrics.record_out_of_order();
        metrics.record_malformed_line();
        metrics.record_malformed_line();
        metrics.record_action_dropped();

        assert_eq!(metrics.out_of_order_total(), 1);
        assert_eq!(metrics.malformed_lines_total(), 2);
        assert_eq!(metrics.actions_dropped_total(), 1);
    }
}
