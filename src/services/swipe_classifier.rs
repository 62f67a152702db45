//! Swipe classification with cooldown debounce
//!
//! Compares the oldest and newest positions in the motion window:
//! - Horizontal swipe: |dx| > threshold and |dx| > |dy| (Right if dx > 0)
//! - Vertical swipe: |dy| > threshold and |dy| > |dx| (Down if dy > 0)
//! - Equal magnitudes have no dominant axis and never classify
//!
//! A classified swipe is only accepted once the cooldown has elapsed since
//! the previous accepted swipe. The caller clears the motion window after an
//! accepted swipe; suppressed swipes leave the window untouched so the same
//! motion can be re-evaluated on later ticks.

use crate::domain::types::{Position, SwipeDirection, Timestamp};
use crate::infra::config::Config;
use crate::services::motion_buffer::MotionBuffer;
use std::time::Duration;
use tracing::debug;

/// Classify the displacement between the first and last positions of `history`
///
/// Stateless: no cooldown is applied.
pub fn detect_swipe(history: &[Position], threshold: f64) -> Option<SwipeDirection> {
    if history.len() < 2 {
        return None;
    }

    let start = *history.first()?;
    let end = *history.last()?;

    let dx = end.x - start.x;
    let dy = end.y - start.y;

    // Horizontal first; strict dominance makes the two rules exclusive
    if dx.abs() > threshold && dx.abs() > dy.abs() {
        return Some(if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left });
    }

    if dy.abs() > threshold && dy.abs() > dx.abs() {
        return Some(if dy > 0.0 { SwipeDirection::Down } else { SwipeDirection::Up });
    }

    None
}

/// Stateful classifier holding the last accepted swipe time
///
/// Not synchronized; owned by the single loop that drives the motion window.
#[derive(Debug, Clone)]
pub struct SwipeClassifier {
    /// Minimum axis displacement in pixels
    threshold: f64,
    /// Minimum time between accepted swipes
    cooldown: Duration,
    /// When the last swipe was accepted (None until the first one)
    last_accepted: Option<Timestamp>,
}

impl SwipeClassifier {
    pub fn new(threshold: f64, cooldown: Duration) -> Self {
        Self { threshold, cooldown, last_accepted: None }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.swipe_threshold(), config.cooldown())
    }

    /// Treat `now` as an accepted swipe so the first cooldown runs from session start
    pub fn starting_at(mut self, now: Timestamp) -> Self {
        self.last_accepted = Some(now);
        self
    }

    /// Decide whether the current window holds a swipe that may be emitted now
    ///
    /// Returns `Some` only for an accepted swipe, after which the caller must
    /// clear `history`. Insufficient data, sub-threshold motion, axis ties and
    /// active cooldown all return `None`.
    pub fn evaluate(&mut self, history: &MotionBuffer, now: Timestamp) -> Option<SwipeDirection> {
        let direction = detect_swipe(history.snapshot(), self.threshold)?;

        if let Some(last) = self.last_accepted {
            let elapsed = now.saturating_since(last);
            if elapsed <= self.cooldown {
                debug!(
                    direction = %direction,
                    elapsed_ms = %elapsed.as_millis(),
                    cooldown_ms = %self.cooldown.as_millis(),
                    "swipe_suppressed_cooldown"
                );
                return None;
            }
        }

        self.last_accepted = Some(now);
        Some(direction)
    }

    /// Forget the last accepted swipe
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    pub fn last_accepted(&self) -> Option<Timestamp> {
        self.last_accepted
    }
}
