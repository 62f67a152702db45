//! Shared types for the swipe pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A hand-center point in frame-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Monotonic time since session start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Timestamp(pub Duration);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    /// Build from seconds; `None` for negative, non-finite or out-of-range input
    pub fn try_from_secs_f64(secs: f64) -> Option<Self> {
        Duration::try_from_secs_f64(secs).ok().map(Timestamp)
    }

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(Duration::from_millis(ms))
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

/// Direction of an accepted swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub const ALL: [SwipeDirection; 4] =
        [SwipeDirection::Left, SwipeDirection::Right, SwipeDirection::Up, SwipeDirection::Down];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SwipeDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(SwipeDirection::Left),
            "right" => Ok(SwipeDirection::Right),
            "up" => Ok(SwipeDirection::Up),
            "down" => Ok(SwipeDirection::Down),
            other => anyhow::bail!("unknown swipe direction '{}'", other),
        }
    }
}

/// One perception tick: a hand-center position, or `None` when no hand was seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    pub t: Timestamp,
    pub position: Option<Position>,
}

impl HandSample {
    #[inline]
    pub fn hand(t: Timestamp, x: f64, y: f64) -> Self {
        Self { t, position: Some(Position::new(x, y)) }
    }

    #[inline]
    pub fn no_hand(t: Timestamp) -> Self {
        Self { t, position: None }
    }
}

/// Key-press pulse produced for an accepted swipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAction {
    pub direction: SwipeDirection,
    pub key: String,
    pub at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("left".parse::<SwipeDirection>().unwrap(), SwipeDirection::Left);
        assert_eq!("RIGHT".parse::<SwipeDirection>().unwrap(), SwipeDirection::Right);
        assert_eq!(" up ".parse::<SwipeDirection>().unwrap(), SwipeDirection::Up);
        assert!("sideways".parse::<SwipeDirection>().is_err());
    }

    #[test]
    fn test_direction_serde_lowercase() {
        let json = serde_json::to_string(&SwipeDirection::Down).unwrap();
        assert_eq!(json, "\"down\"");
    }

    #[test]
    fn test_timestamp_from_secs() {
        assert_eq!(Timestamp::try_from_secs_f64(0.5), Some(Timestamp::from_millis(500)));
        assert_eq!(Timestamp::try_from_secs_f64(0.0), Some(Timestamp::ZERO));
        assert_eq!(Timestamp::try_from_secs_f64(-1.0), None);
        assert_eq!(Timestamp::try_from_secs_f64(f64::NAN), None);
        assert_eq!(Timestamp::try_from_secs_f64(f64::INFINITY), None);
        // Finite but beyond what a Duration can hold
        assert_eq!(Timestamp::try_from_secs_f64(1e20), None);
    }

    #[test]
    fn test_timestamp_saturating_since() {
        let early = Timestamp::from_millis(100);
        let late = Timestamp::from_millis(900);
        assert_eq!(late.saturating_since(early), Duration::from_millis(800));
        assert_eq!(early.saturating_since(late), Duration::ZERO);
    }
}
