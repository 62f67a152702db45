//! Domain models - core types of the swipe pipeline
//!
//! This module contains the canonical data types used throughout the system:
//! - `Position` - hand-center point in frame-pixel space
//! - `Timestamp` - monotonic time since session start
//! - `SwipeDirection` - classified swipe (left/right/up/down)
//! - `HandSample` - one perception tick, with or without a hand
//! - `KeyAction` - key-press pulse handed to an action sink

pub mod types;

// Re-export commonly used types at module level
pub use types::{HandSample, KeyAction, Position, SwipeDirection, Timestamp};
