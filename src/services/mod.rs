//! Services - gesture recognition and the tick loop
//!
//! This module contains the core logic:
//! - `motion_buffer` - Sliding window of recent hand positions
//! - `swipe_classifier` - Swipe geometry and cooldown debounce
//! - `controller` - Tick-driven loop feeding the window and the sinks

pub mod controller;
pub mod motion_buffer;
pub mod swipe_classifier;

// Re-export commonly used types
pub use controller::SwipeController;
pub use motion_buffer::MotionBuffer;
pub use swipe_classifier::{detect_swipe, SwipeClassifier};
