//! IO modules - external system interfaces
//!
//! This module contains the edges of the swipe pipeline:
//! - `sample_source` - JSONL hand sample reader (file or stdin)
//! - `action_sink` - Key map and sinks for accepted swipes
//! - `action_log` - Accepted swipes to file (JSONL format)

pub mod action_log;
pub mod action_sink;
pub mod sample_source;

// Re-export commonly used types
pub use action_log::ActionLog;
pub use action_sink::{ActionSink, ChannelSink, FanoutSink, KeyMap, LogSink};
pub use sample_source::{parse_sample_line, read_samples, start_sample_reader};
