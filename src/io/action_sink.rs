//! Action sinks - consumers of accepted swipes
//!
//! The controller turns each accepted swipe into a `KeyAction` through the
//! `KeyMap` and hands it to an `ActionSink`. Sinks never fail the loop: any
//! delivery problem is logged and counted by the sink itself.

use crate::domain::types::{KeyAction, SwipeDirection, Timestamp};
use crate::infra::config::{Config, KeysConfig};
use crate::infra::metrics::Metrics;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{info, warn};

/// Receives one key action per accepted swipe
pub trait ActionSink: Send {
    fn perform(&mut self, action: &KeyAction);
}

/// Maps swipe directions to key names
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    keys: KeysConfig,
}

impl KeyMap {
    pub fn new(keys: KeysConfig) -> Self {
        Self { keys }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.keys().clone())
    }

    pub fn key_for(&self, direction: SwipeDirection) -> &str {
        match direction {
            SwipeDirection::Left => &self.keys.left,
            SwipeDirection::Right => &self.keys.right,
            SwipeDirection::Up => &self.keys.up,
            SwipeDirection::Down => &self.keys.down,
        }
    }

    /// Build the key-press pulse for an accepted swipe
    pub fn action(&self, direction: SwipeDirection, at: Timestamp) -> KeyAction {
        KeyAction { direction, key: self.key_for(direction).to_string(), at }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(KeysConfig::default())
    }
}

/// Logs each action as a structured event
#[derive(Debug, Default)]
pub struct LogSink;

impl ActionSink for LogSink {
    fn perform(&mut self, action: &KeyAction) {
        info!(
            direction = %action.direction,
            key = %action.key,
            t = %action.at,
            "swipe_detected"
        );
    }
}

/// Forwards actions into a bounded channel without blocking the loop
pub struct ChannelSink {
    tx: mpsc::Sender<KeyAction>,
    metrics: Arc<Metrics>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<KeyAction>, metrics: Arc<Metrics>) -> Self {
        Self { tx, metrics }
    }
}

impl ActionSink for ChannelSink {
    fn perform(&mut self, action: &KeyAction) {
        if let Err(e) = self.tx.try_send(action.clone()) {
            self.metrics.record_action_dropped();
            match e {
                TrySendError::Full(_) => {
                    warn!(direction = %action.direction, "action_dropped: channel full");
                }
                TrySendError::Closed(_) => {
                    warn!(direction = %action.direction, "action_dropped: channel closed");
                }
            }
        }
    }
}

/// Delivers every action to each inner sink in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn ActionSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: impl ActionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn ActionSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ActionSink for FanoutSink {
    fn perform(&mut self, action: &KeyAction) {
        for sink in &mut self.sinks {
            sink.perform(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(direction: SwipeDirection) -> KeyAction {
        KeyMap::default().action(direction, Timestamp::from_millis(400))
    }

    #[test]
    fn test_default_key_map() {
        let map = KeyMap::default();
        assert_eq!(map.key_for(SwipeDirection::Left), "Left");
        assert_eq!(map.key_for(SwipeDirection::Right), "Right");
        assert_eq!(map.key_for(SwipeDirection::Up), "Up");
        assert_eq!(map.key_for(SwipeDirection::Down), "Down");
    }

    #[test]
    fn test_custom_key_map() {
        let keys = KeysConfig {
            left: "PageUp".to_string(),
            right: "PageDown".to_string(),
            up: "VolumeUp".to_string(),
            down: "VolumeDown".to_string(),
        };
        let map = KeyMap::new(keys);

        let a = map.action(SwipeDirection::Right, Timestamp::from_millis(1500));
        assert_eq!(a.key, "PageDown");
        assert_eq!(a.direction, SwipeDirection::Right);
        assert_eq!(a.at, Timestamp::from_millis(1500));
    }

    #[test]
    fn test_channel_sink_delivers() {
        let (tx, mut rx) = mpsc::channel(4);
        let metrics = Arc::new(Metrics::new());
        let mut sink = ChannelSink::new(tx, metrics.clone());

        sink.perform(&action(SwipeDirection::Up));

        assert_eq!(rx.try_recv().unwrap().direction, SwipeDirection::Up);
        assert_eq!(metrics.actions_dropped_total(), 0);
    }

    #[test]
    fn test_channel_sink_counts_drops() {
        let (tx, _rx) = mpsc::channel(1);
        let metrics = Arc::new(Metrics::new());
        let mut sink = ChannelSink::new(tx, metrics.clone());

        sink.perform(&action(SwipeDirection::Left));
        sink.perform(&action(SwipeDirection::Left)); // channel full

        assert_eq!(metrics.actions_dropped_total(), 1);
    }

    #[test]
    fn test_fanout_reaches_all_sinks() {
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        let metrics = Arc::new(Metrics::new());

        let mut fanout = FanoutSink::new()
            .with(LogSink)
            .with(ChannelSink::new(tx1, metrics.clone()))
            .with(ChannelSink::new(tx2, metrics));
        assert_eq!(fanout.len(), 3);

        fanout.perform(&action(SwipeDirection::Down));

        assert_eq!(rx1.try_recv().unwrap().key, "Down");
        assert_eq!(rx2.try_recv().unwrap().key, "Down");
    }
}
