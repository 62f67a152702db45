//! Tick-driven swipe controller
//!
//! The SwipeController is the single consumer of hand samples. Each tick:
//! 1. Skip ticks without a hand (nothing appended, nothing evaluated)
//! 2. Drop samples whose time goes backwards
//! 3. Append the position to the motion window
//! 4. Evaluate the classifier; on an accepted swipe clear the window and
//!    hand the key action to the sink
//!
//! The controller is not synchronized and must be driven by one task.


use crate::domain::types::{HandSample, SwipeDirection, Timestamp};
use crate::infra::config::Config;
use crate::infra::metrics::Metrics;
use crate::io::action_sink::{ActionSink, KeyMap};
use crate::services::motion_buffer::MotionBuffer;
use crate::services::swipe_classifier::SwipeClassifier;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Owns the motion window, the classifier and the output sink
pub struct SwipeController {
    /// Recent hand positions, oldest first
    pub(crate) buffer: MotionBuffer,
    /// Swipe geometry and cooldown state
    pub(crate) classifier: SwipeClassifier,
    /// Direction to key mapping
    pub(crate) key_map: KeyMap,
    /// Receives accepted swipes
    pub(crate) sink: Box<dyn ActionSink>,
    /// Metrics collector
    pub(crate) metrics: Arc<Metrics>,
    /// Time of the last accepted sample, for the monotonic guard
    pub(crate) last_sample_at: Option<Timestamp>,
    /// Seconds between metrics summaries in `run`
    metrics_interval_secs: u64,
}

impl SwipeController {
    /// Create a controller with the given configuration and sink
    pub fn new(config: &Config, sink: Box<dyn ActionSink>, metrics: Arc<Metrics>) -> Self {
        let mut classifier = SwipeClassifier::from_config(config);
        if config.cooldown_from_start() {
            classifier = classifier.starting_at(Timestamp::ZERO);
        }

        Self {
            buffer: MotionBuffer::new(config.smooth_frames()),
            classifier,
            key_map: KeyMap::from_config(config),
            sink,
            metrics,
            last_sample_at: None,
            metrics_interval_secs: config.metrics_interval_secs(),
        }
    }

    /// Process one tick, returning the accepted swipe if any
    pub fn process_sample(&mut self, sample: HandSample) -> Option<SwipeDirection> {
        let Some(position) = sample.position else {
            self.metrics.record_no_hand();
            return None;
        };

        if let Some(last) = self.last_sample_at {
            if sample.t < last {
                self.metrics.record_out_of_order();
                warn!(t = %sample.t, last = %last, "sample_out_of_order");
                return None;
            }
        }
        self.last_sample_at = Some(sample.t);

        self.buffer.append(position);

        let direction = self.classifier.evaluate(&self.buffer, sample.t)?;

        // Accepted: the window is consumed by this swipe
        self.buffer.clear();
        self.metrics.record_swipe(direction);

        let action = self.key_map.action(direction, sample.t);
        debug!(direction = %direction, key = %action.key, t = %sample.t, "swipe_accepted");
        self.sink.perform(&action);

        Some(direction)
    }

    /// Start a new session: empty window, no cooldown, no sample history
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.classifier.reset();
        self.last_sample_at = None;
    }

    /// Consume samples until the channel closes or shutdown is signalled
    pub async fn run(
        &mut self,
        mut sample_rx: mpsc::Receiver<HandSample>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut report_interval = interval(Duration::from_secs(self.metrics_interval_secs.max(1)));
        report_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        report_interval.tick().await;

        info!("swipe_controller_started");

        loop {
            tokio::select! {
                sample = sample_rx.recv() => {
                    match sample {
                        Some(s) => {
                            self.process_sample(s);
                        }
                        None => break, // Channel closed
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("swipe_controller_shutdown");
                        break;
                    }
                }
                _ = report_interval.tick() => {
                    self.metrics.report().log();
                }
            }
        }

        self.metrics.report().log();
        info!(swipes_total = %self.metrics.swipes_total(), "swipe_controller_stopped");
    }

    pub fn buffer(&self) -> &MotionBuffer {
        &self.buffer
    }

    pub fn classifier(&self) -> &SwipeClassifier {
        &self.classifier
    }
}
