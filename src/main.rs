//! Hand swipe - turns a stream of hand positions into arrow-key actions
//!
//! Reads one hand sample per tick (JSON Lines, file or stdin), detects
//! left/right/up/down swipes and hands the mapped key to the action sinks.
//!
//! Module structure:
//! - `domain/` - Core types (Position, SwipeDirection, HandSample)
//! - `io/` - External interfaces (sample reader, action sinks, action log)
//! - `services/` - Gesture logic (MotionBuffer, SwipeClassifier, SwipeController)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use hand_swipe::infra::{Config, Metrics};
use hand_swipe::io::{start_sample_reader, ActionLog, FanoutSink, LogSink};
use hand_swipe::services::SwipeController;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Hand swipe - gesture to key-press controller
#[derive(Parser, Debug)]
#[command(name = "hand-swipe", version, about)]
struct Args {
    /// Path to TOML configuration file (default: $CONFIG_FILE or config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Sample input (JSONL file, "-" for stdin); overrides the config
    #[arg(short, long)]
    input: Option<String>,

    /// Append accepted swipes to this JSONL file; overrides the config
    #[arg(long)]
    actions_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug to see suppressed swipes
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(git_hash = %env!("GIT_HASH"), "hand-swipe starting");

    let args = Args::parse();

    // Load configuration from TOML file, then apply command line overrides
    let config_path = args.config.clone().unwrap_or_else(Config::default_config_path);
    let mut config = Config::load_from_path(&config_path);
    if let Some(ref input) = args.input {
        config = config.with_input_path(input);
    }
    if let Some(ref actions_file) = args.actions_file {
        config = config.with_actions_file(actions_file);
    }

    info!(
        config_file = %config.config_file(),
        smooth_frames = %config.smooth_frames(),
        swipe_threshold = %config.swipe_threshold(),
        cooldown_secs = %config.cooldown_secs(),
        cooldown_from_start = %config.cooldown_from_start(),
        input = %config.input_path(),
        actions_file = ?config.actions_file(),
        "config_loaded"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let metrics = Arc::new(Metrics::new());

    // Output sinks
    let mut sink = FanoutSink::new();
    if config.log_actions() {
        sink.push(Box::new(LogSink));
    }
    if let Some(path) = config.actions_file() {
        sink.push(Box::new(ActionLog::new(path)));
    }

    // Sample channel (bounded for backpressure)
    let (sample_tx, sample_rx) = mpsc::channel(config.channel_capacity());

    // Start sample reader; dropping the sender at EOF ends the controller loop
    let input_path = config.input_path().to_string();
    let reader_metrics = metrics.clone();
    let reader_shutdown = shutdown_rx.clone();
    let reader = tokio::spawn(async move {
        start_sample_reader(&input_path, sample_tx, reader_shutdown, reader_metrics).await
    });

    // Handle shutdown on Ctrl+C
    let shutdown_signal = shutdown_tx;
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_signal.send(true);
    });

    let mut controller = SwipeController::new(&config, Box::new(sink), metrics);
    controller.run(sample_rx, shutdown_rx).await;

    match reader.await {
        Ok(Ok(forwarded)) => info!(samples = %forwarded, "sample_reader_finished"),
        Ok(Err(e)) => {
            tracing::error!(error = %format!("{:#}", e), "sample_reader_error");
            return Err(e.into());
        }
        Err(e) => tracing::error!(error = %e, "sample_reader_panicked"),
    }

    info!("hand-swipe shutdown complete");
    Ok(())
}
