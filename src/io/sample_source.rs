//! Hand sample input in JSON Lines format
//!
//! Each line carries one perception tick:
//! - `{"t": 0.10, "x": 320, "y": 240}` - hand center at (x, y) pixels
//! - `{"t": 0.13}` or `{"t": 0.13, "x": null, "y": null}` - no hand in frame
//!
//! `t` is seconds since session start. Blank lines and `#` comments are
//! skipped. Malformed lines are logged and counted, never fatal.

use crate::domain::types::{HandSample, Position, Timestamp};
use crate::infra::metrics::Metrics;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Input path that selects stdin
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Deserialize)]
struct SampleLine {
    t: f64,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

/// Parse one input line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_sample_line(line: &str) -> anyhow::Result<Option<HandSample>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let raw: SampleLine = serde_json::from_str(line).context("invalid sample JSON")?;

    let Some(t) = Timestamp::try_from_secs_f64(raw.t) else {
        bail!("sample time must be a non-negative number of seconds in range, got {}", raw.t);
    };

    match (raw.x, raw.y) {
        (Some(x), Some(y)) => {
            if !x.is_finite() || !y.is_finite() {
                bail!("sample position must be finite, got ({}, {})", x, y);
            }
            Ok(Some(HandSample { t, position: Some(Position::new(x, y)) }))
        }
        (None, None) => Ok(Some(HandSample::no_hand(t))),
        _ => bail!("sample position needs both x and y"),
    }
}

/// Read samples from `reader` and forward them to `sample_tx`
///
/// Stops at end of input, on shutdown, or when the receiver is gone.
/// Returns the number of samples forwarded.
pub async fn read_samples<R>(
    reader: R,
    sample_tx: mpsc::Sender<HandSample>,
    mut shutdown: watch::Receiver<bool>,
    metrics: Arc<Metrics>,
) -> anyhow::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no: u64 = 0;
    let mut forwarded: u64 = 0;

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!(forwarded = %forwarded, "sample_reader_shutdown");
                    return Ok(forwarded);
                }
            }
            next = lines.next_line() => {
                let Some(line) = next.context("failed to read sample input")? else {
                    info!(lines = %line_no, forwarded = %forwarded, "sample_input_eof");
                    return Ok(forwarded);
                };
                line_no += 1;

                match parse_sample_line(&line) {
                    Ok(Some(sample)) => {
                        metrics.record_sample();
                        if sample_tx.send(sample).await.is_err() {
                            debug!("sample_receiver_closed");
                            return Ok(forwarded);
                        }
                        forwarded += 1;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        metrics.record_malformed_line();
                        warn!(
                            line = %line_no,
                            error = %format!("{:#}", e),
                            "sample_line_malformed"
                        );
                    }
                }
            }
        }
    }
}

/// Open `path` ("-" for stdin) and stream its samples into `sample_tx`
pub async fn start_sample_reader(
    path: &str,
    sample_tx: mpsc::Sender<HandSample>,
    shutdown: watch::Receiver<bool>,
    metrics: Arc<Metrics>,
) -> anyhow::Result<u64> {
    let input: Box<dyn AsyncRead + Unpin + Send> = if path == STDIN_PATH {
        info!("sample_reader_stdin");
        Box::new(tokio::io::stdin())
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open sample input {}", path))?;
        info!(path = %path, "sample_reader_file");
        Box::new(file)
    };

    read_samples(BufReader::new(input), sample_tx, shutdown, metrics).await
}
