//! Swipe simulator - synthetic hand sample streams
//!
//! Writes JSON Lines hand samples to stdout for local testing of the
//! hand-swipe pipeline without a camera.
//!
//! Pattern tokens (comma separated):
//! - left/right/up/down: linear swipe from the origin, then the hand leaves the frame
//! - idle: hand held still at the origin
//! - gap: no hand in frame
//!
//! Usage:
//!   cargo run --bin swipe-sim -- --pattern right,idle,up,left | cargo run --bin hand-swipe -- -i -

use clap::Parser;
use hand_swipe::domain::types::SwipeDirection;
use serde_json::json;
use std::io::{self, BufWriter, Write};

#[derive(Parser, Debug)]
#[command(name = "swipe-sim")]
#[command(about = "Generate synthetic hand sample streams")]
struct Args {
    /// Gesture sequence
    #[arg(short, long, default_value = "right,idle,left,idle,up,idle,down")]
    pattern: String,

    /// Frames per second of the simulated camera
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Swipe travel in pixels
    #[arg(long, default_value = "200")]
    distance: f64,

    /// Frames a swipe takes from start to end
    #[arg(long, default_value = "6")]
    frames_per_gesture: u32,

    /// Frames emitted for idle/gap tokens and after each swipe
    #[arg(long, default_value = "30")]
    hold_frames: u32,

    /// Hand rest position (x)
    #[arg(long, default_value = "320")]
    origin_x: f64,

    /// Hand rest position (y)
    #[arg(long, default_value = "240")]
    origin_y: f64,

    /// Peak amplitude of the deterministic hand tremor (pixels)
    #[arg(long, default_value = "2")]
    tremor: f64,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Swipe(SwipeDirection),
    Idle,
    Gap,
}

fn parse_pattern(pattern: &str) -> anyhow::Result<Vec<Step>> {
    pattern
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token {
            "idle" => Ok(Step::Idle),
            "gap" => Ok(Step::Gap),
            other => other.parse::<SwipeDirection>().map(Step::Swipe),
        })
        .collect()
}

fn unit_vector(direction: SwipeDirection) -> (f64, f64) {
    // Frame coordinates: y grows downwards
    match direction {
        SwipeDirection::Left => (-1.0, 0.0),
        SwipeDirection::Right => (1.0, 0.0),
        SwipeDirection::Up => (0.0, -1.0),
        SwipeDirection::Down => (0.0, 1.0),
    }
}

/// Sample writer keeping the frame clock
struct Emitter<W: Write> {
    out: W,
    frame: u64,
    frame_secs: f64,
    tremor: f64,
}

impl<W: Write> Emitter<W> {
    fn t(&self) -> f64 {
        self.frame as f64 * self.frame_secs
    }

    fn hand(&mut self, x: f64, y: f64) -> io::Result<()> {
        // Small quasi-periodic wobble so windows are never perfectly flat
        let phase = self.frame as f64;
        let wx = self.tremor * (phase * 0.9).sin();
        let wy = self.tremor * (phase * 1.3).cos();
        let line = json!({
            "t": round_ms(self.t()),
            "x": (x + wx).round(),
            "y": (y + wy).round(),
        });
        self.frame += 1;
        writeln!(self.out, "{}", line)
    }

    fn no_hand(&mut self) -> io::Result<()> {
        let line = json!({ "t": round_ms(self.t()) });
        self.frame += 1;
        writeln!(self.out, "{}", line)
    }
}

fn round_ms(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let steps = parse_pattern(&args.pattern)?;
    anyhow::ensure!(args.fps > 0, "--fps must be greater than 0");
    anyhow::ensure!(args.frames_per_gesture > 0, "--frames-per-gesture must be greater than 0");

    let stdout = io::stdout();
    let mut emitter = Emitter {
        out: BufWriter::new(stdout.lock()),
        frame: 0,
        frame_secs: 1.0 / args.fps as f64,
        tremor: args.tremor,
    };

    let (ox, oy) = (args.origin_x, args.origin_y);

    for step in steps {
        match step {
            Step::Swipe(direction) => {
                let (ux, uy) = unit_vector(direction);
                for i in 0..=args.frames_per_gesture {
                    let progress = i as f64 / args.frames_per_gesture as f64;
                    let travel = args.distance * progress;
                    emitter.hand(ox + ux * travel, oy + uy * travel)?;
                }
                // Hand leaves the frame so the return trip is not seen
                for _ in 0..args.hold_frames {
                    emitter.no_hand()?;
                }
            }
            Step::Idle => {
                for _ in 0..args.hold_frames {
                    emitter.hand(ox, oy)?;
                }
            }
            Step::Gap => {
                for _ in 0..args.hold_frames {
                    emitter.no_hand()?;
                }
            }
        }
    }

    emitter.out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(frames: u64, tremor: f64) -> Vec<serde_json::Value> {
        let mut emitter = Emitter { out: Vec::new(), frame: 0, frame_secs: 0.1, tremor };
        for i in 0..frames {
            emitter.hand(100.0 + i as f64 * 10.0, 50.0).unwrap();
        }
        emitter.no_hand().unwrap();
        String::from_utf8(emitter.out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_pattern() {
        let steps = parse_pattern("right, idle,,gap,UP").unwrap();
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[0], Step::Swipe(SwipeDirection::Right)));
        assert!(matches!(steps[1], Step::Idle));
        assert!(matches!(steps[2], Step::Gap));
        assert!(matches!(steps[3], Step::Swipe(SwipeDirection::Up)));
    }

    #[test]
    fn test_parse_pattern_rejects_unknown_token() {
        assert!(parse_pattern("left,sideways").is_err());
    }

    #[test]
    fn test_emitter_lines_parse_as_samples() {
        let lines = emit(3, 0.0);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2]["t"], 0.2);
        assert_eq!(lines[2]["x"], 120.0);
        assert!(lines[3].get("x").is_none());

        let sample = hand_swipe::io::parse_sample_line(&lines[1].to_string()).unwrap().unwrap();
        assert!(sample.position.is_some());
    }

    #[test]
    fn test_tremor_is_deterministic() {
        assert_eq!(emit(5, 2.0), emit(5, 2.0));
    }
}
