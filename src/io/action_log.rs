//! Action log - writes accepted swipes to file
//!
//! Actions are written in JSONL format (one JSON object per line)
//! to the file specified in config.

use crate::domain::types::KeyAction;
use crate::io::action_sink::ActionSink;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, error, info};

/// One line of the action log
#[derive(Debug, Serialize)]
struct ActionRecord<'a> {
    /// Wall-clock time of the write (RFC 3339, UTC)
    ts: String,
    /// Session time of the swipe (seconds)
    t: f64,
    dir: &'a str,
    key: &'a str,
}

/// JSONL writer for key actions
pub struct ActionLog {
    file_path: String,
}

impl ActionLog {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "action_log_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write an action to the log file
    /// Returns true if successful, false otherwise
    pub fn write_action(&self, action: &KeyAction) -> bool {
        let ts = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        let record = ActionRecord {
            ts,
            t: action.at.as_secs_f64(),
            dir: action.direction.as_str(),
            key: &action.key,
        };

        let result = serde_json::to_string(&record)
            .map_err(std::io::Error::from)
            .and_then(|json| self.append_line(&json));

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(
                    file = %self.file_path,
                    direction = %action.direction,
                    error = %e,
                    "action_log_write_failed"
                );
                false
            }
        }
    }

    /// Append a line to the log file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "action_log_written");

        Ok(())
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl ActionSink for ActionLog {
    fn perform(&mut self, action: &KeyAction) {
        self.write_action(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{SwipeDirection, Timestamp};
    use crate::io::action_sink::KeyMap;
    use std::fs;
    use tempfile::tempdir;

    fn action(direction: SwipeDirection, ms: u64) -> KeyAction {
        KeyMap::default().action(direction, Timestamp::from_millis(ms))
    }

    #[test]
    fn test_write_action() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("swipes.jsonl");
        let log = ActionLog::new(file_path.to_str().unwrap());

        assert!(log.write_action(&action(SwipeDirection::Right, 400)));

        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed["dir"], "right");
        assert_eq!(parsed["key"], "Right");
        assert_eq!(parsed["t"], 0.4);
        assert!(parsed["ts"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_append_mode() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("swipes.jsonl");
        fs::write(&file_path, "{\"existing\":\"data\"}\n").unwrap();

        let mut log = ActionLog::new(file_path.to_str().unwrap());
        log.perform(&action(SwipeDirection::Left, 100));
        log.perform(&action(SwipeDirection::Up, 1000));

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("existing"));
        assert!(lines[1].contains("\"left\""));
        assert!(lines[2].contains("\"up\""));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("dir").join("swipes.jsonl");
        let log = ActionLog::new(nested.to_str().unwrap());

        assert!(log.write_action(&action(SwipeDirection::Down, 0)));
        assert!(nested.exists());
    }

    #[test]
    fn test_write_failure_returns_false() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending
        let log = ActionLog::new(dir.path().to_str().unwrap());
        assert!(!log.write_action(&action(SwipeDirection::Left, 0)));
    }
}
