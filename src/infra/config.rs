//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument (handled by the binary)
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default motion window size (frames)
pub const DEFAULT_SMOOTH_FRAMES: usize = 6;
/// Default minimum axis displacement (pixels)
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 80.0;
/// Default minimum time between accepted swipes (seconds)
pub const DEFAULT_COOLDOWN_SECS: f64 = 0.8;
/// Config file used when neither --config nor CONFIG_FILE is set
pub const DEFAULT_CONFIG_PATH: &str = "config/dev.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_smooth_frames")]
    pub smooth_frames: usize,
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,
    /// Start the session in cooldown, suppressing swipes for the first cooldown period
    #[serde(default)]
    pub cooldown_from_start: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            smooth_frames: default_smooth_frames(),
            swipe_threshold: default_swipe_threshold(),
            cooldown_secs: default_cooldown_secs(),
            cooldown_from_start: false,
        }
    }
}

fn default_smooth_frames() -> usize {
    DEFAULT_SMOOTH_FRAMES
}

fn default_swipe_threshold() -> f64 {
    DEFAULT_SWIPE_THRESHOLD
}

fn default_cooldown_secs() -> f64 {
    DEFAULT_COOLDOWN_SECS
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// JSONL sample source ("-" reads stdin)
    #[serde(default = "default_input_path")]
    pub path: String,
    /// Bounded channel between reader and controller
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { path: default_input_path(), channel_capacity: default_channel_capacity() }
    }
}

fn default_input_path() -> String {
    "-".to_string()
}

fn default_channel_capacity() -> usize {
    256
}

/// Key names emitted for each swipe direction
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeysConfig {
    #[serde(default = "default_key_left")]
    pub left: String,
    #[serde(default = "default_key_right")]
    pub right: String,
    #[serde(default = "default_key_up")]
    pub up: String,
    #[serde(default = "default_key_down")]
    pub down: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            left: default_key_left(),
            right: default_key_right(),
            up: default_key_up(),
            down: default_key_down(),
        }
    }
}

fn default_key_left() -> String {
    "Left".to_string()
}

fn default_key_right() -> String {
    "Right".to_string()
}

fn default_key_up() -> String {
    "Up".to_string()
}

fn default_key_down() -> String {
    "Down".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Log every accepted swipe at info level
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,
    /// Append accepted swipes to this JSONL file
    #[serde(default)]
    pub actions_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { log_actions: default_log_actions(), actions_file: None }
    }
}

fn default_log_actions() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval")]
    pub interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { interval_secs: default_metrics_interval() }
    }
}

fn default_metrics_interval() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct, built once at startup and passed into the loop
#[derive(Debug, Clone)]
pub struct Config {
    smooth_frames: usize,
    swipe_threshold: f64,
    cooldown_secs: f64,
    cooldown_from_start: bool,
    input_path: String,
    channel_capacity: usize,
    keys: KeysConfig,
    log_actions: bool,
    actions_file: Option<String>,
    metrics_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        Self {
            smooth_frames: toml_config.gesture.smooth_frames,
            swipe_threshold: toml_config.gesture.swipe_threshold,
            cooldown_secs: toml_config.gesture.cooldown_secs,
            cooldown_from_start: toml_config.gesture.cooldown_from_start,
            input_path: toml_config.input.path,
            channel_capacity: toml_config.input.channel_capacity,
            keys: toml_config.keys,
            log_actions: toml_config.output.log_actions,
            actions_file: toml_config.output.actions_file,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            config_file,
        }
    }

    /// Config file path when none is given on the command line
    pub fn default_config_path() -> String {
        env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml_str(&content, &path.display().to_string())
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str, source: &str) -> anyhow::Result<Self> {
        let toml_config: TomlConfig = toml::from_str(content).context("invalid TOML")?;

        let config = Self::from_toml(toml_config, source.to_string());
        config.validate()?;

        Ok(config)
    }

    /// Reject values the swipe pipeline cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.smooth_frames < 2 {
            bail!("gesture.smooth_frames must be at least 2, got {}", self.smooth_frames);
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            bail!(
                "gesture.swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            );
        }
        if Duration::try_from_secs_f64(self.cooldown_secs).is_err() {
            bail!(
                "gesture.cooldown_secs must be a non-negative number of seconds in range, got {}",
                self.cooldown_secs
            );
        }
        if self.channel_capacity == 0 {
            bail!("input.channel_capacity must be greater than 0");
        }
        Ok(())
    }

    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn smooth_frames(&self) -> usize {
        self.smooth_frames
    }

    pub fn swipe_threshold(&self) -> f64 {
        self.swipe_threshold
    }

    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_secs
    }

    /// Cooldown as a Duration; values `validate` rejects map to zero or `Duration::MAX`
    pub fn cooldown(&self) -> Duration {
        if self.cooldown_secs.is_nan() || self.cooldown_secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.cooldown_secs).unwrap_or(Duration::MAX)
    }

    pub fn cooldown_from_start(&self) -> bool {
        self.cooldown_from_start
    }

    pub fn input_path(&self) -> &str {
        &self.input_path
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn keys(&self) -> &KeysConfig {
        &self.keys
    }

    pub fn log_actions(&self) -> bool {
        self.log_actions
    }

    pub fn actions_file(&self) -> Option<&str> {
        self.actions_file.as_deref()
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Override the sample source (e.g. from the command line)
    pub fn with_input_path(mut self, path: &str) -> Self {
        self.input_path = path.to_string();
        self
    }

    /// Override the JSONL action log (e.g. from the command line)
    pub fn with_actions_file(mut self, path: &str) -> Self {
        self.actions_file = Some(path.to_string());
        self
    }

    /// Builder method for tests to set gesture parameters
    pub fn with_gesture(
        mut self,
        smooth_frames: usize,
        swipe_threshold: f64,
        cooldown_secs: f64,
    ) -> Self {
        self.smooth_frames = smooth_frames;
        self.swipe_threshold = swipe_threshold;
        self.cooldown_secs = cooldown_secs;
        self
    }

    /// Builder method for tests to enable the start-of-session cooldown
    pub fn with_cooldown_from_start(mut self, enabled: bool) -> Self {
        self.cooldown_from_start = enabled;
        self
    }
}
