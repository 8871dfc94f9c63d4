//! Application-level configuration loading for thresholds and round timing.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RPS_VISION_BACK_CONFIG_PATH";

/// Minimum confidence a detection needs to survive filtering.
const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;
/// Number of countdown ticks published before evaluation.
const DEFAULT_COUNTDOWN_TICKS: u8 = 3;
/// How long each countdown tick stays on display.
const DEFAULT_TICK_MS: u64 = 1000;
/// How long the result stays on display before returning to idle.
const DEFAULT_RESULT_HOLD_MS: u64 = 3000;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Detections below this confidence are discarded by the feed adapter.
    pub confidence_threshold: f64,
    /// Countdown tick count; the first published tick carries this value.
    pub countdown_ticks: u8,
    /// Duration each countdown tick is held.
    pub tick_duration: Duration,
    /// Duration the result phase is held before returning to idle.
    pub result_hold: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), ?config, "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            tick_duration: Duration::from_millis(DEFAULT_TICK_MS),
            result_hold: Duration::from_millis(DEFAULT_RESULT_HOLD_MS),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    confidence_threshold: Option<f64>,
    countdown_ticks: Option<u8>,
    countdown_tick_ms: Option<u64>,
    result_hold_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            confidence_threshold: value
                .confidence_threshold
                .unwrap_or(defaults.confidence_threshold),
            countdown_ticks: value.countdown_ticks.unwrap_or(defaults.countdown_ticks),
            tick_duration: value
                .countdown_tick_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_duration),
            result_hold: value
                .result_hold_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.result_hold),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
