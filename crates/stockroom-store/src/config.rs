//! # Store Configuration
//!
//! Settings for the simulated backend and the bulk load.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_FAILURE_RATE=0.25                                        │
//! │     STOCKROOM_LATENCY_MS=0                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stockroom/stockroom.toml (Linux)                         │
//! │     ~/Library/Application Support/com.stockroom.stockroom/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     500ms latency, 10% failure rate, 5000 products                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [backend]
//! latency_ms = 500
//! failure_rate = 0.1
//! seed = 42          # optional, for reproducible data
//!
//! [load]
//! default_count = 5000
//! max_attempts = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Backend Settings
// =============================================================================

/// Behavior of the simulated remote backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Simulated round-trip latency (milliseconds).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Probability (0.0 - 1.0) that a fetch fails with a transient error.
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,

    /// RNG seed. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_latency_ms() -> u64 {
    500
}

fn default_failure_rate() -> f64 {
    0.1
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            latency_ms: default_latency_ms(),
            failure_rate: default_failure_rate(),
            seed: None,
        }
    }
}

impl BackendSettings {
    /// Settings for tests: no latency, no failures, fixed seed.
    pub fn reliable(seed: u64) -> Self {
        BackendSettings {
            latency_ms: 0,
            failure_rate: 0.0,
            seed: Some(seed),
        }
    }

    /// Settings for tests: no latency, every fetch fails.
    pub fn failing() -> Self {
        BackendSettings {
            latency_ms: 0,
            failure_rate: 1.0,
            seed: Some(0),
        }
    }

    /// Returns the latency as a Duration.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

// =============================================================================
// Load Settings
// =============================================================================

/// Bulk load defaults used by the demo binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSettings {
    /// Number of products to request.
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Attempts before giving up on transient failures.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_count() -> usize {
    5000
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for LoadSettings {
    fn default() -> Self {
        LoadSettings {
            default_count: default_count(),
            max_attempts: default_max_attempts(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockroomConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub load: LoadSettings,
}

impl StockroomConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (stockroom.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let rate = self.backend.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(StoreError::InvalidConfig(format!(
                "failure_rate must be between 0.0 and 1.0, got {}",
                rate
            )));
        }

        if self.load.max_attempts == 0 {
            return Err(StoreError::InvalidConfig(
                "max_attempts must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(latency) = lookup("STOCKROOM_LATENCY_MS") {
            match latency.parse::<u64>() {
                Ok(ms) => {
                    debug!(latency_ms = ms, "Overriding latency from environment");
                    self.backend.latency_ms = ms;
                }
                Err(_) => warn!(value = %latency, "Ignoring invalid STOCKROOM_LATENCY_MS"),
            }
        }

        if let Some(rate) = lookup("STOCKROOM_FAILURE_RATE") {
            match rate.parse::<f64>() {
                Ok(r) => {
                    debug!(failure_rate = r, "Overriding failure rate from environment");
                    self.backend.failure_rate = r;
                }
                Err(_) => warn!(value = %rate, "Ignoring invalid STOCKROOM_FAILURE_RATE"),
            }
        }

        if let Some(seed) = lookup("STOCKROOM_SEED") {
            match seed.parse::<u64>() {
                Ok(s) => self.backend.seed = Some(s),
                Err(_) => warn!(value = %seed, "Ignoring invalid STOCKROOM_SEED"),
            }
        }

        if let Some(count) = lookup("STOCKROOM_LOAD_COUNT") {
            match count.parse::<usize>() {
                Ok(c) => self.load.default_count = c,
                Err(_) => warn!(value = %count, "Ignoring invalid STOCKROOM_LOAD_COUNT"),
            }
        }

        if let Some(attempts) = lookup("STOCKROOM_MAX_ATTEMPTS") {
            match attempts.parse::<u32>() {
                Ok(a) => self.load.max_attempts = a,
                Err(_) => warn!(value = %attempts, "Ignoring invalid STOCKROOM_MAX_ATTEMPTS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join("stockroom.toml"))
    }
}
