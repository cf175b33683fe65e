//! Application configuration, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sensorview_core::enums::ColorMode;
use sensorview_store::viewer::ViewerConfig;

/// Highest tick rate accepted (Hz).
pub const MAX_TICK_RATE_HZ: u32 = 1000;

/// Runtime settings. Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ticks per second. Each tick drains the queue, sweeps and draws once.
    pub tick_rate_hz: u32,
    /// Capacity of the inbound message queue.
    pub queue_capacity: usize,
    pub color_mode: ColorMode,
    pub freeze_frame: bool,
    /// How long to keep ticking after the input ends (milliseconds).
    pub linger_ms: u64,
    /// Fallback `env_logger` filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Source id of this viewer; messages from it are ignored.
    pub own_source_id: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 30,
            queue_capacity: 1024,
            color_mode: ColorMode::default(),
            freeze_frame: false,
            linger_ms: 1000,
            log_filter: "info".to_string(),
            own_source_id: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl AppConfig {
    /// Load and validate a `.toml` configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 || self.tick_rate_hz > MAX_TICK_RATE_HZ {
            return Err(ConfigError::Invalid {
                field: "tick_rate_hz",
                reason: format!("must be in 1..={}, got {}", MAX_TICK_RATE_HZ, self.tick_rate_hz),
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "queue_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            color_mode: self.color_mode,
            freeze_frame: self.freeze_frame,
        }
    }
}
