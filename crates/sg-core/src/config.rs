use crate::gate::{GateTuning, DEFAULT_MIN_INTERVAL_MS, DEFAULT_SAME_PAYLOAD_COOLDOWN_MS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read failed: {message}")]
    Read { message: String },
    #[error("config parse failed: {message}")]
    Parse { message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateSection {
    pub same_payload_cooldown_ms: Option<i64>,
    pub min_interval_ms: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScangateConfig {
    #[serde(default)]
    pub gate: GateSection,
    #[serde(default)]
    pub server: ServerSection,
    pub catalog: Option<PathBuf>,
}

impl ScangateConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })
    }

    pub fn tuning(&self) -> GateTuning {
        GateTuning::from_millis(
            self.gate
                .same_payload_cooldown_ms
                .unwrap_or(DEFAULT_SAME_PAYLOAD_COOLDOWN_MS),
            self.gate.min_interval_ms.unwrap_or(DEFAULT_MIN_INTERVAL_MS),
        )
    }
}

/// Load `scangate.toml`. A missing file means defaults, not an error.
pub fn load_config(path: &Path) -> Result<ScangateConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ScangateConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                message: err.to_string(),
            });
        }
    };
    ScangateConfig::from_toml(&content)
}
