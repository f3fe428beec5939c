use serde::{Deserialize, Serialize};

use crate::ai::search::DEFAULT_SEARCH_DEPTH;
use crate::error::QirkatError;

/// Deepest search the engine accepts from configuration.
pub const MAX_SEARCH_DEPTH: u8 = 12;

/// Engine settings, usually read from a YAML file. Missing keys fall back
/// to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched before static evaluation.
    pub search_depth: u8,
    /// Prefix for log lines; logging stays off when `None`.
    pub log_prefix: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            log_prefix: None,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml(content: &str) -> Result<Self, QirkatError> {
        let config: Self = serde_yaml_ng::from_str(content)
            .map_err(|e| QirkatError::InvalidConfig(format!("Failed to deserialize config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, QirkatError> {
        self.validate()?;
        serde_yaml_ng::to_string(self)
            .map_err(|e| QirkatError::InvalidConfig(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), QirkatError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            return Err(QirkatError::InvalidConfig(format!(
                "search_depth must be between 1 and {MAX_SEARCH_DEPTH}, got {}",
                self.search_depth
            )));
        }
        Ok(())
    }

    /// Installs the logger when a prefix is configured.
    pub fn init_logging(&self) {
        if let Some(prefix) = &self.log_prefix {
            crate::logger::init_logger(Some(prefix.clone()));
        }
    }
}
