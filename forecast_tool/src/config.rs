//! Engine configuration

use crate::error::{ForecastError, Result};
use crate::models::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default upper bound on the forecast horizon
pub const DEFAULT_MAX_HORIZON: usize = 1024;

/// Deployment mode, used to gate diagnostic log severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Development,
    #[default]
    Production,
}

/// Deployment constants for the validation and normalization engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest accepted `horizon`
    pub max_horizon: usize,
    /// Model used when a request omits `model`
    pub default_model: ModelKind,
    pub deployment_mode: DeploymentMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_horizon: DEFAULT_MAX_HORIZON,
            default_model: ModelKind::Chronos2,
            deployment_mode: DeploymentMode::Production,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration
    pub fn new(
        max_horizon: usize,
        default_model: ModelKind,
        deployment_mode: DeploymentMode,
    ) -> Result<Self> {
        let config = Self {
            max_horizon,
            default_model,
            deployment_mode,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON document; missing keys take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Replace the horizon bound
    pub fn with_max_horizon(mut self, max_horizon: usize) -> Result<Self> {
        self.max_horizon = max_horizon;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.max_horizon == 0 {
            return Err(ForecastError::ConfigError(
                "max_horizon must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_horizon, 1024);
        assert_eq!(config.default_model, ModelKind::Chronos2);
        assert_eq!(config.deployment_mode, DeploymentMode::Production);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{"max_horizon": 10000}"#).unwrap();
        assert_eq!(config.max_horizon, 10000);
        assert_eq!(config.default_model, ModelKind::Chronos2);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let result = EngineConfig::new(0, ModelKind::Tirex, DeploymentMode::Development);
        assert!(matches!(result, Err(ForecastError::ConfigError(_))));
    }
}
