/*!
 * Pipeline Configuration
 *
 * Runtime configuration for depth limits and tracing output
 */

use super::errors::ConfigError;
use super::limits::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_PIPELINE_DEPTH, MAX_PIPELINE_DEPTH, MIN_PIPELINE_DEPTH,
};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the pipeline depth limit
pub const ENV_MAX_DEPTH: &str = "PIPES_MAX_DEPTH";

/// Environment variable enabling JSON trace output
pub const ENV_TRACE_JSON: &str = "PIPES_TRACE_JSON";

/// Environment variable holding the tracing filter
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PipesConfig {
    /// Maximum fitting-to-fitting hops for one write
    pub max_pipeline_depth: usize,
    /// Emit JSON formatted traces instead of compact text
    pub trace_json: bool,
    /// Tracing filter directive, same syntax as RUST_LOG
    pub log_filter: String,
}

impl Default for PipesConfig {
    fn default() -> Self {
        Self {
            max_pipeline_depth: DEFAULT_MAX_PIPELINE_DEPTH,
            trace_json: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PipesConfig {
    /// Build configuration from environment variables, falling back to defaults
    ///
    /// Environment variables:
    /// - PIPES_MAX_DEPTH: maximum pipeline depth
    /// - PIPES_TRACE_JSON: "1" or "true" enables JSON output
    /// - RUST_LOG: tracing filter
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_MAX_DEPTH) {
            config.max_pipeline_depth =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_MAX_DEPTH.to_string(),
                    value: raw.clone(),
                })?;
        }

        if let Ok(raw) = std::env::var(ENV_TRACE_JSON) {
            config.trace_json = raw == "1" || raw.eq_ignore_ascii_case("true");
        }

        if let Ok(filter) = std::env::var(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values are within the accepted ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PIPELINE_DEPTH..=MAX_PIPELINE_DEPTH).contains(&self.max_pipeline_depth) {
            return Err(ConfigError::InvalidValue {
                key: "max_pipeline_depth".to_string(),
                value: self.max_pipeline_depth.to_string(),
            });
        }
        Ok(())
    }

    /// Install the depth limit process-wide
    pub fn apply(&self) {
        crate::plumbing::flow::set_max_pipeline_depth(self.max_pipeline_depth);
    }
}
