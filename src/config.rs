// SPDX-License-Identifier: MIT

//! Engine configuration
//!
//! Loaded from YAML, then optionally overridden from the environment:
//!
//! ```yaml
//! max_tokens: 100
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RuleError;
use crate::expression::MAX_TOKENS;

/// Environment variable overriding `max_tokens`
pub const MAX_TOKENS_ENV: &str = "RULEGATE_MAX_TOKENS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Token budget for every statement
    pub max_tokens: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tokens: MAX_TOKENS,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, RuleError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()
    }

    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Apply `RULEGATE_MAX_TOKENS` if it is set
    pub fn apply_env_overrides(self) -> Result<Self, RuleError> {
        match std::env::var(MAX_TOKENS_ENV) {
            Ok(raw) => self.with_max_tokens_str(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_max_tokens_str(mut self, raw: &str) -> Result<Self, RuleError> {
        self.max_tokens = raw.trim().parse().map_err(|_| {
            RuleError::config(format!(
                "{} must be a positive integer, got '{}'",
                MAX_TOKENS_ENV, raw
            ))
        })?;
        log::debug!("max_tokens overridden to {}", self.max_tokens);
        self.validate()
    }

    fn validate(self) -> Result<Self, RuleError> {
        if self.max_tokens == 0 {
            return Err(RuleError::config("max_tokens must be greater than zero"));
        }
        Ok(self)
    }
}
