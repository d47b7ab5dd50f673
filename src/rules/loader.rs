// SPDX-License-Identifier: MIT

//! Rule file loader

use std::fs;
use std::path::Path;

use super::types::RuleSet;
use crate::error::RuleError;

/// Loads rule sets from YAML files
pub struct RuleLoader;

impl RuleLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a rule set from a YAML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<RuleSet, RuleError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a rule set from a YAML string
    pub fn parse_yaml(content: &str) -> Result<RuleSet, RuleError> {
        let set: RuleSet = serde_yaml::from_str(content)?;
        Ok(set)
    }
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}
