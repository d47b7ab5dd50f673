// SPDX-License-Identifier: MIT

//! YAML schema types for rule files

use serde::{Deserialize, Serialize};

/// Top-level rule file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuleSet {
    #[serde(default)]
    pub jobs: Vec<JobDefinition>,
}

/// A unit of work guarded by an optional rule
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JobDefinition {
    pub name: String,
    /// Rule expression, e.g. `$BRANCH == "main"`
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl JobDefinition {
    pub fn new(name: impl Into<String>, condition: Option<&str>) -> Self {
        Self {
            name: name.into(),
            condition: condition.map(str::to_string),
        }
    }
}
