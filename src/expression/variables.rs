// SPDX-License-Identifier: MIT

//! Variable bindings an expression is evaluated against

use serde_yaml::Value as YamlValue;
use std::collections::HashMap;

use crate::error::RuleError;

/// Immutable name -> value mapping
///
/// A name that is not bound evaluates to `Null`, never to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    vars: HashMap<String, String>,
}

impl Variables {
    /// Create an empty set of bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment
    ///
    /// Pairs that are not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (name, _) => {
                    log::debug!("Skipping non UTF-8 environment variable {:?}", name);
                    None
                }
            })
            .collect()
    }

    /// Parse bindings from a YAML mapping
    ///
    /// Scalars are stringified, `null` leaves the name unbound.
    pub fn from_yaml(content: &str) -> Result<Self, RuleError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let raw: Option<HashMap<String, YamlValue>> = serde_yaml::from_str(content)?;
        let mut vars = HashMap::new();

        for (name, value) in raw.unwrap_or_default() {
            let value = match value {
                YamlValue::Null => continue,
                YamlValue::String(s) => s,
                YamlValue::Bool(b) => b.to_string(),
                YamlValue::Number(n) => n.to_string(),
                other => {
                    return Err(RuleError::config(format!(
                        "Variable '{}' must be a scalar, got {:?}",
                        name, other
                    )))
                }
            };
            vars.insert(name, value);
        }

        Ok(Self { vars })
    }

    /// Combine two sets of bindings, `other` wins on conflicts
    pub fn merge(mut self, other: Variables) -> Self {
        self.vars.extend(other.vars);
        self
    }

    /// Get a bound value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl From<HashMap<String, String>> for Variables {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
