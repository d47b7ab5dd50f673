// SPDX-License-Identifier: MIT

//! Include/skip decisions for rule-gated jobs

use serde::Serialize;
use std::fmt;

use super::types::{JobDefinition, RuleSet};
use crate::config::EngineConfig;
use crate::expression::{Statement, Variables};

/// Whether a job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Include,
    Skip,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Include => write!(f, "include"),
            Decision::Skip => write!(f, "skip"),
        }
    }
}

/// Decision for one job of a rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDecision {
    pub name: String,
    pub decision: Decision,
    /// Why the rule could not be evaluated, if it could not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Evaluates job rules against a set of variables
pub struct Gate {
    config: EngineConfig,
}

impl Gate {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Decide a single job
    pub fn decide(&self, job: &JobDefinition, variables: &Variables) -> Decision {
        self.judge(job, variables).decision
    }

    /// Decide every job, keeping the rule set order
    pub fn plan(&self, rules: &RuleSet, variables: &Variables) -> Vec<JobDecision> {
        rules
            .jobs
            .iter()
            .map(|job| self.judge(job, variables))
            .collect()
    }

    fn judge(&self, job: &JobDefinition, variables: &Variables) -> JobDecision {
        let Some(condition) = &job.condition else {
            return JobDecision {
                name: job.name.clone(),
                decision: Decision::Include,
                error: None,
            };
        };

        let statement = Statement::new(condition.as_str(), variables.clone())
            .with_max_tokens(self.config.max_tokens);

        let (decision, error) = match statement.truthful() {
            Ok(true) => (Decision::Include, None),
            Ok(false) => (Decision::Skip, None),
            Err(e) => {
                log::warn!("Invalid rule '{}' for job {}: {}", condition, job.name, e);
                (Decision::Skip, Some(e.to_string()))
            }
        };

        log::info!("Job {}: {}", job.name, decision);
        JobDecision {
            name: job.name.clone(),
            decision,
            error,
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
