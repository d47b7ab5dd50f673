// SPDX-License-Identifier: MIT

//! Rule-gated jobs
//!
//! Jobs carry an optional `if` rule. The [`Gate`] evaluates each rule
//! against the current variables and decides whether the job runs.
//! Invalid rules never include a job.

mod gate;
mod loader;
mod types;

pub use gate::{Decision, Gate, JobDecision};
pub use loader::RuleLoader;
pub use types::{JobDefinition, RuleSet};
