// SPDX-License-Identifier: MIT

//! Boolean rule expressions for gating work
//!
//! ```
//! use rulegate_rs::expression::{Statement, Value, Variables};
//!
//! let vars: Variables = [("BRANCH", "main")].into_iter().collect();
//! let statement = Statement::new(r#"$BRANCH == "main""#, vars);
//! assert_eq!(statement.evaluate().unwrap(), Value::Bool(true));
//! assert!(statement.truthful().unwrap());
//! ```

pub mod config;
pub mod error;
pub mod expression;
pub mod rules;

pub use config::EngineConfig;
pub use error::{LexError, ParseError, RuleError, StatementError};
pub use expression::{Statement, Value, Variables};
pub use rules::{Decision, Gate};
