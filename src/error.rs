// SPDX-License-Identifier: MIT

//! Typed error handling for rulegate-rs
//!
//! Expression errors are `Clone + PartialEq` so a statement can hand back
//! the exact same failure every time it is asked for its parse tree.

use thiserror::Error;

/// Failures raised while splitting expression text into tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Nothing in the lexeme catalog matches at this position
    #[error("Unknown token '{fragment}' at offset {offset}")]
    UnknownToken { offset: usize, fragment: String },

    /// The expression produced more tokens than allowed
    #[error("Too many tokens, the limit is {limit}")]
    TooManyTokens { limit: usize },
}

/// Failures raised while reducing tokens into a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// An operator with nothing on its left (`== "a"`, `$A == == "b"`)
    #[error("Operator '{operator}' at offset {offset} has no left operand")]
    MissingLeftOperand { operator: String, offset: usize },

    /// An operator at the end of the input (`$A ==`)
    #[error("Operator '{operator}' at offset {offset} has no right operand")]
    MissingRightOperand { operator: String, offset: usize },

    /// Two values with no operator between them (`$A "text"`)
    #[error("Expected an operator before '{value}' at offset {offset}")]
    MissingOperator { value: String, offset: usize },

    /// Text handed to a lexeme that its pattern does not match in full
    #[error("'{raw}' is not a valid {lexeme}")]
    InvalidLiteral { lexeme: &'static str, raw: String },

    /// A lexeme was asked to build a node with the wrong number of operands
    #[error("Lexeme '{lexeme}' expects {expected} operand(s), got {actual}")]
    UnexpectedOperands {
        lexeme: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Failures surfaced by [`crate::expression::Statement`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// The statement text holds no tokens at all
    #[error("Empty statement")]
    Empty,

    #[error("Invalid statement: {0}")]
    Invalid(#[from] ParseError),
}

impl From<LexError> for StatementError {
    fn from(err: LexError) -> Self {
        Self::Invalid(ParseError::Lex(err))
    }
}

/// Top-level error type for rulegate-rs
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Rule error: {0}")]
    Statement(#[from] StatementError),

    /// Configuration errors (invalid env vars, bad limits)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RuleError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
