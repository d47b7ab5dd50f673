// SPDX-License-Identifier: MIT

//! Rule statement facade
//!
//! A [`Statement`] owns the expression text and the variables it is checked
//! against. The parse tree is computed on first use and kept, failure
//! included, so every later call sees the same outcome.
//!
//! The tree is memoized in a [`OnceCell`] from `once_cell::sync`: a
//! statement is `Send + Sync`, concurrent first calls are safe and the
//! text is parsed at most once.

use once_cell::sync::OnceCell;

use super::lexeme::Node;
use super::lexer::Lexer;
use super::parser::Parser;
use super::value::Value;
use super::variables::Variables;
use crate::error::StatementError;

/// Default token budget for a single statement
pub const MAX_TOKENS: usize = 100;

/// A rule expression bound to a set of variables
#[derive(Debug)]
pub struct Statement {
    text: String,
    variables: Variables,
    max_tokens: usize,
    tree: OnceCell<Result<Node, StatementError>>,
}

impl Statement {
    pub fn new(text: impl Into<String>, variables: Variables) -> Self {
        Self {
            text: text.into(),
            variables,
            max_tokens: MAX_TOKENS,
            tree: OnceCell::new(),
        }
    }

    /// Override the token budget (default [`MAX_TOKENS`])
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self.tree = OnceCell::new();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Parse tree of the statement
    ///
    /// Text without any token is an error here, unlike [`super::parse`]
    /// which reduces it to `Null`.
    pub fn parse_tree(&self) -> Result<&Node, StatementError> {
        self.tree
            .get_or_init(|| self.build_tree())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn build_tree(&self) -> Result<Node, StatementError> {
        let tokens = Lexer::new(&self.text)
            .with_max_tokens(self.max_tokens)
            .tokens()?;

        if tokens.is_empty() {
            return Err(StatementError::Empty);
        }

        let tree = Parser::new(tokens).tree()?;
        log::debug!("statement {:?} parsed into {:?}", self.text, tree);
        Ok(tree)
    }

    /// Whether the statement parses
    pub fn is_valid(&self) -> bool {
        self.parse_tree().is_ok()
    }

    /// Evaluate the statement to its raw value
    pub fn evaluate(&self) -> Result<Value, StatementError> {
        let value = self.parse_tree()?.evaluate(&self.variables);
        log::debug!("statement {:?} evaluated to {}", self.text, value);
        Ok(value)
    }

    /// Evaluate and coerce to a strict boolean
    pub fn truthful(&self) -> Result<bool, StatementError> {
        Ok(self.evaluate()?.is_truthful())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, ParseError};

    fn vars() -> Variables {
        [("PRESENT_VARIABLE", "my variable"), ("EMPTY_VARIABLE", "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_empty_statement_is_invalid() {
        let statement = Statement::new("", vars());
        assert!(!statement.is_valid());
        assert_eq!(statement.parse_tree(), Err(StatementError::Empty));

        let statement = Statement::new("  \t", vars());
        assert_eq!(statement.evaluate(), Err(StatementError::Empty));
    }

    #[test]
    fn test_invalid_statements() {
        for text in [r#"$VAR "text""#, r#"== "123""#, "$VAR ==", "12345"] {
            let statement = Statement::new(text, vars());
            assert!(!statement.is_valid(), "{} should be invalid", text);
            assert!(statement.parse_tree().is_err());
        }
    }

    #[test]
    fn test_single_literal_is_valid() {
        let statement = Statement::new(r#""some string""#, vars());
        assert!(statement.is_valid());
        assert_eq!(statement.evaluate().unwrap(), Value::String("some string".to_string()));
    }

    #[test]
    fn test_failure_is_memoized() {
        let statement = Statement::new("$VAR ==", vars());
        let first = statement.parse_tree().unwrap_err();
        let second = statement.parse_tree().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(statement.evaluate().unwrap_err(), first);
        assert_eq!(statement.truthful().unwrap_err(), first);
    }

    #[test]
    fn test_tree_is_memoized() {
        let statement = Statement::new("$PRESENT_VARIABLE", vars());
        let first = statement.parse_tree().unwrap() as *const Node;
        let second = statement.parse_tree().unwrap() as *const Node;
        assert_eq!(first, second);
    }

    #[test]
    fn test_token_budget() {
        let text = r#"$A == "a" == $B"#;
        let statement = Statement::new(text, vars()).with_max_tokens(4);
        assert_eq!(
            statement.parse_tree(),
            Err(StatementError::Invalid(ParseError::Lex(
                LexError::TooManyTokens { limit: 4 }
            )))
        );

        assert!(Statement::new(text, vars()).with_max_tokens(5).is_valid());
    }

    #[test]
    fn test_default_budget() {
        let long = vec!["$A"; MAX_TOKENS / 2 + 1].join(" == ");
        assert!(!Statement::new(long, vars()).is_valid());

        let fits = vec!["$A"; MAX_TOKENS / 2].join(" == ");
        assert!(Statement::new(fits, vars()).is_valid());
    }

    #[test]
    fn test_evaluate_values() {
        let vars = vars();
        let eval = |text: &str| Statement::new(text, vars.clone()).evaluate().unwrap();

        assert_eq!(eval("$PRESENT_VARIABLE == 'my variable'"), Value::Bool(true));
        assert_eq!(eval("$EMPTY_VARIABLE"), Value::String(String::new()));
        assert_eq!(eval("$UNDEFINED_VARIABLE"), Value::Null);
        assert_eq!(eval("$EMPTY_VARIABLE == null"), Value::Bool(false));
        assert_eq!(eval("null == $UNDEFINED_VARIABLE"), Value::Bool(true));
    }

    #[test]
    fn test_truthful() {
        let vars = vars();
        let truthful = |text: &str| Statement::new(text, vars.clone()).truthful().unwrap();

        assert!(truthful("$PRESENT_VARIABLE"));
        assert!(!truthful("$EMPTY_VARIABLE"));
        assert!(!truthful("$UNDEFINED_VARIABLE"));
        assert!(!truthful("$PRESENT_VARIABLE == 'no match'"));
    }

    #[test]
    fn test_statement_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Statement>();

        let statement = std::sync::Arc::new(Statement::new(
            "$PRESENT_VARIABLE == 'my variable'",
            vars(),
        ));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let statement = statement.clone();
                std::thread::spawn(move || statement.truthful())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(true));
        }
    }
}
