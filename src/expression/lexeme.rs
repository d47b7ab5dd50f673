// SPDX-License-Identifier: MIT

//! Lexeme catalog and the syntax tree it builds
//!
//! Every construct of the rule language is one [`Lexeme`] variant. A lexeme
//! knows how to recognize itself at the head of the input, which category
//! it belongs to, and how to build a [`Node`]. Adding an operator means
//! adding a variant here; the lexer and parser only go through this API.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::value::Value;
use super::variables::Variables;
use crate::error::ParseError;

static VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$[A-Za-z_][A-Za-z0-9_]*").expect("variable pattern compiles"));
static STRING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(?:"[^"]*"|'[^']*')"#).expect("string pattern compiles"));
static NULL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^null\b").expect("null pattern compiles"));
static EQUALS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^==").expect("equals pattern compiles"));

/// Category of a lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeType {
    /// Leaf that evaluates to a value
    Value,
    /// Binary operator combining two values
    Operator,
}

/// A member of the closed rule grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexeme {
    /// `$NAME`
    Variable,
    /// `"text"` or `'text'`
    String,
    /// `null`
    Null,
    /// `==`
    Equals,
}

impl Lexeme {
    /// The catalog, in the order the lexer tries it
    ///
    /// The first match wins, so a lexeme whose text can be a prefix of
    /// another one's must come after it (`==` before a future `=`).
    pub const ALL: [Lexeme; 4] = [Lexeme::Variable, Lexeme::String, Lexeme::Null, Lexeme::Equals];

    /// Anchored pattern recognizing this lexeme
    pub fn pattern(self) -> &'static Regex {
        match self {
            Lexeme::Variable => &VARIABLE_PATTERN,
            Lexeme::String => &STRING_PATTERN,
            Lexeme::Null => &NULL_PATTERN,
            Lexeme::Equals => &EQUALS_PATTERN,
        }
    }

    pub fn lexeme_type(self) -> LexemeType {
        match self {
            Lexeme::Variable | Lexeme::String | Lexeme::Null => LexemeType::Value,
            Lexeme::Equals => LexemeType::Operator,
        }
    }

    /// Tag used in diagnostics (`variable`, `string`, ...)
    pub fn name(self) -> &'static str {
        match self {
            Lexeme::Variable => "variable",
            Lexeme::String => "string",
            Lexeme::Null => "null",
            Lexeme::Equals => "equals",
        }
    }

    /// Number of sub-nodes `build` expects
    pub fn arity(self) -> usize {
        match self.lexeme_type() {
            LexemeType::Value => 0,
            LexemeType::Operator => 2,
        }
    }

    /// Match this lexeme at the start of `input`, returning the matched text
    pub fn scan(self, input: &str) -> Option<&str> {
        self.pattern()
            .find(input)
            .filter(|m| m.start() == 0 && !m.as_str().is_empty())
            .map(|m| m.as_str())
    }

    /// Build a node from the matched text and its operands
    pub fn build(self, raw: &str, operands: Vec<Node>) -> Result<Node, ParseError> {
        if operands.len() != self.arity() {
            return Err(ParseError::UnexpectedOperands {
                lexeme: self.name(),
                expected: self.arity(),
                actual: operands.len(),
            });
        }

        if self.scan(raw) != Some(raw) {
            return Err(self.invalid_literal(raw));
        }

        let node = match self {
            Lexeme::Variable => Node::Variable {
                name: raw
                    .strip_prefix('$')
                    .ok_or_else(|| self.invalid_literal(raw))?
                    .to_string(),
            },
            Lexeme::String => Node::String {
                value: raw
                    .strip_prefix(is_quote)
                    .and_then(|rest| rest.strip_suffix(is_quote))
                    .ok_or_else(|| self.invalid_literal(raw))?
                    .to_string(),
            },
            Lexeme::Null => Node::Null,
            Lexeme::Equals => {
                let [left, right]: [Node; 2] =
                    operands
                        .try_into()
                        .map_err(|ops: Vec<Node>| ParseError::UnexpectedOperands {
                            lexeme: self.name(),
                            expected: 2,
                            actual: ops.len(),
                        })?;
                Node::Equals {
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
        };

        Ok(node)
    }

    fn invalid_literal(self, raw: &str) -> ParseError {
        ParseError::InvalidLiteral {
            lexeme: self.name(),
            raw: raw.to_string(),
        }
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Syntax tree node built by [`Lexeme::build`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Variable reference, name without the `$`
    Variable { name: String },
    /// Unquoted string literal
    String { value: String },
    Null,
    Equals { left: Box<Node>, right: Box<Node> },
}

impl Node {
    /// The lexeme this node was built from
    pub fn lexeme(&self) -> Lexeme {
        match self {
            Node::Variable { .. } => Lexeme::Variable,
            Node::String { .. } => Lexeme::String,
            Node::Null => Lexeme::Null,
            Node::Equals { .. } => Lexeme::Equals,
        }
    }

    /// Evaluate the node against a set of variables
    pub fn evaluate(&self, variables: &Variables) -> Value {
        match self {
            Node::Variable { name } => variables.get(name).into(),
            Node::String { value } => Value::String(value.clone()),
            Node::Null => Value::Null,
            Node::Equals { left, right } => {
                Value::Bool(left.evaluate(variables) == right.evaluate(variables))
            }
        }
    }

    /// Lexeme names in source order (in-order traversal)
    pub fn lexeme_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<&'static str>) {
        match self {
            Node::Equals { left, right } => {
                left.collect_names(names);
                names.push(self.lexeme().name());
                right.collect_names(names);
            }
            leaf => names.push(leaf.lexeme().name()),
        }
    }
}
