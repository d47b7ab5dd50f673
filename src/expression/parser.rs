// SPDX-License-Identifier: MIT

//! Expression parser
//!
//! Reduces a token stream into a single tree. The stream must alternate
//! `value operator value ...`; operators fold left, so `A == B == C`
//! parses as `(A == B) == C`.

use super::lexeme::{LexemeType, Node};
use super::lexer::Lexer;
use super::token::Token;
use crate::error::ParseError;

/// Builds a tree out of already lexed tokens
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens }
    }

    /// Reduce the tokens into one root node
    ///
    /// No tokens at all yields [`Node::Null`].
    pub fn tree(self) -> Result<Node, ParseError> {
        let mut root: Option<Node> = None;
        let mut pending: Option<Token<'a>> = None;

        for token in self.tokens {
            match token.lexeme_type() {
                LexemeType::Value => {
                    let operand = token.build(vec![])?;
                    root = match (root, pending.take()) {
                        (None, _) => Some(operand),
                        (Some(left), Some(operator)) => Some(operator.build(vec![left, operand])?),
                        (Some(_), None) => {
                            return Err(ParseError::MissingOperator {
                                value: token.raw().to_string(),
                                offset: token.offset(),
                            })
                        }
                    };
                }
                LexemeType::Operator => {
                    if root.is_none() || pending.is_some() {
                        return Err(ParseError::MissingLeftOperand {
                            operator: token.raw().to_string(),
                            offset: token.offset(),
                        });
                    }
                    pending = Some(token);
                }
            }
        }

        if let Some(operator) = pending {
            return Err(ParseError::MissingRightOperand {
                operator: operator.raw().to_string(),
                offset: operator.offset(),
            });
        }

        Ok(root.unwrap_or(Node::Null))
    }
}

/// Parse `input` without a token budget
pub fn parse(input: &str) -> Result<Node, ParseError> {
    parse_tokens(Lexer::new(input))
}

/// Parse `input`, failing when it holds more than `max_tokens` tokens
pub fn parse_with_limit(input: &str, max_tokens: usize) -> Result<Node, ParseError> {
    parse_tokens(Lexer::new(input).with_max_tokens(max_tokens))
}

fn parse_tokens(lexer: Lexer<'_>) -> Result<Node, ParseError> {
    let tree = Parser::new(lexer.tokens()?).tree()?;
    log::debug!("parsed tree: {:?}", tree);
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;
    use crate::expression::lexeme::Lexeme;
    use crate::expression::lexer::lexeme_names;

    fn var(name: &str) -> Node {
        Node::Variable {
            name: name.to_string(),
        }
    }

    fn string(value: &str) -> Node {
        Node::String {
            value: value.to_string(),
        }
    }

    fn equals(left: Node, right: Node) -> Node {
        Node::Equals {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_parse_chained_equality() {
        let tree = parse(r#"$VAR1 == "123" == $VAR2"#).unwrap();
        assert_eq!(tree.lexeme(), Lexeme::Equals);
    }

    #[test]
    fn test_chain_associates_left() {
        let tree = parse(r#"$A == "b" == $C"#).unwrap();
        assert_eq!(tree, equals(equals(var("A"), string("b")), var("C")));
    }

    #[test]
    fn test_parse_single_variable() {
        let tree = parse("$VAR").unwrap();
        assert_eq!(tree.lexeme(), Lexeme::Variable);
        assert_eq!(tree, var("VAR"));
    }

    #[test]
    fn test_parse_single_string() {
        assert_eq!(parse(r#""some string""#).unwrap(), string("some string"));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), Node::Null);
        assert_eq!(parse("   ").unwrap(), Node::Null);
    }

    #[test]
    fn test_parse_null_comparison() {
        assert_eq!(
            parse("null == $UNDEFINED").unwrap(),
            equals(Node::Null, var("UNDEFINED"))
        );
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(
            parse(r#"$VAR "text""#),
            Err(ParseError::MissingOperator {
                value: r#""text""#.to_string(),
                offset: 5
            })
        );
    }

    #[test]
    fn test_leading_operator() {
        assert_eq!(
            parse(r#"== "123""#),
            Err(ParseError::MissingLeftOperand {
                operator: "==".to_string(),
                offset: 0
            })
        );
    }

    #[test]
    fn test_consecutive_operators() {
        assert!(matches!(
            parse("$A == == $B"),
            Err(ParseError::MissingLeftOperand { offset: 6, .. })
        ));
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(
            parse("$VAR =="),
            Err(ParseError::MissingRightOperand {
                operator: "==".to_string(),
                offset: 5
            })
        );
    }

    #[test]
    fn test_lex_errors_propagate() {
        assert_eq!(
            parse("12345"),
            Err(ParseError::Lex(LexError::UnknownToken {
                offset: 0,
                fragment: "12345".to_string()
            }))
        );
        assert_eq!(
            parse_with_limit("$A == $B", 2),
            Err(ParseError::Lex(LexError::TooManyTokens { limit: 2 }))
        );
    }

    #[test]
    fn test_tree_consumes_every_token() {
        for input in [
            "$A",
            "'x'",
            "null",
            "$A == 'x'",
            "null == $A",
            r#"$A == "b" == $C == null"#,
        ] {
            assert_eq!(
                parse(input).unwrap().lexeme_names(),
                lexeme_names(input).unwrap(),
                "mismatch for {}",
                input
            );
        }
    }
}
