// SPDX-License-Identifier: MIT

//! Expression lexer
//!
//! Splits rule text into tokens by matching the head of the remaining input
//! against the lexeme catalog in priority order. Whitespace separates tokens
//! and never shows up in the output.

use super::lexeme::Lexeme;
use super::token::Token;
use crate::error::LexError;

/// Tokenizer over a single expression
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    max_tokens: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            max_tokens: None,
        }
    }

    /// Fail once more than `limit` tokens have been emitted
    pub fn with_max_tokens(mut self, limit: usize) -> Self {
        self.max_tokens = Some(limit);
        self
    }

    /// Consume the lexer and return every token
    pub fn tokens(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            log::trace!("token {} {:?} at {}", token.kind_name(), token.raw(), token.offset());
            tokens.push(token);

            if let Some(limit) = self.max_tokens {
                if tokens.len() > limit {
                    return Err(LexError::TooManyTokens { limit });
                }
            }
        }

        Ok(tokens)
    }

    /// Consume the lexer and return only the lexeme names
    pub fn lexeme_names(self) -> Result<Vec<&'static str>, LexError> {
        Ok(self.tokens()?.iter().map(Token::kind_name).collect())
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, LexError> {
        self.skip_whitespace();

        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }

        // First match wins; Lexeme::ALL must list a lexeme before any
        // other that matches a prefix of it, so this is also the longest match
        for lexeme in Lexeme::ALL {
            if let Some(raw) = lexeme.scan(rest) {
                let token = Token::new(raw, lexeme, self.pos);
                self.pos += raw.len();
                return Ok(Some(token));
            }
        }

        let fragment = rest.split_whitespace().next().unwrap_or(rest);
        Err(LexError::UnknownToken {
            offset: self.pos,
            fragment: fragment.to_string(),
        })
    }
}

/// Tokenize `input`, optionally bounding the number of tokens
pub fn tokenize(input: &str, max_tokens: Option<usize>) -> Result<Vec<Token<'_>>, LexError> {
    let lexer = Lexer::new(input);
    match max_tokens {
        Some(limit) => lexer.with_max_tokens(limit).tokens(),
        None => lexer.tokens(),
    }
}

/// Names of the lexemes in `input`, in order
pub fn lexeme_names(input: &str) -> Result<Vec<&'static str>, LexError> {
    Lexer::new(input).lexeme_names()
}
