// SPDX-License-Identifier: MIT

use super::lexeme::{Lexeme, LexemeType, Node};
use crate::error::ParseError;

/// A slice of the input paired with the lexeme that matched it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    raw: &'a str,
    lexeme: Lexeme,
    offset: usize,
}

impl<'a> Token<'a> {
    pub(crate) fn new(raw: &'a str, lexeme: Lexeme, offset: usize) -> Self {
        Self {
            raw,
            lexeme,
            offset,
        }
    }

    /// Matched text, exactly as it appears in the input
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn lexeme(&self) -> Lexeme {
        self.lexeme
    }

    /// Byte offset of the token in the input
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn lexeme_type(&self) -> LexemeType {
        self.lexeme.lexeme_type()
    }

    pub fn kind_name(&self) -> &'static str {
        self.lexeme.name()
    }

    /// Build this token's node from already built operands
    pub fn build(&self, operands: Vec<Node>) -> Result<Node, ParseError> {
        self.lexeme.build(self.raw, operands)
    }
}
