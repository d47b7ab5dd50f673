// SPDX-License-Identifier: MIT

//! Rule expressions
//!
//! A tiny, closed language for gating work on variables:
//! - `$BRANCH == "main"`
//! - `$TAG == null`
//! - `$DEPLOY` (truthful when bound to a non-empty string)
//!
//! Text flows through the [`Lexer`], the [`Parser`] and finally the
//! [`Statement`] facade, which evaluates the tree against [`Variables`].

mod lexeme;
mod lexer;
mod parser;
mod statement;
mod token;
mod value;
mod variables;

pub use lexeme::{Lexeme, LexemeType, Node};
pub use lexer::{lexeme_names, tokenize, Lexer};
pub use parser::{parse, parse_with_limit, Parser};
pub use statement::{Statement, MAX_TOKENS};
pub use token::Token;
pub use value::Value;
pub use variables::Variables;
