//! Lexical analysis for the Blue language.
//!
//! The scanner turns decoded source text into a stream of tokens carrying
//! character-offset spans. It never fails: unrecognized input and malformed
//! byte escapes come back as `TokenKind::Illegal` tokens and scanning
//! continues after them.
//!
//! String interpolation (`#{ ... }`) is only tokenized outside of string
//! literals. Inside a string the characters are ordinary text and the parser
//! is responsible for re-lexing them.

pub mod chars;
pub mod keywords;
#[allow(clippy::module_inception)]
pub mod lexer;
pub mod literal_parser;
pub mod token;

pub use keywords::lookup_ident;
pub use lexer::{format_tokens, tokenize, Lexer, DEFAULT_NAME};
pub use literal_parser::EscapeError;
pub use token::{Span, Token, TokenKind};
