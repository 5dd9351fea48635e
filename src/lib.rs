//! Blue Language Scanner Library
//!
//! This library provides the lexical scanner for the Blue language and the
//! diagnostic renderer used to report positions in Blue source text.

pub mod diagnostics;
pub mod error;
pub mod lexer;

// Re-export commonly used types
pub use error::LexerError;
pub use lexer::{tokenize, Lexer, Span, Token, TokenKind};
