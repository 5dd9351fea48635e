//! 字句解析結果の報告に使うエラー型
//!
//! レキサー自体は失敗しない。不正な入力は不正トークンとして返され、
//! フロントエンドがそれをこのエラー型に変換して報告する。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

use crate::diagnostics::byte_range;
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("illegal character '{text}'")]
    IllegalCharacter { text: String, span: Span },

    #[error("malformed byte escape '\\x{text}'")]
    MalformedEscape { text: String, span: Span },
}

impl LexerError {
    /// 不正トークンを分類する。不正トークン以外は `None`
    ///
    /// 原因はトークンを作った `lexer` が記録しているものを使う。
    pub fn from_token(token: &Token, lexer: &Lexer) -> Option<Self> {
        if token.kind != TokenKind::Illegal {
            return None;
        }
        let text = token.text.clone();
        let span = token.span;
        Some(if lexer.is_malformed_escape(span) {
            LexerError::MalformedEscape { text, span }
        } else {
            LexerError::IllegalCharacter { text, span }
        })
    }

    pub fn span(&self) -> Span {
        match self {
            LexerError::IllegalCharacter { span, .. } | LexerError::MalformedEscape { span, .. } => *span,
        }
    }

    /// codespan-reportingの診断に変換。`source` はスパンの元になった入力
    pub fn to_diagnostic(&self, file_id: usize, source: &str) -> Diagnostic<usize> {
        let range = byte_range(source, self.span());
        let label = match self {
            LexerError::IllegalCharacter { .. } => "this character is not part of the language",
            LexerError::MalformedEscape { .. } => "expected two hex digits after `\\x`",
        };
        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(vec![Label::primary(file_id, range).with_message(label)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::DEFAULT_NAME;
    use pretty_assertions::assert_eq;

    /// 入力をすべて読み、分類済みのエラーを返すヘルパー関数
    fn errors(input: &str) -> Vec<LexerError> {
        let mut lexer = Lexer::new(input, DEFAULT_NAME);
        crate::diagnostics::illegal_tokens(&mut lexer)
            .iter()
            .filter_map(|t| LexerError::from_token(t, &lexer))
            .collect()
    }

    #[test]
    fn test_from_illegal_character() {
        let errs = errors("a $");
        assert_eq!(
            errs,
            vec![LexerError::IllegalCharacter {
                text: "$".to_string(),
                span: Span::point(2),
            }]
        );
        assert_eq!(errs[0].to_string(), "illegal character '$'");
    }

    #[test]
    fn test_from_malformed_escape() {
        let errs = errors(r#""\xq1""#);
        assert!(matches!(errs[0], LexerError::MalformedEscape { .. }));
        assert_eq!(errs[0].span(), Span::new(3, 4));
        assert_eq!(errs[0].to_string(), "malformed byte escape '\\xq1'");
    }

    #[test]
    fn test_escape_cut_by_end_of_input() {
        let errs = errors(r#""\x4"#);
        assert!(matches!(errs[0], LexerError::MalformedEscape { .. }));
    }

    #[test]
    fn test_escape_ending_on_legal_character() {
        // `!` は正当な文字だが、ここではエスケープの失敗として報告する
        let errs = errors(r#""\x!"#);
        assert_eq!(
            errs,
            vec![LexerError::MalformedEscape {
                text: "!".to_string(),
                span: Span::point(3),
            }]
        );
        let diagnostic = errs[0].to_diagnostic(0, r#""\x!"#);
        assert_eq!(diagnostic.labels[0].message, "expected two hex digits after `\\x`");
    }

    #[test]
    fn test_from_legal_token() {
        let lexer = Lexer::new("x", DEFAULT_NAME);
        let token = Token::new(TokenKind::Ident, "x", Span::point(0));
        assert_eq!(LexerError::from_token(&token, &lexer), None);
    }

    #[test]
    fn test_to_diagnostic_uses_byte_ranges() {
        let source = "ü $";
        let errs = errors(source);
        let diagnostic = errs[0].to_diagnostic(0, source);
        assert_eq!(diagnostic.message, "illegal character '$'");
        assert_eq!(diagnostic.labels[0].range, 3..4);
    }
}
