//! トークン定義

use serde::Serialize;
use std::fmt;

/// デコード済み入力におけるトークンの文字位置の範囲
///
/// 両端を含む。1文字のトークンは `start == end` になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Span { start, end }
    }

    /// 1点を指す幅0のスパン
    pub fn point(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span{{start: {}, end: {}}}", self.start, self.end)
    }
}

/// Blue言語のトークン型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // 終端
    Illegal,
    Eof,

    // 識別子とリテラル
    Ident,
    Int,
    Float,
    Hex,
    Octal,
    Binary,
    String,
    RawString,
    ExecString,
    StringInterp,

    // キーワード
    Function,
    Var,
    Val,
    True,
    False,
    If,
    Else,
    Return,
    For,
    In,
    NotIn,
    And,
    Or,
    Not,
    Const,
    Match,
    Null,
    Import,

    // 演算子
    Assign,
    Eq,
    NotEq,
    RArrow,
    Bang,
    Plus,
    PlusEq,
    Minus,
    MinusEq,
    Star,
    MulEq,
    Pow,
    PowEq,
    FSlash,
    DivEq,
    FDiv,
    FDivEq,
    Percent,
    PercentEq,
    Ampersand,
    AndEq,
    Pipe,
    OrEq,
    Hat,
    XorEq,
    Tilde,
    BinNotEq,
    Lt,
    LtEq,
    LShift,
    LShiftEq,
    Gt,
    GtEq,
    RShift,
    RShiftEq,
    Range,
    NonIncRange,

    // デリミタ
    Hash,
    Dot,
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl TokenKind {
    /// トークンダンプで表示する名前
    pub fn as_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",

            Ident => "IDENT",
            Int => "INT",
            Float => "FLOAT",
            Hex => "HEX",
            Octal => "OCTAL",
            Binary => "BINARY",
            String => "STRING",
            RawString => "\"\"\"",
            ExecString => "`",
            StringInterp => "#{",

            Function => "FUNCTION",
            Var => "VAR",
            Val => "VAL",
            True => "TRUE",
            False => "FALSE",
            If => "IF",
            Else => "ELSE",
            Return => "RETURN",
            For => "FOR",
            In => "IN",
            NotIn => "NOTIN",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Const => "CONST",
            Match => "MATCH",
            Null => "NULL_KW",
            Import => "IMPORT",

            Assign => "=",
            Eq => "==",
            NotEq => "!=",
            RArrow => "=>",
            Bang => "!",
            Plus => "+",
            PlusEq => "+=",
            Minus => "-",
            MinusEq => "-=",
            Star => "*",
            MulEq => "*=",
            Pow => "**",
            PowEq => "**=",
            FSlash => "/",
            DivEq => "/=",
            FDiv => "//",
            FDivEq => "//=",
            Percent => "%",
            PercentEq => "%=",
            Ampersand => "&",
            AndEq => "&=",
            Pipe => "|",
            OrEq => "|=",
            Hat => "^",
            XorEq => "^=",
            Tilde => "~",
            BinNotEq => "~=",
            Lt => "<",
            LtEq => "<=",
            LShift => "<<",
            LShiftEq => "<<=",
            Gt => ">",
            GtEq => ">=",
            RShift => ">>",
            RShiftEq => ">>=",
            Range => "..",
            NonIncRange => "..<",

            Hash => "#",
            Dot => ".",
            Comma => ",",
            Semicolon => ";",
            Colon => ":",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
        }
    }

    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Function
                | Var
                | Val
                | True
                | False
                | If
                | Else
                | Return
                | For
                | In
                | NotIn
                | And
                | Or
                | Not
                | Const
                | Match
                | Null
                | Import
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 字句解析したトークン。`text` はデコード済みのリテラルで、エスケープ付き
/// 文字列では引用符を除きエスケープ処理した後の内容になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is_illegal(&self) -> bool {
        self.kind == TokenKind::Illegal
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token{{Type: {}, Literal: `{}`, {}}}",
            self.kind, self.text, self.span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let tok = Token::new(TokenKind::PowEq, "**=", Span::new(4, 6));
        assert_eq!(
            tok.to_string(),
            "Token{Type: **=, Literal: `**=`, Span{start: 4, end: 6}}"
        );
    }

    #[test]
    fn test_keyword_kinds() {
        assert!(TokenKind::Function.is_keyword());
        assert!(TokenKind::NotIn.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(!TokenKind::Assign.is_keyword());
        assert_eq!(TokenKind::Null.as_str(), "NULL_KW");
    }

    #[test]
    fn test_token_serializes_to_json() {
        let tok = Token::new(TokenKind::Ident, "x", Span::point(0));
        let json = serde_json::to_string(&tok).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"Ident","text":"x","span":{"start":0,"end":0}}"#
        );
    }
}
