//! レキサーのメイン実装

use super::chars::{is_digit, is_letter, is_whitespace};
use super::token::{Span, Token, TokenKind};
use crate::diagnostics;

/// ファイル以外から読んだ入力の表示名
pub const DEFAULT_NAME: &str = "<string>";

/// Blue言語のレキサー
///
/// 位置はデコード済みの文字単位で数える。`pos` は現在の文字、`read_pos` は
/// その次を指す。入力の終端では両方が入力長になり `ch` は `None` になる。
pub struct Lexer {
    pub(super) input: Vec<char>,
    pub(super) pos: usize,
    pub(super) read_pos: usize,
    pub(super) ch: Option<char>,
    pub(super) prev_ch: Option<char>,
    /// 不正な `\x` エスケープから作った不正トークンの位置
    pub(super) malformed_escapes: Vec<Span>,
    name: String,
}

impl Lexer {
    /// 新しいレキサーを作成。`name` は診断に表示される名前（通常はファイルパス）
    pub fn new(input: &str, name: impl Into<String>) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            pos: 0,
            read_pos: 0,
            ch: None,
            prev_ch: None,
            malformed_escapes: Vec::new(),
            name: name.into(),
        };
        lexer.read_char();
        lexer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 入力長（文字数）
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// `span` の不正トークンが `\x` エスケープの失敗から作られたかどうか
    pub fn is_malformed_escape(&self, span: Span) -> bool {
        self.malformed_escapes.contains(&span)
    }

    /// `span` をこの入力に対する3行の診断に整形
    pub fn render(&self, span: Span, message: &str) -> String {
        diagnostics::render(&self.input, &self.name, span, message)
    }

    /// 次のトークンを取得。入力を読み終えた後は毎回空の `Eof` を返す
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        log::trace!("{}", token);
        if token.is_illegal() {
            log::debug!("{}: illegal token `{}` at {}", self.name, token.text, token.span);
        }
        token
    }

    /// 終端トークンを除くすべてのトークンを収集
    pub fn collect_tokens(self) -> Vec<Token> {
        self.collect()
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.ch else {
            return Token::new(TokenKind::Eof, "", Span::point(self.pos));
        };
        let peek = self.peek_char();
        let peek_next = self.peek_next_char();

        // 短いトークンは種類と幅を決めて `emit` で消費する。
        // 長いトークンはサブレキサーから直接返す
        let (kind, width) = match ch {
            ';' => (TokenKind::Semicolon, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            '{' => (TokenKind::LBrace, 1),
            '}' => (TokenKind::RBrace, 1),
            '[' => (TokenKind::LBracket, 1),
            ']' => (TokenKind::RBracket, 1),
            ',' => (TokenKind::Comma, 1),
            ':' => (TokenKind::Colon, 1),

            '=' => match peek {
                Some('=') => (TokenKind::Eq, 2),
                Some('>') => (TokenKind::RArrow, 2),
                _ => (TokenKind::Assign, 1),
            },
            '!' => with_assign(peek, TokenKind::Bang, TokenKind::NotEq),
            '+' => with_assign(peek, TokenKind::Plus, TokenKind::PlusEq),
            '-' => with_assign(peek, TokenKind::Minus, TokenKind::MinusEq),
            '%' => with_assign(peek, TokenKind::Percent, TokenKind::PercentEq),
            '&' => with_assign(peek, TokenKind::Ampersand, TokenKind::AndEq),
            '|' => with_assign(peek, TokenKind::Pipe, TokenKind::OrEq),
            '^' => with_assign(peek, TokenKind::Hat, TokenKind::XorEq),
            '~' => with_assign(peek, TokenKind::Tilde, TokenKind::BinNotEq),
            '*' => match (peek, peek_next) {
                (Some('='), _) => (TokenKind::MulEq, 2),
                (Some('*'), Some('=')) => (TokenKind::PowEq, 3),
                (Some('*'), _) => (TokenKind::Pow, 2),
                _ => (TokenKind::Star, 1),
            },
            '/' => match (peek, peek_next) {
                (Some('='), _) => (TokenKind::DivEq, 2),
                (Some('/'), Some('=')) => (TokenKind::FDivEq, 3),
                (Some('/'), _) => (TokenKind::FDiv, 2),
                _ => (TokenKind::FSlash, 1),
            },
            '<' => match (peek, peek_next) {
                (Some('<'), Some('=')) => (TokenKind::LShiftEq, 3),
                (Some('<'), _) => (TokenKind::LShift, 2),
                (Some('='), _) => (TokenKind::LtEq, 2),
                _ => (TokenKind::Lt, 1),
            },
            '>' => match (peek, peek_next) {
                (Some('>'), Some('=')) => (TokenKind::RShiftEq, 3),
                (Some('>'), _) => (TokenKind::RShift, 2),
                (Some('='), _) => (TokenKind::GtEq, 2),
                _ => (TokenKind::Gt, 1),
            },
            '.' => match (peek, peek_next) {
                (Some('.'), Some('<')) => (TokenKind::NonIncRange, 3),
                (Some('.'), _) => (TokenKind::Range, 2),
                _ => (TokenKind::Dot, 1),
            },
            '#' => {
                if peek == Some('{') {
                    (TokenKind::StringInterp, 2)
                } else {
                    let token = self.emit(TokenKind::Hash, 1);
                    self.skip_line_comment();
                    return token;
                }
            }

            '`' => return self.read_exec_string(),
            '"' if peek == Some('"') && peek_next == Some('"') => return self.read_raw_string(),
            '"' => return self.read_escaped_string(),
            c if is_letter(c) => return self.read_identifier(),
            c if is_digit(c) => return self.read_number(),

            _ => (TokenKind::Illegal, 1),
        };

        self.emit(kind, width)
    }

    /// 現在の文字から `width` 文字をトークンとして消費
    fn emit(&mut self, kind: TokenKind, width: usize) -> Token {
        let start = self.pos;
        let mut text = String::with_capacity(width);
        for _ in 0..width {
            if let Some(c) = self.ch {
                text.push(c);
            }
            self.read_char();
        }
        Token::new(kind, text, Span::new(start, start + width - 1))
    }

    pub(super) fn read_char(&mut self) {
        self.prev_ch = self.ch;
        match self.input.get(self.read_pos) {
            Some(&c) => {
                self.ch = Some(c);
                self.pos = self.read_pos;
                self.read_pos += 1;
            }
            None => {
                self.ch = None;
                self.pos = self.input.len();
                self.read_pos = self.input.len();
            }
        }
    }

    pub(super) fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_pos).copied()
    }

    pub(super) fn peek_next_char(&self) -> Option<char> {
        self.input.get(self.read_pos + 1).copied()
    }

    /// リテラルの最後の文字の位置（終端では入力の最後の文字）
    pub(super) fn last_offset(&self) -> usize {
        match self.ch {
            Some(_) => self.pos,
            None => self.pos.saturating_sub(1),
        }
    }

    pub(super) fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_some_and(is_whitespace) {
            self.read_char();
        }
    }
}

fn with_assign(peek: Option<char>, plain: TokenKind, compound: TokenKind) -> (TokenKind, usize) {
    if peek == Some('=') {
        (compound, 2)
    } else {
        (plain, 1)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

/// デフォルトの表示名で `input` をトークン化
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input, DEFAULT_NAME).collect_tokens()
}

/// トークン列をフォーマット（デバッグ用、1行1トークン）
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
