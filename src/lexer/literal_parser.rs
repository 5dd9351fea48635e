//! 識別子・数値・文字列・コメントのサブレキサー

use thiserror::Error;

use super::chars::{
    hex_byte, is_binary_char, is_digit, is_hex_char, is_letter, is_octal_char,
};
use super::keywords::lookup_ident;
use super::lexer::Lexer;
use super::token::{Span, Token, TokenKind};

/// 16進2文字が続かない `\x` エスケープ
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed byte escape `\\x{text}`")]
pub struct EscapeError {
    pub text: String,
    pub span: Span,
}

impl Lexer {
    /// 識別子に数字は含まれない（`a1` は `a` と `1`）
    pub(super) fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while self.ch.is_some_and(is_letter) {
            self.read_char();
        }
        let text = self.slice(start, self.pos);
        let kind = lookup_ident(&text);
        Token::new(kind, text, Span::new(start, self.pos - 1))
    }

    pub(super) fn read_number(&mut self) -> Token {
        let start = self.pos;

        if self.ch == Some('0') {
            let radix: Option<(TokenKind, fn(char) -> bool)> = match self.peek_char() {
                Some('x') => Some((TokenKind::Hex, is_hex_char)),
                Some('o') => Some((TokenKind::Octal, is_octal_char)),
                Some('b') => Some((TokenKind::Binary, is_binary_char)),
                _ => None,
            };
            if let Some((kind, valid)) = radix {
                if self.peek_next_char().is_some_and(valid) {
                    // 接頭辞
                    self.read_char();
                    self.read_char();
                    self.eat_digits(valid);
                    return self.number_token(kind, start);
                }
            }
        }

        let mut is_float = false;
        loop {
            match self.ch {
                Some(c) if is_digit(c) => {}
                Some('_') if self.peek_char().is_some_and(is_digit) => {}
                // `1..2` は範囲なので、ドットが2つ続いたら数値を終える
                Some('.') if !is_float && self.peek_char() != Some('.') => is_float = true,
                _ => break,
            }
            self.read_char();
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        self.number_token(kind, start)
    }

    /// 指定した基数の数字を読む（`_` は数字の直前のみ許可）
    fn eat_digits(&mut self, valid: fn(char) -> bool) {
        while let Some(c) = self.ch {
            let separator = c == '_' && self.peek_char().is_some_and(valid);
            if !valid(c) && !separator {
                break;
            }
            self.read_char();
        }
    }

    fn number_token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.slice(start, self.pos), Span::new(start, self.pos - 1))
    }

    /// エスケープ付きの `"..."`。不正な `\x` エスケープは不正トークンになり、
    /// その直後から字句解析を再開する
    pub(super) fn read_escaped_string(&mut self) -> Token {
        let start = self.pos;
        let token = match self.scan_escaped() {
            Ok(text) => Token::new(TokenKind::String, text, Span::new(start, self.last_offset())),
            Err(err) => {
                log::debug!("{} at {}", err, err.span);
                self.malformed_escapes.push(err.span);
                Token::new(TokenKind::Illegal, err.text, err.span)
            }
        };
        self.read_char();
        token
    }

    fn scan_escaped(&mut self) -> Result<String, EscapeError> {
        let mut buf: Vec<u8> = Vec::new();
        loop {
            self.read_char();
            let ch = match self.ch {
                None | Some('"') => break,
                Some(c) => c,
            };
            if ch != '\\' {
                push_char(&mut buf, ch);
                continue;
            }

            match self.peek_char() {
                Some('"') => buf.push(b'"'),
                Some('n') => buf.push(b'\n'),
                Some('r') => buf.push(b'\r'),
                Some('t') => buf.push(b'\t'),
                Some('\\') => buf.push(b'\\'),
                Some('x') => {
                    self.read_char();
                    self.read_char();
                    let hi_pos = self.pos;
                    self.read_char();
                    if let (Some(hi), Some(lo)) = (self.prev_ch, self.ch) {
                        if let Some(byte) = hex_byte(hi, lo) {
                            buf.push(byte);
                            continue;
                        }
                    }
                    // 入力が尽きた場合も位置は最後の実在する文字に収める
                    let start = hi_pos.min(self.input.len().saturating_sub(1));
                    let end = if self.ch.is_some() { self.pos } else { start };
                    let text: String = [self.prev_ch, self.ch].into_iter().flatten().collect();
                    return Err(EscapeError {
                        text,
                        span: Span::new(start, end),
                    });
                }
                // 未知のエスケープはバックスラッシュごと捨てる
                _ => {}
            }
            self.read_char();
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// `"""..."""`（最初の `"""` までをそのままコピー）
    pub(super) fn read_raw_string(&mut self) -> Token {
        let start = self.pos;
        self.read_char();
        self.read_char();

        let mut text = String::new();
        loop {
            self.read_char();
            match self.ch {
                None => break,
                Some('"') if self.peek_char() == Some('"') && self.peek_next_char() == Some('"') => {
                    self.read_char();
                    self.read_char();
                    break;
                }
                Some(c) => text.push(c),
            }
        }

        let span = Span::new(start, self.last_offset());
        self.read_char();
        Token::new(TokenKind::RawString, text, span)
    }

    /// `` `...` ``（次のバッククォートまでをそのままコピー）
    pub(super) fn read_exec_string(&mut self) -> Token {
        let start = self.pos;
        let mut text = String::new();
        loop {
            self.read_char();
            match self.ch {
                None | Some('`') => break,
                Some(c) => text.push(c),
            }
        }

        let span = Span::new(start, self.last_offset());
        self.read_char();
        Token::new(TokenKind::ExecString, text, span)
    }

    /// 行末まで読み飛ばす（改行文字は残す）
    pub(super) fn skip_line_comment(&mut self) {
        while self.ch.is_some_and(|c| c != '\n') {
            self.read_char();
        }
    }
}

fn push_char(buf: &mut Vec<u8>, ch: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
}
