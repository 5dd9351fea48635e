//! ソース位置の診断表示
//!
//! `render` は `--spans` モードで使う3行の報告を生成する:
//!
//! ```text
//! <name>:<line>:<column> <message>
//!              <source line>
//!         ~~~~~^
//! ```
//!
//! ソース行はヘッダーの位置表示の直後から始まるよう字下げし、キャレットは
//! 報告する列の真下に置く。表示するのはスパンの終端を含む行だけ。

use std::ops::Range;

use crate::lexer::{Lexer, Span, Token};

const FILLER: &str = "~~~~~";

/// `input`（デコード済みの文字列）に対して `span` を表示する。
/// スパンが入力の外にある場合は空文字列を返す
pub fn render(input: &[char], name: &str, span: Span, message: &str) -> String {
    let Some((line_no, line_start, line)) = find_line(input, span.end) else {
        return String::new();
    };

    let column = span.start.saturating_sub(line_start) + 1;
    let location = format!("{name}:{line_no}:{column}");
    let pad = (location.chars().count() + 1).saturating_sub(FILLER.len());
    let source_line: String = line.iter().collect();

    format!(
        "{location} {message}\n{}{source_line}\n{}{FILLER}^\n",
        " ".repeat(pad + FILLER.len()),
        " ".repeat(pad + column - 1),
    )
}

/// 文字位置の行番号と列番号（1始まり）
pub fn line_col(input: &[char], offset: usize) -> Option<(usize, usize)> {
    let (line_no, line_start, _) = find_line(input, offset)?;
    Some((line_no, offset - line_start + 1))
}

/// `offset` を含む行を探す（改行文字はその行に含める）。
/// 行番号（1始まり）、行頭の位置、行の内容を返す
fn find_line(input: &[char], offset: usize) -> Option<(usize, usize, &[char])> {
    let mut line_start = 0;
    for (idx, line) in input.split(|&c| c == '\n').enumerate() {
        let terminator = line_start + line.len();
        if offset <= terminator {
            return Some((idx + 1, line_start, line));
        }
        line_start = terminator + 1;
    }
    None
}

/// 文字単位のスパンを `source` 内のバイト範囲に変換
pub fn byte_range(source: &str, span: Span) -> Range<usize> {
    let byte_at = |offset: usize| {
        source
            .char_indices()
            .nth(offset)
            .map_or(source.len(), |(idx, _)| idx)
    };
    let start = byte_at(span.start);
    let end = source
        .char_indices()
        .nth(span.end)
        .map_or(source.len(), |(idx, c)| idx + c.len_utf8());
    start..end.max(start)
}

/// 入力の終わりまで読み、すべての不正トークンを返す
pub fn illegal_tokens(lexer: &mut Lexer) -> Vec<Token> {
    lexer.by_ref().filter(Token::is_illegal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_render_first_column() {
        let out = render(&chars("$"), "<string>", Span::point(0), "bad");
        assert_eq!(
            out,
            "<string>:1:1 bad\n             $\n        ~~~~~^\n"
        );
    }

    #[test]
    fn test_render_uses_character_columns() {
        let input = chars("ΣΣ $");
        let out = render(&input, "f", Span::point(3), "");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "f:1:4 ");
        // 位置表示 "f:1:4" は5文字なので、行は6文字字下げされる
        assert_eq!(lines[1], "      ΣΣ $");
        assert_eq!(lines[2], "    ~~~~~^");
        assert_eq!(lines[2].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn test_render_span_past_input() {
        assert_eq!(render(&chars("ab"), "x", Span::point(10), "m"), "");
    }

    #[test]
    fn test_line_col() {
        let input = chars("ab\ncd\n\nx");
        assert_eq!(line_col(&input, 0), Some((1, 1)));
        assert_eq!(line_col(&input, 2), Some((1, 3)));
        assert_eq!(line_col(&input, 4), Some((2, 2)));
        assert_eq!(line_col(&input, 7), Some((4, 1)));
        assert_eq!(line_col(&input, 9), None);
    }

    #[test]
    fn test_byte_range() {
        let source = "é $";
        assert_eq!(byte_range(source, Span::point(2)), 3..4);
        assert_eq!(byte_range(source, Span::new(0, 0)), 0..2);
        assert_eq!(byte_range(source, Span::point(5)), 4..4);
    }

    #[test]
    fn test_illegal_tokens_collects_all() {
        let mut lexer = Lexer::new("$ a @ b $", "<string>");
        let illegal = illegal_tokens(&mut lexer);
        let texts: Vec<_> = illegal.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["$", "@", "$"]);
        assert!(lexer.next_token().is_eof());
    }
}
