//! キーワードテーブル

use indexmap::IndexMap;
use std::sync::OnceLock;

use super::token::TokenKind;

/// 予約語
const KEYWORDS: [(&str, TokenKind); 17] = [
    ("fun", TokenKind::Function),
    ("var", TokenKind::Var),
    ("val", TokenKind::Val),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("return", TokenKind::Return),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("const", TokenKind::Const),
    ("match", TokenKind::Match),
    ("null", TokenKind::Null),
    ("import", TokenKind::Import),
];

/// プロセス全体で共有するキーワードテーブル（初回使用時に構築）
pub fn keywords() -> &'static IndexMap<&'static str, TokenKind> {
    static TABLE: OnceLock<IndexMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// `ident` のキーワード種別を返す。キーワードでなければ `TokenKind::Ident`
pub fn lookup_ident(ident: &str) -> TokenKind {
    keywords().get(ident).copied().unwrap_or(TokenKind::Ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_resolves() {
        for (word, kind) in KEYWORDS {
            assert_eq!(lookup_ident(word), kind, "keyword {word}");
        }
        assert_eq!(keywords().len(), 17);
    }

    #[test]
    fn test_non_keywords_are_identifiers() {
        assert_eq!(lookup_ident("function"), TokenKind::Ident);
        assert_eq!(lookup_ident("notin"), TokenKind::Ident);
        assert_eq!(lookup_ident("If"), TokenKind::Ident);
        assert_eq!(lookup_ident(""), TokenKind::Ident);
    }

    #[test]
    fn test_table_is_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| lookup_ident("match")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), TokenKind::Match);
        }
    }
}
