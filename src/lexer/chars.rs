//! 文字クラス判定

use unicode_general_category::{get_general_category, GeneralCategory};

/// 識別子に使える文字（Unicodeの文字カテゴリL、`_`、`?`）
///
/// 数字的な文字（Nl）や結合文字（Mn/Mc）は含まない。
pub fn is_letter(ch: char) -> bool {
    if ch == '_' || ch == '?' {
        return true;
    }
    matches!(
        get_general_category(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// 数字（ASCII以外の数値文字も含む）
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit() || ch.is_numeric()
}

pub fn is_hex_char(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

pub fn is_octal_char(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

pub fn is_binary_char(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// トークン間で読み飛ばす空白文字
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// `\xHH` の2文字を1バイトに変換
pub fn hex_byte(hi: char, lo: char) -> Option<u8> {
    let hi = hi.to_digit(16)?;
    let lo = lo.to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert!(is_letter('a'));
        assert!(is_letter('Σ'));
        assert!(is_letter('क'));
        assert!(is_letter('ʰ'));
        assert!(is_letter('_'));
        assert!(is_letter('?'));
        assert!(!is_letter('1'));
        assert!(!is_letter('$'));
    }

    #[test]
    fn test_letter_numbers_and_marks_are_not_letters() {
        // ローマ数字（Nl）は数字側に分類される
        assert!(!is_letter('\u{216B}'));
        assert!(is_digit('\u{216B}'));
        // 結合文字（Mc/Mn）はどちらでもない
        assert!(!is_letter('\u{093E}'));
        assert!(!is_digit('\u{093E}'));
        assert!(!is_letter('\u{0301}'));
    }

    #[test]
    fn test_digits() {
        assert!(is_digit('7'));
        assert!(is_digit('٣'));
        assert!(!is_digit('_'));
        assert!(!is_digit('x'));
    }

    #[test]
    fn test_base_digits() {
        assert!(is_hex_char('F'));
        assert!(!is_hex_char('g'));
        assert!(is_octal_char('7'));
        assert!(!is_octal_char('8'));
        assert!(is_binary_char('1'));
        assert!(!is_binary_char('2'));
    }

    #[test]
    fn test_hex_byte() {
        assert_eq!(hex_byte('4', '1'), Some(0x41));
        assert_eq!(hex_byte('f', 'F'), Some(0xff));
        assert_eq!(hex_byte('z', '1'), None);
    }
}
