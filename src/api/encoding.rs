use once_cell::sync::Lazy;
use regex::Regex;

/// Ideographic punctuation, Hiragana, Katakana, full-width forms and CJK ideographs
static JAPANESE_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{3000}-\x{303f}\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{ff00}-\x{ff9f}\x{4e00}-\x{9faf}]")
        .expect("Japanese script pattern is valid")
});

/// Whether `text` contains any character in the Japanese script ranges
pub fn contains_japanese(text: &str) -> bool {
    JAPANESE_SCRIPT.is_match(text)
}

/// Percent-encode a corporate name for the `name` query fragment.
///
/// Everything outside the RFC 3986 unreserved set (`A-Z a-z 0-9 - . _ ~`)
/// is escaped as uppercase UTF-8 octets, which also covers `! ' ( ) *`.
/// Encoded spaces are then written as `+`.
pub fn encode_name(name: &str) -> String {
    urlencoding::encode(name).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detects_japanese_scripts() {
        assert!(contains_japanese("テスト株式会社"));
        assert!(contains_japanese("ひらがな"));
        assert!(contains_japanese("国税庁"));
        assert!(contains_japanese("ＡＢＣ"));
        assert!(contains_japanese("ACME　Corp"));
        assert!(contains_japanese("Acme「Japan」"));
    }

    #[test]
    fn test_ignores_latin_text() {
        assert!(!contains_japanese("Toyota Motor Corporation"));
        assert!(!contains_japanese("A&B Co."));
        assert!(!contains_japanese(""));
        // Hangul is outside the ranges
        assert!(!contains_japanese("삼성전자"));
    }

    #[test]
    fn test_safe_ascii_is_untouched() {
        assert_eq!(encode_name("Acme123"), "Acme123");
        assert_eq!(encode_name("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_name(&encode_name("Acme123")), "Acme123");
    }

    #[test]
    fn test_escapes_reserved_and_sub_delims() {
        assert_eq!(encode_name("A&B Co."), "A%26B+Co.");
        assert_eq!(encode_name("!'()*"), "%21%27%28%29%2A");
        assert_eq!(encode_name("a=b/c?d"), "a%3Db%2Fc%3Fd");
        assert_eq!(encode_name("50%"), "50%25");
    }

    #[test]
    fn test_spaces_become_plus() {
        assert_eq!(encode_name("Sony Group Corporation"), "Sony+Group+Corporation");
        assert_eq!(encode_name("a+b"), "a%2Bb");
    }

    #[test]
    fn test_encodes_utf8_octets_uppercase() {
        assert_eq!(encode_name("テスト"), "%E3%83%86%E3%82%B9%E3%83%88");
        assert_eq!(encode_name("国税庁"), "%E5%9B%BD%E7%A8%8E%E5%BA%81");
    }

    #[test]
    fn test_is_deterministic() {
        let name = "株式会社 (テスト) *";
        assert_eq!(encode_name(name), encode_name(name));
        assert_eq!(
            encode_name(name),
            "%E6%A0%AA%E5%BC%8F%E4%BC%9A%E7%A4%BE+%28%E3%83%86%E3%82%B9%E3%83%88%29+%2A"
        );
    }
}
