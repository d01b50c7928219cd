#[cfg(test)]
mod tests {
    use crate::tools::clean::*;

    #[test]
    fn test_clean_text_collapses_and_trims() {
        assert_eq!(clean_text("   Rose  Bouquet "), "Rose Bouquet");
        assert_eq!(clean_text("\n\t장미\r\n꽃다발\t"), "장미 꽃다발");
    }

    #[test]
    fn test_clean_text_strips_control_chars() {
        assert_eq!(clean_text("abc\x00\x1Bdef"), "abcdef");
        assert_eq!(clean_text("\u{200B}"), "");
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("12,000원"), Some(12000));
        assert_eq!(parse_digits("₩ 1 234"), Some(1234));
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("가격문의"), None);
        // Overflow is not a price.
        assert_eq!(parse_digits("99999999999999999999999"), None);
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("가나다라", 2), "가나");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
