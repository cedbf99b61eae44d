/*!
 * Tests for language label resolution
 */

use panel_translate::language_utils::{
    get_language_code, get_language_codes, is_cjk, strip_whitespace, uses_no_word_spacing,
};

#[test]
fn test_get_language_code_withVocabularyLabels_shouldResolve() {
    assert_eq!(get_language_code("English").unwrap(), "en");
    assert_eq!(get_language_code("Japanese").unwrap(), "ja");
    assert_eq!(get_language_code("Chinese (Simplified)").unwrap(), "zh-CN");
    assert_eq!(get_language_code("Chinese (Traditional)").unwrap(), "zh-TW");
    assert_eq!(get_language_code("Brazilian Portuguese").unwrap(), "pt-br");
}

#[test]
fn test_get_language_code_shouldIgnoreCaseAndPadding() {
    assert_eq!(get_language_code("  korean ").unwrap(), "ko");
}

#[test]
fn test_get_language_code_withOtherLanguageName_shouldFallBackToIso() {
    assert_eq!(get_language_code("Vietnamese").unwrap(), "vi");
}

#[test]
fn test_get_language_code_withUnknownLabel_shouldFail() {
    assert!(get_language_code("Elvish Runes").is_err());
    assert!(get_language_code("").is_err());
}

#[test]
fn test_get_language_codes_shouldResolveBoth() {
    let (source, target) = get_language_codes("Korean", "French").unwrap();
    assert_eq!(source, "ko");
    assert_eq!(target, "fr");
}

#[test]
fn test_uses_no_word_spacing_shouldCoverChineseAndJapaneseOnly() {
    assert!(uses_no_word_spacing("ja"));
    assert!(uses_no_word_spacing("zh-CN"));
    assert!(uses_no_word_spacing("zh-TW"));
    assert!(!uses_no_word_spacing("ko"));
    assert!(!uses_no_word_spacing("en"));
}

#[test]
fn test_is_cjk_shouldIncludeKorean() {
    for code in ["zh-CN", "zh-TW", "ja", "ko"] {
        assert!(is_cjk(code), "{}", code);
    }
    assert!(!is_cjk("en"));
    assert!(!is_cjk("pt-br"));
}

#[test]
fn test_strip_whitespace_shouldRemoveIdeographicSpace() {
    assert_eq!(strip_whitespace("こんにちは\u{3000}世界"), "こんにちは世界");
    assert_eq!(strip_whitespace(" 你 好\n吗\t"), "你好吗");
}
