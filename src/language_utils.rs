use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for backend language codes
///
/// This module maps the human-readable language labels offered to the user
/// onto the codes the translation backends expect, and answers the script
/// questions the router needs (word spacing, CJK source).
/// Labels with a code that differs from the plain ISO 639-1 lookup
const LABEL_CODES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Korean", "ko"),
    ("Japanese", "ja"),
    ("French", "fr"),
    ("Chinese (Simplified)", "zh-CN"),
    ("Chinese (Traditional)", "zh-TW"),
    ("Simplified Chinese", "zh-CN"),
    ("Traditional Chinese", "zh-TW"),
    ("Russian", "ru"),
    ("German", "de"),
    ("Dutch", "nl"),
    ("Spanish", "es"),
    ("Italian", "it"),
    ("Turkish", "tr"),
    ("Polish", "pl"),
    ("Portuguese", "pt"),
    ("Brazilian Portuguese", "pt-br"),
];

/// Codes whose page image is swapped for the inpainted one on vision models
const CJK_CODES: &[&str] = &["zh-CN", "zh-TW", "ja", "ko"];

/// Resolve a language label to its backend code
///
/// Known labels come from the fixed vocabulary; any other English language
/// name falls back to its ISO 639-1 code.
pub fn get_language_code(label: &str) -> Result<String> {
    let label = label.trim();

    if let Some((_, code)) = LABEL_CODES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
    {
        return Ok((*code).to_string());
    }

    Language::from_name(label)
        .and_then(|lang| lang.to_639_1())
        .map(|code| code.to_string())
        .ok_or_else(|| anyhow!("Unsupported language: {}", label))
}

/// Resolve the source and target labels of a request
pub fn get_language_codes(source_label: &str, target_label: &str) -> Result<(String, String)> {
    let source_code = get_language_code(source_label)?;
    let target_code = get_language_code(target_label)?;
    Ok((source_code, target_code))
}

/// Whether text in this language is written without spaces between words
pub fn uses_no_word_spacing(code: &str) -> bool {
    let code = code.to_lowercase();
    code.contains("zh") || code == "ja"
}

/// Whether the code is one of the CJK source languages
pub fn is_cjk(code: &str) -> bool {
    CJK_CODES.contains(&code)
}

/// Remove every whitespace character, including the ideographic space
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
