/*!
 * Tests for prompt construction
 */

use panel_translate::translation::prompts::{build_system_prompt, build_user_prompt, PromptTemplate};

#[test]
fn test_system_prompt_shouldNameBothLanguages() {
    let prompt = build_system_prompt("Chinese (Traditional)", "Spanish");
    assert!(prompt.contains("translates Chinese (Traditional) to Spanish"));
    assert!(prompt.contains("a Spanish speaker would understand"));
    assert!(prompt.contains("OCR"));
}

#[test]
fn test_custom_template_shouldRenderPlaceholders() {
    let template = PromptTemplate::new("{source_language}->{target_language}");
    assert_eq!(template.render("ja", "en"), "ja->en");
}

#[test]
fn test_user_prompt_withEmptyContext_shouldStartWithNewline() {
    let prompt = build_user_prompt("", "{}");
    assert_eq!(prompt, "\nMake the translation sound as natural as possible.\nTranslate this:\n{}");
}
