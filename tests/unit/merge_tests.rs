/*!
 * Tests for the keyed JSON exchange with chat models
 */

use panel_translate::errors::TranslationError;
use panel_translate::translation::merge::{block_key, extract_json_object, get_raw_text, set_texts_from_json};
use serde_json::Value;

use crate::common;

#[test]
fn test_get_raw_text_shouldKeyBlocksByIndex() {
    let raw = get_raw_text(&common::blocks(&["こんにちは", "世界"])).unwrap();
    let parsed: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed[block_key(0)], "こんにちは");
    assert_eq!(parsed[block_key(1)], "世界");
    // Non-ASCII text is not escaped
    assert!(raw.contains("こんにちは"));
}

#[test]
fn test_get_raw_text_withNoBlocks_shouldBeEmptyObject() {
    assert_eq!(get_raw_text(&[]).unwrap(), "{}");
}

#[test]
fn test_merge_roundTrip_shouldAssignEveryBlockInOrder() {
    let texts: Vec<String> = (0..15).map(|i| format!("text {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let mut page = common::blocks(&refs);

    // Translate the exchanged JSON the way a model would
    let sent = extract_json_object(&get_raw_text(&page).unwrap()).unwrap();
    let reply: serde_json::Map<String, Value> = sent
        .into_iter()
        .map(|(key, value)| (key, Value::String(value.as_str().unwrap().to_uppercase())))
        .collect();

    let updated = set_texts_from_json(&mut page, &Value::Object(reply).to_string()).unwrap();

    assert_eq!(updated, 15);
    for (i, block) in page.iter().enumerate() {
        assert_eq!(block.translation, format!("TEXT {}", i));
    }
}

#[test]
fn test_set_texts_from_json_withChatterAroundObject_shouldMerge() {
    let mut page = common::blocks(&["안녕", "고마워"]);
    let reply = "Sure! Here is the translation:\n{\n  \"block_0\": \"Hi\",\n  \"block_1\": \"Thanks\"\n}\nLet me know if you need anything else.";

    assert_eq!(set_texts_from_json(&mut page, reply).unwrap(), 2);
    assert_eq!(page[0].translation, "Hi");
    assert_eq!(page[1].translation, "Thanks");
}

#[test]
fn test_set_texts_from_json_withExtraKeys_shouldIgnoreThem() {
    let mut page = common::blocks(&["a"]);
    let updated = set_texts_from_json(&mut page, r#"{"block_0": "A", "block_7": "?"}"#).unwrap();
    assert_eq!(updated, 1);
    assert_eq!(page[0].translation, "A");
}

#[test]
fn test_set_texts_from_json_withNonStringValue_shouldSkipBlock() {
    let mut page = common::blocks(&["a", "b"]);
    let updated = set_texts_from_json(&mut page, r#"{"block_0": null, "block_1": "B"}"#).unwrap();
    assert_eq!(updated, 1);
    assert!(page[0].translation.is_empty());
    assert_eq!(page[1].translation, "B");
}

#[test]
fn test_set_texts_from_json_withBrokenJson_shouldFailWithoutChanges() {
    let mut page = common::blocks(&["a"]);
    let result = set_texts_from_json(&mut page, "{\"block_0\": \"A\",");
    // No closing brace means no object at all
    assert!(matches!(result, Err(TranslationError::Merge(_))));

    let result = set_texts_from_json(&mut page, "{\"block_0\": A}");
    assert!(matches!(result, Err(TranslationError::Merge(_))));
    assert!(page[0].translation.is_empty());
}
