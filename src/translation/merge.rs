/*!
 * Keyed JSON exchange between text blocks and chat models.
 *
 * Blocks are sent as a JSON object `{"block_0": text, "block_1": text, ...}`
 * and the model is asked to return the same object with translated values.
 * The keys carry block identity, so the reply can be merged back in order.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::TranslationError;
use crate::text_block::TextBlock;

/// Greedy match from the first `{` to the last `}` across lines
static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{.*\}").expect("valid JSON object pattern")
});

/// Key identifying a block in the exchanged JSON
pub fn block_key(index: usize) -> String {
    format!("block_{}", index)
}

/// Serialize the texts of all blocks as a keyed JSON object
///
/// Non-ASCII text is kept as is and the object is indented by four spaces.
pub fn get_raw_text(blocks: &[TextBlock]) -> Result<String, TranslationError> {
    let map: Map<String, Value> = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| (block_key(index), Value::String(block.text.clone())))
        .collect();

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    Value::Object(map)
        .serialize(&mut serializer)
        .map_err(|e| TranslationError::Merge(format!("Failed to serialize blocks: {}", e)))?;
    String::from_utf8(out)
        .map_err(|e| TranslationError::Merge(format!("Serialized blocks are not UTF-8: {}", e)))
}

/// Find the JSON object in a model reply
///
/// Replies often wrap the object in code fences or add a sentence around it.
pub fn extract_json_object(response: &str) -> Result<Map<String, Value>, TranslationError> {
    let candidate = JSON_OBJECT
        .find(response)
        .ok_or_else(|| TranslationError::Merge("No JSON object found in response".to_string()))?;

    match serde_json::from_str::<Value>(candidate.as_str()) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(TranslationError::Merge(format!("Expected a JSON object, got {}", other))),
        Err(e) => Err(TranslationError::Merge(format!("Invalid JSON in response: {}", e))),
    }
}

/// Write the translations of a model reply onto the blocks
///
/// Blocks whose key is missing, or whose value is not a string, keep their
/// current translation. Returns the number of blocks updated.
pub fn set_texts_from_json(blocks: &mut [TextBlock], response: &str) -> Result<usize, TranslationError> {
    let translations = extract_json_object(response)?;
    let mut updated = 0;

    for (index, block) in blocks.iter_mut().enumerate() {
        let key = block_key(index);
        match translations.get(&key) {
            Some(Value::String(text)) => {
                block.translation = text.clone();
                updated += 1;
            }
            Some(other) => warn!("Ignoring non-text translation for {}: {}", key, other),
            None => warn!("{} is missing from the translated JSON", key),
        }
    }

    debug!("Merged {}/{} translations", updated, blocks.len());
    Ok(updated)
}
