/*!
 * Page translation through machine translation services and chat models.
 *
 * It is split into several submodules:
 *
 * - `core`: The router dispatching a page to its backend
 * - `merge`: Keyed JSON exchange between blocks and chat models
 * - `prompts`: Prompt templates for chat models
 */

// Re-export main types for easier usage
pub use self::core::{TranslationRequest, TranslationRouter};
pub use self::merge::{get_raw_text, set_texts_from_json};

// Re-export prompt types
pub use self::prompts::PromptTemplate;

// Submodules
pub mod core;
pub mod merge;
pub mod prompts;
