/*!
 * Prompt construction for chat-model backends.
 *
 * This module provides:
 * - The system prompt template for comic page translation
 * - The user prompt wrapping extra context and the keyed block texts
 */

pub mod templates;

// Re-export main types
pub use templates::{build_system_prompt, build_user_prompt, PromptTemplate};
