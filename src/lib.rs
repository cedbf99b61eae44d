/*!
 * # panel-translate
 *
 * A Rust library for translating the text detected on comic pages.
 *
 * ## Features
 *
 * - Translate text blocks using classical machine translation:
 *   - Google Translate
 *   - DeepL
 *   - Yandex
 *   - Azure AI Translator
 * - Translate whole pages in one call using multimodal chat models:
 *   - OpenAI GPT
 *   - Anthropic Claude
 *   - Google Gemini
 * - Optionally show the page image to vision models, with the text painted
 *   out for CJK sources
 * - Human-readable language labels resolved to backend codes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and the backend catalogue
 * - `text_block`: The text regions being translated
 * - `translation`: Page translation:
 *   - `translation::core`: Routing a page to its backend
 *   - `translation::merge`: Keyed JSON exchange with chat models
 *   - `translation::prompts`: Prompt templates
 * - `language_utils`: Language label resolution
 * - `image_utils`: Page image encoding
 * - `providers`: Client implementations for every backend
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod image_utils;
pub mod language_utils;
pub mod providers;
pub mod text_block;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Backend, Config};
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::{get_language_code, get_language_codes};
pub use providers::TranslatorClients;
pub use text_block::TextBlock;
pub use translation::{TranslationRequest, TranslationRouter};
