/*!
 * Core translation routing.
 *
 * This module contains the `TranslationRouter`, which takes the text blocks
 * of one comic page and fills in their translations using the selected
 * backend. Classical services are called once per block; chat models are
 * called once for the whole page with the blocks exchanged as keyed JSON.
 */

use image::DynamicImage;
use log::{debug, info};

use crate::app_config::{Backend, ProviderType, TranslationConfig};
use crate::errors::TranslationError;
use crate::image_utils::select_llm_image;
use crate::language_utils::{get_language_codes, strip_whitespace, uses_no_word_spacing};
use crate::providers::{LlmRequest, TextRequest, TranslatorClients};
use crate::text_block::TextBlock;

use super::merge::{get_raw_text, set_texts_from_json};
use super::prompts::{build_system_prompt, build_user_prompt};

/// OpenAI model that cannot take image input
const TEXT_ONLY_GPT_MODEL: &str = "gpt-3.5-turbo";

/// One page translation job
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    /// Backend to route through
    pub backend: Backend,
    /// Source language label, e.g. "Japanese"
    pub source_language: &'a str,
    /// Target language label, e.g. "English"
    pub target_language: &'a str,
    /// The page as drawn
    pub image: &'a DynamicImage,
    /// The page with the original text removed
    pub inpainted_image: &'a DynamicImage,
    /// Free-form context about the comic, prepended to the user prompt
    pub extra_context: &'a str,
}

impl<'a> TranslationRequest<'a> {
    /// Create a request without extra context
    ///
    /// The inpainted image defaults to the page itself.
    pub fn new(
        backend: Backend,
        source_language: &'a str,
        target_language: &'a str,
        image: &'a DynamicImage,
    ) -> Self {
        Self {
            backend,
            source_language,
            target_language,
            image,
            inpainted_image: image,
            extra_context: "",
        }
    }

    pub fn with_inpainted_image(mut self, inpainted_image: &'a DynamicImage) -> Self {
        self.inpainted_image = inpainted_image;
        self
    }

    pub fn with_extra_context(mut self, extra_context: &'a str) -> Self {
        self.extra_context = extra_context;
        self
    }
}

/// Routes page translations to the configured backend clients
#[derive(Debug, Clone)]
pub struct TranslationRouter {
    /// Pre-configured backend clients
    clients: TranslatorClients,
    /// Whether vision models are shown the page image
    img_as_llm_input: bool,
}

impl TranslationRouter {
    /// Create a router over the given clients
    pub fn new(clients: TranslatorClients, img_as_llm_input: bool) -> Self {
        Self {
            clients,
            img_as_llm_input,
        }
    }

    /// Create a router with real clients built from configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(TranslatorClients::from_config(config), config.img_as_llm_input)
    }

    pub fn img_as_llm_input(&self) -> bool {
        self.img_as_llm_input
    }

    /// Translate every block of a page in place
    ///
    /// On a classical backend an error stops the loop, and blocks translated
    /// before it keep their translations. On a chat model nothing is written
    /// unless the reply was received.
    pub async fn translate(
        &self,
        blocks: &mut [TextBlock],
        request: TranslationRequest<'_>,
    ) -> Result<(), TranslationError> {
        let (source_code, target_code) =
            get_language_codes(request.source_language, request.target_language)
                .map_err(|e| TranslationError::Language(e.to_string()))?;

        info!(
            "Translating {} blocks from {} to {} with {}",
            blocks.len(),
            request.source_language,
            request.target_language,
            request.backend
        );

        if request.backend.is_llm() {
            self.translate_page(blocks, &request, &source_code).await
        } else {
            self.translate_blocks(blocks, &request, &source_code, &target_code).await
        }
    }

    /// Classical backends: one call per block
    async fn translate_blocks(
        &self,
        blocks: &mut [TextBlock],
        request: &TranslationRequest<'_>,
        source_code: &str,
        target_code: &str,
    ) -> Result<(), TranslationError> {
        let translator = self
            .clients
            .machine_translator(request.backend)
            .ok_or(TranslationError::MissingClient(request.backend))?;
        let strip = uses_no_word_spacing(source_code);

        for (index, block) in blocks.iter_mut().enumerate() {
            let text = if strip {
                strip_whitespace(&block.text)
            } else {
                block.text.clone()
            };

            let result = translator
                .translate(TextRequest {
                    text: &text,
                    source_code,
                    target_code,
                    target_language: request.target_language,
                })
                .await?;

            match result {
                Some(translation) if !translation.is_empty() => block.translation = translation,
                _ => debug!("No translation returned for block {}", index),
            }
        }

        Ok(())
    }

    /// Chat models: one call for the whole page
    async fn translate_page(
        &self,
        blocks: &mut [TextBlock],
        request: &TranslationRequest<'_>,
        source_code: &str,
    ) -> Result<(), TranslationError> {
        let model = request
            .backend
            .model_id()
            .ok_or_else(|| TranslationError::UnsupportedBackend(request.backend.to_string()))?;
        let translator = self
            .clients
            .chat_translator(request.backend)
            .ok_or(TranslationError::MissingClient(request.backend))?;

        let system_prompt = build_system_prompt(request.source_language, request.target_language);
        let user_prompt = build_user_prompt(request.extra_context, &get_raw_text(blocks)?);
        let image = self.page_image(request, model, source_code);
        debug!("Sending page to {} ({}image)", model, if image.is_some() { "with " } else { "no " });

        let reply = translator
            .translate(LlmRequest {
                model,
                system_prompt: &system_prompt,
                user_prompt: &user_prompt,
                image,
            })
            .await?;

        let updated = set_texts_from_json(blocks, &reply)?;
        info!("{} returned {}/{} translations", request.backend, updated, blocks.len());
        Ok(())
    }

    /// Image to attach to a chat request, if any
    fn page_image<'a>(
        &self,
        request: &TranslationRequest<'a>,
        model: &str,
        source_code: &str,
    ) -> Option<&'a DynamicImage> {
        if !self.img_as_llm_input {
            return None;
        }

        match request.backend.provider_type() {
            ProviderType::OpenAI if model == TEXT_ONLY_GPT_MODEL => None,
            ProviderType::OpenAI => Some(request.image),
            _ => Some(select_llm_image(source_code, request.image, request.inpainted_image)),
        }
    }
}
