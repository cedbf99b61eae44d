/*!
 * Provider implementations for the translation backends.
 *
 * This module contains client implementations for every supported service:
 * - Classical machine translation: Google, DeepL, Yandex, Azure
 * - Multimodal chat models: OpenAI, Anthropic, Gemini
 *
 * Every client implements the low-level `Provider` trait for its own wire
 * types, plus one of the two capabilities the router dispatches through:
 * `MachineTranslator` (one call per block) or `ChatTranslator` (one call per
 * page).
 */

use async_trait::async_trait;
use image::DynamicImage;
use log::warn;
use reqwest::Client;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::app_config::{Backend, ProviderType, TranslationConfig};
use crate::errors::ProviderError;

/// Sampling temperature for page translation on every chat model
pub const PAGE_TEMPERATURE: f32 = 1.0;
/// Response token cap for page translation on every chat model
pub const PAGE_MAX_TOKENS: u32 = 1000;

/// Common trait for all backend clients
///
/// This trait defines the wire-level interface that all provider
/// implementations follow.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text, empty when the response carries none
    fn extract_text(response: &Self::Response) -> String;
}

/// Text of one block sent to a classical backend
#[derive(Debug, Clone, Copy)]
pub struct TextRequest<'a> {
    /// Preprocessed block text
    pub text: &'a str,
    /// Resolved source language code
    pub source_code: &'a str,
    /// Resolved target language code
    pub target_code: &'a str,
    /// Target language label as chosen by the user
    pub target_language: &'a str,
}

/// Whole-page request sent to a chat model
#[derive(Debug, Clone, Copy)]
pub struct LlmRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    /// Page image, present only when it should be shown to the model
    pub image: Option<&'a DynamicImage>,
}

/// Classical machine translation, one block at a time
#[async_trait]
pub trait MachineTranslator: Send + Sync + Debug {
    /// Translate one block, `None` when the service returned nothing
    async fn translate(&self, request: TextRequest<'_>) -> Result<Option<String>, ProviderError>;
}

/// Chat model translating all blocks of a page in one call
#[async_trait]
pub trait ChatTranslator: Send + Sync + Debug {
    /// Return the raw model reply
    async fn translate(&self, request: LlmRequest<'_>) -> Result<String, ProviderError>;
}

/// Pre-configured clients handed to the router
///
/// Any slot may be empty; routing to a backend whose client is missing fails
/// before a request is made.
#[derive(Debug, Clone, Default)]
pub struct TranslatorClients {
    pub google: Option<Arc<dyn MachineTranslator>>,
    pub deepl: Option<Arc<dyn MachineTranslator>>,
    pub yandex: Option<Arc<dyn MachineTranslator>>,
    pub azure: Option<Arc<dyn MachineTranslator>>,
    pub openai: Option<Arc<dyn ChatTranslator>>,
    pub anthropic: Option<Arc<dyn ChatTranslator>>,
    pub gemini: Option<Arc<dyn ChatTranslator>>,
}

impl TranslatorClients {
    /// Build real clients for every provider present in the configuration
    ///
    /// Google needs no credentials and is always available.
    pub fn from_config(config: &TranslationConfig) -> Self {
        let timeout = |provider_type| Duration::from_secs(config.get_timeout_secs(provider_type));
        let mut clients = Self::default()
            .with_google(google::GoogleTranslate::new(config.get_endpoint(ProviderType::Google))
                .with_timeout(timeout(ProviderType::Google)));

        for provider in &config.available_providers {
            let provider_type = provider.provider_type;
            let api_key = provider.api_key.clone();
            let endpoint = config.get_endpoint(provider_type);
            let request_timeout = timeout(provider_type);

            clients = match provider_type {
                // Already configured above
                ProviderType::Google => clients,
                ProviderType::DeepL => clients
                    .with_deepl(deepl::DeepL::new(api_key, endpoint).with_timeout(request_timeout)),
                ProviderType::Yandex => clients
                    .with_yandex(yandex::Yandex::new(api_key, endpoint).with_timeout(request_timeout)),
                ProviderType::Azure => {
                    let region = provider.region.clone().unwrap_or_default();
                    clients.with_azure(azure::Azure::new(api_key, region, endpoint).with_timeout(request_timeout))
                }
                ProviderType::OpenAI => clients
                    .with_openai(openai::OpenAI::new(api_key, endpoint).with_timeout(request_timeout)),
                ProviderType::Anthropic => clients
                    .with_anthropic(anthropic::Anthropic::new(api_key, endpoint).with_timeout(request_timeout)),
                ProviderType::Gemini => clients
                    .with_gemini(gemini::Gemini::new(api_key, endpoint).with_timeout(request_timeout)),
            };
        }

        clients
    }

    pub fn with_google(mut self, client: impl MachineTranslator + 'static) -> Self {
        self.google = Some(Arc::new(client));
        self
    }

    pub fn with_deepl(mut self, client: impl MachineTranslator + 'static) -> Self {
        self.deepl = Some(Arc::new(client));
        self
    }

    pub fn with_yandex(mut self, client: impl MachineTranslator + 'static) -> Self {
        self.yandex = Some(Arc::new(client));
        self
    }

    pub fn with_azure(mut self, client: impl MachineTranslator + 'static) -> Self {
        self.azure = Some(Arc::new(client));
        self
    }

    pub fn with_openai(mut self, client: impl ChatTranslator + 'static) -> Self {
        self.openai = Some(Arc::new(client));
        self
    }

    pub fn with_anthropic(mut self, client: impl ChatTranslator + 'static) -> Self {
        self.anthropic = Some(Arc::new(client));
        self
    }

    pub fn with_gemini(mut self, client: impl ChatTranslator + 'static) -> Self {
        self.gemini = Some(Arc::new(client));
        self
    }

    /// Client serving a classical backend
    pub fn machine_translator(&self, backend: Backend) -> Option<&dyn MachineTranslator> {
        let slot = match backend.provider_type() {
            ProviderType::Google => &self.google,
            ProviderType::DeepL => &self.deepl,
            ProviderType::Yandex => &self.yandex,
            ProviderType::Azure => &self.azure,
            ProviderType::OpenAI | ProviderType::Anthropic | ProviderType::Gemini => return None,
        };
        slot.as_deref()
    }

    /// Client serving an LLM backend
    pub fn chat_translator(&self, backend: Backend) -> Option<&dyn ChatTranslator> {
        let slot = match backend.provider_type() {
            ProviderType::OpenAI => &self.openai,
            ProviderType::Anthropic => &self.anthropic,
            ProviderType::Gemini => &self.gemini,
            ProviderType::Google | ProviderType::DeepL | ProviderType::Yandex | ProviderType::Azure => return None,
        };
        slot.as_deref()
    }
}

/// HTTP client with the given request timeout
///
/// Falls back to a default client, which has no timeout, when the TLS backend
/// cannot be initialized.
pub(crate) fn http_client(timeout: Duration) -> Client {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build HTTP client with a {:?} timeout, using defaults: {}", timeout, e);
            Client::new()
        }
    }
}

/// Append a path to a service endpoint
pub(crate) fn join_endpoint(endpoint: &str, path: &str) -> Result<Url, ProviderError> {
    let joined = format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined)
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", endpoint, e)))
}

/// Send a built request and turn non-success statuses into errors
pub(crate) async fn send_checked(
    client: &Client,
    request: reqwest::Request,
    service: &str,
) -> Result<reqwest::Response, ProviderError> {
    let response = client.execute(request).await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        log::error!("{} API error ({}): {}", service, status, error_text);
        return Err(ProviderError::from_status(status, error_text));
    }

    Ok(response)
}

pub mod anthropic;
pub mod azure;
pub mod deepl;
pub mod gemini;
pub mod google;
pub mod mock;
pub mod openai;
pub mod yandex;
