use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{http_client, join_endpoint, send_checked, MachineTranslator, Provider, TextRequest};

const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com";
const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com";

/// DeepL client
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
}

/// DeepL translation request
#[derive(Debug, Clone)]
pub struct DeepLRequest {
    pub text: String,
    /// Source language as DeepL expects it (e.g. `JA`)
    pub source_lang: String,
    /// Target language as DeepL expects it (e.g. `EN-US`)
    pub target_lang: String,
}

/// DeepL translation response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeepLResponse {
    pub translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeepLTranslation {
    #[serde(default)]
    pub detected_source_language: Option<String>,
    pub text: String,
}

/// Map the user's target choice to a DeepL target code
///
/// DeepL needs a regional variant for English and the bare `zh` code for
/// Simplified Chinese. Every other language keeps its resolved code. Labels
/// match the way language resolution does, trimmed and ignoring ASCII case.
pub fn deepl_target_code(target_language: &str, target_code: &str) -> String {
    let label = target_language.trim();
    if label.eq_ignore_ascii_case("Chinese (Simplified)") {
        "zh".to_string()
    } else if label.eq_ignore_ascii_case("English") {
        "EN-US".to_string()
    } else {
        target_code.to_string()
    }
}

/// DeepL source languages have no regional variants (`zh-CN` is sent as `ZH`)
pub fn deepl_source_code(source_code: &str) -> String {
    source_code
        .split('-')
        .next()
        .unwrap_or(source_code)
        .to_uppercase()
}

impl DeepL {
    /// Create a new DeepL client
    ///
    /// An empty endpoint selects the free or pro API from the key: free-plan
    /// keys end in `:fx`.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let mut endpoint = endpoint.into();
        if endpoint.is_empty() {
            endpoint = if api_key.ends_with(":fx") {
                DEEPL_FREE_ENDPOINT.to_string()
            } else {
                DEEPL_PRO_ENDPOINT.to_string()
            };
        }

        Self {
            client: http_client(Duration::from_secs(30)),
            api_key,
            endpoint,
        }
    }

    /// Replace the HTTP client with one using the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &DeepLRequest) -> Result<reqwest::Request, ProviderError> {
        let url = join_endpoint(&self.endpoint, "v2/translate")?;
        let http_request = self.client.post(url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[
                ("text", request.text.as_str()),
                ("source_lang", request.source_lang.as_str()),
                ("target_lang", request.target_lang.as_str()),
            ])
            .build()?;
        Ok(http_request)
    }
}

#[async_trait]
impl Provider for DeepL {
    type Request = DeepLRequest;
    type Response = DeepLResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "DeepL").await?;
        let body = response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse DeepL response: {}", e)))?;
        Ok(body)
    }

    fn extract_text(response: &Self::Response) -> String {
        response.translations.first()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MachineTranslator for DeepL {
    async fn translate(&self, request: TextRequest<'_>) -> Result<Option<String>, ProviderError> {
        let deepl_request = DeepLRequest {
            text: request.text.to_string(),
            source_lang: deepl_source_code(request.source_code),
            target_lang: deepl_target_code(request.target_language, request.target_code),
        };
        debug!("DeepL: {} -> {}", deepl_request.source_lang, deepl_request.target_lang);

        let response = self.complete(deepl_request).await?;
        let text = Self::extract_text(&response);
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}
