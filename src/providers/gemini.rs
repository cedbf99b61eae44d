use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::image_utils::{to_inline_data, InlineData};
use crate::providers::{
    http_client, join_endpoint, send_checked, ChatTranslator, LlmRequest, Provider, PAGE_MAX_TOKENS,
    PAGE_TEMPERATURE,
};

/// Harm categories whose filters are turned off for page translation
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini client for the generateContent API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
}

/// generateContent request
///
/// The model is part of the URL, so it is kept out of the body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    #[serde(skip)]
    model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,

    /// Chat history followed by the new user turn
    contents: Vec<GeminiContent>,

    generation_config: GenerationConfig,

    safety_settings: Vec<SafetySetting>,
}

/// A turn of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<GeminiPart>,
}

/// A part of a turn, text or inline image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

/// Sampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: PAGE_TEMPERATURE,
            top_p: 0.95,
            top_k: 0,
            max_output_tokens: PAGE_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

/// generateContent response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiRequest {
    /// Start a chat with the given system instruction and history
    pub fn start_chat(
        model: impl Into<String>,
        system_instruction: impl Into<String>,
        history: Vec<GeminiContent>,
    ) -> Self {
        Self {
            model: model.into(),
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart::Text { text: system_instruction.into() }],
            }),
            contents: history,
            generation_config: GenerationConfig::default(),
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: "BLOCK_NONE".to_string(),
                })
                .collect(),
        }
    }

    /// Append the user turn to send
    pub fn send_message(mut self, parts: Vec<GeminiPart>) -> Self {
        self.contents.push(GeminiContent {
            role: Some("user".to_string()),
            parts,
        });
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(120)),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Replace the HTTP client with one using the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    /// Shape a page translation as a fresh chat with one message
    ///
    /// The image, when present, comes before the prompt.
    pub fn page_request(request: &LlmRequest<'_>) -> Result<GeminiRequest, ProviderError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = request.image {
            parts.push(GeminiPart::InlineData { inline_data: to_inline_data(image)? });
        }
        parts.push(GeminiPart::Text { text: request.user_prompt.to_string() });

        Ok(GeminiRequest::start_chat(request.model, request.system_prompt, Vec::new())
            .send_message(parts))
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &GeminiRequest) -> Result<reqwest::Request, ProviderError> {
        let path = format!("v1beta/models/{}:generateContent", request.model);
        let url = join_endpoint(&self.endpoint, &path)?;
        let http_request = self.client.post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .build()?;
        Ok(http_request)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "Gemini").await?;
        let body = response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Gemini response: {}", e)))?;
        Ok(body)
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response: &Self::Response) -> String {
        response.candidates.first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content.parts.iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatTranslator for Gemini {
    async fn translate(&self, request: LlmRequest<'_>) -> Result<String, ProviderError> {
        let chat = Self::page_request(&request)?;
        debug!("Gemini: sending page to {}", chat.model());
        let response = self.complete(chat).await?;

        let Some(candidate) = response.candidates.first() else {
            return Err(ProviderError::ParseError(format!(
                "Gemini returned no candidates (feedback: {})",
                response.prompt_feedback.map(|f| f.to_string()).unwrap_or_default()
            )));
        };
        if candidate.content.is_none() {
            return Err(ProviderError::ParseError(format!(
                "Gemini candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(Self::extract_text(&response))
    }
}
