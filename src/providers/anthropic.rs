use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::debug;

use crate::errors::ProviderError;
use crate::image_utils::{encode_png_base64, PNG_MIME_TYPE};
use crate::providers::{
    http_client, join_endpoint, send_checked, ChatTranslator, LlmRequest, Provider, PAGE_MAX_TOKENS,
    PAGE_TEMPERATURE,
};

/// Anthropic client for interacting with Anthropic API
#[derive(Debug)]
pub struct Anthropic {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

/// Anthropic message request
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<AnthropicMessage>,

    /// System prompt to guide the AI
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Anthropic message format
#[derive(Debug, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role of the message sender (user, assistant)
    pub role: String,

    /// Content blocks of the message
    pub content: Vec<MessageContent>,
}

/// Content block of a request message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    Image { source: ImageSource },
}

/// Inline image payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Always `base64`
    #[serde(rename = "type")]
    pub source_type: String,
    pub media_type: String,
    pub data: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: u32,
    /// Number of output tokens
    pub output_tokens: u32,
}

/// Anthropic response
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    /// The content of the response
    pub content: Vec<AnthropicContent>,
    /// Token usage information
    pub usage: TokenUsage,
}

/// Individual content block in an Anthropic response
#[derive(Debug, Deserialize)]
pub struct AnthropicContent {
    /// The type of content
    #[serde(rename = "type")]
    pub content_type: String,

    /// The actual text content
    #[serde(default)]
    pub text: String,
}

impl AnthropicRequest {
    /// Create a new Anthropic request
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            system: None,
            temperature: None,
            max_tokens,
        }
    }

    /// Add a text message to the request
    pub fn add_message(self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.add_content(role, vec![MessageContent::Text { text: content.into() }])
    }

    /// Add a message made of several content blocks
    pub fn add_content(mut self, role: impl Into<String>, content: Vec<MessageContent>) -> Self {
        self.messages.push(AnthropicMessage {
            role: role.into(),
            content,
        });
        self
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Anthropic {
    /// Create a new Anthropic client
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

    /// Shape a page translation as a messages request
    pub fn page_request(request: &LlmRequest<'_>) -> Result<AnthropicRequest, ProviderError> {
        let mut content = vec![MessageContent::Text { text: request.user_prompt.to_string() }];
        if let Some(image) = request.image {
            content.push(MessageContent::Image {
                source: ImageSource {
                    source_type: "base64".to_string(),
                    media_type: PNG_MIME_TYPE.to_string(),
                    data: encode_png_base64(image)?,
                },
            });
        }

        Ok(AnthropicRequest::new(request.model, PAGE_MAX_TOKENS)
            .system(request.system_prompt)
            .temperature(PAGE_TEMPERATURE)
            .add_content("user", content))
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &AnthropicRequest) -> Result<reqwest::Request, ProviderError> {
        let endpoint = if self.endpoint.is_empty() { "https://api.anthropic.com" } else { &self.endpoint };
        let url = join_endpoint(endpoint, "v1/messages")?;

        let http_request = self.client.post(url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(request)
            .build()?;
        Ok(http_request)
    }
}

#[async_trait]
impl Provider for Anthropic {
    type Request = AnthropicRequest;
    type Response = AnthropicResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "Anthropic").await?;

        let anthropic_response = response.json::<AnthropicResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Anthropic API response: {}", e)))?;
        debug!(
            "Anthropic usage: {} input / {} output tokens",
            anthropic_response.usage.input_tokens, anthropic_response.usage.output_tokens
        );

        Ok(anthropic_response)
    }

    /// Extract text from Anthropic response
    fn extract_text(response: &Self::Response) -> String {
        response.content.iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.clone())
            .collect()
    }
}

#[async_trait]
impl ChatTranslator for Anthropic {
    async fn translate(&self, request: LlmRequest<'_>) -> Result<String, ProviderError> {
        let messages = Self::page_request(&request)?;
        let response = self.complete(messages).await?;

        if !response.content.iter().any(|c| c.content_type == "text") {
            return Err(ProviderError::ParseError("Anthropic response has no text content".to_string()));
        }
        Ok(Self::extract_text(&response))
    }
}
