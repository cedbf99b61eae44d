use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::image_utils::to_data_url;
use crate::providers::{
    http_client, join_endpoint, send_checked, ChatTranslator, LlmRequest, Provider, PAGE_MAX_TOKENS,
    PAGE_TEMPERATURE,
};

/// OpenAI client for the chat completions API
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL, including the version segment
    endpoint: String,
}

/// OpenAI chat completion request
#[derive(Debug, Serialize, Default)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat message with multimodal content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content parts of the message
    pub content: Vec<ContentPart>,
}

/// One part of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// `data:` URL or remote URL of the image
    pub url: String,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}

/// Assistant message of a choice
#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAIRequest {
    /// Create a new request for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a text-only message
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: vec![ContentPart::Text { text: content.into() }],
        });
        self
    }

    /// Add a message made of text followed by an image
    pub fn add_message_with_image(
        mut self,
        role: impl Into<String>,
        content: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: vec![
                ContentPart::Text { text: content.into() },
                ContentPart::ImageUrl { image_url: ImageUrl { url: image_url.into() } },
            ],
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the response token cap
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn messages(&self) -> &[OpenAIMessage] {
        &self.messages
    }
}

impl OpenAI {
    /// Create a new OpenAI client
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

    /// Shape a page translation as a chat completion request
    ///
    /// The image part is added only when the request carries an image.
    pub fn page_request(request: &LlmRequest<'_>) -> Result<OpenAIRequest, ProviderError> {
        let chat = OpenAIRequest::new(request.model)
            .add_message("system", request.system_prompt)
            .temperature(PAGE_TEMPERATURE)
            .max_tokens(PAGE_MAX_TOKENS);

        let chat = match request.image {
            Some(image) => chat.add_message_with_image("user", request.user_prompt, to_data_url(image)?),
            None => chat.add_message("user", request.user_prompt),
        };

        Ok(chat)
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &OpenAIRequest) -> Result<reqwest::Request, ProviderError> {
        let url = join_endpoint(&self.endpoint, "chat/completions")?;
        let http_request = self.client.post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .build()?;
        Ok(http_request)
    }
}

#[async_trait]
impl Provider for OpenAI {
    type Request = OpenAIRequest;
    type Response = OpenAIResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "OpenAI").await?;
        let body = response.json::<OpenAIResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e)))?;

        if let Some(usage) = &body.usage {
            debug!("OpenAI usage: {} prompt / {} completion tokens", usage.prompt_tokens, usage.completion_tokens);
        }

        Ok(body)
    }

    fn extract_text(response: &Self::Response) -> String {
        response.choices.first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatTranslator for OpenAI {
    async fn translate(&self, request: LlmRequest<'_>) -> Result<String, ProviderError> {
        let chat = Self::page_request(&request)?;
        let response = self.complete(chat).await?;

        response.choices.first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::ParseError("OpenAI response has no message content".to_string()))
    }
}
