use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{http_client, join_endpoint, send_checked, MachineTranslator, Provider, TextRequest};

/// Google Translate client using the keyless web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
}

/// Google translation request
#[derive(Debug, Clone)]
pub struct GoogleRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, `auto` to let the service detect it
    pub source: String,
    /// Target language code
    pub target: String,
}

impl GoogleRequest {
    /// Create a request with source language detection
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: "auto".to_string(),
            target: target.into(),
        }
    }
}

impl GoogleTranslate {
    /// Create a new Google Translate client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(30)),
            endpoint: endpoint.into(),
        }
    }

    /// Replace the HTTP client with one using the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &GoogleRequest) -> Result<reqwest::Request, ProviderError> {
        let url = join_endpoint(&self.endpoint, "translate_a/single")?;
        let http_request = self.client.get(url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source.as_str()),
                ("tl", request.target.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .build()?;
        Ok(http_request)
    }

    /// Whether the response has the expected nested sentence array
    fn has_sentences(response: &Value) -> bool {
        response.get(0).map(Value::is_array).unwrap_or(false)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleRequest;
    type Response = Value;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "Google Translate").await?;
        let body = response.json::<Value>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Google Translate response: {}", e)))?;
        Ok(body)
    }

    /// Concatenate the translated segments found at `[0][i][0]`
    fn extract_text(response: &Self::Response) -> String {
        response.get(0)
            .and_then(Value::as_array)
            .map(|sentences| {
                sentences.iter()
                    .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslate {
    async fn translate(&self, request: TextRequest<'_>) -> Result<Option<String>, ProviderError> {
        if request.text.trim().is_empty() {
            return Ok(None);
        }

        debug!("Google Translate: {} chars to {}", request.text.chars().count(), request.target_code);
        let response = self.complete(GoogleRequest::new(request.text, request.target_code)).await?;

        if !Self::has_sentences(&response) {
            return Err(ProviderError::ParseError(format!(
                "Unexpected Google Translate response shape: {}", response
            )));
        }

        let text = Self::extract_text(&response);
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}
