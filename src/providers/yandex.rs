use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{http_client, join_endpoint, send_checked, MachineTranslator, Provider, TextRequest};

/// Yandex Translate client
#[derive(Debug)]
pub struct Yandex {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
}

/// Yandex translation request
#[derive(Debug, Clone)]
pub struct YandexRequest {
    pub text: String,
    /// Translation direction, either `{target}` or `{source}-{target}`
    pub lang: String,
}

/// Yandex translation response
#[derive(Debug, Serialize, Deserialize)]
pub struct YandexResponse {
    /// Status code echoed in the body
    pub code: u16,
    /// Detected direction
    #[serde(default)]
    pub lang: Option<String>,
    /// Translated texts
    #[serde(default)]
    pub text: Vec<String>,
}

impl YandexRequest {
    /// Request with source language detection
    pub fn auto_detect(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: target.into(),
        }
    }
}

impl Yandex {
    /// Create a new Yandex client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(30)),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Replace the HTTP client with one using the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &YandexRequest) -> Result<reqwest::Request, ProviderError> {
        let url = join_endpoint(&self.endpoint, "api/v1.5/tr.json/translate")?;
        let http_request = self.client.get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("lang", request.lang.as_str()),
                ("text", request.text.as_str()),
            ])
            .build()?;
        Ok(http_request)
    }
}

#[async_trait]
impl Provider for Yandex {
    type Request = YandexRequest;
    type Response = YandexResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "Yandex").await?;
        let body = response.json::<YandexResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Yandex response: {}", e)))?;

        if body.code != 200 {
            return Err(ProviderError::ApiError {
                status_code: body.code,
                message: "Yandex reported a failed translation".to_string(),
            });
        }

        Ok(body)
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.first().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl MachineTranslator for Yandex {
    async fn translate(&self, request: TextRequest<'_>) -> Result<Option<String>, ProviderError> {
        if request.text.trim().is_empty() {
            return Ok(None);
        }

        debug!("Yandex: {} chars to {}", request.text.chars().count(), request.target_code);
        let response = self.complete(YandexRequest::auto_detect(request.text, request.target_code)).await?;
        let text = Self::extract_text(&response);
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}
