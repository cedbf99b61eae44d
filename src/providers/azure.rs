use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{http_client, join_endpoint, send_checked, MachineTranslator, Provider, TextRequest};

/// Translator Text API version the client speaks
pub const AZURE_API_VERSION: &str = "3.0";

/// Azure AI Translator client
#[derive(Debug)]
pub struct Azure {
    /// HTTP client for API requests
    client: Client,
    /// Subscription key
    api_key: String,
    /// Region of the translator resource
    region: String,
    /// API endpoint URL
    endpoint: String,
}

/// Azure translation request
#[derive(Debug, Clone)]
pub struct AzureRequest {
    pub text: String,
    /// Source language code
    pub from: String,
    /// Target language code
    pub to: String,
}

/// Item of the request body array
#[derive(Debug, Serialize)]
struct AzureTextItem<'a> {
    text: &'a str,
}

/// One entry of the response array, matching one input text
#[derive(Debug, Serialize, Deserialize)]
pub struct AzureResponseItem {
    pub translations: Vec<AzureTranslation>,
}

/// Translation of an input text into one target language
#[derive(Debug, Serialize, Deserialize)]
pub struct AzureTranslation {
    pub text: String,
    #[serde(default)]
    pub to: Option<String>,
}

impl Azure {
    /// Create a new Azure client
    pub fn new(api_key: impl Into<String>, region: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(30)),
            api_key: api_key.into(),
            region: region.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Replace the HTTP client with one using the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    /// Build the HTTP request without sending it
    pub fn build_request(&self, request: &AzureRequest) -> Result<reqwest::Request, ProviderError> {
        let url = join_endpoint(&self.endpoint, "translate")?;
        let http_request = self.client.post(url)
            .query(&[
                ("api-version", AZURE_API_VERSION),
                ("from", request.from.as_str()),
                ("to", request.to.as_str()),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .header("Content-type", "application/json")
            .json(&[AzureTextItem { text: &request.text }])
            .build()?;
        Ok(http_request)
    }

    /// The `[0].translations[0].text` field of a response
    pub fn first_translation(response: &[AzureResponseItem]) -> Option<&str> {
        response.first()
            .and_then(|item| item.translations.first())
            .map(|translation| translation.text.as_str())
    }
}

#[async_trait]
impl Provider for Azure {
    type Request = AzureRequest;
    type Response = Vec<AzureResponseItem>;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let http_request = self.build_request(&request)?;
        let response = send_checked(&self.client, http_request, "Azure AI Translator").await?;
        let body = response.json::<Vec<AzureResponseItem>>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Azure response: {}", e)))?;
        Ok(body)
    }

    fn extract_text(response: &Self::Response) -> String {
        Self::first_translation(response).unwrap_or_default().to_string()
    }
}

#[async_trait]
impl MachineTranslator for Azure {
    async fn translate(&self, request: TextRequest<'_>) -> Result<Option<String>, ProviderError> {
        debug!("Azure: {} -> {}", request.source_code, request.target_code);
        let response = self.complete(AzureRequest {
            text: request.text.to_string(),
            from: request.source_code.to_string(),
            to: request.target_code.to_string(),
        }).await?;

        let text = Self::first_translation(&response)
            .ok_or_else(|| ProviderError::ParseError("Azure response has no translations".to_string()))?;
        Ok(Some(text.to_string()))
    }
}
