use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::TranslationError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language label (e.g. "Japanese")
    pub source_language: String,

    /// Target language label (e.g. "English")
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend selectable by name
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    #[default]
    #[serde(rename = "Google Translate")]
    GoogleTranslate,
    #[serde(rename = "DeepL")]
    DeepL,
    #[serde(rename = "Yandex")]
    Yandex,
    #[serde(rename = "Azure AI Translator")]
    AzureTranslator,
    #[serde(rename = "GPT-4o")]
    Gpt4o,
    #[serde(rename = "GPT-3.5")]
    Gpt35,
    #[serde(rename = "Claude-3-Opus")]
    Claude3Opus,
    #[serde(rename = "Claude-3.5-Sonnet")]
    Claude35Sonnet,
    #[serde(rename = "Claude-3-Haiku")]
    Claude3Haiku,
    #[serde(rename = "Gemini-1.5-Flash")]
    Gemini15Flash,
    #[serde(rename = "Gemini-1.5-Pro")]
    Gemini15Pro,
}

impl Backend {
    /// Every supported backend, classical services first
    pub const ALL: [Backend; 11] = [
        Self::GoogleTranslate,
        Self::DeepL,
        Self::Yandex,
        Self::AzureTranslator,
        Self::Gpt4o,
        Self::Gpt35,
        Self::Claude3Opus,
        Self::Claude35Sonnet,
        Self::Claude3Haiku,
        Self::Gemini15Flash,
        Self::Gemini15Pro,
    ];

    // @returns: Name as shown to the user and accepted on input
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GoogleTranslate => "Google Translate",
            Self::DeepL => "DeepL",
            Self::Yandex => "Yandex",
            Self::AzureTranslator => "Azure AI Translator",
            Self::Gpt4o => "GPT-4o",
            Self::Gpt35 => "GPT-3.5",
            Self::Claude3Opus => "Claude-3-Opus",
            Self::Claude35Sonnet => "Claude-3.5-Sonnet",
            Self::Claude3Haiku => "Claude-3-Haiku",
            Self::Gemini15Flash => "Gemini-1.5-Flash",
            Self::Gemini15Pro => "Gemini-1.5-Pro",
        }
    }

    // @returns: Service whose client handles this backend
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::GoogleTranslate => ProviderType::Google,
            Self::DeepL => ProviderType::DeepL,
            Self::Yandex => ProviderType::Yandex,
            Self::AzureTranslator => ProviderType::Azure,
            Self::Gpt4o | Self::Gpt35 => ProviderType::OpenAI,
            Self::Claude3Opus | Self::Claude35Sonnet | Self::Claude3Haiku => ProviderType::Anthropic,
            Self::Gemini15Flash | Self::Gemini15Pro => ProviderType::Gemini,
        }
    }

    /// Whether the backend is a chat model translating the whole page at once
    pub fn is_llm(&self) -> bool {
        self.provider_type().is_llm()
    }

    /// Model identifier sent to the LLM API, `None` for classical services
    pub fn model_id(&self) -> Option<&'static str> {
        match self {
            Self::Gpt4o => Some("gpt-4o"),
            Self::Gpt35 => Some("gpt-3.5-turbo"),
            Self::Claude3Opus => Some("claude-3-opus-20240229"),
            Self::Claude35Sonnet => Some("claude-3-5-sonnet-20240620"),
            Self::Claude3Haiku => Some("claude-3-haiku-20240307"),
            Self::Gemini15Flash => Some("gemini-1.5-flash-latest"),
            Self::Gemini15Pro => Some("gemini-1.5-pro-latest"),
            Self::GoogleTranslate | Self::DeepL | Self::Yandex | Self::AzureTranslator => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Backend {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|backend| backend.display_name() == name)
            .ok_or_else(|| TranslationError::UnsupportedBackend(s.to_string()))
    }
}

/// Remote service a client talks to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Google,
    DeepL,
    Yandex,
    Azure,
    OpenAI,
    Anthropic,
    Gemini,
}

impl ProviderType {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google",
            Self::DeepL => "DeepL",
            Self::Yandex => "Yandex",
            Self::Azure => "Azure",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::DeepL => "deepl".to_string(),
            Self::Yandex => "yandex".to_string(),
            Self::Azure => "azure".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Gemini => "gemini".to_string(),
        }
    }

    pub fn is_llm(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Anthropic | Self::Gemini)
    }

    /// Keyless services work without an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Google)
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl FromStr for ProviderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "deepl" => Ok(Self::DeepL),
            "yandex" => Ok(Self::Yandex),
            "azure" => Ok(Self::Azure),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: ProviderType,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL, empty for the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Azure resource region
    #[serde(default)]
    pub region: Option<String>,

    // @field: Timeout seconds, unset for the provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            region: None,
            timeout_secs: None,
        }
    }

    // @returns: Configured timeout, or 120s for chat models and 30s otherwise
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or_else(|| {
            if self.provider_type.is_llm() {
                default_llm_timeout_secs()
            } else {
                default_timeout_secs()
            }
        })
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Backend to route pages to
    #[serde(default)]
    pub backend: Backend,

    /// Send the page image to LLM backends alongside the text
    #[serde(default)]
    pub img_as_llm_input: bool,

    /// Free-text context about the comic prepended to LLM prompts
    #[serde(default)]
    pub extra_context: String,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_llm_timeout_secs() -> u64 {
    120
}

fn default_endpoint(provider_type: ProviderType) -> String {
    match provider_type {
        ProviderType::Google => "https://translate.googleapis.com".to_string(),
        // Chosen from the key type at client construction
        ProviderType::DeepL => String::new(),
        ProviderType::Yandex => "https://translate.yandex.net".to_string(),
        ProviderType::Azure => "https://api.cognitive.microsofttranslator.com/".to_string(),
        ProviderType::OpenAI => "https://api.openai.com/v1".to_string(),
        ProviderType::Anthropic => "https://api.anthropic.com".to_string(),
        ProviderType::Gemini => "https://generativelanguage.googleapis.com".to_string(),
    }
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::get_language_codes(&self.source_language, &self.target_language)?;

        let provider_type = self.translation.backend.provider_type();
        if provider_type.requires_api_key() && self.translation.get_api_key(provider_type).is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} backend",
                self.translation.backend
            ));
        }

        if provider_type == ProviderType::Azure && self.translation.get_region(provider_type).is_none() {
            return Err(anyhow!("Azure AI Translator requires a region"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "Japanese".to_string(),
            target_language: "English".to_string(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the configuration of the provider serving the active backend
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(self.backend.provider_type())
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: ProviderType) -> Option<&ProviderConfig> {
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_type)
    }

    /// Get the API key for a provider
    pub fn get_api_key(&self, provider_type: ProviderType) -> String {
        self.get_provider_config(provider_type)
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for a provider, falling back to its public API
    pub fn get_endpoint(&self, provider_type: ProviderType) -> String {
        if let Some(provider_config) = self.get_provider_config(provider_type) {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        default_endpoint(provider_type)
    }

    /// Get the region for a provider
    pub fn get_region(&self, provider_type: ProviderType) -> Option<String> {
        self.get_provider_config(provider_type)
            .and_then(|p| p.region.clone())
            .filter(|r| !r.is_empty())
    }

    /// Get the request timeout for a provider
    pub fn get_timeout_secs(&self, provider_type: ProviderType) -> u64 {
        self.get_provider_config(provider_type)
            .map(ProviderConfig::timeout_secs)
            .unwrap_or_else(|| ProviderConfig::new(provider_type).timeout_secs())
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            img_as_llm_input: false,
            extra_context: String::new(),
            available_providers: vec![ProviderConfig::new(ProviderType::Google)],
        }
    }
}
