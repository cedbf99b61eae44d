/*!
 * Error types for the panel-translate library.
 *
 * This module contains custom error types for the backend clients, the
 * translation router and the command line application, using the thiserror
 * crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::app_config::Backend;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending the request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Rejected key or region
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The page image could not be encoded for the backend
    #[error("Image encoding error: {0}")]
    ImageEncoding(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and its body onto an error
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthenticationError(body),
            code => Self::ApiError { status_code: code, message: body },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while routing a page to a backend
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the backend API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Backend name outside the supported set
    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),

    /// Backend is known but no client was configured for it
    #[error("No client configured for backend {0}")]
    MissingClient(Backend),

    /// Language label could not be resolved to a code
    #[error("Language error: {0}")]
    Language(String),

    /// LLM response could not be merged back onto the blocks
    #[error("Merge error: {0}")]
    Merge(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or incomplete configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
