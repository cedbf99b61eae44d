/*!
 * Mock backend clients for testing.
 *
 * This module provides mock clients that simulate different behaviors:
 * - `MockMachineTranslator::working()` - Always succeeds with a tagged translation
 * - `MockMachineTranslator::intermittent(n)` - Fails every nth call
 * - `MockChatTranslator::working()` - Echoes the page JSON with translated values
 * - `...::failing()` - Always fails with an error
 *
 * Every call is recorded, and clones share the record, so a test can hand a
 * clone to the router and inspect the calls afterwards.
 */

use async_trait::async_trait;
use image::DynamicImage;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{ChatTranslator, LlmRequest, MachineTranslator, TextRequest};
use crate::translation::merge::extract_json_object;

/// Behavior mode for the mock clients
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Returns no translation (an empty reply for chat models)
    Empty,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Block call seen by a `MockMachineTranslator`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedText {
    pub text: String,
    pub source_code: String,
    pub target_code: String,
    pub target_language: String,
}

/// Page call seen by a `MockChatTranslator`
#[derive(Debug, Clone)]
pub struct RecordedChat {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    /// Image shown to the model, if any
    pub image: Option<DynamicImage>,
}

fn simulated_failure(count: usize) -> ProviderError {
    ProviderError::ApiError {
        message: format!("Simulated provider failure (request #{})", count + 1),
        status_code: 500,
    }
}

fn should_fail(behavior: MockBehavior, count: usize) -> bool {
    match behavior {
        MockBehavior::Failing => true,
        MockBehavior::Intermittent { fail_every } => fail_every > 0 && count % fail_every == fail_every - 1,
        MockBehavior::Working | MockBehavior::Empty => false,
    }
}

/// Mock classical backend
#[derive(Debug, Clone)]
pub struct MockMachineTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Calls received so far
    calls: Arc<Mutex<Vec<RecordedText>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&RecordedText) -> String>,
}

impl MockMachineTranslator {
    /// Create a new mock client with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock that answers `[target_code] text`
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that never returns a translation
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&RecordedText) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedText> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MachineTranslator for MockMachineTranslator {
    async fn translate(&self, request: TextRequest<'_>) -> Result<Option<String>, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        let recorded = RecordedText {
            text: request.text.to_string(),
            source_code: request.source_code.to_string(),
            target_code: request.target_code.to_string(),
            target_language: request.target_language.to_string(),
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(recorded.clone());
        }

        if should_fail(self.behavior, count) {
            return Err(simulated_failure(count));
        }
        if self.behavior == MockBehavior::Empty {
            return Ok(None);
        }

        let text = match self.custom_response {
            Some(generator) => generator(&recorded),
            None => format!("[{}] {}", recorded.target_code, recorded.text),
        };
        Ok(Some(text))
    }
}

/// Mock chat model
#[derive(Debug, Clone)]
pub struct MockChatTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Calls received so far
    calls: Arc<Mutex<Vec<RecordedChat>>>,
    /// Fixed reply replacing the echoed JSON (optional)
    fixed_reply: Option<String>,
}

impl MockChatTranslator {
    /// Create a new mock chat model with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            fixed_reply: None,
        }
    }

    /// Create a working mock that prefixes every value with `[TRANSLATED] `
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock replying with an empty string
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Always answer with the given reply
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.fixed_reply = Some(reply.into());
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedChat> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Reply to a user prompt by translating the JSON object it carries
    ///
    /// The reply is wrapped in a code fence, as real models often do.
    pub fn echo_reply(user_prompt: &str) -> String {
        let translated = match extract_json_object(user_prompt) {
            Ok(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                    (key, Value::String(format!("[TRANSLATED] {}", text)))
                })
                .collect(),
            Err(_) => serde_json::Map::new(),
        };
        format!("```json\n{}\n```", Value::Object(translated))
    }
}

#[async_trait]
impl ChatTranslator for MockChatTranslator {
    async fn translate(&self, request: LlmRequest<'_>) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedChat {
                model: request.model.to_string(),
                system_prompt: request.system_prompt.to_string(),
                user_prompt: request.user_prompt.to_string(),
                image: request.image.cloned(),
            });
        }

        if should_fail(self.behavior, count) {
            return Err(simulated_failure(count));
        }
        if self.behavior == MockBehavior::Empty {
            return Ok(String::new());
        }

        Ok(match &self.fixed_reply {
            Some(reply) => reply.clone(),
            None => Self::echo_reply(request.user_prompt),
        })
    }
}
