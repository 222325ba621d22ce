//! LLM request/response types and the provider error taxonomy

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A single chat completion call: system prompt first, user message second.
/// `None` sampling parameters leave the provider defaults in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_message)],
            ..Default::default()
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[cfg(test)]
    pub(crate) fn system_prompt(&self) -> Option<&str> {
        self.messages.iter().find(|m| m.role == Role::System).map(|m| m.content.as_str())
    }
}

/// One unit of incremental model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub content: String,
}

impl StreamChunk {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LLMError>> + Send>>;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Provider rejected credentials (HTTP {status}): {message}")]
    AuthFailed { status: u16, message: String },

    #[error("Provider unavailable (HTTP {status}): {message}")]
    ProviderUnavailable { status: u16, message: String },

    #[error("Provider request timed out: {0}")]
    Timeout(String),

    #[error("Provider API error: {message}")]
    ApiError { status: Option<u16>, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Stream interrupted: {0}")]
    StreamError(String),

    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    #[error("Provider returned an empty completion")]
    EmptyCompletion,
}

impl LLMError {
    /// Map a non-success provider HTTP status into the error taxonomy
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let message = body.into();
        match status {
            429 => Self::RateLimited(message),
            401 | 403 => Self::AuthFailed { status, message },
            500.. => Self::ProviderUnavailable { status, message },
            _ => Self::ApiError { status: Some(status), message },
        }
    }
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
