use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::i18n::get_locale;
use crate::services::llm::LLMError;

/// API error with a stable machine-readable code.
///
/// The `Display` text is operator detail and only goes to the log; clients
/// receive the localized friendly message of the code.
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Message is required")]
    MessageRequired,

    #[error("Language is required")]
    LanguageRequired,

    // Connectivity errors (503)
    #[error("No internet connection: {0}")]
    NoInternet(String),

    #[error("Connection too slow: {0}")]
    SlowConnection(String),

    // Provider errors
    #[error("Provider rate limit: {0}")]
    RateLimited(String),

    #[error("Provider rejected credentials (HTTP {status})")]
    AuthFailed { status: u16 },

    #[error("Provider unavailable (HTTP {status})")]
    ProviderUnavailable { status: u16 },

    #[error("Provider timed out: {0}")]
    Timeout(String),

    #[error("Provider error (HTTP {status:?}): {message}")]
    ProviderApi { status: Option<u16>, message: String },

    #[error("Prompt enhancement failed: {0}")]
    EnhanceFailed(String),

    // Catch-all (500)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn enhance_failed(message: impl std::fmt::Display) -> Self {
        Self::EnhanceFailed(message.to_string())
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::MessageRequired => "MESSAGE_REQUIRED",
            Self::LanguageRequired => "LANGUAGE_REQUIRED",
            Self::NoInternet(_) => "NO_INTERNET",
            Self::SlowConnection(_) => "SLOW_CONNECTION",
            Self::RateLimited(_) => "RATE_LIMIT",
            Self::AuthFailed { .. } => "AUTH_ERROR",
            Self::ProviderUnavailable { .. } => "SERVER_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ProviderApi { .. } => "API_ERROR",
            Self::EnhanceFailed(_) => "ENHANCE_FAILED",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }

    /// HTTP status; provider statuses are echoed where they are known
    pub fn status_code(&self) -> StatusCode {
        let echo = |status: u16, fallback: StatusCode| {
            StatusCode::from_u16(status).unwrap_or(fallback)
        };

        match self {
            Self::InvalidRequest(_) | Self::MessageRequired | Self::LanguageRequired => {
                StatusCode::BAD_REQUEST
            },
            Self::NoInternet(_) | Self::SlowConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::AuthFailed { status } => echo(*status, StatusCode::UNAUTHORIZED),
            Self::ProviderUnavailable { status } => echo(*status, StatusCode::BAD_GATEWAY),
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::ProviderApi { status, .. } => status
                .map(|s| echo(s, StatusCode::INTERNAL_SERVER_ERROR))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::EnhanceFailed(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get localized friendly message based on current locale
    pub fn localized_message(&self) -> String {
        let locale = get_locale();
        match self {
            Self::InvalidRequest(_) => t!("error.invalid_request", locale = &locale),
            Self::MessageRequired => t!("error.message_required", locale = &locale),
            Self::LanguageRequired => t!("error.language_required", locale = &locale),
            Self::NoInternet(_) => t!("error.no_internet", locale = &locale),
            Self::SlowConnection(_) => t!("error.slow_connection", locale = &locale),
            Self::RateLimited(_) => t!("error.rate_limit", locale = &locale),
            Self::AuthFailed { .. } => t!("error.auth_error", locale = &locale),
            Self::ProviderUnavailable { .. } => t!("error.server_error", locale = &locale),
            Self::Timeout(_) => t!("error.timeout", locale = &locale),
            Self::ProviderApi { .. } => t!("error.api_error", locale = &locale),
            Self::EnhanceFailed(_) => t!("error.enhance_failed", locale = &locale),
            Self::Other(_) => t!("error.unknown", locale = &locale),
        }
        .to_string()
    }
}

/// Error body of every JSON failure response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Short, non-technical message in the request locale
    pub error: String,
    /// Stable machine-readable code, e.g. `LANGUAGE_REQUIRED`
    pub code: String,
    pub friendly: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::warn!(code = self.error_code(), "{}", self);
        }

        let body = ApiErrorResponse {
            error: self.localized_message(),
            code: self.error_code().to_string(),
            friendly: true,
        };

        (status, Json(body)).into_response()
    }
}

/// Malformed or non-JSON bodies
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_request(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::invalid_request(errors.to_string())
    }
}

impl From<LLMError> for ApiError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::RateLimited(message) => Self::RateLimited(message),
            LLMError::AuthFailed { status, .. } => Self::AuthFailed { status },
            LLMError::ProviderUnavailable { status, .. } => Self::ProviderUnavailable { status },
            LLMError::Timeout(message) => Self::Timeout(message),
            LLMError::ApiError { status, message } => Self::ProviderApi { status, message },
            other => Self::ProviderApi { status: None, message: other.to_string() },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
