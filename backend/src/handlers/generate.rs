//! Generation endpoints
//!
//! Every successful response is a `text/event-stream` of
//! `data: {"content": ...}` fragments terminated by `data: [DONE]`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use serde::Deserialize;
use tracing::Instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, validate_request};
use crate::AppState;
use crate::services::llm::ChatRequest;
use crate::services::prompt::{
    ContentType, EMAIL_KEYWORDS, EmailOptions, Language, ReplyKind, YoutubeOptions, canned_reply,
    classify, detect_language, models::option_value, resolve_email_writer, resolve_generic,
    resolve_youtube_writer, youtube_keywords,
};
use crate::services::relay;
use crate::utils::{ApiError, ApiResult};

const WRITER_TEMPERATURE: f32 = 0.7;
const WRITER_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    pub email_options: Option<EmailOptions>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateYoutubeRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    /// `language` is mandatory
    pub youtube_options: Option<YoutubeOptions>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    /// "email" or "youtube"; anything else uses the generic assistant prompt
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub email_options: Option<EmailOptions>,
    pub youtube_options: Option<YoutubeOptions>,
}

fn generation_span(content_type: &str) -> tracing::Span {
    tracing::info_span!("generate", request_id = %Uuid::new_v4(), content_type)
}

/// Open the provider stream and relay it. A provider failure before the
/// first fragment becomes a JSON error response.
async fn stream_generation(state: &AppState, request: ChatRequest) -> ApiResult<Response> {
    let cancel = state.shutdown.child_token();
    let upstream = state.provider.stream_chat(request, cancel.clone()).await?;
    let upstream = relay::prime(upstream).await?;
    Ok(relay::sse_response(relay::relay(upstream, cancel)))
}

fn canned_response(content_type: ContentType, language: Language, kind: ReplyKind) -> Response {
    tracing::info!("Answering {:?} with a canned {:?} reply", kind, language);
    relay::sse_response(relay::canned(canned_reply(content_type, language, kind)))
}

/// Generate an email
#[utoipa::path(
    post,
    path = "/generate-email",
    request_body = GenerateEmailRequest,
    responses(
        (status = 200, description = "SSE stream of generated markdown", content_type = "text/event-stream", body = String),
        (status = 400, description = "Missing message or malformed body", body = crate::utils::error::ApiErrorResponse),
        (status = 500, description = "Provider or processing failure", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Generation"
)]
pub async fn generate_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateEmailRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload?;
    validate_request(&req)?;
    let GenerateEmailRequest { message, email_options } = req;

    let options = email_options.unwrap_or_default();
    let language = Language::resolve(option_value(&options.language));
    let intent = classify(&message, &EMAIL_KEYWORDS);

    async move {
        tracing::debug!("Classified email message as {:?}, language {:?}", intent, language);
        if let Some(kind) = ReplyKind::for_intent(intent) {
            return Ok(canned_response(ContentType::Email, language, kind));
        }

        let system = resolve_email_writer(&options, language).map_err(anyhow::Error::from)?;
        let request = ChatRequest::new(system, message)
            .temperature(WRITER_TEMPERATURE)
            .max_tokens(WRITER_MAX_TOKENS);
        stream_generation(&state, request).await
    }
    .instrument(generation_span("email"))
    .await
}

/// Generate a YouTube script
#[utoipa::path(
    post,
    path = "/generate-youtube",
    request_body = GenerateYoutubeRequest,
    responses(
        (status = 200, description = "SSE stream of generated markdown", content_type = "text/event-stream", body = String),
        (status = 400, description = "INVALID_REQUEST, MESSAGE_REQUIRED or LANGUAGE_REQUIRED", body = crate::utils::error::ApiErrorResponse),
        (status = 503, description = "NO_INTERNET or SLOW_CONNECTION", body = crate::utils::error::ApiErrorResponse),
        (status = 429, description = "Provider rate limit", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Generation"
)]
pub async fn generate_youtube(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateYoutubeRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload?;
    validate_request(&req)?;
    let GenerateYoutubeRequest { message, youtube_options } = req;

    let options = youtube_options.unwrap_or_default();
    let declared = option_value(&options.language).ok_or(ApiError::LanguageRequired)?;
    let language = Language::resolve(Some(declared));

    async move {
        state.connectivity.check().await?;

        let detected = detect_language(&message);
        let intent = classify(&message, youtube_keywords(detected));
        tracing::debug!("Classified youtube message as {:?}, detected {:?}", intent, detected);
        if let Some(kind) = ReplyKind::for_intent(intent) {
            return Ok(canned_response(ContentType::Youtube, detected, kind));
        }

        // Scripts are written in the form language even when the message is in another one.
        let system = resolve_youtube_writer(&options, language).map_err(anyhow::Error::from)?;
        let request = ChatRequest::new(system, message)
            .temperature(WRITER_TEMPERATURE)
            .max_tokens(WRITER_MAX_TOKENS);
        stream_generation(&state, request).await
    }
    .instrument(generation_span("youtube"))
    .await
}

/// Generic generation with `{placeholder}` templates and provider defaults
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "SSE stream of generated markdown", content_type = "text/event-stream", body = String),
        (status = 400, description = "Missing message or malformed body", body = crate::utils::error::ApiErrorResponse),
        (status = 500, description = "Provider or processing failure", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Generation"
)]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload?;
    validate_request(&req)?;
    let GenerateRequest { message, content_type, email_options, youtube_options } = req;

    let content_type = content_type.as_deref().and_then(ContentType::from_key);
    let label = content_type.map(|c| c.as_str()).unwrap_or("default");

    async move {
        let system =
            resolve_generic(content_type, email_options.as_ref(), youtube_options.as_ref())
                .map_err(anyhow::Error::from)?;
        stream_generation(&state, ChatRequest::new(system, message)).await
    }
    .instrument(generation_span(label))
    .await
}
