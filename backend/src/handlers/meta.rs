use axum::{
    Json,
    extract::{Path, Query},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::services::prompt::{ContentType, EMAIL_LANGUAGES, Language, YOUTUBE_LANGUAGES};
use crate::utils::{ApiError, ApiResult};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DefaultPromptQuery {
    /// Form language, e.g. "hindi"; unknown or absent means English
    pub language: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DefaultPromptResponse {
    pub default_prompt: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Sample prompt shown in the form for a content type and language
#[utoipa::path(
    get,
    path = "/default-prompt/{content_type}",
    params(
        ("content_type" = String, Path, description = "email or youtube"),
        DefaultPromptQuery,
    ),
    responses(
        (status = 200, description = "Sample prompt", body = DefaultPromptResponse),
        (status = 400, description = "Unknown content type", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Prompt"
)]
pub async fn default_prompt(
    Path(content_type): Path<String>,
    Query(query): Query<DefaultPromptQuery>,
) -> ApiResult<Json<DefaultPromptResponse>> {
    let content_type = ContentType::from_key(&content_type)
        .ok_or_else(|| ApiError::invalid_request(format!("unknown content type '{}'", content_type)))?;
    let language = Language::resolve(query.language.as_deref());

    let default_prompt = match content_type {
        ContentType::Email => EMAIL_LANGUAGES.get(language).default_prompt,
        ContentType::Youtube => YOUTUBE_LANGUAGES.get(language).default_prompt,
    };

    Ok(Json(DefaultPromptResponse { default_prompt: default_prompt.to_string() }))
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "System"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}
