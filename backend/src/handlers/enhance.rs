use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{not_blank, validate_request};
use crate::AppState;
use crate::services::prompt::{clean_enhanced, enhance_request};
use crate::utils::{ApiError, ApiResult};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnhanceRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub prompt: String,
    /// "email" selects the email enhancer, anything else the video one
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_prompt: String,
}

/// Rewrite a short prompt into a more detailed one
#[utoipa::path(
    post,
    path = "/enhance",
    request_body = EnhanceRequest,
    responses(
        (status = 200, description = "Enhanced prompt", body = EnhanceResponse),
        (status = 400, description = "Missing prompt", body = crate::utils::error::ApiErrorResponse),
        (status = 500, description = "ENHANCE_FAILED", body = crate::utils::error::ApiErrorResponse),
    ),
    tag = "Prompt"
)]
pub async fn enhance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EnhanceRequest>, JsonRejection>,
) -> ApiResult<Json<EnhanceResponse>> {
    let Json(req) = payload?;
    validate_request(&req)?;

    let request = enhance_request(&req.prompt, req.content_type.as_deref())
        .map_err(ApiError::enhance_failed)?;
    let completion = state.provider.complete_chat(request).await.map_err(ApiError::enhance_failed)?;

    let enhanced_prompt = clean_enhanced(&completion);
    if enhanced_prompt.is_empty() {
        return Err(ApiError::enhance_failed("completion was empty after cleanup"));
    }

    tracing::debug!("Enhanced prompt from {} to {} chars", req.prompt.len(), enhanced_prompt.len());
    Ok(Json(EnhanceResponse { enhanced_prompt }))
}
