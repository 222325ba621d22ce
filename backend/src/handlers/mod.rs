pub mod enhance;
pub mod generate;
pub mod meta;

use utoipa::OpenApi;
use validator::{Validate, ValidationError};

use crate::services::prompt::{ContentType, EmailOptions, YoutubeOptions};
use crate::utils::{ApiError, ApiResult, error::ApiErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        generate::generate_email,
        generate::generate_youtube,
        generate::generate,
        enhance::enhance,
        meta::default_prompt,
        meta::health,
    ),
    components(schemas(
        generate::GenerateEmailRequest,
        generate::GenerateYoutubeRequest,
        generate::GenerateRequest,
        enhance::EnhanceRequest,
        enhance::EnhanceResponse,
        meta::DefaultPromptResponse,
        meta::HealthResponse,
        EmailOptions,
        YoutubeOptions,
        ContentType,
        ApiErrorResponse,
    )),
    tags(
        (name = "Generation", description = "Streamed email and YouTube script generation"),
        (name = "Prompt", description = "Prompt helpers"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Rejects empty and whitespace-only text
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Run validator rules; a failing `message`/`prompt` field is MESSAGE_REQUIRED.
pub(crate) fn validate_request<T: Validate>(request: &T) -> ApiResult<()> {
    request.validate().map_err(|errors| {
        let text_missing = {
            let fields = errors.field_errors();
            fields.contains_key("message") || fields.contains_key("prompt")
        };
        if text_missing {
            ApiError::MessageRequired
        } else {
            ApiError::from(errors)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_error_responses_reference_error_schema() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let error_ref = "#/components/schemas/ApiErrorResponse";

        for (path, status) in [
            ("/generate-email", "400"),
            ("/generate-youtube", "503"),
            ("/generate", "500"),
            ("/enhance", "500"),
        ] {
            let schema = &doc["paths"][path]["post"]["responses"][status]["content"]["application/json"]["schema"];
            assert_eq!(schema["$ref"], error_ref, "{} {}", path, status);
        }
        let default_prompt = &doc["paths"]["/default-prompt/{content_type}"]["get"]["responses"]["400"];
        assert_eq!(default_prompt["content"]["application/json"]["schema"]["$ref"], error_ref);
        assert!(doc["components"]["schemas"]["ApiErrorResponse"].is_object());
    }
}
