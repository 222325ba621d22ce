//! Prompt enhancement: request construction and output cleanup

use once_cell::sync::Lazy;
use regex::Regex;

use super::template::{PromptTemplate, TemplateError, TemplateKey, TemplateVars};
use crate::services::llm::ChatRequest;

const ENHANCE_TEMPERATURE: f32 = 0.7;
const ENHANCE_MAX_TOKENS: u32 = 200;

static SURROUNDING_QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^["']|["']$"#).expect("quote regex is valid"));
static LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Subject|Title|Email|Content):.*").expect("label regex is valid")
});
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•]").expect("list marker regex is valid"));

/// Chat request asking the provider to enrich a short user prompt.
/// `kind` "email" selects the email enhancer; anything else the video one.
pub fn enhance_request(prompt: &str, kind: Option<&str>) -> Result<ChatRequest, TemplateError> {
    let system_key = match kind.map(str::trim) {
        Some(k) if k.eq_ignore_ascii_case("email") => TemplateKey::EnhanceEmail,
        _ => TemplateKey::EnhanceVideo,
    };
    let system = PromptTemplate::get(system_key).body();
    let user = PromptTemplate::get(TemplateKey::EnhanceRequest)
        .render(&TemplateVars::new().set("prompt", prompt.trim()))?;

    Ok(ChatRequest::new(system, user)
        .temperature(ENHANCE_TEMPERATURE)
        .max_tokens(ENHANCE_MAX_TOKENS))
}

/// Strip the decoration models tend to add around an enhanced prompt
pub fn clean_enhanced(text: &str) -> String {
    let text = text.trim();
    let text = SURROUNDING_QUOTE.replace_all(text, "");
    let text = LABEL_LINE.replace(&text, "");
    let text = LIST_MARKER.replace(&text, "");
    text.trim().to_string()
}
