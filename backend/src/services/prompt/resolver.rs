//! Prompt resolver
//!
//! Turns a template plus form options into a fully resolved system prompt.
//! Unknown or blank option values degrade to defaults; rendering only fails
//! when a template carries a placeholder the resolver does not know, which
//! is a programming error surfaced as `TemplateError`.

use super::language::{EMAIL_LANGUAGES, Language, YOUTUBE_LANGUAGES};
use super::models::{ContentType, EmailOptions, YoutubeOptions, option_value};
use super::template::{PromptTemplate, TemplateError, TemplateKey, TemplateVars};

/// Intro/outro timestamp ranges of the generic YouTube template
pub fn duration_timestamps(duration: &str) -> (&'static str, &'static str) {
    match duration.trim().to_lowercase().as_str() {
        "short" => ("0:00-0:10", "0:50-1:00"),
        "long" => ("0:00-1:00", "Last 1 minute"),
        "extended" => ("0:00-1:30", "Last 1-2 minutes"),
        _ => ("0:00-0:30", "Last 30 seconds"),
    }
}

/// System prompt of the generic `/generate` endpoint
pub fn resolve_generic(
    content_type: Option<ContentType>,
    email: Option<&EmailOptions>,
    youtube: Option<&YoutubeOptions>,
) -> Result<String, TemplateError> {
    let key = TemplateKey::for_content_type(content_type);
    let vars = match content_type {
        Some(ContentType::Email) => generic_email_vars(email.cloned().unwrap_or_default()),
        Some(ContentType::Youtube) => generic_youtube_vars(youtube.cloned().unwrap_or_default()),
        None => TemplateVars::new(),
    };
    PromptTemplate::get(key).render(&vars)
}

fn generic_email_vars(options: EmailOptions) -> TemplateVars {
    TemplateVars::new()
        .set("style", option_value(&options.style).unwrap_or("Professional"))
        .set("purpose", option_value(&options.purpose).unwrap_or("Business"))
        .set("ageGroup", option_value(&options.age_group).unwrap_or("Adult"))
        .set("recipientName", option_value(&options.recipient_name).unwrap_or("Valued Recipient"))
        .set("context", option_value(&options.context).unwrap_or("Standard communication"))
}

fn generic_youtube_vars(options: YoutubeOptions) -> TemplateVars {
    let duration = option_value(&options.duration).unwrap_or("Medium");
    let (intro, outro) = duration_timestamps(duration);

    TemplateVars::new()
        .set("videoType", option_value(&options.video_type).unwrap_or("Tutorial"))
        .set("targetAudience", option_value(&options.target_audience).unwrap_or("General"))
        .set("contentStyle", option_value(&options.content_style).unwrap_or("Informative"))
        .set("duration", duration)
        .set("platform", option_value(&options.platform).unwrap_or("YouTube"))
        .set("toneStyle", option_value(&options.tone_style).unwrap_or("Casual"))
        .set("context", option_value(&options.context).unwrap_or(""))
        .set("introTime", intro)
        .set("outroTime", outro)
}

/// System prompt of `/generate-email`
pub fn resolve_email_writer(options: &EmailOptions, language: Language) -> Result<String, TemplateError> {
    let profile = EMAIL_LANGUAGES.get(language);
    let recipient_line = option_value(&options.recipient_name)
        .map(|name| format!("- Recipient Name: {}\n", name))
        .unwrap_or_default();
    let context_line = option_value(&options.context)
        .map(|context| format!("- Additional Context: {}\n", context))
        .unwrap_or_default();

    let vars = TemplateVars::new()
        .set("languageInstruction", profile.instruction)
        .set("writingStyle", profile.style)
        .set("style", option_value(&options.style).unwrap_or("Professional"))
        .set("purpose", option_value(&options.purpose).unwrap_or("General"))
        .set("ageGroup", option_value(&options.age_group).unwrap_or("Not specified"))
        .set("recipientLine", recipient_line)
        .set("contextLine", context_line)
        .set("analysisInstruction", profile.analysis);

    PromptTemplate::get(TemplateKey::EmailWriter).render(&vars)
}

/// System prompt of `/generate-youtube`
pub fn resolve_youtube_writer(options: &YoutubeOptions, language: Language) -> Result<String, TemplateError> {
    let profile = YOUTUBE_LANGUAGES.get(language);
    let duration = option_value(&options.duration).unwrap_or("medium");
    let hook_seconds = if duration.eq_ignore_ascii_case("short") { "10" } else { "30" };
    let context_line = option_value(&options.context)
        .map(|context| format!("- Additional Context: {}\n", context))
        .unwrap_or_default();

    let vars = TemplateVars::new()
        .set("languageInstruction", profile.instruction)
        .set("videoType", option_value(&options.video_type).unwrap_or("tutorial"))
        .set("targetAudience", option_value(&options.target_audience).unwrap_or("general"))
        .set("contentStyle", option_value(&options.content_style).unwrap_or("informative"))
        .set("duration", duration)
        .set("platform", option_value(&options.platform).unwrap_or("YouTube"))
        .set("toneStyle", option_value(&options.tone_style).unwrap_or("casual"))
        .set("contextLine", context_line)
        .set("titleNote", profile.title_note)
        .set("hookSeconds", hook_seconds)
        .set("descriptionNote", profile.description_note);

    PromptTemplate::get(TemplateKey::YoutubeWriter).render(&vars)
}
