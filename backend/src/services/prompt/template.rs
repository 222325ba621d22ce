//! Prompt template store
//!
//! Template bodies are embedded at compile time and loaded once into a
//! process-wide, read-only map. Placeholders use `{name}` syntax.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use super::models::ContentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    /// Generic endpoint templates
    Email,
    Youtube,
    Default,
    /// Language-aware templates of the dedicated endpoints
    EmailWriter,
    YoutubeWriter,
    /// Prompt enhancement
    EnhanceEmail,
    EnhanceVideo,
    EnhanceRequest,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 8] = [
        TemplateKey::Email,
        TemplateKey::Youtube,
        TemplateKey::Default,
        TemplateKey::EmailWriter,
        TemplateKey::YoutubeWriter,
        TemplateKey::EnhanceEmail,
        TemplateKey::EnhanceVideo,
        TemplateKey::EnhanceRequest,
    ];

    fn source(self) -> &'static str {
        match self {
            Self::Email => include_str!("templates/email.md"),
            Self::Youtube => include_str!("templates/youtube.md"),
            Self::Default => include_str!("templates/default.md"),
            Self::EmailWriter => include_str!("templates/email_writer.md"),
            Self::YoutubeWriter => include_str!("templates/youtube_writer.md"),
            Self::EnhanceEmail => include_str!("templates/enhance_email.md"),
            Self::EnhanceVideo => include_str!("templates/enhance_video.md"),
            Self::EnhanceRequest => include_str!("templates/enhance_request.md"),
        }
    }

    /// Template of the generic endpoint; unknown or absent types use `Default`
    pub fn for_content_type(content_type: Option<ContentType>) -> Self {
        match content_type {
            Some(ContentType::Email) => Self::Email,
            Some(ContentType::Youtube) => Self::Youtube,
            None => Self::Default,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template {template:?} has unresolved placeholders: {missing:?}")]
    Unresolved { template: TemplateKey, missing: Vec<String> },
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z][A-Za-z0-9_]*)\}").expect("placeholder regex is valid"));

static TEMPLATES: Lazy<HashMap<TemplateKey, PromptTemplate>> = Lazy::new(|| {
    TemplateKey::ALL
        .into_iter()
        .map(|key| (key, PromptTemplate { key, body: key.source().trim_end() }))
        .collect()
});

/// Immutable template text
#[derive(Debug)]
pub struct PromptTemplate {
    key: TemplateKey,
    body: &'static str,
}

impl PromptTemplate {
    pub fn get(key: TemplateKey) -> &'static PromptTemplate {
        &TEMPLATES[&key]
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> TemplateKey {
        self.key
    }

    pub fn body(&self) -> &'static str {
        self.body
    }

    /// Distinct placeholder names in order of first appearance
    #[cfg(test)]
    pub(crate) fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(self.body) {
            if let Some(name) = caps.get(1).map(|m| m.as_str())
                && !names.contains(&name)
            {
                names.push(name);
            }
        }
        names
    }

    /// Substitute every occurrence of every placeholder in a single pass.
    /// Values are not rescanned, so braces inside user input stay literal.
    pub fn render(&self, vars: &TemplateVars) -> Result<String, TemplateError> {
        let mut missing: Vec<String> = Vec::new();
        let rendered = PLACEHOLDER.replace_all(self.body, |caps: &Captures| {
            let name = &caps[1];
            match vars.get(name) {
                Some(value) => value.to_string(),
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    caps[0].to_string()
                },
            }
        });

        if missing.is_empty() {
            Ok(rendered.into_owned())
        } else {
            Err(TemplateError::Unresolved { template: self.key, missing })
        }
    }
}

/// Placeholder values for one render
#[derive(Debug, Default)]
pub struct TemplateVars {
    values: HashMap<&'static str, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_loaded() {
        for key in TemplateKey::ALL {
            let template = PromptTemplate::get(key);
            assert_eq!(template.key(), key);
            assert!(!template.body().is_empty(), "{:?} is empty", key);
        }
    }

    #[test]
    fn test_placeholders() {
        assert!(PromptTemplate::get(TemplateKey::Default).placeholders().is_empty());
        assert_eq!(
            PromptTemplate::get(TemplateKey::Email).placeholders(),
            vec!["style", "purpose", "ageGroup", "recipientName", "context"]
        );
        let youtube = PromptTemplate::get(TemplateKey::Youtube).placeholders();
        assert!(youtube.contains(&"introTime"));
        assert!(youtube.contains(&"outroTime"));
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let vars = TemplateVars::new()
            .set("style", "Breezy")
            .set("purpose", "Personal")
            .set("ageGroup", "Adult")
            .set("recipientName", "Asha")
            .set("context", "{not a placeholder}");
        let rendered = PromptTemplate::get(TemplateKey::Email).render(&vars).unwrap();

        assert_eq!(rendered.matches("Asha").count(), 3);
        assert_eq!(rendered.matches("Breezy").count(), 2);
        assert!(rendered.contains("Additional Context: {not a placeholder}"));
        assert!(!rendered.contains("{style}"));
    }

    #[test]
    fn test_render_reports_missing_placeholders() {
        let vars = TemplateVars::new().set("style", "Formal");
        let err = PromptTemplate::get(TemplateKey::Email).render(&vars).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Unresolved {
                template: TemplateKey::Email,
                missing: vec![
                    "purpose".to_string(),
                    "ageGroup".to_string(),
                    "recipientName".to_string(),
                    "context".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_for_content_type() {
        assert_eq!(TemplateKey::for_content_type(Some(ContentType::Email)), TemplateKey::Email);
        assert_eq!(TemplateKey::for_content_type(None), TemplateKey::Default);
    }
}
