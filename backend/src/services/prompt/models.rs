//! Content types and form options

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// High-level generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Email,
    Youtube,
}

impl ContentType {
    /// Parse a content-type key; anything unrecognized is `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "email" => Some(Self::Email),
            "youtube" => Some(Self::Youtube),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Youtube => "youtube",
        }
    }
}

/// Email form options. Every field is optional and has a documented default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailOptions {
    pub style: Option<String>,
    pub purpose: Option<String>,
    pub age_group: Option<String>,
    pub recipient_name: Option<String>,
    pub context: Option<String>,
    pub language: Option<String>,
}

/// YouTube form options. Every field is optional and has a documented default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeOptions {
    pub video_type: Option<String>,
    pub target_audience: Option<String>,
    pub content_style: Option<String>,
    pub duration: Option<String>,
    pub platform: Option<String>,
    pub tone_style: Option<String>,
    pub context: Option<String>,
    pub language: Option<String>,
}

/// Option value with blank strings treated as absent
pub(crate) fn option_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
