//! Prompt construction: templates, language tables, canned replies,
//! intent classification and resolution.

pub mod classifier;
pub mod enhance;
pub mod language;
pub mod models;
pub mod resolver;
pub mod responses;
pub mod template;

pub use classifier::{EMAIL_KEYWORDS, Intent, KeywordSet, classify, detect_language, youtube_keywords};
pub use enhance::{clean_enhanced, enhance_request};
pub use language::{EMAIL_LANGUAGES, Language, YOUTUBE_LANGUAGES};
pub use models::{ContentType, EmailOptions, YoutubeOptions};
pub use resolver::{duration_timestamps, resolve_email_writer, resolve_generic, resolve_youtube_writer};
pub use responses::{ReplyKind, canned_reply};
pub use template::{PromptTemplate, TemplateError, TemplateKey, TemplateVars};
