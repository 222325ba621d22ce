//! Internationalization utilities for the backend
//!
//! This module provides locale extraction from HTTP requests and
//! task-local storage for the current locale. The locale only selects the
//! language of friendly error messages; generated content follows the
//! language chosen in the form options.

use std::future::Future;

tokio::task_local! {
    static CURRENT_LOCALE: String;
}

/// Supported locales
pub const SUPPORTED_LOCALES: &[&str] = &["en", "hi"];
pub const DEFAULT_LOCALE: &str = "en";

/// Run `fut` with `locale` as the current locale
pub async fn with_locale<F: Future>(locale: String, fut: F) -> F::Output {
    CURRENT_LOCALE.scope(locale, fut).await
}

/// Get the current locale, falling back to the default outside a request scope
pub fn get_locale() -> String {
    CURRENT_LOCALE
        .try_with(|l| l.clone())
        .unwrap_or_else(|_| DEFAULT_LOCALE.to_string())
}

/// Normalize locale string to supported format
/// Accepts: "en", "en-US", "hi", "hi-IN", "hi_IN,en;q=0.8", etc.
fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().to_lowercase();

    // Extract primary language tag
    let primary = locale
        .split(['-', '_', ',', ';'])
        .next()
        .unwrap_or(DEFAULT_LOCALE);

    SUPPORTED_LOCALES
        .iter()
        .find(|supported| primary == **supported)
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> String {
    match header_value {
        Some(value) => normalize_locale(value),
        None => DEFAULT_LOCALE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("hi"), "hi");
        assert_eq!(normalize_locale("hi-IN,en;q=0.8"), "hi");
        assert_eq!(normalize_locale("hi_IN"), "hi");
        assert_eq!(normalize_locale("fr"), "en"); // Unsupported, fallback to default
        assert_eq!(normalize_locale(""), "en");
    }

    #[test]
    fn test_extract_locale_from_header() {
        assert_eq!(extract_locale_from_header(None), "en");
        assert_eq!(extract_locale_from_header(Some("hi-IN")), "hi");
    }

    #[tokio::test]
    async fn test_scoped_locale() {
        assert_eq!(get_locale(), "en");
        let inside = with_locale("hi".to_string(), async { get_locale() }).await;
        assert_eq!(inside, "hi");
        assert_eq!(get_locale(), "en");
    }
}
