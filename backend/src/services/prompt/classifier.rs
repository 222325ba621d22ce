//! Intent classifier
//!
//! Decides whether a message is small talk (greeting/question) or an actual
//! generation request, so the provider is only called for real work.
//!
//! Matching is substring membership on the lower-cased, trimmed message.
//! Greetings are checked first, then question words, then domain keywords;
//! the first list that matches wins. A message such as
//! "hi, can you write a script?" is therefore a greeting.

use super::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Question,
    /// Contains a domain keyword (script, video, ...)
    Request,
    /// Nothing matched
    General,
}

#[derive(Debug)]
pub struct KeywordSet {
    pub greetings: &'static [&'static str],
    pub questions: &'static [&'static str],
    pub domain: &'static [&'static str],
}

/// Email lists are shared by every language and have no domain keywords
pub static EMAIL_KEYWORDS: KeywordSet = KeywordSet {
    greetings: &["hi", "hello", "hey", "namaste", "hola", "bonjour", "ciao"],
    questions: &["what", "how", "why", "can", "could", "help", "?"],
    domain: &[],
};

static YOUTUBE_ENGLISH: KeywordSet = KeywordSet {
    greetings: &["hi", "hello", "hey", "hola", "bonjour", "ciao"],
    questions: &["what", "how", "why", "can", "could", "help", "?"],
    domain: &["script", "video", "youtube", "content"],
};

static YOUTUBE_HINDI: KeywordSet = KeywordSet {
    greetings: &["नमस्ते", "नमस्कार", "प्रणाम"],
    questions: &["क्या", "कैसे", "क्यों", "कब", "कहाँ", "मदद", "?"],
    domain: &["स्क्रिप्ट", "वीडियो", "यूट्यूब", "कंटेंट", "कॉन्टेंट"],
};

static YOUTUBE_HINGLISH: KeywordSet = KeywordSet {
    greetings: &["namaste", "namaskar", "pranaam", "hii", "hey", "hello"],
    questions: &["kya", "kaise", "kyun", "kab", "kahan", "help", "madad", "?"],
    domain: &["script", "video", "youtube", "content", "likhna", "banao"],
};

const HINGLISH_MARKERS: &[&str] = &["kya", "kaise", "kyun", "hai", "hain", "ko", "ka", "ki", "ke"];

/// YouTube keyword lists for a detected language
pub fn youtube_keywords(language: Language) -> &'static KeywordSet {
    match language {
        Language::Hindi => &YOUTUBE_HINDI,
        Language::Hinglish => &YOUTUBE_HINGLISH,
        _ => &YOUTUBE_ENGLISH,
    }
}

/// Detect the message language: Devanagari → Hindi, Hinglish marker
/// substrings → Hinglish, otherwise English.
pub fn detect_language(message: &str) -> Language {
    let msg = message.trim().to_lowercase();
    if msg.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c)) {
        Language::Hindi
    } else if HINGLISH_MARKERS.iter().any(|m| msg.contains(m)) {
        Language::Hinglish
    } else {
        Language::English
    }
}

pub fn classify(message: &str, keywords: &KeywordSet) -> Intent {
    let msg = message.trim().to_lowercase();
    let matches_any = |list: &[&str]| list.iter().any(|k| msg.contains(k));

    if matches_any(keywords.greetings) {
        Intent::Greeting
    } else if matches_any(keywords.questions) {
        Intent::Question
    } else if matches_any(keywords.domain) {
        Intent::Request
    } else {
        Intent::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_classification() {
        assert_eq!(classify("Hello!", &EMAIL_KEYWORDS), Intent::Greeting);
        assert_eq!(classify("  NAMASTE  ", &EMAIL_KEYWORDS), Intent::Greeting);
        assert_eq!(classify("What should I say?", &EMAIL_KEYWORDS), Intent::Question);
        assert_eq!(classify("Write a meeting invite", &EMAIL_KEYWORDS), Intent::General);
    }

    #[test]
    fn test_greeting_wins_over_question() {
        assert_eq!(classify("hi, can you write a script?", &YOUTUBE_ENGLISH), Intent::Greeting);
        assert_eq!(classify("how do I start a video?", &YOUTUBE_ENGLISH), Intent::Question);
    }

    #[test]
    fn test_youtube_domain_keywords() {
        assert_eq!(classify("a script about cats", &YOUTUBE_ENGLISH), Intent::Request);
        assert_eq!(classify("cats and dogs", &YOUTUBE_ENGLISH), Intent::General);
        assert_eq!(classify("बिल्लियों पर वीडियो", &YOUTUBE_HINDI), Intent::Request);
        assert_eq!(classify("namaste dosto", &YOUTUBE_HINGLISH), Intent::Greeting);
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("नमस्ते"), Language::Hindi);
        assert_eq!(detect_language("yeh kya hai"), Language::Hinglish);
        assert_eq!(detect_language("hi"), Language::English);
        assert_eq!(detect_language("a script about cats"), Language::English);
    }
}
