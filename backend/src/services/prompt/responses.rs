//! Canned assistant replies for small talk
//!
//! Two-level lookup per content type: language → reply kind → text.
//! Languages without replies fall back to English.

use once_cell::sync::Lazy;

use super::classifier::Intent;
use super::language::{Language, LanguageTable};
use super::models::ContentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Greeting,
    Question,
}

impl ReplyKind {
    /// Intents answered without calling the provider
    pub fn for_intent(intent: Intent) -> Option<Self> {
        match intent {
            Intent::Greeting => Some(Self::Greeting),
            Intent::Question => Some(Self::Question),
            Intent::Request | Intent::General => None,
        }
    }
}

pub struct ReplySet {
    pub greeting: &'static str,
    pub question: &'static str,
}

impl ReplySet {
    fn get(&self, kind: ReplyKind) -> &'static str {
        match kind {
            ReplyKind::Greeting => self.greeting,
            ReplyKind::Question => self.question,
        }
    }
}

static EMAIL_REPLIES: Lazy<LanguageTable<ReplySet>> = Lazy::new(|| {
    LanguageTable::new(
        vec![
            (Language::English, ReplySet {
                greeting: r#"I notice you've sent a simple greeting. I'm your AI email assistant! I can help you with:

## Email Writing
1. "Write a professional email to schedule a team meeting"
2. "Send a thank you email to a client"
3. "Draft an email to request time off"

## General Questions
- Ask me how to write better emails
- Get help with email etiquette
- Learn about professional communication

Just tell me what you need help with!"#,
                question: r#"I'm here to help! I can assist you with:

## Email Writing Tasks
- Writing professional emails
- Crafting perfect subject lines
- Following email etiquette
- Using appropriate tone and style

## Language Support
- Write emails in multiple languages
- Get cultural context for international communication
- Translate email content

Just ask your question or describe what you need!"#,
            }),
            (Language::Hindi, ReplySet {
                greeting: r#"मैं आपका AI सहायक हूं! मैं आपकी इन चीज़ों में मदद कर सकता हूं:

## ईमेल लेखन
1. "टीम मीटिंग के लिए प्रोफेशनल ईमेल लिखें"
2. "क्लाइंट को धन्यवाद ईमेल भेजें"
3. "छुट्टी के लिए ईमेल ड्राफ्ट करें"

## सामान्य प्रश्न
- बेहतर ईमेल कैसे लिखें
- ईमेल एटिकेट के बारे में जानें
- प्रोफेशनल कम्युनिकेशन सीखें

बताइए आपको किस तरह की मदद चाहिए!"#,
                question: r#"मैं आपकी मदद के लिए हाज़िर हूं! मैं इन चीज़ों में मदद कर सकता हूं:

## ईमेल लेखन कार्य
- प्रोफेशनल ईमेल लिखना
- परफेक्ट सब्जेक्ट लाइन बनाना
- ईमेल एटिकेट का पालन करना
- उचित टोन और स्टाइल का उपयोग

बस अपना सवाल पूछिए या बताइए आपको क्या चाहिए!"#,
            }),
            (Language::Hinglish, ReplySet {
                greeting: r#"Main aapka AI assistant hun! Main aapki in cheezon mein help kar sakta hun:

## Email Writing
1. "Team meeting ke liye professional email likhein"
2. "Client ko thank you email bhejein"
3. "Leave ke liye email draft karein"

## General Questions
- Better emails kaise likhein
- Email etiquette ke bare mein janein
- Professional communication seekhein

Bas bataiye aapko kis type ki help chahiye!"#,
                question: r#"Main aapki help ke liye ready hun! Main in cheezon mein help kar sakta hun:

## Email Writing Tasks
- Professional emails likhna
- Perfect subject lines banana
- Email etiquette follow karna
- Sahi tone aur style use karna

Bas apna question puchiye ya bataiye aapko kya chahiye!"#,
            }),
        ],
        Language::English,
    )
});

static YOUTUBE_REPLIES: Lazy<LanguageTable<ReplySet>> = Lazy::new(|| {
    LanguageTable::new(
        vec![
            (Language::English, ReplySet {
                greeting: r#"Hi! I'm your YouTube script assistant. I can help you create amazing video content!

## What I Can Do
1. Write scripts for various video types:
   - Tutorials and How-tos
   - Reviews and Comparisons
   - Vlogs and Stories
   - Educational Content

## Script Features
- Engaging hooks and intros
- Clear section transitions
- Call-to-action suggestions
- SEO-optimized descriptions

Just tell me what type of video you want to create!"#,
                question: r#"I can help you with all aspects of YouTube script writing:

## Script Writing Help
- Creating engaging introductions
- Structuring your content
- Writing compelling calls-to-action
- Optimizing for different video lengths
- Crafting clickable titles

What would you like to know more about?"#,
            }),
            (Language::Hindi, ReplySet {
                greeting: r#"नमस्ते! मैं आपका YouTube स्क्रिप्ट असिस्टेंट हूं। मैं शानदार वीडियो कंटेंट बनाने में आपकी मदद कर सकता हूं!

## मैं क्या कर सकता हूं
1. विभिन्न प्रकार की वीडियो के लिए स्क्रिप्ट:
   - ट्यूटोरियल और हाउ-टू
   - रिव्यू और तुलना
   - व्लॉग और कहानियां
   - शैक्षिक कंटेंट

बताइए आप किस तरह की वीडियो बनाना चाहते हैं!"#,
                question: r#"मैं YouTube स्क्रिप्ट लेखन के सभी पहलुओं में आपकी मदद कर सकता हूं:

## स्क्रिप्ट लेखन सहायता
- आकर्षक परिचय लिखना
- कंटेंट स्ट्रक्चरिंग
- प्रभावशाली कॉल-टू-एक्शन

आप किस बारे में और जानना चाहेंगे?"#,
            }),
            (Language::Hinglish, ReplySet {
                greeting: r#"Hello! Main aapka YouTube script assistant hun. Main amazing video content create karne mein help kar sakta hun!

## Main Kya Kar Sakta Hun
1. Different types ki videos ke liye scripts:
   - Tutorials aur How-tos
   - Reviews aur Comparisons
   - Vlogs aur Stories
   - Educational Content

Batao aap kis type ki video banana chahte ho!"#,
                question: r#"Main YouTube script writing ke har aspect mein help kar sakta hun:

## Script Writing Help
- Engaging introductions create karna
- Content ko structure karna
- Calls-to-action likhna

Aap kiske bare mein aur janna chahenge?"#,
            }),
        ],
        Language::English,
    )
});

/// Canned reply for `content_type`, in `language` or English
pub fn canned_reply(content_type: ContentType, language: Language, kind: ReplyKind) -> &'static str {
    let table = match content_type {
        ContentType::Email => &*EMAIL_REPLIES,
        ContentType::Youtube => &*YOUTUBE_REPLIES,
    };
    table.get(language).get(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_kind_for_intent() {
        assert_eq!(ReplyKind::for_intent(Intent::Greeting), Some(ReplyKind::Greeting));
        assert_eq!(ReplyKind::for_intent(Intent::Question), Some(ReplyKind::Question));
        assert_eq!(ReplyKind::for_intent(Intent::Request), None);
        assert_eq!(ReplyKind::for_intent(Intent::General), None);
    }

    #[test]
    fn test_canned_reply_per_content_type() {
        let email = canned_reply(ContentType::Email, Language::English, ReplyKind::Greeting);
        assert!(email.contains("AI email assistant"));

        let youtube = canned_reply(ContentType::Youtube, Language::English, ReplyKind::Greeting);
        assert!(youtube.starts_with("Hi! I'm your YouTube script assistant."));

        let hindi = canned_reply(ContentType::Youtube, Language::Hindi, ReplyKind::Question);
        assert!(hindi.contains("स्क्रिप्ट लेखन सहायता"));
    }

    #[test]
    fn test_unsupported_language_falls_back_to_english() {
        assert_eq!(
            canned_reply(ContentType::Email, Language::German, ReplyKind::Question),
            canned_reply(ContentType::Email, Language::English, ReplyKind::Question)
        );
    }
}
