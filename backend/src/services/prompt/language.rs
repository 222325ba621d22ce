//! Language/tone resource table
//!
//! Per-language instruction fragments that steer the output language and
//! register of the model. Lookups never fail: languages without an entry
//! fall back to English.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Hinglish,
    Spanish,
    French,
    German,
    Italian,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Hindi,
        Language::Hinglish,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "english" => Some(Self::English),
            "hindi" => Some(Self::Hindi),
            "hinglish" => Some(Self::Hinglish),
            "spanish" => Some(Self::Spanish),
            "french" => Some(Self::French),
            "german" => Some(Self::German),
            "italian" => Some(Self::Italian),
            _ => None,
        }
    }

    /// Declared language from the form, English when absent or unknown
    pub fn resolve(key: Option<&str>) -> Self {
        key.and_then(Self::from_key).unwrap_or(Self::English)
    }
}

/// Lookup table with an explicit fallback entry
pub struct LanguageTable<T> {
    entries: HashMap<Language, T>,
    fallback: Language,
}

impl<T> LanguageTable<T> {
    /// Build a table; `entries` must contain the fallback language.
    pub(crate) fn new(entries: Vec<(Language, T)>, fallback: Language) -> Self {
        let entries: HashMap<Language, T> = entries.into_iter().collect();
        assert!(entries.contains_key(&fallback), "language table is missing its fallback entry");
        Self { entries, fallback }
    }

    pub fn get(&self, language: Language) -> &T {
        self.entries
            .get(&language)
            .or_else(|| self.entries.get(&self.fallback))
            .unwrap_or_else(|| unreachable!("fallback entry checked at construction"))
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, language: Language) -> bool {
        self.entries.contains_key(&language)
    }
}

#[derive(Debug)]
pub struct EmailLanguageProfile {
    pub instruction: &'static str,
    pub analysis: &'static str,
    pub style: &'static str,
    pub default_prompt: &'static str,
}

#[derive(Debug)]
pub struct YoutubeLanguageProfile {
    pub instruction: &'static str,
    pub title_note: &'static str,
    pub description_note: &'static str,
    pub default_prompt: &'static str,
}

const HINGLISH_EMAIL_INSTRUCTION: &str = r#"Write in Hinglish (conversational Hindi written in Roman script mixed with English).
Follow these Hinglish writing guidelines:
1. Use Roman script for Hindi words (e.g., "aap", "namaste", "dhanyavaad")
2. Mix Hindi and English naturally like spoken conversation
3. Use common Hinglish greetings and phrases
4. Keep formal words in English (e.g., "meeting", "deadline", "confirm")
5. Cultural terms should be in Hindi (e.g., "pooja", "shubh", "namaste")

Examples of good Hinglish:
- "Meeting ke liye aapka bahut dhanyavaad"
- "Deadline tak response zaroor bhej dein"
- "Team ke sabhi members ko invite kiya hai""#;

pub static EMAIL_LANGUAGES: Lazy<LanguageTable<EmailLanguageProfile>> = Lazy::new(|| {
    LanguageTable::new(
        vec![
            (Language::English, EmailLanguageProfile {
                instruction: "Respond in English",
                analysis: "Provide analysis in English",
                style: "Follow formal English writing style",
                default_prompt: "Write a professional email to schedule a team meeting for project discussion",
            }),
            (Language::Hindi, EmailLanguageProfile {
                instruction: "पूरा ईमेल हिंदी में लिखें (देवनागरी लिपि का उपयोग करें)",
                analysis: "विश्लेषण भी हिंदी में प्रदान करें",
                style: "औपचारिक हिंदी लेखन शैली का पालन करें",
                default_prompt: "कार्यालय में दिवाली समारोह के लिए एक निमंत्रण ईमेल लिखें",
            }),
            (Language::Hinglish, EmailLanguageProfile {
                instruction: HINGLISH_EMAIL_INSTRUCTION,
                analysis: "Analysis bhi Hinglish mein hi provide karein, mixing professional terms in English",
                style: "Use natural conversational Hinglish tone",
                default_prompt: "Office mein hone wali Diwali celebration ke liye ek invitation email likhiye",
            }),
            (Language::Spanish, EmailLanguageProfile {
                instruction: "Responder completamente en español",
                analysis: "Proporcionar análisis en español",
                style: "Seguir el estilo de escritura formal en español",
                default_prompt: "Escribir un correo para invitar al equipo a una reunión de proyecto",
            }),
            (Language::French, EmailLanguageProfile {
                instruction: "Répondre entièrement en français",
                analysis: "Fournir une analyse en français",
                style: "Suivre le style d'écriture formel en français",
                default_prompt: "Écrire un e-mail pour organiser une réunion d'équipe",
            }),
            (Language::German, EmailLanguageProfile {
                instruction: "Vollständig auf Deutsch antworten",
                analysis: "Analyse auf Deutsch bereitstellen",
                style: "Formellen deutschen Schreibstil befolgen",
                default_prompt: "Schreiben Sie eine E-Mail, um ein Teammeeting zu planen",
            }),
            (Language::Italian, EmailLanguageProfile {
                instruction: "Rispondere completamente in italiano",
                analysis: "Fornire analisi in italiano",
                style: "Seguire lo stile di scrittura formale in italiano",
                default_prompt: "Scrivere un'email per organizzare una riunione di team",
            }),
        ],
        Language::English,
    )
});

pub static YOUTUBE_LANGUAGES: Lazy<LanguageTable<YoutubeLanguageProfile>> = Lazy::new(|| {
    LanguageTable::new(
        vec![
            (Language::English, YoutubeLanguageProfile {
                instruction: "Write the script in English",
                title_note: "Create an engaging English title",
                description_note: "Write description in English",
                default_prompt: "Create an engaging tutorial video script about productivity tips",
            }),
            (Language::Hindi, YoutubeLanguageProfile {
                instruction: "स्क्रिप्ट को पूरी तरह से हिंदी में लिखें (देवनागरी लिपि का उपयोग करें)",
                title_note: "आकर्षक हिंदी शीर्षक बनाएं",
                description_note: "विवरण हिंदी में लिखें",
                default_prompt: "प्रोडक्टिविटी टिप्स पर एक आकर्षक ट्यूटोरियल वीडियो स्क्रिप्ट बनाएं",
            }),
            (Language::Hinglish, YoutubeLanguageProfile {
                instruction: "Script ko Hinglish mein likhein (Hindi + English ka natural mix)",
                title_note: "Attractive Hinglish title banayein",
                description_note: "Description Hinglish mein likhein",
                default_prompt: "Productivity tips ke liye ek engaging tutorial video script banayein",
            }),
            (Language::Spanish, YoutubeLanguageProfile {
                instruction: "Escribir el guion completamente en español",
                title_note: "Crear un título atractivo en español",
                description_note: "Escribir la descripción en español",
                default_prompt: "Crear un guion de video tutorial atractivo sobre consejos de productividad",
            }),
            (Language::French, YoutubeLanguageProfile {
                instruction: "Rédiger le script entièrement en français",
                title_note: "Créer un titre accrocheur en français",
                description_note: "Rédiger la description en français",
                default_prompt: "Créer un script de tutoriel vidéo captivant sur des astuces de productivité",
            }),
            (Language::German, YoutubeLanguageProfile {
                instruction: "Das Skript vollständig auf Deutsch schreiben",
                title_note: "Einen ansprechenden deutschen Titel erstellen",
                description_note: "Die Beschreibung auf Deutsch schreiben",
                default_prompt: "Ein ansprechendes Tutorial-Videoskript über Produktivitätstipps erstellen",
            }),
            (Language::Italian, YoutubeLanguageProfile {
                instruction: "Scrivere lo script completamente in italiano",
                title_note: "Creare un titolo accattivante in italiano",
                description_note: "Scrivere la descrizione in italiano",
                default_prompt: "Creare uno script video tutorial coinvolgente sui consigli di produttività",
            }),
        ],
        Language::English,
    )
});
