use std::fmt;
use std::slice::Iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StimmungError;

/// Languages headlines can be translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    Urdu,
}

impl Language {
    /// All known languages.
    pub fn known_languages() -> Iter<'static, Language> {
        static LANGUAGES: [Language; 4] = [
            Language::English,
            Language::Spanish,
            Language::French,
            Language::Urdu,
        ];
        LANGUAGES.iter()
    }

    /// The ISO 639-1 code the translation service expects.
    pub fn identifier(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Urdu => "ur",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Urdu => "Urdu",
        }
    }
}

impl FromStr for Language {
    type Err = StimmungError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" => Ok(Language::Spanish),
            "fr" | "french" => Ok(Language::French),
            "ur" | "urdu" => Ok(Language::Urdu),
            _ => Err(StimmungError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}
