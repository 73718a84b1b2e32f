//! Natural Language Parsing
//!
//! The actual extraction of numbers, dates and durations lives in an
//! external parser plugged in through the [`Parser`] trait.
//! [`LanguageParser`] re-exposes those operations, resolving the language
//! for each call and refusing languages the parser does not support.

use crate::config::Config;
use crate::error::{VoxError, VoxResult};
use crate::i18n;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Options for number extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberOptions {
    /// Use the short scale ("billion" = 10^9) rather than the long scale
    pub short_scale: bool,
    /// Treat ordinals ("third") as numbers
    pub ordinals: bool,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            short_scale: true,
            ordinals: false,
        }
    }
}

/// A date/time found in text, with the text left once it is removed
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDateTime {
    pub when: DateTime<Local>,
    pub remainder: String,
}

/// A duration found in text, with the text left once it is removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDuration {
    pub duration: Duration,
    pub remainder: String,
}

/// Grammatical gender of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

/// Trait for natural language parsers
///
/// Every operation takes the language code to parse in; callers have
/// already checked it against [`Parser::supported_languages`].
pub trait Parser: Send + Sync {
    /// Language codes this parser handles ("en-us", "de", ...)
    fn supported_languages(&self) -> Vec<String>;

    /// First number in `text`, if any
    fn extract_number(&self, text: &str, options: NumberOptions, lang: &str) -> Option<f64>;

    /// All numbers in `text`, in order of appearance
    fn extract_numbers(&self, text: &str, options: NumberOptions, lang: &str) -> Vec<f64>;

    /// Date/time in `text`, relative to `anchor`
    fn extract_datetime(
        &self,
        text: &str,
        anchor: DateTime<Local>,
        lang: &str,
    ) -> Option<ExtractedDateTime>;

    /// Duration in `text`
    fn extract_duration(&self, text: &str, lang: &str) -> Option<ExtractedDuration>;

    /// Grammatical gender of `word`, optionally guided by its sentence
    fn get_gender(&self, word: &str, context: Option<&str>, lang: &str) -> Option<Gender>;

    /// Normalize `text` (expand contractions, numbers to digits, ...)
    fn normalize(&self, text: &str, lang: &str, remove_articles: bool) -> String;
}

/// Language-aware front end over a [`Parser`]
///
/// The language of each call is, in order: the `lang` argument, the
/// configured language, then [`i18n::default_lang`].
#[derive(Clone)]
pub struct LanguageParser {
    parser: Arc<dyn Parser>,
    lang: Option<String>,
}

impl std::fmt::Debug for LanguageParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageParser")
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

impl LanguageParser {
    /// Wrap a parser, using the process-wide default language
    pub fn new(parser: Arc<dyn Parser>) -> Self {
        Self { parser, lang: None }
    }

    /// Wrap a parser, using the language from `config`
    pub fn from_config(parser: Arc<dyn Parser>, config: &Config) -> Self {
        let lang = i18n::normalize_lang_code(&config.lang);
        Self {
            parser,
            lang: (!lang.is_empty()).then_some(lang),
        }
    }

    /// Override the language used when a call does not name one
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = Some(i18n::normalize_lang_code(lang));
        self
    }

    /// Resolve the language for a call and check the parser supports it
    pub fn resolve_lang(&self, lang: Option<&str>) -> VoxResult<String> {
        let lang = match (lang, &self.lang) {
            (Some(lang), _) => i18n::normalize_lang_code(lang),
            (None, Some(configured)) => configured.clone(),
            (None, None) => i18n::default_lang(),
        };

        let supported = self.parser.supported_languages();
        if i18n::is_supported(&lang, &supported) {
            Ok(lang)
        } else {
            i18n::log_unsupported_language(&lang, &supported);
            Err(VoxError::UnsupportedLanguage(lang))
        }
    }

    pub fn extract_number(&self, text: &str, lang: Option<&str>) -> VoxResult<Option<f64>> {
        self.extract_number_with(text, NumberOptions::default(), lang)
    }

    pub fn extract_number_with(
        &self,
        text: &str,
        options: NumberOptions,
        lang: Option<&str>,
    ) -> VoxResult<Option<f64>> {
        let lang = self.resolve_lang(lang)?;
        let number = self.parser.extract_number(text, options, &lang);
        debug!("extract_number('{}', {}) -> {:?}", text, lang, number);
        Ok(number)
    }

    pub fn extract_numbers(&self, text: &str, lang: Option<&str>) -> VoxResult<Vec<f64>> {
        self.extract_numbers_with(text, NumberOptions::default(), lang)
    }

    pub fn extract_numbers_with(
        &self,
        text: &str,
        options: NumberOptions,
        lang: Option<&str>,
    ) -> VoxResult<Vec<f64>> {
        let lang = self.resolve_lang(lang)?;
        Ok(self.parser.extract_numbers(text, options, &lang))
    }

    /// Extract a date/time; `anchor` defaults to the local time now
    pub fn extract_datetime(
        &self,
        text: &str,
        anchor: Option<DateTime<Local>>,
        lang: Option<&str>,
    ) -> VoxResult<Option<ExtractedDateTime>> {
        let lang = self.resolve_lang(lang)?;
        let anchor = anchor.unwrap_or_else(Local::now);
        let extracted = self.parser.extract_datetime(text, anchor, &lang);
        debug!(
            "extract_datetime('{}', {}) -> {:?}",
            text,
            lang,
            extracted.as_ref().map(|e| e.when)
        );
        Ok(extracted)
    }

    pub fn extract_duration(
        &self,
        text: &str,
        lang: Option<&str>,
    ) -> VoxResult<Option<ExtractedDuration>> {
        let lang = self.resolve_lang(lang)?;
        Ok(self.parser.extract_duration(text, &lang))
    }

    pub fn get_gender(
        &self,
        word: &str,
        context: Option<&str>,
        lang: Option<&str>,
    ) -> VoxResult<Option<Gender>> {
        let lang = self.resolve_lang(lang)?;
        Ok(self.parser.get_gender(word, context, &lang))
    }

    pub fn normalize(
        &self,
        text: &str,
        lang: Option<&str>,
        remove_articles: bool,
    ) -> VoxResult<String> {
        let lang = self.resolve_lang(lang)?;
        Ok(self.parser.normalize(text, &lang, remove_articles))
    }
}
