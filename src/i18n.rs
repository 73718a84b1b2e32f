//! Language Support
//!
//! Process-wide default language and helpers to check language codes
//! against what a parser supports.

use std::sync::{PoisonError, RwLock};
use tracing::{info, warn};

/// Language used until [`set_default_lang`] is called
pub const FALLBACK_LANG: &str = "en-us";

/// Current default language (empty means [`FALLBACK_LANG`])
static DEFAULT_LANG: RwLock<String> = RwLock::new(String::new());

/// Set the process-wide default language
pub fn set_default_lang(lang: &str) {
    let mut current = DEFAULT_LANG
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *current = normalize_lang_code(lang);
    info!("🌐 Default language set to: {}", current);
}

/// Get the process-wide default language
pub fn default_lang() -> String {
    let current = DEFAULT_LANG.read().unwrap_or_else(PoisonError::into_inner);
    if current.is_empty() {
        FALLBACK_LANG.to_string()
    } else {
        current.clone()
    }
}

/// Canonical form of a language code: trimmed, lowercase, `-` separated
pub fn normalize_lang_code(lang: &str) -> String {
    lang.trim().to_lowercase().replace('_', "-")
}

/// Primary language code: "en-US" -> "en", "pt_BR" -> "pt".
///
/// Falls back to the default language when `lang` is None.
pub fn primary_lang_code(lang: Option<&str>) -> String {
    let lang = match lang {
        Some(lang) => lang.to_string(),
        None => default_lang(),
    };
    lang.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Check a language code against a list of supported codes.
///
/// Matches on the full code or on the primary code, case-insensitively, so
/// "en-GB" is supported by either "en-gb" or "en".
pub fn is_supported<S: AsRef<str>>(lang: &str, supported_languages: &[S]) -> bool {
    let full = normalize_lang_code(lang);
    let primary = primary_lang_code(Some(lang));
    if primary.is_empty() {
        return false;
    }

    supported_languages.iter().any(|s| {
        let candidate = normalize_lang_code(s.as_ref());
        candidate == full || (!candidate.contains('-') && candidate == primary)
    })
}

/// Log a warning when a language is unsupported
pub fn log_unsupported_language<S: AsRef<str>>(language: &str, supported_languages: &[S]) {
    let supported = supported_languages
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    warn!(
        "Language \"{}\" not recognized! Please make sure your language is one of the following: {}.",
        language, supported
    );
}
