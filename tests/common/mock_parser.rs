//! Mock Parser for Testing
//!
//! Returns canned values and records every call it receives.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use voxparse::parse::{ExtractedDateTime, ExtractedDuration, Gender, NumberOptions, Parser};

/// Mock parser that answers from lookup tables
#[derive(Default)]
pub struct MockParser {
    /// Languages reported as supported
    pub languages: Vec<String>,
    /// text -> numbers found in it
    pub numbers: HashMap<String, Vec<f64>>,
    /// word -> days from the anchor
    pub day_offsets: HashMap<String, i64>,
    /// word -> gender
    pub genders: HashMap<String, Gender>,
    /// Record of (operation, lang) for every call
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockParser {
    pub fn new(languages: &[&str]) -> Self {
        Self {
            languages: languages.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_numbers(mut self, text: &str, numbers: &[f64]) -> Self {
        self.numbers.insert(text.to_string(), numbers.to_vec());
        self
    }

    pub fn with_day_offset(mut self, word: &str, days: i64) -> Self {
        self.day_offsets.insert(word.to_string(), days);
        self
    }

    pub fn with_gender(mut self, word: &str, gender: Gender) -> Self {
        self.genders.insert(word.to_string(), gender);
        self
    }

    fn record(&self, operation: &str, lang: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((operation.to_string(), lang.to_string()));
        }
    }
}

/// Remove `word` from `text`, collapsing the leftover whitespace
fn strip_word(text: &str, word: &str) -> String {
    text.split_whitespace()
        .filter(|w| *w != word)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Parser for MockParser {
    fn supported_languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn extract_number(&self, text: &str, options: NumberOptions, lang: &str) -> Option<f64> {
        self.extract_numbers(text, options, lang).first().copied()
    }

    fn extract_numbers(&self, text: &str, _options: NumberOptions, lang: &str) -> Vec<f64> {
        self.record("extract_numbers", lang);
        self.numbers.get(text).cloned().unwrap_or_default()
    }

    fn extract_datetime(
        &self,
        text: &str,
        anchor: DateTime<Local>,
        lang: &str,
    ) -> Option<ExtractedDateTime> {
        self.record("extract_datetime", lang);
        text.split_whitespace().find_map(|word| {
            self.day_offsets.get(word).map(|days| ExtractedDateTime {
                when: anchor + chrono::Duration::days(*days),
                remainder: strip_word(text, word),
            })
        })
    }

    fn extract_duration(&self, text: &str, lang: &str) -> Option<ExtractedDuration> {
        self.record("extract_duration", lang);
        let words: Vec<&str> = text.split_whitespace().collect();
        words.windows(2).find_map(|pair| {
            let amount: u64 = pair[0].parse().ok()?;
            let seconds = match pair[1] {
                "second" | "seconds" => amount,
                "minute" | "minutes" => amount * 60,
                "hour" | "hours" => amount * 3600,
                _ => return None,
            };
            let remainder = text
                .replacen(&format!("{} {}", pair[0], pair[1]), "", 1)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            Some(ExtractedDuration {
                duration: Duration::from_secs(seconds),
                remainder,
            })
        })
    }

    fn get_gender(&self, word: &str, _context: Option<&str>, lang: &str) -> Option<Gender> {
        self.record("get_gender", lang);
        self.genders.get(word).copied()
    }

    fn normalize(&self, text: &str, lang: &str, remove_articles: bool) -> String {
        self.record("normalize", lang);
        let lower = text.to_lowercase();
        if remove_articles {
            ["the", "a", "an"]
                .iter()
                .fold(lower, |acc, article| strip_word(&acc, article))
        } else {
            lower
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_parser_records_calls() {
        let mock = MockParser::new(&["en-us"]).with_numbers("two apples", &[2.0]);
        assert_eq!(
            mock.extract_number("two apples", NumberOptions::default(), "en-us"),
            Some(2.0)
        );
        assert_eq!(mock.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_mock_parser_duration() {
        let mock = MockParser::new(&["en-us"]);
        let extracted = mock
            .extract_duration("set a timer for 10 minutes please", "en-us")
            .unwrap();
        assert_eq!(extracted.duration, Duration::from_secs(600));
        assert_eq!(extracted.remainder, "set a timer for please");
    }
}
