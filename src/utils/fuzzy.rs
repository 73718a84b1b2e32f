//! Fuzzy matching utilities
//!
//! Picks the best candidate for a noisy query (typically an ASR transcript)
//! from a list of choices or from a key/value mapping.

use super::sequence::SequenceMatcher;
use crate::error::{VoxError, VoxResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strsim::{jaro_winkler, normalized_levenshtein};
use tracing::debug;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Similarity metric used to score candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Longest matching blocks ratio (see [`fuzzy_match`])
    #[default]
    Ratio,
    /// Normalized Levenshtein distance
    Levenshtein,
    /// Jaro-Winkler similarity
    JaroWinkler,
}

impl Scorer {
    /// Score `a` against `b`, in [0.0, 1.0]
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            Scorer::Ratio => fuzzy_match(a, b),
            Scorer::Levenshtein => normalized_levenshtein(a, b),
            Scorer::JaroWinkler => jaro_winkler(a, b),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scorer::Ratio => "ratio",
            Scorer::Levenshtein => "levenshtein",
            Scorer::JaroWinkler => "jaro_winkler",
        }
    }
}

impl FromStr for Scorer {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "ratio" => Ok(Scorer::Ratio),
            "levenshtein" => Ok(Scorer::Levenshtein),
            "jaro_winkler" | "jarowinkler" => Ok(Scorer::JaroWinkler),
            other => Err(VoxError::InvalidArgument(format!(
                "unknown scorer '{}', expected ratio, levenshtein or jaro_winkler",
                other
            ))),
        }
    }
}

/// Perform a "fuzzy" comparison between two strings.
///
/// Returns 1.0 for identical strings down to 0.0 when no char matches.
/// The score is the longest-matching-blocks ratio taken in both argument
/// orders, keeping the higher one, so `fuzzy_match(a, b) == fuzzy_match(b, a)`.
pub fn fuzzy_match(x: &str, against: &str) -> f64 {
    if x == against {
        return 1.0;
    }
    let forward = SequenceMatcher::with_autojunk(x, against, false).ratio();
    let backward = SequenceMatcher::with_autojunk(against, x, false).ratio();
    forward.max(backward)
}

/// Case-insensitive [`fuzzy_match`]
pub fn similarity(a: &str, b: &str) -> f64 {
    fuzzy_match(&a.to_lowercase(), &b.to_lowercase())
}

/// Find the best match for `query` in a list of choices.
///
/// Returns the winning choice and its score. On equal scores the choice that
/// comes first wins.
pub fn match_one<'a, S: AsRef<str>>(query: &str, choices: &'a [S]) -> VoxResult<(&'a S, f64)> {
    match_one_by(query, choices, Scorer::Ratio)
}

/// [`match_one`] with an explicit scorer
pub fn match_one_by<'a, S: AsRef<str>>(
    query: &str,
    choices: &'a [S],
    scorer: Scorer,
) -> VoxResult<(&'a S, f64)> {
    best_of(query, choices.iter().map(|c| (c, c)), scorer)
}

/// Find the best match for `query` among the keys of a mapping.
///
/// `choices` is anything yielding `(key, value)` pairs: a `Vec<(K, V)>`, a
/// `&BTreeMap`, a `&HashMap`... Keys are scored in iteration order and the
/// value of the winning key is returned with its score.
pub fn match_one_map<K, V, I>(query: &str, choices: I) -> VoxResult<(V, f64)>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    match_one_map_by(query, choices, Scorer::Ratio)
}

/// [`match_one_map`] with an explicit scorer
pub fn match_one_map_by<K, V, I>(query: &str, choices: I, scorer: Scorer) -> VoxResult<(V, f64)>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    best_of(query, choices, scorer)
}

fn best_of<K, V, I>(query: &str, choices: I, scorer: Scorer) -> VoxResult<(V, f64)>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut choices = choices.into_iter();
    let (first_key, first_value) = choices.next().ok_or(VoxError::EmptyChoices)?;

    let mut best_score = scorer.score(query, first_key.as_ref());
    let mut best_key = first_key;
    let mut best_value = first_value;

    for (key, value) in choices {
        let score = scorer.score(query, key.as_ref());
        // Strictly greater: ties keep the earliest choice
        if score > best_score {
            best_key = key;
            best_value = value;
            best_score = score;
        }
    }

    debug!(
        "Best {} match for '{}': '{}' ({:.3})",
        scorer.name(),
        query,
        best_key.as_ref(),
        best_score
    );
    Ok((best_value, best_score))
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches scoring at least `cutoff`, best first. Equal
/// scores keep the order of `candidates`.
pub fn find_matches<S: AsRef<str>>(
    search_term: &str,
    candidates: &[S],
    n: usize,
    cutoff: f64,
) -> VoxResult<Vec<FuzzyMatch>> {
    if n == 0 {
        return Err(VoxError::InvalidArgument("n must be at least 1, got 0".to_string()));
    }
    validate_cutoff(cutoff)?;

    let mut matches: Vec<FuzzyMatch> = Vec::new();
    for candidate in candidates {
        let candidate = candidate.as_ref();

        // Both bounds are symmetric, so they cap either ratio orientation.
        let sm = SequenceMatcher::with_autojunk(search_term, candidate, false);
        if sm.real_quick_ratio() < cutoff || sm.quick_ratio() < cutoff {
            continue;
        }

        let score = fuzzy_match(search_term, candidate);
        if score >= cutoff {
            matches.push(FuzzyMatch {
                value: candidate.to_string(),
                score,
            });
        }
    }

    // Stable sort keeps input order among equal scores
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(n);

    debug!(
        "{} candidate(s) for '{}' above {:.2}",
        matches.len(),
        search_term,
        cutoff
    );
    Ok(matches)
}

/// Find the best match above a minimum score
///
/// Returns None if no match meets the cutoff
pub fn find_best_match<S: AsRef<str>>(
    search_term: &str,
    candidates: &[S],
    cutoff: f64,
) -> VoxResult<Option<FuzzyMatch>> {
    let matches = find_matches(search_term, candidates, 1, cutoff)?;
    Ok(matches.into_iter().next())
}

/// Validate that a cutoff is a finite value in [0.0, 1.0]
pub fn validate_cutoff(cutoff: f64) -> VoxResult<()> {
    if !cutoff.is_finite() || !(0.0..=1.0).contains(&cutoff) {
        return Err(VoxError::InvalidArgument(format!(
            "cutoff must be in range [0.0, 1.0], got {}",
            cutoff
        )));
    }
    Ok(())
}
