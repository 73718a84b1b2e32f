//! voxparse Library
//!
//! Fuzzy best-match selection for noisy voice transcripts, plus a
//! language-aware front end over a pluggable natural language parser.

pub mod config;
pub mod error;
pub mod i18n;
pub mod parse;
pub mod utils;

pub use error::{VoxError, VoxResult};
pub use i18n::log_unsupported_language;
pub use parse::{
    ExtractedDateTime, ExtractedDuration, Gender, LanguageParser, NumberOptions, Parser,
};
pub use utils::{fuzzy_match, match_one, match_one_map, FuzzyMatch, Scorer};
