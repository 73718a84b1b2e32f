//! Utility modules

pub mod fuzzy;
pub mod sequence;

pub use fuzzy::{
    find_best_match, find_matches, fuzzy_match, match_one, match_one_by, match_one_map,
    match_one_map_by, similarity, FuzzyMatch, Scorer,
};
pub use sequence::{Match, SequenceMatcher};
