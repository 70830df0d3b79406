//! Term scoring for a single FAQ entry
//!
//! Scores are plain occurrence counts: every query term is counted in the
//! title and the body, and the whole query earns a flat bonus when it shows
//! up verbatim in either field.

use serde::{Deserialize, Serialize};

use crate::corpus::Entry;

/// Weight of one term occurrence in the title
pub const TITLE_WEIGHT: u64 = 3;

/// Weight of one term occurrence in the body
pub const BODY_WEIGHT: u64 = 1;

/// Flat bonus when the full query appears in the title
pub const TITLE_PHRASE_BONUS: u64 = 10;

/// Flat bonus when the full query appears in the body
pub const BODY_PHRASE_BONUS: u64 = 5;

/// How often the full-query bonus is applied per entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhraseBonus {
    /// Once per query term, so a three-term phrase match earns the bonus
    /// three times. Matches the scores the service has always produced.
    #[default]
    PerTerm,
    /// Once per entry, regardless of how many terms the query has
    Once,
}

/// Relevance scorer for one entry against one query
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    phrase_bonus: PhraseBonus,
}

impl Scorer {
    pub fn new(phrase_bonus: PhraseBonus) -> Self {
        Self { phrase_bonus }
    }

    pub fn phrase_bonus(&self) -> PhraseBonus {
        self.phrase_bonus
    }

    /// Score `entry` against `query`
    ///
    /// Returns 0 when the query has no terms. Leading and trailing whitespace
    /// in `query` is ignored.
    pub fn score(&self, entry: &Entry, query: &str) -> u64 {
        let normalized = query.to_lowercase();
        let phrase = normalized.trim();
        let terms = split_terms(&normalized);

        if terms.is_empty() {
            return 0;
        }

        let title = entry.title.to_lowercase();
        let body = entry.body.to_lowercase();

        let phrase_bonus = {
            let mut bonus = 0;
            if title.contains(phrase) {
                bonus += TITLE_PHRASE_BONUS;
            }
            if body.contains(phrase) {
                bonus += BODY_PHRASE_BONUS;
            }
            bonus
        };

        let mut score = 0;
        for term in &terms {
            score += count_occurrences(&title, term) * TITLE_WEIGHT;
            score += count_occurrences(&body, term) * BODY_WEIGHT;

            if self.phrase_bonus == PhraseBonus::PerTerm {
                score += phrase_bonus;
            }
        }

        if self.phrase_bonus == PhraseBonus::Once {
            score += phrase_bonus;
        }

        score
    }
}

/// Score with the default [`PhraseBonus::PerTerm`] policy
pub fn score(entry: &Entry, query: &str) -> u64 {
    Scorer::default().score(entry, query)
}

/// Split an already-lowercased query into its terms, keeping duplicates
fn split_terms(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Count non-overlapping occurrences of `needle`, scanning left to right
fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    haystack.matches(needle).count() as u64
}
