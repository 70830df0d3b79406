use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::debug;

use super::scorer::Scorer;
use crate::corpus::Entry;

/// Default number of results returned per query
pub const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Maximum number of bodies stitched into a summary
pub const SUMMARY_MAX_ENTRIES: usize = 3;

/// Message carried by an outcome with no results
pub const DEFAULT_NO_MATCH_MESSAGE: &str = "No matches found for your query.";

/// Everything a query produces
///
/// `summary` is present iff `results` is non-empty, `message` iff it is empty.
/// `sources` always lines up with `results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Entry paired with its score while ranking
struct ScoredEntry<'a> {
    entry: &'a Entry,
    score: u64,
}

/// Ranks a corpus against a query and builds the outcome
#[derive(Debug, Clone)]
pub struct Ranker {
    scorer: Scorer,
    no_match_message: String,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Scorer::default())
    }
}

impl Ranker {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_string(),
        }
    }

    /// Replace the message returned when nothing matches
    pub fn with_no_match_message(mut self, message: impl Into<String>) -> Self {
        self.no_match_message = message.into();
        self
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Rank `corpus` against `query`, keeping at most `limit` entries
    ///
    /// Entries scoring 0 are dropped. Equal scores keep corpus order.
    pub fn rank(&self, corpus: &[Entry], query: &str, limit: NonZeroUsize) -> SearchOutcome {
        let mut scored: Vec<ScoredEntry> = corpus
            .iter()
            .map(|entry| ScoredEntry {
                entry,
                score: self.scorer.score(entry, query),
            })
            .filter(|scored| scored.score > 0)
            .collect();

        let matched = scored.len();

        // sort_by is stable, so ties stay in corpus order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit.get());

        debug!(
            "Ranked {} entries for {:?}: {} matched, returning {}",
            corpus.len(),
            query,
            matched,
            scored.len()
        );

        let results: Vec<Entry> = scored.into_iter().map(|s| s.entry.clone()).collect();
        let sources = results.iter().map(|e| e.id.clone()).collect();
        let summary = summarize(&results);
        let message = if results.is_empty() {
            Some(self.no_match_message.clone())
        } else {
            None
        };

        SearchOutcome {
            results,
            summary,
            sources,
            message,
        }
    }
}

/// Rank with the default scorer and no-match message
pub fn rank(corpus: &[Entry], query: &str, limit: NonZeroUsize) -> SearchOutcome {
    Ranker::default().rank(corpus, query, limit)
}

/// Join the bodies of the top entries into one summary
///
/// Returns `None` for an empty slice; otherwise the first
/// [`SUMMARY_MAX_ENTRIES`] bodies joined by single spaces.
pub fn summarize(entries: &[Entry]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }

    let bodies: Vec<&str> = entries
        .iter()
        .take(SUMMARY_MAX_ENTRIES)
        .map(|e| e.body.as_str())
        .collect();

    Some(bodies.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::PhraseBonus;
    use pretty_assertions::assert_eq;

    fn sample_corpus() -> Vec<Entry> {
        vec![
            Entry::new("a", "Reset password", "Go to settings and click reset."),
            Entry::new("b", "Billing", "Invoices are emailed monthly."),
        ]
    }

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_single_match() {
        let outcome = rank(&sample_corpus(), "password", DEFAULT_LIMIT);

        assert_eq!(
            outcome,
            SearchOutcome {
                results: vec![Entry::new(
                    "a",
                    "Reset password",
                    "Go to settings and click reset."
                )],
                summary: Some("Go to settings and click reset.".to_string()),
                sources: vec!["a".to_string()],
                message: None,
            }
        );
    }

    #[test]
    fn test_no_match() {
        let outcome = rank(&sample_corpus(), "xyz123", DEFAULT_LIMIT);

        assert!(outcome.results.is_empty());
        assert!(outcome.sources.is_empty());
        assert_eq!(outcome.summary, None);
        assert_eq!(
            outcome.message.as_deref(),
            Some("No matches found for your query.")
        );
    }

    #[test]
    fn test_empty_corpus() {
        let outcome = rank(&[], "anything", DEFAULT_LIMIT);

        assert!(outcome.is_empty());
        assert!(outcome.message.is_some());
    }

    #[test]
    fn test_sorted_by_descending_score() {
        let corpus = vec![
            Entry::new("low", "Other", "shipping"),
            Entry::new("high", "Shipping", "shipping shipping"),
            Entry::new("mid", "Other", "shipping shipping"),
        ];

        let outcome = rank(&corpus, "shipping", DEFAULT_LIMIT);

        assert_eq!(outcome.sources, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = vec![
            Entry::new("first", "Returns", "x"),
            Entry::new("second", "Returns", "y"),
            Entry::new("third", "Returns", "z"),
            Entry::new("fourth", "Returns", "w"),
        ];

        let outcome = rank(&corpus, "returns", limit(10));

        assert_eq!(outcome.sources, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_truncated_to_limit() {
        let corpus: Vec<Entry> = (0..10)
            .map(|i| Entry::new(format!("e{i}"), "Account", format!("body {i}")))
            .collect();

        let outcome = rank(&corpus, "account", DEFAULT_LIMIT);
        assert_eq!(outcome.results.len(), 3);

        let outcome = rank(&corpus, "account", limit(1));
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.sources, vec!["e0"]);
    }

    #[test]
    fn test_summary_only_uses_returned_entries() {
        let corpus: Vec<Entry> = (1..=4)
            .map(|i| Entry::new(format!("e{i}"), "Help", format!("b{i}")))
            .collect();

        let outcome = rank(&corpus, "help", limit(2));

        assert_eq!(outcome.sources, vec!["e1", "e2"]);
        assert_eq!(outcome.summary.as_deref(), Some("b1 b2"));
    }

    #[test]
    fn test_query_case_and_padding_do_not_change_score() {
        let e = Entry::new("a", "Reset password", "x");

        // reset: 3, password: 3, title phrase bonus once per term: 2 * 10
        assert_eq!(crate::rank::score(&e, "RESET password "), 26);
    }

    #[test]
    fn test_sources_aligned_with_results() {
        let corpus = vec![
            Entry::new("x", "Orders", "Track orders online."),
            Entry::new("y", "Orders and returns", "Orders ship in two days."),
        ];

        let outcome = rank(&corpus, "orders", DEFAULT_LIMIT);

        assert_eq!(outcome.results.len(), outcome.sources.len());
        for (entry, source) in outcome.results.iter().zip(&outcome.sources) {
            assert_eq!(&entry.id, source);
        }
    }

    #[test]
    fn test_summary_two_results() {
        let corpus = vec![
            Entry::new("a", "Login", "Use your email."),
            Entry::new("b", "Login issues", "Clear your cookies."),
        ];

        let outcome = rank(&corpus, "login", DEFAULT_LIMIT);

        // "Login issues" scores the same as "Login", so corpus order holds
        assert_eq!(
            outcome.summary.as_deref(),
            Some("Use your email. Clear your cookies.")
        );
    }

    #[test]
    fn test_summary_capped_at_three_bodies() {
        let corpus: Vec<Entry> = (1..=5)
            .map(|i| Entry::new(format!("e{i}"), "Help", format!("b{i}")))
            .collect();

        let outcome = rank(&corpus, "help", limit(5));

        assert_eq!(outcome.results.len(), 5);
        assert_eq!(outcome.summary.as_deref(), Some("b1 b2 b3"));
    }

    #[test]
    fn test_summarize() {
        let a = Entry::new("a", "t", "one");
        let b = Entry::new("b", "t", "two");
        let c = Entry::new("c", "t", "three");
        let d = Entry::new("d", "t", "four");

        assert_eq!(summarize(&[]), None);
        assert_eq!(summarize(&[a.clone()]).as_deref(), Some("one"));
        assert_eq!(summarize(&[a.clone(), b.clone()]).as_deref(), Some("one two"));
        assert_eq!(
            summarize(&[a, b, c, d]).as_deref(),
            Some("one two three")
        );
    }

    #[test]
    fn test_rank_is_idempotent() {
        let corpus = sample_corpus();

        let first = rank(&corpus, "reset settings", DEFAULT_LIMIT);
        let second = rank(&corpus, "reset settings", DEFAULT_LIMIT);

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_no_match_message() {
        let ranker = Ranker::default().with_no_match_message("Nothing here.");

        let outcome = ranker.rank(&sample_corpus(), "xyz123", DEFAULT_LIMIT);

        assert_eq!(outcome.message.as_deref(), Some("Nothing here."));
    }

    #[test]
    fn test_phrase_bonus_policy_changes_order() {
        // "a" holds the exact phrase in its title; "b" only has scattered terms
        let corpus = vec![
            Entry::new("a", "Change email", "x"),
            Entry::new("b", "Email Email", "change; ".repeat(12)),
        ];

        let per_term = Ranker::new(Scorer::new(PhraseBonus::PerTerm));
        let once = Ranker::new(Scorer::new(PhraseBonus::Once));

        // per-term: a = 3 + 3 + 2 * 10 = 26, b = 2 * 3 + 12 = 18
        assert_eq!(
            per_term.rank(&corpus, "change email", DEFAULT_LIMIT).sources,
            vec!["a", "b"]
        );
        // once: a = 3 + 3 + 10 = 16, b = 18
        assert_eq!(
            once.rank(&corpus, "change email", DEFAULT_LIMIT).sources,
            vec!["b", "a"]
        );
    }

    #[test]
    fn test_outcome_wire_format() {
        let hit = rank(&sample_corpus(), "password", DEFAULT_LIMIT);
        let json = serde_json::to_value(&hit).unwrap();

        assert_eq!(json["sources"], serde_json::json!(["a"]));
        assert_eq!(json["summary"], "Go to settings and click reset.");
        assert!(json.get("message").is_none());

        let miss = rank(&sample_corpus(), "xyz123", DEFAULT_LIMIT);
        let json = serde_json::to_value(&miss).unwrap();

        assert_eq!(json["results"], serde_json::json!([]));
        assert_eq!(json["sources"], serde_json::json!([]));
        assert!(json.get("summary").is_none());
        assert_eq!(json["message"], "No matches found for your query.");
    }
}
