//! Ranking engine
//!
//! A linear re-scan: every query scores the full corpus, keeps the entries
//! with a positive score and stitches the best bodies into a summary. Nothing
//! is indexed or remembered between calls.

mod ranker;
mod scorer;

pub use ranker::{
    rank, summarize, Ranker, SearchOutcome, DEFAULT_LIMIT, DEFAULT_NO_MATCH_MESSAGE,
    SUMMARY_MAX_ENTRIES,
};
pub use scorer::{
    score, PhraseBonus, Scorer, BODY_PHRASE_BONUS, BODY_WEIGHT, TITLE_PHRASE_BONUS, TITLE_WEIGHT,
};
