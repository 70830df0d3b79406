pub mod cache;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod output;
pub mod query;
pub mod rank;
pub mod search;
pub mod server;
pub mod watch;

// Re-export commonly used types
pub use cache::{CacheStats, CorpusStore};
pub use config::Config;
pub use corpus::{Corpus, CorpusError, CorpusSource, Entry, JsonFileSource};
pub use query::{Query, QueryError};
pub use rank::{rank, score, PhraseBonus, Ranker, Scorer, SearchOutcome};
