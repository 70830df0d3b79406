use std::path::PathBuf;
use tracing::debug;

use super::{Corpus, CorpusError, Entry};

/// Where a corpus comes from
///
/// The ranker never touches storage; anything that can produce a validated
/// [`Corpus`] can sit behind this trait.
pub trait CorpusSource: Send + Sync {
    /// Human-readable name, also used as the snapshot cache key
    fn describe(&self) -> String;

    /// Load the whole corpus
    fn load(&self) -> Result<Corpus, CorpusError>;
}

/// Corpus stored as a JSON array of `{id, title, body}` records
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Corpus, CorpusError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| CorpusError::Read {
            path: self.path.clone(),
            source,
        })?;

        let entries: Vec<Entry> =
            serde_json::from_str(&contents).map_err(|source| CorpusError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!("Loaded {} entries from {}", entries.len(), self.path.display());

        Corpus::new(entries)
    }
}
