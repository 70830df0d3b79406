use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Deref;
use std::path::PathBuf;
use thiserror::Error;

mod source;

pub use source::{CorpusSource, JsonFileSource};

/// One FAQ record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Entry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read corpus {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed corpus {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate entry id: {0}")]
    DuplicateId(String),
}

/// Ordered, immutable collection of entries with unique ids
///
/// Derefs to `[Entry]` so it can be handed straight to the ranker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<Entry>,
}

impl Corpus {
    /// Build a corpus, rejecting repeated ids
    pub fn new(entries: Vec<Entry>) -> Result<Self, CorpusError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CorpusError::DuplicateId(entry.id.clone()));
            }
        }

        Ok(Self { entries })
    }
}

impl Deref for Corpus {
    type Target = [Entry];

    fn deref(&self) -> &[Entry] {
        &self.entries
    }
}
