use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::corpus::{Corpus, CorpusError, CorpusSource};

/// Snapshots are keyed by source, and a store only ever holds one source
const SNAPSHOT_CAPACITY: u64 = 8;

/// Process-wide, read-only corpus snapshot
///
/// Readers get an `Arc<Corpus>` and keep it for the whole request. Updates
/// replace the whole snapshot, so a reader never sees a half-loaded corpus.
/// With caching disabled every call goes back to the source.
pub struct CorpusStore {
    source: Arc<dyn CorpusSource>,
    key: String,
    snapshots: Cache<String, Arc<Corpus>>,
    caching: bool,
    hits: AtomicU64,
    misses: AtomicU64,
    reloads: AtomicU64,
}

impl CorpusStore {
    pub fn new(source: impl CorpusSource + 'static) -> Self {
        let key = source.describe();

        Self {
            source: Arc::new(source),
            key,
            snapshots: Cache::new(SNAPSHOT_CAPACITY),
            caching: true,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            reloads: AtomicU64::new(0),
        }
    }

    /// Set whether snapshots are cached between calls (default: true)
    pub fn caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    /// Name of the underlying source
    pub fn describe(&self) -> &str {
        &self.key
    }

    /// Current snapshot, loading it on first use
    pub fn snapshot(&self) -> Result<Arc<Corpus>, CorpusError> {
        if !self.caching {
            return self.source.load().map(Arc::new);
        }

        if let Some(corpus) = self.snapshots.get(&self.key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(corpus);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let corpus = Arc::new(self.source.load()?);
        self.snapshots.insert(self.key.clone(), corpus.clone());
        debug!("Cached corpus snapshot for {} ({} entries)", self.key, corpus.len());

        Ok(corpus)
    }

    /// Load a fresh corpus and swap it in
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<Corpus>, CorpusError> {
        let corpus = Arc::new(self.source.load()?);
        self.reloads.fetch_add(1, Ordering::Relaxed);

        if self.caching {
            self.snapshots.insert(self.key.clone(), corpus.clone());
        }
        info!("Reloaded corpus {} ({} entries)", self.key, corpus.len());

        Ok(corpus)
    }

    /// Drop the cached snapshot; the next read loads from the source
    pub fn invalidate(&self) {
        self.snapshots.invalidate(&self.key);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reloads: self.reloads.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub reloads: u64,
}
