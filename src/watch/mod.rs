use anyhow::{anyhow, Context, Result};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::CorpusStore;

/// Quiet period before a burst of file events triggers one reload
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Reloads a [`CorpusStore`] whenever the corpus file changes
///
/// The parent directory is watched rather than the file itself, since editors
/// often replace a file instead of writing it in place. Dropping the watcher
/// stops it.
pub struct CorpusWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher, FileIdMap>,
}

impl CorpusWatcher {
    pub fn spawn(corpus_path: &Path, store: Arc<CorpusStore>) -> Result<Self> {
        let path = corpus_path
            .canonicalize()
            .with_context(|| format!("Cannot watch {}", corpus_path.display()))?;
        let dir = path
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent directory", path.display()))?
            .to_path_buf();
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow!("{} is not a file", path.display()))?
            .to_os_string();

        let mut debouncer = new_debouncer(DEBOUNCE, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let changed = events
                        .iter()
                        .any(|e| !e.kind.is_access() && touches_file(&e.paths, &file_name));
                    if changed {
                        debug!("Corpus file changed, reloading");
                        if let Err(e) = store.reload() {
                            warn!("Corpus reload failed, keeping previous snapshot: {}", e);
                        }
                    }
                }
                Err(errors) => {
                    for e in errors {
                        warn!("Watch error: {}", e);
                    }
                }
            }
        })?;

        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)?;

        info!("Watching {} for changes", path.display());

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

fn touches_file(paths: &[PathBuf], file_name: &OsString) -> bool {
    paths
        .iter()
        .any(|p| p.file_name().map_or(false, |name| name == file_name.as_os_str()))
}
