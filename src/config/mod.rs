use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::rank::{PhraseBonus, Ranker, Scorer, DEFAULT_LIMIT, DEFAULT_NO_MATCH_MESSAGE};

/// Name of the per-user config file under the data directory
const CONFIG_FILE: &str = "config.toml";

/// Global configuration for faqsearch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the JSON corpus file
    pub corpus_path: PathBuf,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Ranking configuration
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Keep one corpus snapshot in memory instead of reading the file per request
    pub cache_corpus: bool,

    /// Reload the corpus when its file changes
    pub watch: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned when a request does not ask for a limit
    pub limit: NonZeroUsize,

    /// How often the full-query bonus is applied
    pub phrase_bonus: PhraseBonus,

    /// Message returned with an empty result set
    pub no_match_message: String,
}

impl Config {
    /// Load from `path`, or from `~/.faqsearch/config.toml` when present,
    /// falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Location of the per-user config file, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".faqsearch").join(CONFIG_FILE))
    }
}

impl SearchConfig {
    /// Build the ranker this configuration describes
    pub fn ranker(&self) -> Ranker {
        Ranker::new(Scorer::new(self.phrase_bonus))
            .with_no_match_message(self.no_match_message.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("data").join("faqs.json"),
            server: ServerConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cache_corpus: true,
            watch: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            phrase_bonus: PhraseBonus::PerTerm,
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_string(),
        }
    }
}
