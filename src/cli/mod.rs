use anyhow::Result;
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::config::Config;

/// Keyword search over a static FAQ corpus
#[derive(Parser, Debug)]
#[command(name = "faqsearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational output (only show results/errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to ~/.faqsearch/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Corpus file, overriding the configured one
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the corpus
    Search {
        /// Search query (e.g., "reset password")
        query: String,

        /// Maximum results to return
        #[arg(short = 'm', long)]
        limit: Option<NonZeroUsize>,

        /// Output JSON in the same shape as the HTTP API
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP search server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Reload the corpus when its file changes
        #[arg(short, long)]
        watch: bool,

        /// Read the corpus file on every request
        #[arg(long)]
        no_cache: bool,
    },

    /// Check that the corpus loads
    Validate,
}

impl Cli {
    /// Resolve the effective configuration: file, then flag overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(corpus) = &self.corpus {
            config.corpus_path = corpus.clone();
        }
        Ok(config)
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub async fn run(cli: Cli) -> Result<()> {
    if cli.quiet {
        crate::output::set_quiet(true);
    }

    let mut config = cli.resolve_config()?;

    match cli.command {
        Commands::Search { query, limit, json } => {
            // Auto-enable quiet mode for JSON output
            if json {
                crate::output::set_quiet(true);
            }
            crate::search::search(&config, &query, limit, json)
        }
        Commands::Serve {
            host,
            port,
            watch,
            no_cache,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.server.watch |= watch;
            config.server.cache_corpus &= !no_cache;

            crate::server::serve(config).await
        }
        Commands::Validate => crate::search::validate(&config),
    }
}
