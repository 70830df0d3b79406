use anyhow::Result;
use colored::Colorize;
use std::num::NonZeroUsize;
use std::time::Instant;

use crate::config::Config;
use crate::corpus::{CorpusSource, JsonFileSource};
use crate::{info_print, warn_print};
use crate::query::Query;
use crate::rank::SearchOutcome;

/// Longest body shown in a result before it is cut
const SNIPPET_CHARS: usize = 160;

/// Search the corpus from the command line
pub fn search(config: &Config, raw_query: &str, limit: Option<NonZeroUsize>, json: bool) -> Result<()> {
    let query = Query::parse(raw_query)?;
    let limit = limit.unwrap_or(config.search.limit);

    let start = Instant::now();
    let corpus = JsonFileSource::new(&config.corpus_path).load()?;
    let load_duration = start.elapsed();

    let start = Instant::now();
    let outcome = config.search.ranker().rank(&corpus, query.as_str(), limit);
    let rank_duration = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    info_print!("{}", "🔍 Search Results".bright_cyan().bold());
    info_print!("{}", "=".repeat(60));
    info_print!("Query: \"{}\"", query.as_str().bright_yellow());
    info_print!(
        "Searched {} entries in {:?} (load {:?})",
        corpus.len(),
        rank_duration,
        load_duration
    );
    info_print!();

    print_outcome(&outcome);
    Ok(())
}

/// Load and check a corpus, reporting what was found
pub fn validate(config: &Config) -> Result<()> {
    let source = JsonFileSource::new(&config.corpus_path);

    match source.load() {
        Ok(corpus) => {
            println!(
                "{} {} ({} entries)",
                "✅ Corpus OK:".green(),
                source.describe(),
                corpus.len()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌ Corpus invalid:".red(), e);
            Err(e.into())
        }
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    if let Some(message) = &outcome.message {
        println!("{}", message.dimmed());
        warn_print!("Try using different keywords");
        return;
    }

    if let Some(summary) = &outcome.summary {
        println!("{}", "Summary".bright_yellow().bold());
        println!("   {}", summary);
        println!("   {} {}", "Sources:".dimmed(), outcome.sources.join(", ").dimmed());
        println!();
    }

    println!("Found {} results", outcome.results.len());
    for (idx, entry) in outcome.results.iter().enumerate() {
        println!("{}", "─".repeat(60));
        println!("{} {}", format!("#{}", idx + 1).bright_cyan(), entry.title.bright_green());
        println!("   {}", snippet(&entry.body).dimmed());
        println!("   {}", format!("ID: {}", entry.id).dimmed());
    }
    println!();
}

fn snippet(body: &str) -> String {
    if body.chars().count() > SNIPPET_CHARS {
        let cut: String = body.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
