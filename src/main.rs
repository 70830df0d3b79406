use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faqsearch::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::parse();

    let default_filter = if cli.verbose {
        "faqsearch=debug,tower_http=debug"
    } else {
        "faqsearch=info,tower_http=info"
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting faqsearch v{}", env!("CARGO_PKG_VERSION"));

    cli::run(cli).await
}
