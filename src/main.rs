use anyhow::{Context, Result};
use clap::Parser;
use pubmed_affiliations::config::{load_config, Config};
use pubmed_affiliations::models::SearchQuery;
use pubmed_affiliations::sources::PubMedSource;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Search PubMed and list which authors have non-academic affiliations
#[derive(Parser, Debug)]
#[command(name = "pubmed-affiliations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search PubMed and list which authors have non-academic affiliations", long_about = None)]
struct Cli {
    /// PubMed search query
    query: String,

    /// Enable debug mode
    #[arg(long, short)]
    debug: bool,

    /// File to save results (CSV)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(log_filter(cli.debug, std::env::var("RUST_LOG").ok())?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting fetch for query: {}", cli.query);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Using config file: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    let source = PubMedSource::from_config(&config)?;
    let query = SearchQuery::new(&cli.query).max_results(config.pubmed.max_results);

    let stdout = std::io::stdout();
    pubmed_affiliations::run(&source, &query, cli.file.as_deref(), &mut stdout.lock())
        .with_context(|| format!("Search for {:?} failed", cli.query))?;

    Ok(())
}

/// Build the log filter. `RUST_LOG` replaces the default, and `--debug`
/// always turns on this crate's diagnostics on top of either.
fn log_filter(debug: bool, rust_log: Option<String>) -> Result<EnvFilter> {
    let filter = EnvFilter::new(rust_log.unwrap_or_else(|| "pubmed_affiliations=info".to_string()));
    if debug {
        return Ok(filter.add_directive("pubmed_affiliations=debug".parse()?));
    }
    Ok(filter)
}
