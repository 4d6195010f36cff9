//! CLI binary for linkscout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use linkscout::{report, Mode, RunConfig};
use tracing_subscriber::EnvFilter;

/// Find one keyword-relevant page per site and write a url,notes CSV.
#[derive(Parser)]
#[command(name = "linkscout", version, about)]
struct Cli {
    /// Text file with one site per line.
    #[arg(long)]
    sites: PathBuf,

    /// Keyword to search for.
    #[arg(long)]
    keyword: String,

    /// Output CSV file.
    #[arg(long, default_value = "results.csv")]
    out: PathBuf,

    /// Score threshold applied in strict mode.
    #[arg(long, default_value_t = 2.0)]
    threshold: f64,

    /// Selection mode: strict returns nothing below the threshold, loose
    /// always returns the best match.
    #[arg(long, default_value = "strict")]
    mode: Mode,

    /// Require at least one external link on the chosen page.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    require_external: bool,

    /// Number of parallel workers.
    #[arg(long, default_value_t = 8)]
    workers: usize,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 14)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkscout=info")),
        )
        .init();

    let cli = Cli::parse();

    let listing = std::fs::read_to_string(&cli.sites)
        .with_context(|| format!("reading site list {}", cli.sites.display()))?;
    let sites = report::parse_site_list(&listing);

    let config = RunConfig {
        keyword: cli.keyword,
        mode: cli.mode,
        threshold: cli.threshold,
        require_external: cli.require_external,
        worker_count: cli.workers,
        timeout_seconds: cli.timeout,
        ..Default::default()
    };

    let results = linkscout::find_links(&sites, &config).await?;

    std::fs::write(&cli.out, report::to_csv(&results))
        .with_context(|| format!("writing {}", cli.out.display()))?;

    println!("Done. Wrote {} rows to {}", results.len(), cli.out.display());
    Ok(())
}
