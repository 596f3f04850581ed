//! link-rank - PageRank of a directory of linked HTML pages.
//!
//! # Usage
//!
//! ```bash
//! link-rank corpus0
//! link-rank corpus0 --damping 0.9 --samples 100000 --seed 3407
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use link_rank::page_rank::iterated;
use link_rank::{crawl, iterate_pagerank_with, report, sample_pagerank};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "link-rank")]
#[command(about = "Rank linked HTML pages by sampling and by iteration", long_about = None)]
struct Cli {
    /// Directory of HTML pages
    corpus: PathBuf,

    /// Probability of following a link instead of jumping anywhere
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Steps of the random surfer
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    /// Seed for the random surfer; drawn fresh when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Decimal places in the reports
    #[arg(long, default_value_t = 4)]
    precision: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let graph = crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "seeding random surfer");
    let mut rng = StdRng::seed_from_u64(seed);
    let ranks = sample_pagerank(&graph, cli.damping, cli.samples, &mut rng)
        .context("sampling failed")?;
    print!(
        "{}",
        report::render(
            &format!("PageRank Results from Sampling (n = {})", cli.samples),
            &ranks,
            cli.precision,
        )
    );

    let cfg = iterated::Config {
        damping: cli.damping,
        ..iterated::Config::default()
    };
    let ranks = iterate_pagerank_with(&graph, &cfg).context("iteration failed")?;
    print!(
        "{}",
        report::render("PageRank Results from Iteration", &ranks, cli.precision)
    );
    Ok(())
}
