//! ivq-index - catalog build entry point for the static-site pipeline
//!
//! Loads the catalog configuration and a JSON question export, builds the
//! snapshot once and writes a JSON summary (build stats, company and topic
//! summaries, publishable cross-references, related links per entity) for the
//! page generator.

use anyhow::{Context, Result};
use clap::Parser;
use ivq_common::config::load_catalog_config;
use ivq_index::{
    link_table, BuildStats, Company, CompanyTopicCrossRef, JsonFileSource, LinkTable, SnapshotCache,
    Topic,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ivq-index", version, about = "Build the interview question catalog index")]
struct Args {
    /// JSON export of question records
    #[arg(long, env = "IVQ_DATA")]
    data: PathBuf,

    /// Catalog configuration TOML (falls back to IVQ_CONFIG, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the summary here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary<'a> {
    stats: &'a BuildStats,
    thin_content_threshold: usize,
    companies: &'a [Company],
    topics: &'a [Topic],
    publishable_cross_references: Vec<&'a CompanyTopicCrossRef>,
    related: LinkTable,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting ivq-index v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = load_catalog_config(args.config.as_deref())
        .context("Failed to load catalog configuration")?;
    info!(
        thin_content_threshold = config.thin_content_threshold,
        "Catalog configuration ready"
    );

    let source = JsonFileSource::new(&args.data);
    let cache = SnapshotCache::new(Arc::new(source), Arc::new(config));

    let snapshot = cache
        .get_snapshot()
        .await
        .with_context(|| format!("Failed to build catalog from {}", args.data.display()))?;

    let summary = Summary {
        stats: snapshot.stats(),
        thin_content_threshold: snapshot.thin_content_threshold(),
        companies: snapshot.companies(),
        topics: snapshot.topics(),
        publishable_cross_references: snapshot.publishable_cross_references(),
        related: link_table(&snapshot, cache.config().related_limit),
    };
    let json = serde_json::to_string_pretty(&summary)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Summary written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
