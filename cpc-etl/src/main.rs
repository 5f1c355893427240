//! cpc-etl - Charity project catalog merge
//!
//! Reads every registered source under `<data folder>/sources/`, merges the
//! projects and writes `<data folder>/projects.json`. Takes no arguments;
//! see `cpc_common::config` for how the data folder is found.
//!
//! Exits non-zero only if the configuration file is unreadable or the catalog
//! cannot be written. Problems with individual sources are logged and skipped.

use anyhow::{Context, Result};
use cpc_common::config::{CatalogConfig, ConfigOrigin, LoggingConfig};
use cpc_etl::{default_adapters, run_merge, TransformContext};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = CatalogConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!("Starting cpc-etl v{}", env!("CARGO_PKG_VERSION"));
    match &config.origin {
        ConfigOrigin::Environment => info!("Data folder from environment"),
        ConfigOrigin::ConfigFile(path) => info!("Data folder from {}", path.display()),
        ConfigOrigin::Default => info!("Data folder: compiled default"),
    }
    info!("Sources: {}", config.paths.sources_dir.display());
    info!("Output: {}", config.paths.output_file.display());

    let adapters = default_adapters();
    run_merge(&adapters, &config.paths, &TransformContext::current()).with_context(|| {
        format!(
            "Failed to write catalog to {}",
            config.paths.output_file.display()
        )
    })?;

    Ok(())
}
