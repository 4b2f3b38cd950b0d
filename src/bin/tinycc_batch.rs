//! Shorten a list of long URLs (one per line) in bounded batches.
//!
//! Usage: `tinycc-batch [FILE]` (reads stdin without FILE).
//! Configuration comes from the YAML file named by `TINYCC_CONFIG`, overlaid with
//! `TINYCC_*` environment variables. Set `RUST_LOG` for progress output.

use anyhow::Context;
use std::io::Read;
use tinycc_client::{ClientConfig, TinyccClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var("TINYCC_CONFIG") {
        Ok(path) => ClientConfig::from_yaml_file(&path)
            .with_context(|| format!("loading {}", path))?
            .with_env_overrides(),
        Err(_) => ClientConfig::from_env(),
    };
    let client = TinyccClient::from_config(config).context("building client")?;

    let mut input = String::new();
    match std::env::args().nth(1) {
        Some(path) => {
            input = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
        }
    }
    let long_urls: Vec<String> = input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect();
    anyhow::ensure!(!long_urls.is_empty(), "no URLs given");

    let response = client.mass_shorten(&long_urls, None).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        eprintln!("error: {}", response.error.message);
        std::process::exit(1);
    }
    let failed = response
        .url_records()?
        .iter()
        .filter(|r| r.item_error().is_some())
        .count();
    if failed > 0 {
        tracing::warn!(failed, total = long_urls.len(), "some URLs were not shortened");
    }
    Ok(())
}
