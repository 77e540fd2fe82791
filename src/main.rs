use crate::config::Config;
use crate::scraper::{Endpoint, FixedInterval, HttpPageFetcher, ListingsClient, NoPacing, Pacer};
use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod errors;
mod pipeline;
mod reports;
mod scraper;
mod spreadsheets;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,funda_brokers=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // 2️⃣ Configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        locality = %config.locality,
        page_size = config.page_size,
        pacing = ?config.pacing,
        retry_rounds = config.fetch.retry_rounds,
        "Starting broker extraction"
    );

    // 3️⃣ Feed client
    let endpoint = Endpoint::new(&config.base_url, &config.api_key)
        .context("FUNDA_BASE_URL is not a usable url")?;
    let fetcher = HttpPageFetcher::new(endpoint, config.request_timeout)
        .context("Failed to build HTTP client")?;
    let pacer: Box<dyn Pacer> = if config.pacing.is_zero() {
        Box::new(NoPacing)
    } else {
        Box::new(FixedInterval(config.pacing))
    };
    let client = ListingsClient::new(
        &fetcher,
        pacer.as_ref(),
        config.fetch,
        &config.locality,
        config.page_size,
    );

    // 4️⃣ Fetch and rank
    let outcome = pipeline::build_reports(&client, &config.locality)
        .context("Fetching listings failed")?;

    // 5️⃣ Export
    for report in &outcome.reports {
        reports::create_output(&report.summaries, &config.output_dir, &report.name)
            .with_context(|| format!("Failed to write report '{}'", report.name))?;
    }

    if outcome.unrecovered_pages > 0 {
        warn!(
            unrecovered_pages = outcome.unrecovered_pages,
            "Some pages never recovered; reports cover the remaining listings"
        );
    }
    info!("✅ Done");
    Ok(())
}
