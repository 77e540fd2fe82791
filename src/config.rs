use crate::errors::ConfigError;
use crate::scraper::FetchSettings;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://partnerapi.funda.nl/feeds/Aanbod.svc/json";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub locality: String,
    pub page_size: u32,
    pub pacing: Duration,
    pub request_timeout: Duration,
    pub fetch: FetchSettings,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = FetchSettings::default();

        Ok(Self {
            api_key: get("FUNDA_API_KEY").ok_or(ConfigError::Missing("FUNDA_API_KEY"))?,
            base_url: get("FUNDA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            locality: get("FUNDA_LOCALITY").unwrap_or_else(|| "amsterdam".to_string()),
            page_size: parse_or(get("FUNDA_PAGE_SIZE"), "FUNDA_PAGE_SIZE", 25)?,
            pacing: Duration::from_millis(parse_or(get("FUNDA_PACING_MS"), "FUNDA_PACING_MS", 500)?),
            request_timeout: Duration::from_secs(parse_or(
                get("FUNDA_TIMEOUT_SECS"),
                "FUNDA_TIMEOUT_SECS",
                30,
            )?),
            fetch: FetchSettings {
                first_page: parse_or(get("FUNDA_FIRST_PAGE"), "FUNDA_FIRST_PAGE", defaults.first_page)?,
                retry_rounds: parse_or(
                    get("FUNDA_RETRY_ROUNDS"),
                    "FUNDA_RETRY_ROUNDS",
                    defaults.retry_rounds,
                )?,
                max_consecutive_failures: parse_or(
                    get("FUNDA_MAX_CONSECUTIVE_FAILURES"),
                    "FUNDA_MAX_CONSECUTIVE_FAILURES",
                    defaults.max_consecutive_failures,
                )?,
            },
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { name, value })
        }
    }
}
