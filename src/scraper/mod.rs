pub mod fetcher;
mod models;
pub mod pacing;
pub mod pagination;
pub mod query;
pub mod retry;
pub(crate) mod scraper;
mod scraper_error;

pub use fetcher::HttpPageFetcher;
pub use pacing::{FixedInterval, NoPacing, Pacer};
pub use pagination::FetchSettings;
pub use query::Endpoint;
pub use scraper::{Harvest, ListingsClient, Objective};
pub use scraper_error::ScraperError;
