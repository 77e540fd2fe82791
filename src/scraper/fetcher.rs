// fetcher.rs
use crate::domain::BrokerListing;
use crate::scraper::models::ApiEnvelope;
use crate::scraper::query::{Endpoint, ListingQuery};
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("funda_brokers/", env!("CARGO_PKG_VERSION"));

/// How much of an error body is kept for diagnostics.
const BODY_SNIPPET_CHARS: usize = 200;

/// One decoded page of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEnvelope {
    pub records: Vec<BrokerListing>,
    pub current_page: u32,
    pub total_pages: u32,
    pub next_page_url: Option<String>,
}

impl PageEnvelope {
    /// Both the page counter and the next-page link must agree that more pages exist.
    pub fn has_next(&self) -> bool {
        self.current_page <= self.total_pages
            && self
                .next_page_url
                .as_deref()
                .is_some_and(|u| !u.trim().is_empty())
    }
}

/// Why a page could not be used this time. Always worth retrying later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFailure {
    Status { code: u16, body: String },
    EmptyBody,
    Network(String),
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageFailure::Status { code, body } => write!(f, "HTTP {code}: {body}"),
            PageFailure::EmptyBody => write!(f, "empty or null response body"),
            PageFailure::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult {
    Fetched(PageEnvelope),
    Failed(PageFailure),
}

/// Anything that can produce one page of listings for a query.
pub trait PageSource {
    fn fetch_page(&self, query: &ListingQuery, page: u32) -> Result<PageResult, ScraperError>;
}

/// Issues a single GET per page. No retries and no pacing.
pub struct HttpPageFetcher {
    client: Client,
    endpoint: Endpoint,
}

impl HttpPageFetcher {
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

impl PageSource for HttpPageFetcher {
    fn fetch_page(&self, query: &ListingQuery, page: u32) -> Result<PageResult, ScraperError> {
        // the url carries the api key, never log it
        let url = query.page_url(&self.endpoint, page)?;

        let resp = match self.client.get(url).send() {
            Ok(resp) => resp,
            Err(e) => return Ok(PageResult::Failed(PageFailure::Network(e.without_url().to_string()))),
        };

        let status = resp.status();
        let body = match resp.text() {
            Ok(body) => body,
            Err(e) => return Ok(PageResult::Failed(PageFailure::Network(e.without_url().to_string()))),
        };

        debug!(page, status = status.as_u16(), bytes = body.len(), "page response received");
        decode_page(page, status, &body)
    }
}

/// Classify one HTTP response.
pub fn decode_page(page: u32, status: StatusCode, body: &str) -> Result<PageResult, ScraperError> {
    if !status.is_success() {
        return Ok(PageResult::Failed(PageFailure::Status {
            code: status.as_u16(),
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        }));
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(PageResult::Failed(PageFailure::EmptyBody));
    }

    let envelope: ApiEnvelope = serde_json::from_str(trimmed).map_err(|e| ScraperError::Structural {
        page,
        reason: e.to_string(),
    })?;

    let Some(objects) = envelope.objects else {
        return Ok(PageResult::Failed(PageFailure::EmptyBody));
    };

    let records = objects
        .into_iter()
        .map(|o| BrokerListing {
            broker_id: o.makelaar_id,
            broker_name: o.makelaar_naam.unwrap_or_default(),
        })
        .collect();

    Ok(PageResult::Fetched(PageEnvelope {
        records,
        current_page: envelope.paging.huidige_pagina,
        total_pages: envelope.paging.aantal_paginas,
        next_page_url: envelope.paging.volgende_url,
    }))
}
