// pagination.rs
use crate::domain::BrokerListing;
use crate::scraper::fetcher::{PageResult, PageSource};
use crate::scraper::pacing::Pacer;
use crate::scraper::query::ListingQuery;
use crate::scraper::retry::RetryCoordinator;
use crate::scraper::ScraperError;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Knobs for one fetch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub first_page: u32,
    pub retry_rounds: u32,
    /// Stop walking after this many failed pages in a row. 0 disables the guard.
    pub max_consecutive_failures: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            first_page: 1,
            retry_rounds: 3,
            max_consecutive_failures: 5,
        }
    }
}

/// Accumulator owned by a single `fetch_all` run.
#[derive(Debug)]
struct FetchSession {
    pages: BTreeMap<u32, Vec<BrokerListing>>,
    failed_pages: BTreeSet<u32>,
    current_page: u32,
}

impl FetchSession {
    fn new(first_page: u32) -> Self {
        Self {
            pages: BTreeMap::new(),
            failed_pages: BTreeSet::new(),
            current_page: first_page,
        }
    }

    /// Records in page order, whichever pass fetched them.
    fn into_records(self) -> Vec<BrokerListing> {
        self.pages.into_values().flatten().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDiagnostics {
    pub pages_fetched: usize,
    pub failed_pages: Vec<u32>,
    pub recovered_pages: Vec<u32>,
    pub unrecovered_pages: Vec<u32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl FetchDiagnostics {
    pub fn recovered_count(&self) -> usize {
        self.recovered_pages.len()
    }

    pub fn unrecovered_count(&self) -> usize {
        self.unrecovered_pages.len()
    }
}

#[derive(Debug)]
pub struct FetchReport {
    pub records: Vec<BrokerListing>,
    pub diagnostics: FetchDiagnostics,
}

/// Walks every page of a query, then hands failed pages to the retry coordinator.
pub struct PaginationDriver<'a> {
    source: &'a dyn PageSource,
    pacer: &'a dyn Pacer,
    settings: FetchSettings,
}

impl<'a> PaginationDriver<'a> {
    pub fn new(source: &'a dyn PageSource, pacer: &'a dyn Pacer, settings: FetchSettings) -> Self {
        Self {
            source,
            pacer,
            settings,
        }
    }

    pub fn fetch_all(&self, query: &ListingQuery) -> Result<FetchReport, ScraperError> {
        let started_at = Utc::now();
        let mut session = FetchSession::new(self.settings.first_page);
        // largest page count any envelope has reported so far
        let mut known_total: Option<u32> = None;

        let mut pages_fetched = 0;
        let mut failed_pages = Vec::new();
        let mut recovered_pages = Vec::new();
        let mut unrecovered_pages = Vec::new();

        loop {
            pages_fetched += self.walk(query, &mut session, &mut known_total)?;
            if session.failed_pages.is_empty() {
                break;
            }

            let outstanding = std::mem::take(&mut session.failed_pages);
            let outcome = RetryCoordinator::new(self.source, self.pacer, self.settings.retry_rounds)
                .retry(&outstanding, query)?;
            debug!(rounds = outcome.rounds_used, "retry finished");

            failed_pages.extend(outstanding);
            recovered_pages.extend(outcome.recovered.keys().copied());
            unrecovered_pages.extend(outcome.unrecovered);
            session.pages.extend(outcome.recovered);

            // a recovered page may reveal pages beyond where the walk stopped
            match outcome.reported_total {
                Some(total) if session.current_page <= total => {
                    info!(from = session.current_page, total, "Resuming walk after recovery");
                    known_total = Some(known_total.map_or(total, |t| t.max(total)));
                }
                _ => break,
            }
        }

        failed_pages.sort_unstable();
        recovered_pages.sort_unstable();
        unrecovered_pages.sort_unstable();

        let diagnostics = FetchDiagnostics {
            pages_fetched,
            failed_pages,
            recovered_pages,
            unrecovered_pages,
            started_at,
            finished_at: Utc::now(),
        };
        let records = session.into_records();

        info!(
            offer_kind = %query.offer_kind,
            records = records.len(),
            pages = diagnostics.pages_fetched,
            recovered = diagnostics.recovered_count(),
            unrecovered = diagnostics.unrecovered_count(),
            "🏁 Fetch session complete"
        );
        if diagnostics.unrecovered_count() > 0 {
            warn!(pages = ?diagnostics.unrecovered_pages, "Listings from unrecovered pages are missing");
        }

        Ok(FetchReport {
            records,
            diagnostics,
        })
    }

    /// Walk forward from `session.current_page`. Returns the number of pages fetched.
    ///
    /// Once a page count is known the walk only ends past it, failures or not.
    /// The consecutive-failure guard applies only while no count is known.
    fn walk(
        &self,
        query: &ListingQuery,
        session: &mut FetchSession,
        known_total: &mut Option<u32>,
    ) -> Result<usize, ScraperError> {
        let mut fetched = 0;
        let mut consecutive_failures = 0;

        loop {
            let page = session.current_page;
            if page % 10 == 0 {
                info!(page, "📄 Fetching page");
            } else {
                debug!(page, "📄 Fetching page");
            }

            let result = self.source.fetch_page(query, page)?;
            session.current_page += 1;

            let more = match result {
                PageResult::Fetched(envelope) => {
                    fetched += 1;
                    consecutive_failures = 0;
                    *known_total = Some(known_total.map_or(envelope.total_pages, |t| {
                        t.max(envelope.total_pages)
                    }));
                    let more = envelope.has_next();
                    debug!(page, records = envelope.records.len(), more, "page parsed");
                    session.pages.insert(page, envelope.records);
                    more
                }
                PageResult::Failed(reason) => {
                    warn!(page, %reason, "⚠️ Page failed, retrying later");
                    session.failed_pages.insert(page);
                    consecutive_failures += 1;

                    match *known_total {
                        Some(total) => session.current_page <= total,
                        None => {
                            let guard = self.settings.max_consecutive_failures;
                            if guard > 0 && consecutive_failures >= guard {
                                warn!(consecutive_failures, "❌ Too many failures in a row, stopping walk");
                                false
                            } else {
                                true
                            }
                        }
                    }
                }
            };

            // unconditional, also after the last page
            self.pacer.pace();

            if !more {
                return Ok(fetched);
            }
        }
    }
}
