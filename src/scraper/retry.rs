use crate::domain::BrokerListing;
use crate::scraper::fetcher::{PageResult, PageSource};
use crate::scraper::pacing::Pacer;
use crate::scraper::query::ListingQuery;
use crate::scraper::ScraperError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct RetryOutcome {
    /// Records per recovered page.
    pub recovered: BTreeMap<u32, Vec<BrokerListing>>,
    /// Pages still failing once the round budget ran out. Their data is lost.
    pub unrecovered: Vec<u32>,
    pub rounds_used: u32,
    /// Largest page count reported by a recovered page that links onward.
    pub reported_total: Option<u32>,
}

/// Re-attempts failed pages for a bounded number of rounds.
pub struct RetryCoordinator<'a> {
    source: &'a dyn PageSource,
    pacer: &'a dyn Pacer,
    max_rounds: u32,
}

impl<'a> RetryCoordinator<'a> {
    pub fn new(source: &'a dyn PageSource, pacer: &'a dyn Pacer, max_rounds: u32) -> Self {
        Self {
            source,
            pacer,
            max_rounds,
        }
    }

    /// Page failures never make this fail; only a structural error does.
    pub fn retry(
        &self,
        failed_pages: &BTreeSet<u32>,
        query: &ListingQuery,
    ) -> Result<RetryOutcome, ScraperError> {
        let mut outstanding = failed_pages.clone();
        let mut outcome = RetryOutcome::default();

        for round in 1..=self.max_rounds {
            if outstanding.is_empty() {
                break;
            }
            outcome.rounds_used = round;
            info!(round, outstanding = outstanding.len(), "🔁 Retrying failed pages");

            let pending: Vec<u32> = outstanding.iter().copied().collect();
            for page in pending {
                let result = self.source.fetch_page(query, page)?;
                self.pacer.pace();

                match result {
                    PageResult::Fetched(envelope) => {
                        info!(page, round, records = envelope.records.len(), "✅ Page recovered");
                        outstanding.remove(&page);
                        if envelope.has_next() {
                            outcome.reported_total = Some(
                                outcome
                                    .reported_total
                                    .map_or(envelope.total_pages, |t| t.max(envelope.total_pages)),
                            );
                        }
                        outcome.recovered.insert(page, envelope.records);
                    }
                    PageResult::Failed(reason) => {
                        warn!(page, round, %reason, "⚠️ Retry failed");
                    }
                }
            }
        }

        outcome.unrecovered = outstanding.into_iter().collect();
        if !outcome.unrecovered.is_empty() {
            warn!(
                pages = ?outcome.unrecovered,
                "❌ Giving up on pages after {} rounds", self.max_rounds
            );
        }

        Ok(outcome)
    }
}
