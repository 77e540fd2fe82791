use crate::domain::BrokerListing;
use crate::scraper::fetcher::{PageEnvelope, PageFailure, PageResult, PageSource};
use crate::scraper::pacing::Pacer;
use crate::scraper::query::ListingQuery;
use crate::scraper::ScraperError;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

/// What a scripted page answers on one request.
#[derive(Debug, Clone)]
pub enum Step {
    Page(PageEnvelope),
    Fail,
    Structural,
}

/// Page source answering from a per-page script. The last step of a page
/// repeats forever; unscripted pages panic so overreaching walks show up.
#[derive(Default)]
pub struct ScriptedSource {
    script: RefCell<HashMap<u32, VecDeque<Step>>>,
    calls: RefCell<Vec<u32>>,
    queries: RefCell<Vec<ListingQuery>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the script for `page`.
    pub fn script(self, page: u32, steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "page {page} needs at least one step");
        self.script.borrow_mut().insert(page, steps.into());
        self
    }

    /// Page numbers in request order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }

    pub fn queries(&self) -> Vec<ListingQuery> {
        self.queries.borrow().clone()
    }
}

impl PageSource for ScriptedSource {
    fn fetch_page(&self, query: &ListingQuery, page: u32) -> Result<PageResult, ScraperError> {
        self.calls.borrow_mut().push(page);
        self.queries.borrow_mut().push(query.clone());

        let mut script = self.script.borrow_mut();
        let steps = script
            .get_mut(&page)
            .unwrap_or_else(|| panic!("page {page} not scripted"));
        let step = if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().unwrap()
        };

        match step {
            Step::Page(envelope) => Ok(PageResult::Fetched(envelope)),
            Step::Fail => Ok(PageResult::Failed(PageFailure::Status {
                code: 503,
                body: "Service Unavailable".to_string(),
            })),
            Step::Structural => Err(ScraperError::Structural {
                page,
                reason: "expected value at line 1 column 1".to_string(),
            }),
        }
    }
}

/// Pacer that only counts.
#[derive(Default)]
pub struct CountingPacer {
    calls: Cell<usize>,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.calls.get()
    }
}

impl Pacer for CountingPacer {
    fn pace(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

/// Page `page` of `total` holding `count` brokers with ids `page * 100 + i`.
pub fn envelope(page: u32, total: u32, count: usize) -> PageEnvelope {
    let records = (0..count)
        .map(|i| {
            let id = i64::from(page) * 100 + i as i64;
            BrokerListing {
                broker_id: id,
                broker_name: format!("Makelaar {id}"),
            }
        })
        .collect();

    PageEnvelope {
        records,
        current_page: page,
        total_pages: total,
        next_page_url: (page < total).then(|| format!("/~/koop/amsterdam/p{}/", page + 1)),
    }
}

/// A healthy one-based feed of `total` pages.
pub fn feed(total: u32, per_page: usize) -> ScriptedSource {
    (1..=total).fold(ScriptedSource::new(), |source, page| {
        source.script(page, vec![Step::Page(envelope(page, total, per_page))])
    })
}
