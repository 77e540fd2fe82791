// scraper.rs
use crate::domain::{stamp_offer_kind, ListingRecord, OfferKind};
use crate::scraper::fetcher::PageSource;
use crate::scraper::pacing::Pacer;
use crate::scraper::pagination::{FetchDiagnostics, FetchSettings, PaginationDriver};
use crate::scraper::query::ListingQuery;
use crate::scraper::ScraperError;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Feed category for listings with a garden.
pub const GARDEN_CATEGORY: &str = "tuin";

/// Which listings a run collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Purchase and rent listings in the locality.
    AllLocality,
    /// Purchase listings with a garden in the locality.
    Garden,
}

impl FromStr for Objective {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allamsterdam" | "all" => Ok(Objective::AllLocality),
            "garden" => Ok(Objective::Garden),
            other => Err(ScraperError::InvalidArgument(format!(
                "objective '{other}' is not supported, use 'allamsterdam' or 'garden'"
            ))),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::AllLocality => write!(f, "all listings"),
            Objective::Garden => write!(f, "garden listings"),
        }
    }
}

/// Diagnostics of one session inside a harvest.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub offer_kind: OfferKind,
    pub category: Option<String>,
    pub diagnostics: FetchDiagnostics,
}

/// Everything one objective produced.
#[derive(Debug)]
pub struct Harvest {
    pub records: Vec<ListingRecord>,
    pub sessions: Vec<SessionSummary>,
}

impl Harvest {
    /// Pages whose listings are missing from `records`.
    pub fn unrecovered_pages(&self) -> usize {
        self.sessions
            .iter()
            .map(|s| s.diagnostics.unrecovered_count())
            .sum()
    }
}

/// Runs the fetch sessions an objective needs and stamps their offer kinds.
pub struct ListingsClient<'a> {
    source: &'a dyn PageSource,
    pacer: &'a dyn Pacer,
    settings: FetchSettings,
    locality: String,
    page_size: u32,
}

impl<'a> ListingsClient<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        pacer: &'a dyn Pacer,
        settings: FetchSettings,
        locality: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            pacer,
            settings,
            locality: locality.into(),
            page_size,
        }
    }

    pub fn fetch_objective(&self, objective: Objective) -> Result<Harvest, ScraperError> {
        let queries = match objective {
            Objective::AllLocality => vec![
                ListingQuery::new(OfferKind::Purchase, &self.locality, self.page_size),
                ListingQuery::new(OfferKind::Rent, &self.locality, self.page_size),
            ],
            Objective::Garden => vec![
                ListingQuery::new(OfferKind::Purchase, &self.locality, self.page_size)
                    .with_category(GARDEN_CATEGORY),
            ],
        };

        let mut harvest = Harvest {
            records: Vec::new(),
            sessions: Vec::new(),
        };

        for query in queries {
            info!(
                offer_kind = %query.offer_kind,
                locality = %query.locality,
                category = query.category.as_deref().unwrap_or("-"),
                "🧵 Fetching {objective}"
            );

            // a fresh driver per session, nothing carries over
            let report = PaginationDriver::new(self.source, self.pacer, self.settings).fetch_all(&query)?;

            harvest
                .records
                .extend(stamp_offer_kind(report.records, query.offer_kind));
            harvest.sessions.push(SessionSummary {
                offer_kind: query.offer_kind,
                category: query.category,
                diagnostics: report.diagnostics,
            });
        }

        Ok(harvest)
    }
}
