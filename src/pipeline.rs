use crate::domain::{aggregate, aggregate_by_offer_kind, OfferKind, RankedSummary};
use crate::scraper::{Harvest, ListingsClient, Objective, ScraperError};
use tracing::{info, warn};

/// A ranking plus the file stem it is written under.
#[derive(Debug)]
pub struct NamedReport {
    pub name: String,
    pub summaries: Vec<RankedSummary>,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub reports: Vec<NamedReport>,
    /// Pages lost across every session of the run.
    pub unrecovered_pages: usize,
}

/// Fetch both objectives and build the four rankings.
///
/// A structural failure in any session aborts the run before anything is
/// returned, so no report is ever built from a partial session.
pub fn build_reports(client: &ListingsClient<'_>, locality: &str) -> Result<RunOutcome, ScraperError> {
    let all = client.fetch_objective(Objective::AllLocality)?;
    log_harvest(Objective::AllLocality, &all);

    info!("Transforming broker data for {locality}...");
    let mut reports = vec![
        NamedReport {
            name: format!("{locality}_overall"),
            summaries: aggregate(&all.records),
        },
        NamedReport {
            name: format!("{locality}_purchase_only"),
            summaries: aggregate_by_offer_kind(&all.records, OfferKind::Purchase),
        },
        NamedReport {
            name: format!("{locality}_rent_only"),
            summaries: aggregate_by_offer_kind(&all.records, OfferKind::Rent),
        },
    ];

    let garden = client.fetch_objective(Objective::Garden)?;
    log_harvest(Objective::Garden, &garden);
    reports.push(NamedReport {
        name: "garden_overall".to_string(),
        summaries: aggregate(&garden.records),
    });

    Ok(RunOutcome {
        reports,
        unrecovered_pages: all.unrecovered_pages() + garden.unrecovered_pages(),
    })
}

fn log_harvest(objective: Objective, harvest: &Harvest) {
    for session in &harvest.sessions {
        let d = &session.diagnostics;
        info!(
            offer_kind = %session.offer_kind,
            category = session.category.as_deref().unwrap_or("-"),
            pages = d.pages_fetched,
            failed = d.failed_pages.len(),
            recovered = d.recovered_count(),
            elapsed_ms = (d.finished_at - d.started_at).num_milliseconds(),
            "Session finished for {objective}"
        );
    }

    if harvest.unrecovered_pages() > 0 {
        warn!(
            unrecovered = harvest.unrecovered_pages(),
            "Report for {objective} has gaps"
        );
    }
}
