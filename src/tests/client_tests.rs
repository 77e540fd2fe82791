// src/tests/client_tests.rs

use crate::domain::OfferKind;
use crate::pipeline::build_reports;
use crate::scraper::pacing::NoPacing;
use crate::scraper::scraper::GARDEN_CATEGORY;
use crate::scraper::{FetchSettings, ListingsClient, Objective, ScraperError};
use crate::tests::utils::{feed, ScriptedSource, Step};

fn client<'a>(source: &'a ScriptedSource, pacer: &'a NoPacing) -> ListingsClient<'a> {
    ListingsClient::new(source, pacer, FetchSettings::default(), "amsterdam", 25)
}

#[test]
fn all_objective_runs_purchase_then_rent_and_stamps_kinds() {
    let source = feed(2, 2);
    let pacer = NoPacing;

    let harvest = client(&source, &pacer)
        .fetch_objective(Objective::AllLocality)
        .unwrap();

    // same pages served to both sessions
    assert_eq!(source.calls(), vec![1, 2, 1, 2]);
    let kinds: Vec<OfferKind> = source.queries().iter().map(|q| q.offer_kind).collect();
    assert_eq!(
        kinds,
        vec![OfferKind::Purchase, OfferKind::Purchase, OfferKind::Rent, OfferKind::Rent]
    );

    assert_eq!(harvest.records.len(), 8);
    assert!(harvest.records[..4].iter().all(|r| r.offer_kind == OfferKind::Purchase));
    assert!(harvest.records[4..].iter().all(|r| r.offer_kind == OfferKind::Rent));
    assert_eq!(harvest.sessions.len(), 2);
    assert_eq!(harvest.unrecovered_pages(), 0);
}

#[test]
fn garden_objective_is_purchase_only_with_category() {
    let source = feed(1, 3);
    let pacer = NoPacing;

    let harvest = client(&source, &pacer)
        .fetch_objective(Objective::Garden)
        .unwrap();

    let queries = source.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].offer_kind, OfferKind::Purchase);
    assert_eq!(queries[0].category.as_deref(), Some(GARDEN_CATEGORY));
    assert_eq!(queries[0].search_path(), "/amsterdam/tuin/");
    assert!(harvest.records.iter().all(|r| r.offer_kind == OfferKind::Purchase));
}

#[test]
fn unknown_objective_is_invalid_argument() {
    assert_eq!("allamsterdam".parse::<Objective>().unwrap(), Objective::AllLocality);
    assert_eq!("Garden".parse::<Objective>().unwrap(), Objective::Garden);

    match "balcony".parse::<Objective>() {
        Err(ScraperError::InvalidArgument(msg)) => assert!(msg.contains("balcony")),
        other => panic!("expected InvalidArgument, got: {:?}", other),
    }
}

#[test]
fn unrecovered_pages_are_counted_across_sessions() {
    // page 2 never comes back, for purchase and rent alike
    let source = feed(3, 1).script(2, vec![Step::Fail]);
    let pacer = NoPacing;

    let harvest = client(&source, &pacer)
        .fetch_objective(Objective::AllLocality)
        .unwrap();

    assert_eq!(harvest.unrecovered_pages(), 2);
    let ids: Vec<i64> = harvest.records.iter().map(|r| r.broker_id).collect();
    assert_eq!(ids, vec![100, 300, 100, 300]);
}

#[test]
fn build_reports_produces_four_rankings() {
    // page 1 holds brokers 100 and 101, page 2 holds 200 and 201
    let source = feed(2, 2);
    let pacer = NoPacing;

    let outcome = build_reports(&client(&source, &pacer), "amsterdam").unwrap();

    let names: Vec<&str> = outcome.reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "amsterdam_overall",
            "amsterdam_purchase_only",
            "amsterdam_rent_only",
            "garden_overall"
        ]
    );

    // purchase and rent see the same four brokers, so each counts twice overall
    let overall = &outcome.reports[0].summaries;
    assert_eq!(overall.len(), 4);
    assert!(overall.iter().all(|s| s.count == 2));
    assert_eq!(overall[0].broker_id, 100);
    assert_eq!(overall[0].offer_kind, OfferKind::Purchase);

    let rent = &outcome.reports[2].summaries;
    assert!(rent.iter().all(|s| s.offer_kind == OfferKind::Rent && s.count == 1));

    let garden = &outcome.reports[3].summaries;
    assert_eq!(garden.len(), 4);
    assert_eq!(outcome.unrecovered_pages, 0);
}

#[test]
fn structural_failure_aborts_whole_run() {
    let source = feed(2, 1).script(2, vec![Step::Structural]);
    let pacer = NoPacing;

    let result = build_reports(&client(&source, &pacer), "amsterdam");
    assert!(matches!(result, Err(ScraperError::Structural { page: 2, .. })));
    // rent and garden sessions never start
    assert_eq!(source.calls(), vec![1, 2]);
}
