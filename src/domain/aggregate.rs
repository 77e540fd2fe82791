// aggregate.rs
use crate::domain::listing::{ListingRecord, OfferKind, RankedSummary};
use std::collections::HashMap;

/// Number of brokers kept in a ranking.
pub const TOP_N: usize = 10;

/// Rank brokers by number of listings, keeping the top ten.
///
/// Groups on `broker_id`; name and offer kind come from the first record seen
/// for each broker. Brokers with equal counts keep their first-encounter order.
pub fn aggregate(records: &[ListingRecord]) -> Vec<RankedSummary> {
    rank(records.iter())
}

/// Same as [`aggregate`], restricted to records of one offer kind.
pub fn aggregate_by_offer_kind(records: &[ListingRecord], kind: OfferKind) -> Vec<RankedSummary> {
    rank(records.iter().filter(|r| r.offer_kind == kind))
}

fn rank<'a>(records: impl Iterator<Item = &'a ListingRecord>) -> Vec<RankedSummary> {
    let mut groups = group_by_broker(records);

    // sort_by is stable, ties stay in encounter order
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(TOP_N);
    groups
}

fn group_by_broker<'a>(records: impl Iterator<Item = &'a ListingRecord>) -> Vec<RankedSummary> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<RankedSummary> = Vec::new();

    for record in records {
        match index.get(&record.broker_id) {
            Some(&slot) => groups[slot].count += 1,
            None => {
                index.insert(record.broker_id, groups.len());
                groups.push(RankedSummary {
                    broker_id: record.broker_id,
                    broker_name: record.broker_name.clone(),
                    offer_kind: record.offer_kind,
                    count: 1,
                });
            }
        }
    }

    groups
}
