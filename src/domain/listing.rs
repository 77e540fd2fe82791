use crate::scraper::ScraperError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction type of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferKind {
    Purchase,
    Rent,
}

impl OfferKind {
    /// Value of the `type` query parameter on the feed.
    pub fn api_type(self) -> &'static str {
        match self {
            OfferKind::Purchase => "koop",
            OfferKind::Rent => "huur",
        }
    }
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferKind::Purchase => write!(f, "Purchase"),
            OfferKind::Rent => write!(f, "Rent"),
        }
    }
}

impl FromStr for OfferKind {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "purchase" | "koop" => Ok(OfferKind::Purchase),
            "rent" | "huur" => Ok(OfferKind::Rent),
            other => Err(ScraperError::InvalidArgument(format!(
                "offer kind '{other}' is not supported, use 'purchase' or 'rent'"
            ))),
        }
    }
}

/// One broker entry exactly as the feed returns it. The feed carries no offer
/// kind, that is stamped per fetch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerListing {
    pub broker_id: i64,
    pub broker_name: String,
}

/// One fetched listing after its session's offer kind has been stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    pub broker_id: i64,
    pub broker_name: String,
    pub offer_kind: OfferKind,
    // unused until aggregation
    pub listing_count: u32,
}

impl ListingRecord {
    pub fn new(broker_id: i64, broker_name: impl Into<String>, offer_kind: OfferKind) -> Self {
        Self {
            broker_id,
            broker_name: broker_name.into(),
            offer_kind,
            listing_count: 0,
        }
    }
}

/// Stamp every listing of a finished session with that session's offer kind.
pub fn stamp_offer_kind(listings: Vec<BrokerListing>, kind: OfferKind) -> Vec<ListingRecord> {
    listings
        .into_iter()
        .map(|l| ListingRecord::new(l.broker_id, l.broker_name, kind))
        .collect()
}

/// Per-broker listing count, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSummary {
    pub broker_id: i64,
    pub broker_name: String,
    pub offer_kind: OfferKind,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_kind_parses_english_and_feed_names() {
        assert_eq!("purchase".parse::<OfferKind>().unwrap(), OfferKind::Purchase);
        assert_eq!(" Koop ".parse::<OfferKind>().unwrap(), OfferKind::Purchase);
        assert_eq!("RENT".parse::<OfferKind>().unwrap(), OfferKind::Rent);
        assert_eq!("huur".parse::<OfferKind>().unwrap(), OfferKind::Rent);
    }

    #[test]
    fn offer_kind_rejects_unknown_value() {
        match "lease".parse::<OfferKind>() {
            Err(ScraperError::InvalidArgument(msg)) => assert!(msg.contains("lease")),
            other => panic!("expected InvalidArgument, got: {:?}", other),
        }
    }

    #[test]
    fn stamping_sets_kind_and_zero_count() {
        let raw = vec![
            BrokerListing {
                broker_id: 7,
                broker_name: "Makelaardij Zeven".to_string(),
            },
            BrokerListing {
                broker_id: 8,
                broker_name: "Acht Wonen".to_string(),
            },
        ];

        let stamped = stamp_offer_kind(raw, OfferKind::Rent);

        assert_eq!(stamped.len(), 2);
        assert!(stamped.iter().all(|r| r.offer_kind == OfferKind::Rent));
        assert!(stamped.iter().all(|r| r.listing_count == 0));
        assert_eq!(stamped[1].broker_name, "Acht Wonen");
    }
}
