pub mod aggregate;
pub mod listing;

pub use aggregate::{aggregate, aggregate_by_offer_kind};
pub use listing::{stamp_offer_kind, BrokerListing, ListingRecord, OfferKind, RankedSummary};
