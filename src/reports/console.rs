use crate::domain::RankedSummary;

/// Plain-text table of a ranking.
pub fn render_table(title: &str, summaries: &[RankedSummary]) -> String {
    let mut out = format!("{title}\n");
    out.push_str(&format!(
        "{:>4}  {:>9}  {:<40}  {:<8}  {:>8}\n",
        "#", "ID", "Broker", "Offer", "Listings"
    ));

    for (i, s) in summaries.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:>9}  {:<40}  {:<8}  {:>8}\n",
            i + 1,
            s.broker_id,
            s.broker_name,
            s.offer_kind.to_string(),
            s.count
        ));
    }

    if summaries.is_empty() {
        out.push_str("  (no listings)\n");
    }
    out
}
