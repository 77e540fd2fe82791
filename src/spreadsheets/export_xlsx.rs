use crate::domain::RankedSummary;
use crate::errors::OutputError;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub fn export_summaries_xlsx(summaries: &[RankedSummary], path: &Path) -> Result<(), OutputError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    let headers = ["Rank", "Broker ID", "Broker", "Offer Type", "Listings"];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                OutputError::Xlsx(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, summary) in summaries.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_number(r, 0, r as f64)
            .map_err(|e| OutputError::Xlsx(format!("Failed to write rank: {}", e)))?;

        worksheet
            .write_number(r, 1, summary.broker_id as f64)
            .map_err(|e| OutputError::Xlsx(format!("Failed to write broker id: {}", e)))?;

        worksheet
            .write_string(r, 2, &summary.broker_name)
            .map_err(|e| OutputError::Xlsx(format!("Failed to write broker name: {}", e)))?;

        worksheet
            .write_string(r, 3, summary.offer_kind.to_string())
            .map_err(|e| OutputError::Xlsx(format!("Failed to write offer type: {}", e)))?;

        worksheet
            .write_number(r, 4, summary.count as f64)
            .map_err(|e| OutputError::Xlsx(format!("Failed to write count: {}", e)))?;
    }

    workbook
        .save(path)
        .map_err(|e| OutputError::Xlsx(format!("Failed to save workbook: {}", e)))?;

    Ok(())
}
