mod console;
mod json;

pub use console::render_table;
pub use json::write_json;

use crate::domain::RankedSummary;
use crate::errors::OutputError;
use crate::spreadsheets::export_summaries_xlsx;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write one ranking as `<dir>/<name>.json`, `<dir>/<name>.xlsx` and to the console.
/// Existing files are replaced. Returns the paths written.
pub fn create_output(
    summaries: &[RankedSummary],
    output_dir: &Path,
    name: &str,
) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(output_dir).map_err(|source| OutputError::Io {
        path: output_dir.display().to_string(),
        source,
    })?;

    let json_path = output_dir.join(format!("{name}.json"));
    info!(path = %json_path.display(), "📝 Writing report");
    write_json(summaries, &json_path)?;

    let xlsx_path = output_dir.join(format!("{name}.xlsx"));
    info!(path = %xlsx_path.display(), "📝 Writing report");
    export_summaries_xlsx(summaries, &xlsx_path)?;

    println!("{}", render_table(name, summaries));

    Ok(vec![json_path, xlsx_path])
}
