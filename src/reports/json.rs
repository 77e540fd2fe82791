use crate::domain::RankedSummary;
use crate::errors::OutputError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn write_json(summaries: &[RankedSummary], path: &Path) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, summaries)?;
    Ok(())
}
