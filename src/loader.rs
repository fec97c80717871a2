//! CSV loading for the listings table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::listing::Listing;

/// Loads every listing from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedRow`] for the first row whose required
/// fields are missing or unparseable, and [`PipelineError::Io`] if the file
/// cannot be opened.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>, PipelineError> {
    let file = File::open(path.as_ref())?;
    let rows = read_listings(file)?;
    info!(rows = rows.len(), "Listings loaded");
    Ok(rows)
}

/// Columns every listings file must carry.
const REQUIRED_COLUMNS: [&str; 3] = ["model", "condition", "price"];

/// Reads listings from any CSV source with a header row.
///
/// A required column absent from the header fails on the first data row; a
/// blank `model` or `condition` cell fails on its own row.
pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>, PipelineError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    debug!(columns = headers.len(), "CSV header read");

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(PipelineError::malformed(1, missing, "column is missing"));
    }

    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        let record: Listing = result.map_err(|e| malformed_from_csv(e, &headers, index))?;
        record.validate(index as u64 + 1)?;
        rows.push(record);
    }

    Ok(rows)
}

/// Turns a deserialisation failure into a [`PipelineError::MalformedRow`]
/// naming the offending column; other CSV errors pass through unchanged.
fn malformed_from_csv(err: csv::Error, headers: &csv::StringRecord, index: usize) -> PipelineError {
    let row = index as u64 + 1;

    match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => {
            let field = de
                .field()
                .and_then(|i| headers.get(i as usize))
                .unwrap_or("<unknown>");
            PipelineError::malformed(row, field, de.kind().to_string())
        }
        csv::ErrorKind::UnequalLengths { .. } => {
            PipelineError::malformed(row, "<record>", "wrong number of fields")
        }
        _ => PipelineError::Csv(err),
    }
}
