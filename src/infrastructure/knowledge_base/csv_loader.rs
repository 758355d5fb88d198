//! CSV knowledge base reader

use std::io::Read;
use std::path::Path;

use crate::domain::knowledge_base::FactRecord;
use crate::domain::DomainError;

const ID_COLUMN: &str = "id";
const TEXT_COLUMN: &str = "text";

/// Read fact records from a CSV file with `id` and `text` columns
pub fn read_facts(path: impl AsRef<Path>) -> Result<Vec<FactRecord>, DomainError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        DomainError::ingestion(format!("Cannot open '{}': {}", path.display(), e))
    })?;

    read_facts_from_reader(file)
}

/// Read fact records from CSV data.
///
/// The header row must contain `id` and `text` in any order; other columns
/// are ignored. Rows are numbered from 1, not counting the header.
pub fn read_facts_from_reader<R: Read>(reader: R) -> Result<Vec<FactRecord>, DomainError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DomainError::ingestion(format!("Cannot read header row: {}", e)))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
            .ok_or_else(|| DomainError::ingestion(format!("Missing required column '{}'", name)))
    };
    let id_idx = column(ID_COLUMN)?;
    let text_idx = column(TEXT_COLUMN)?;

    let mut facts = Vec::new();

    for (i, row) in csv_reader.records().enumerate() {
        let row_number = i + 1;
        let row = row
            .map_err(|e| DomainError::ingestion(format!("Row {}: malformed record: {}", row_number, e)))?;

        let id = row.get(id_idx).map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(DomainError::ingestion(format!(
                "Row {}: missing value for '{}'",
                row_number, ID_COLUMN
            )));
        }

        let text = row.get(text_idx).unwrap_or_default();
        if text.trim().is_empty() {
            return Err(DomainError::ingestion(format!(
                "Row {}: missing value for '{}'",
                row_number, TEXT_COLUMN
            )));
        }

        facts.push(FactRecord::new(id, text));
    }

    Ok(facts)
}
