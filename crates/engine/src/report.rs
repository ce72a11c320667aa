//! Turning query results into text.

use records::RepositoryRecord;

/// Printed when a query finds no repository.
pub const NO_DATA: &str = "No repository data found.";

/// The record's description sentence, or [`NO_DATA`].
pub fn describe(record: Option<&RepositoryRecord>) -> String {
    match record {
        Some(record) => record.to_string(),
        None => NO_DATA.to_string(),
    }
}

/// Pretty-printed JSON array of the exported records.
pub fn export_pretty(records: &[RepositoryRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
