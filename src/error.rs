use thiserror::Error;

/// Failures that abort an ingestion before anything reaches the store.
///
/// Row-level shape mismatches are not errors; they are recorded in
/// [`crate::ingest::IngestReport`] and the row is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("CSV input must have a header row and at least one row of data")]
    Format,
    #[error("Column name '{0}' is declared more than once")]
    DuplicateColumn(String),
    #[error("Manual input must contain at least one row of data")]
    EmptyBlock,
    #[error("Dataset name is required")]
    EmptyName,
    #[error("No data rows were produced from the input")]
    NoRows,
}
