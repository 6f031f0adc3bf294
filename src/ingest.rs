//! Ingestion results and the store-backed upload workflows.
//!
//! [`crate::csv_import::parse_csv`] and [`crate::manual::parse_manual`] are
//! pure and return an [`Ingested`]. The `import_*` functions here add the
//! checks a caller makes before persisting (a non-empty name, at least one
//! row, unique manual column names) and hand the result to a
//! [`DatasetStore`].

use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::{
    csv_import::parse_csv,
    data::Row,
    dataset::{Dataset, NewDataset},
    error::IngestError,
    manual::{ManualColumn, parse_manual, validate_column_names},
    metadata::Column,
    store::DatasetStore,
};

/// A line dropped because its token count did not match the column count.
/// `line` uses the same numbering as the ids of accepted rows.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedLine>,
}

impl IngestReport {
    pub fn reject(&mut self, line: usize, expected: usize, found: usize) {
        self.rejected.push(RejectedLine {
            line,
            expected,
            found,
        });
    }

    pub fn rejected_lines(&self) -> Vec<usize> {
        self.rejected.iter().map(|r| r.line).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
    pub report: IngestReport,
}

impl Ingested {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of a successful import: the stored dataset and how many input
/// lines made it in.
#[derive(Debug, Clone)]
pub struct Imported {
    pub dataset: Dataset,
    pub report: IngestReport,
}

fn require_name(name: &str) -> Result<String, IngestError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(IngestError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}

fn persist(
    store: &dyn DatasetStore,
    name: String,
    ingested: Ingested,
    owner: Option<&str>,
) -> Result<Imported> {
    if ingested.is_empty() {
        return Err(IngestError::NoRows.into());
    }
    let Ingested {
        rows,
        columns,
        report,
    } = ingested;
    let dataset = store.create(NewDataset {
        name,
        columns,
        data: rows,
        owner_id: owner.map(str::to_string),
    })?;
    info!(
        "Loaded {} record(s) with {} column(s) into dataset '{}' ({})",
        dataset.row_count(),
        dataset.columns.len(),
        dataset.name,
        dataset.id
    );
    Ok(Imported { dataset, report })
}

pub fn import_csv(
    store: &dyn DatasetStore,
    name: &str,
    text: &str,
    owner: Option<&str>,
) -> Result<Imported> {
    let name = require_name(name)?;
    let ingested = parse_csv(text)?;
    persist(store, name, ingested, owner)
}

pub fn import_manual(
    store: &dyn DatasetStore,
    name: &str,
    block: &str,
    columns: &[ManualColumn],
    owner: Option<&str>,
) -> Result<Imported> {
    let name = require_name(name)?;
    let names = columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
    let types = columns.iter().map(|c| c.data_type).collect::<Vec<_>>();
    validate_column_names(&names)?;
    if block.trim().is_empty() {
        return Err(IngestError::EmptyBlock.into());
    }
    let ingested = parse_manual(block, &names, &types);
    persist(store, name, ingested, owner)
}
