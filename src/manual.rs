//! Hand-typed rows against user-declared columns.
//!
//! Unlike CSV ingestion nothing is inferred: each token is converted
//! according to the type declared for its column, and conversions that do
//! not fit keep the raw text. Name uniqueness is checked by
//! [`validate_column_names`], which callers run before [`parse_manual`].

use std::{collections::HashSet, str::FromStr};

use anyhow::{Result, anyhow};
use log::{debug, warn};

use crate::{
    data::{Row, Value, parse_date},
    error::IngestError,
    ingest::{IngestReport, Ingested},
    metadata::{Column, ColumnType},
};

/// A declared column, written on the command line as `name:type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualColumn {
    pub name: String,
    pub data_type: ColumnType,
}

impl ManualColumn {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl FromStr for ManualColumn {
    type Err = anyhow::Error;

    fn from_str(spec: &str) -> Result<Self> {
        let (name, data_type) = match spec.rsplit_once(':') {
            Some((name, ty)) => (name, ty.parse::<ColumnType>()?),
            None => (spec, ColumnType::String),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Column declaration '{spec}' is missing a name"));
        }
        Ok(ManualColumn::new(name, data_type))
    }
}

/// Fails on the first non-empty name declared twice. Empty names are
/// ignored here because the builder drops them.
pub fn validate_column_names<S: AsRef<str>>(names: &[S]) -> Result<(), IngestError> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name) {
            return Err(IngestError::DuplicateColumn(name.to_string()));
        }
    }
    Ok(())
}

pub fn parse_manual<S: AsRef<str>>(
    block: &str,
    column_names: &[S],
    column_types: &[ColumnType],
) -> Ingested {
    let declared = column_names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = column_types.get(idx).copied().unwrap_or_default();
            (name.as_ref().trim(), data_type)
        })
        .collect::<Vec<_>>();
    let usable = declared.iter().filter(|(name, _)| !name.is_empty()).count();

    let mut report = IngestReport::default();
    if usable == 0 || block.trim().is_empty() {
        debug!("No named columns or no rows given; nothing to build");
        return Ingested {
            report,
            ..Ingested::default()
        };
    }

    let mut rows = Vec::new();
    for (row_idx, line) in block.trim().split('\n').enumerate() {
        let tokens = line.split(',').map(str::trim).collect::<Vec<_>>();
        if tokens.len() != declared.len() {
            warn!(
                "Row {} has incorrect number of values. Expected {}, got {}",
                row_idx + 1,
                declared.len(),
                tokens.len()
            );
            report.reject(row_idx, declared.len(), tokens.len());
            continue;
        }
        let mut row = Row::new(row_idx);
        for ((name, data_type), token) in declared.iter().zip(tokens) {
            if name.is_empty() {
                continue;
            }
            row.insert(*name, convert_declared(token, *data_type));
        }
        rows.push(row);
    }
    report.accepted = rows.len();

    if rows.is_empty() {
        return Ingested {
            report,
            ..Ingested::default()
        };
    }

    let columns = declared
        .iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, data_type)| Column::new(*name, *data_type))
        .collect();
    Ingested {
        rows,
        columns,
        report,
    }
}

fn convert_declared(token: &str, data_type: ColumnType) -> Value {
    match data_type {
        ColumnType::Number => Value::coerce(token),
        ColumnType::Boolean => Value::Boolean(token.eq_ignore_ascii_case("true")),
        ColumnType::Date => {
            if parse_date(token).is_none() {
                debug!("'{token}' is not a recognised date; keeping it as text");
            }
            Value::String(token.to_string())
        }
        ColumnType::String => Value::String(token.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_types_drive_conversion() {
        let parsed = parse_manual(
            "7,yes,2024-03-01,007\nx,TRUE,soon,abc",
            &["n", "flag", "when", "code"],
            &[
                ColumnType::Number,
                ColumnType::Boolean,
                ColumnType::Date,
                ColumnType::String,
            ],
        );
        let first = &parsed.rows[0];
        assert_eq!(first.get("n"), Some(Value::Number(7.0)));
        assert_eq!(first.get("flag"), Some(Value::Boolean(false)));
        assert_eq!(first.get("when"), Some(Value::from("2024-03-01")));
        assert_eq!(first.get("code"), Some(Value::from("007")));

        let second = &parsed.rows[1];
        assert_eq!(second.get("n"), Some(Value::from("x")));
        assert_eq!(second.get("flag"), Some(Value::Boolean(true)));
        assert_eq!(second.get("when"), Some(Value::from("soon")));
    }

    #[test]
    fn missing_types_default_to_string() {
        let parsed = parse_manual("1,2", &["a", "b"], &[ColumnType::Number]);
        assert_eq!(parsed.columns[1].data_type, ColumnType::String);
        assert_eq!(parsed.rows[0].get("b"), Some(Value::from("2")));
    }

    #[test]
    fn blank_block_builds_nothing() {
        let parsed = parse_manual("  \n ", &["city"], &[ColumnType::String]);
        assert!(parsed.rows.is_empty());
        assert!(parsed.columns.is_empty());
        assert!(parsed.report.rejected.is_empty());
    }

    #[test]
    fn column_spec_parses_name_and_type() {
        let spec = "trip_cost:number".parse::<ManualColumn>().unwrap();
        assert_eq!(spec, ManualColumn::new("trip_cost", ColumnType::Number));
        let bare = "city".parse::<ManualColumn>().unwrap();
        assert_eq!(bare.data_type, ColumnType::String);
        assert!(":number".parse::<ManualColumn>().is_err());
        assert!("x:money".parse::<ManualColumn>().is_err());
    }
}
