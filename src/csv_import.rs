//! Comma-separated text to typed rows.
//!
//! Fields are split on every comma; quoting and escaping are not supported.
//! A line whose field count differs from the header is skipped and recorded
//! in the [`IngestReport`] rather than failing the whole file.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    data::{Row, Value},
    error::IngestError,
    infer::infer_type,
    ingest::{IngestReport, Ingested},
    metadata::Column,
};

/// Parses `text` into typed rows and inferred columns.
///
/// Fails with [`IngestError::Format`] when there is no header or no non-blank
/// data line, and with [`IngestError::DuplicateColumn`] when a header name
/// repeats. Everything else is reported per line, not raised.
pub fn parse_csv(text: &str) -> Result<Ingested, IngestError> {
    let lines = text.split('\n').map(str::trim).collect::<Vec<_>>();
    if !lines.iter().skip(1).any(|line| !line.is_empty()) {
        return Err(IngestError::Format);
    }

    let headers = split_fields(lines[0]);
    let mut seen = HashSet::with_capacity(headers.len());
    for header in &headers {
        if !seen.insert(*header) {
            return Err(IngestError::DuplicateColumn(header.to_string()));
        }
    }

    let mut rows = Vec::new();
    let mut report = IngestReport::default();
    for (line_idx, line) in lines.iter().enumerate().skip(1) {
        if line.is_empty() {
            continue;
        }
        let fields = split_fields(line);
        if fields.len() != headers.len() {
            warn!(
                "Row {line_idx} has {} value(s), expected {}. Skipping.",
                fields.len(),
                headers.len()
            );
            report.reject(line_idx, headers.len(), fields.len());
            continue;
        }
        let mut row = Row::new(line_idx);
        for (header, field) in headers.iter().zip(fields) {
            row.insert(*header, Value::coerce(field));
        }
        rows.push(row);
    }
    report.accepted = rows.len();

    // Types come from the first accepted row only; see `crate::infer`.
    let first = rows.first();
    let columns = headers
        .iter()
        .map(|header| {
            let sample = first.and_then(|row| row.values.get(*header));
            Column::new(*header, infer_type(sample))
        })
        .collect::<Vec<_>>();

    debug!(
        "Parsed {} row(s) across {} column(s), {} rejected",
        rows.len(),
        columns.len(),
        report.rejected.len()
    );
    Ok(Ingested {
        rows,
        columns,
        report,
    })
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnType;

    #[test]
    fn header_only_input_is_a_format_error() {
        assert_eq!(parse_csv("onlyheader\n"), Err(IngestError::Format));
        assert_eq!(parse_csv("onlyheader"), Err(IngestError::Format));
        assert_eq!(parse_csv(""), Err(IngestError::Format));
        assert_eq!(parse_csv("a,b\n\n  \n"), Err(IngestError::Format));
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        assert_eq!(
            parse_csv("a,b,a\n1,2,3\n"),
            Err(IngestError::DuplicateColumn("a".to_string()))
        );
    }

    #[test]
    fn crlf_input_is_trimmed() {
        let parsed = parse_csv("city,visits\r\nRome,3\r\n").unwrap();
        assert_eq!(parsed.columns[1].name, "visits");
        assert_eq!(parsed.rows[0].get("visits"), Some(Value::Number(3.0)));
    }

    #[test]
    fn empty_fields_stay_empty_strings() {
        let parsed = parse_csv("a,b\n,2\n").unwrap();
        assert_eq!(parsed.rows[0].get("a"), Some(Value::from("")));
        assert_eq!(parsed.columns[0].data_type, ColumnType::String);
    }
}
