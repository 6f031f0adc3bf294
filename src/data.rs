//! Cell values, rows, and the lenient text conversions shared by both
//! ingestion paths.
//!
//! A [`Value`] is what a row holds at runtime: a string, a number, or a
//! boolean. Dates are stored as their original text; whether a column holds
//! dates is recorded on its [`crate::metadata::ColumnType`], not on the value.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    (*n as i64).to_string()
                } else {
                    n.to_string()
                }
            }
            Value::Boolean(b) => b.to_string(),
        }
    }

    /// Converts a trimmed token the way the CSV parser does: a lossless
    /// number when possible, otherwise the text itself.
    pub fn coerce(token: &str) -> Self {
        match parse_number(token) {
            Some(number) => Value::Number(number),
            None => Value::String(token.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// One record of a dataset.
///
/// `id` is assigned at parse time (`row-<index>`) and is unique within the
/// dataset. A data column that happens to be called `id` is kept in `values`
/// and never replaces the row id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub id: String,
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(index: usize) -> Self {
        Self {
            id: row_id(index),
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    /// Looks up a column value. `id` falls back to the row id when no data
    /// column of that name exists.
    pub fn get(&self, column: &str) -> Option<Value> {
        match self.values.get(column) {
            Some(value) => Some(value.clone()),
            None if column == "id" => Some(Value::String(self.id.clone())),
            None => None,
        }
    }
}

pub fn row_id(index: usize) -> String {
    format!("row-{index}")
}

/// Parses `raw` as a number only when the whole (trimmed) text is a numeric
/// literal: decimal floats such as `12`, `-3.5`, `.5`, `1e3`, or unsigned
/// `0x`, `0o`, `0b` integers. Spellings such as `inf` or `NaN` are rejected,
/// as is anything that would not be finite.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(value) = parse_radix_literal(trimmed) {
        return Some(value);
    }
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_radix_literal(value: &str) -> Option<f64> {
    let (radix, digits) = match value.get(..2)? {
        "0x" | "0X" => (16, &value[2..]),
        "0o" | "0O" => (8, &value[2..]),
        "0b" | "0B" => (2, &value[2..]),
        _ => return None,
    };
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

// `%.f` also matches a missing fraction.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Returns the calendar date `value` names, if it is written in one of the
/// recognised date or datetime layouts.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.date_naive());
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed.date());
        }
    }
    parse_year_month(trimmed)
}

/// `YYYY-MM`, read as the first day of that month.
fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}
