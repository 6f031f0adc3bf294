//! Single-value type guessing for CSV columns.
//!
//! Column types are guessed from one value: the first retained row's cell.
//! Later rows are never consulted, so a column inferred as `number` may still
//! hold strings further down. Callers that need a reconciled type must scan
//! the rows themselves.

use crate::{
    data::{Value, parse_date, parse_number},
    metadata::ColumnType,
};

/// Shortest text (exclusive) that may be classified as a date. Keeps short
/// tokens such as `1/2` or `May` from being read as calendar dates.
const MIN_DATE_TEXT_LEN: usize = 5;

pub fn infer_type(value: Option<&Value>) -> ColumnType {
    match value {
        None => ColumnType::String,
        Some(Value::Number(_)) => ColumnType::Number,
        Some(Value::Boolean(_)) => ColumnType::Boolean,
        Some(Value::String(text)) => infer_str(text),
    }
}

pub fn infer_str(text: &str) -> ColumnType {
    if text.is_empty() {
        return ColumnType::String;
    }
    if text.chars().count() > MIN_DATE_TEXT_LEN && parse_date(text).is_some() {
        return ColumnType::Date;
    }
    if parse_number(text).is_some() {
        return ColumnType::Number;
    }
    ColumnType::String
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_values_are_strings() {
        assert_eq!(infer_type(None), ColumnType::String);
        assert_eq!(infer_type(Some(&Value::from(""))), ColumnType::String);
    }

    #[test]
    fn native_values_keep_their_type() {
        assert_eq!(infer_type(Some(&Value::Number(4.0))), ColumnType::Number);
        assert_eq!(infer_type(Some(&Value::Boolean(true))), ColumnType::Boolean);
    }

    #[test]
    fn dates_need_more_than_five_characters() {
        assert_eq!(infer_str("2024-01-15"), ColumnType::Date);
        assert_eq!(infer_str("Jan 15, 2024"), ColumnType::Date);
        assert_eq!(infer_str("1/2"), ColumnType::String);
    }

    #[test]
    fn fractional_timestamps_and_year_months_are_dates() {
        assert_eq!(infer_str("2024-05-06T14:30:00.123"), ColumnType::Date);
        assert_eq!(infer_str("2024-05-06 14:30:00.5"), ColumnType::Date);
        assert_eq!(infer_str("2024-01"), ColumnType::Date);
    }

    #[test]
    fn numeric_text_is_a_number() {
        assert_eq!(infer_str("42"), ColumnType::Number);
        assert_eq!(infer_str("-0.25"), ColumnType::Number);
        assert_eq!(infer_str("Paris"), ColumnType::String);
    }

    #[test]
    fn boolean_text_is_not_promoted() {
        assert_eq!(infer_str("true"), ColumnType::String);
    }
}
