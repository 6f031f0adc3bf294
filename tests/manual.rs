use chartdeck::data::Value;
use chartdeck::manual::{ManualColumn, validate_column_names};
use chartdeck::metadata::ColumnType;
use chartdeck::{IngestError, parse_manual};

#[test]
fn builds_rows_from_declared_types() {
    let parsed = parse_manual(
        "1,true\n2,false",
        &["n", "b"],
        &[ColumnType::Number, ColumnType::Boolean],
    );

    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].id, "row-0");
    assert_eq!(parsed.rows[0].get("n"), Some(Value::Number(1.0)));
    assert_eq!(parsed.rows[0].get("b"), Some(Value::Boolean(true)));
    assert_eq!(parsed.rows[1].id, "row-1");
    assert_eq!(parsed.rows[1].get("n"), Some(Value::Number(2.0)));
    assert_eq!(parsed.rows[1].get("b"), Some(Value::Boolean(false)));
    assert_eq!(parsed.columns[1].data_type, ColumnType::Boolean);
}

#[test]
fn mismatched_lines_are_dropped_without_stopping() {
    let parsed = parse_manual(
        "Rome,3\nOslo\nLima,2,extra\nKyiv,1",
        &["city", "visits"],
        &[ColumnType::String, ColumnType::Number],
    );

    let ids = parsed.rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["row-0", "row-3"]);
    assert_eq!(parsed.report.accepted, 2);
    assert_eq!(parsed.report.rejected_lines(), vec![1, 2]);
}

#[test]
fn unnamed_columns_are_dropped() {
    let parsed = parse_manual(
        "Rome,ignored,3",
        &["city", " ", "visits"],
        &[ColumnType::String, ColumnType::String, ColumnType::Number],
    );

    let names = parsed
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["city", "visits"]);
    assert_eq!(parsed.rows[0].values.len(), 2);
    assert_eq!(parsed.rows[0].get("visits"), Some(Value::Number(3.0)));
}

#[test]
fn soft_failures_yield_an_empty_result() {
    let no_columns = parse_manual::<&str>("1,2", &[], &[]);
    assert!(no_columns.rows.is_empty());
    assert!(no_columns.columns.is_empty());

    let all_rejected = parse_manual("1\n2", &["a", "b"], &[ColumnType::Number]);
    assert!(all_rejected.rows.is_empty());
    assert!(all_rejected.columns.is_empty());
    assert_eq!(all_rejected.report.rejected_lines(), vec![0, 1]);
}

#[test]
fn surrounding_blank_lines_are_trimmed_from_the_block() {
    let parsed = parse_manual("\n\n5\n6\n\n", &["n"], &[ColumnType::Number]);
    let ids = parsed.rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["row-0", "row-1"]);
}

#[test]
fn duplicate_names_are_rejected_by_the_caller_check() {
    assert_eq!(
        validate_column_names(&["city", "visits", "city"]),
        Err(IngestError::DuplicateColumn("city".to_string()))
    );
    assert_eq!(validate_column_names(&["city", "", ""]), Ok(()));
}

#[test]
fn builder_alone_does_not_enforce_uniqueness() {
    let parsed = parse_manual(
        "1,2",
        &["n", "n"],
        &[ColumnType::Number, ColumnType::Number],
    );
    assert_eq!(parsed.rows[0].get("n"), Some(Value::Number(2.0)));
    assert_eq!(parsed.columns.len(), 2);
}

#[test]
fn column_declarations_parse_from_cli_syntax() {
    let column: ManualColumn = "visited_on:date".parse().expect("parse column");
    assert_eq!(column, ManualColumn::new("visited_on", ColumnType::Date));
}
