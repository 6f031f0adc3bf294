//! Column projection into chart points.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    data::{Row, Value},
    dataset::Dataset,
    metadata::{Column, ColumnType},
};

/// Pie charts only draw this many leading points.
pub const PIE_SLICE_LIMIT: usize = 10;

/// One `(x, y)` pair. A coordinate is `None` when the row has no value for
/// the selected column; it is passed through rather than defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Value>,
}

pub fn project_rows(rows: &[Row], x_column: &str, y_column: &str) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| ChartPoint {
            x: row.get(x_column),
            y: row.get(y_column),
        })
        .collect()
}

pub fn project_columns(dataset: &Dataset, x_column: &str, y_column: &str) -> Vec<ChartPoint> {
    project_rows(&dataset.data, x_column, y_column)
}

/// The first two numeric columns, used as default axes.
pub fn suggest_axes(columns: &[Column]) -> Option<(&str, &str)> {
    let mut numeric = columns
        .iter()
        .filter(|c| c.data_type == ColumnType::Number)
        .map(|c| c.name.as_str());
    Some((numeric.next()?, numeric.next()?))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Scatter,
    Pie,
}

impl ChartKind {
    /// The points this kind of chart actually draws.
    pub fn window<'a>(&self, points: &'a [ChartPoint]) -> &'a [ChartPoint] {
        match self {
            ChartKind::Pie => &points[..points.len().min(PIE_SLICE_LIMIT)],
            _ => points,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
        };
        f.write_str(name)
    }
}
