use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    data::Row,
    metadata::{Column, column_index},
};

/// A stored dataset. Datasets are never edited after creation; the only
/// mutation a store offers is deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
    pub data: Vec<Row>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl Dataset {
    pub fn column(&self, name: &str) -> Option<&Column> {
        column_index(&self.columns, name).map(|idx| &self.columns[idx])
    }

    /// Display label for `name`, or the name itself for unknown columns.
    pub fn label_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.column(name).map(|c| c.label.as_str()).unwrap_or(name)
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }
}

/// Everything a store needs to create a [`Dataset`]; the store assigns the
/// id and the creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    pub name: String,
    pub columns: Vec<Column>,
    pub data: Vec<Row>,
    pub owner_id: Option<String>,
}

impl NewDataset {
    pub fn into_dataset(self, id: String, created_at: DateTime<Utc>) -> Dataset {
        Dataset {
            id,
            name: self.name,
            columns: self.columns,
            data: self.data,
            created_at,
            owner_id: self.owner_id,
        }
    }
}
