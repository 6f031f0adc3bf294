use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(ColumnType::String),
            "number" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            other => Err(anyhow!(
                "Unknown column type '{other}' (expected string, number, date or boolean)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub data_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: ColumnType) -> Self {
        let name = name.into();
        let label = display_label(&name);
        Self {
            name,
            label,
            data_type,
        }
    }
}

/// Builds the human-facing label for a column name: underscores become
/// spaces and the first letter of every word is uppercased. The rest of
/// each word is left alone, so `avg_GPU_load` reads `Avg GPU Load`.
pub fn display_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && at_word_start {
            label.push(ch.to_ascii_uppercase());
        } else {
            label.push(ch);
        }
        at_word_start = !is_word;
    }
    label
}

pub fn column_index(columns: &[Column], name: &str) -> Option<usize> {
    columns.iter().position(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_replaces_underscores_and_capitalizes_words() {
        assert_eq!(display_label("trip_cost"), "Trip Cost");
        assert_eq!(display_label("a"), "A");
        assert_eq!(display_label("avg_GPU_load"), "Avg GPU Load");
        assert_eq!(display_label("already Spaced"), "Already Spaced");
        assert_eq!(display_label("x2-y"), "X2-Y");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn column_type_parses_aliases() {
        assert_eq!("Text".parse::<ColumnType>().unwrap(), ColumnType::String);
        assert_eq!("bool".parse::<ColumnType>().unwrap(), ColumnType::Boolean);
        assert_eq!(" number ".parse::<ColumnType>().unwrap(), ColumnType::Number);
        assert!("currency".parse::<ColumnType>().is_err());
    }

    #[test]
    fn column_serializes_type_in_lowercase() {
        let column = Column::new("departure_date", ColumnType::Date);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["label"], "Departure Date");
        assert_eq!(json["type"], "date");
    }
}
