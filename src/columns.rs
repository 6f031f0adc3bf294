//! Column listing for a stored dataset.
//!
//! Renders each column's position, name, label and type as an ASCII table.

use anyhow::{Result, anyhow};
use log::info;

use crate::{cli::DatasetArgs, config::Settings, dataset::Dataset, store::DatasetStore, table};

pub fn column_rows(dataset: &Dataset) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![
        "#".to_string(),
        "name".to_string(),
        "label".to_string(),
        "type".to_string(),
    ];
    let rows = dataset
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            vec![
                (idx + 1).to_string(),
                column.name.clone(),
                column.label.clone(),
                column.data_type.to_string(),
            ]
        })
        .collect();
    (headers, rows)
}

pub fn execute(args: &DatasetArgs, store: &dyn DatasetStore, settings: &Settings) -> Result<()> {
    let dataset = store
        .get_by_id(&args.id)?
        .ok_or_else(|| anyhow!("Dataset '{}' not found", args.id))?;

    if dataset.columns.is_empty() {
        info!("Dataset '{}' does not define any columns", dataset.name);
        return Ok(());
    }

    let (headers, rows) = column_rows(&dataset);
    table::print_table(&headers, &rows, settings.max_cell_width);
    info!(
        "Listed {} column(s) from dataset '{}'",
        dataset.columns.len(),
        dataset.name
    );
    Ok(())
}
