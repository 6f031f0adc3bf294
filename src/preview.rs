//! Paged, searchable row view of a stored dataset.

use anyhow::{Result, anyhow, ensure};
use log::info;

use crate::{
    cli::ShowArgs, config::Settings, data::Row, dataset::Dataset, store::DatasetStore, table,
};

/// Rows where any value, or the row id, contains `query` ignoring case. A
/// blank query keeps every row.
pub fn search_rows<'a>(rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.id.to_lowercase().contains(&needle)
                || row
                    .values
                    .values()
                    .any(|value| value.as_display().to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number, clamped to the available pages.
    pub number: usize,
    pub total_pages: usize,
    /// Half-open index range into the searched rows.
    pub start: usize,
    pub end: usize,
    pub total_rows: usize,
}

impl Page {
    pub fn of(total_rows: usize, requested: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_rows.div_ceil(per_page);
        let number = requested.clamp(1, total_pages.max(1));
        let start = ((number - 1) * per_page).min(total_rows);
        let end = (start + per_page).min(total_rows);
        Self {
            number,
            total_pages,
            start,
            end,
            total_rows,
        }
    }

    pub fn summary(&self) -> String {
        if self.total_rows == 0 {
            return "No entries".to_string();
        }
        format!(
            "Showing {} to {} of {} entries (page {} of {})",
            self.start + 1,
            self.end,
            self.total_rows,
            self.number,
            self.total_pages
        )
    }
}

pub fn render_rows(dataset: &Dataset, rows: &[&Row]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = dataset
        .columns
        .iter()
        .map(|c| c.label.clone())
        .collect::<Vec<_>>();
    let cells = rows
        .iter()
        .map(|row| {
            dataset
                .columns
                .iter()
                .map(|c| row.get(&c.name).map(|v| v.as_display()).unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, cells)
}

pub fn execute(args: &ShowArgs, store: &dyn DatasetStore, settings: &Settings) -> Result<()> {
    let dataset = store
        .get_by_id(&args.id)?
        .ok_or_else(|| anyhow!("Dataset '{}' not found", args.id))?;
    let per_page = args.page_size.unwrap_or(settings.page_size);
    ensure!(per_page > 0, "Page size must be at least 1");

    let matches = search_rows(&dataset.data, args.search.as_deref().unwrap_or(""));
    let page = Page::of(matches.len(), args.page, per_page);
    let (headers, cells) = render_rows(&dataset, &matches[page.start..page.end]);
    table::print_table(&headers, &cells, settings.max_cell_width);
    println!("{}", page.summary());
    info!(
        "Displayed {} of {} row(s) from dataset '{}'",
        page.end - page.start,
        dataset.row_count(),
        dataset.name
    );
    Ok(())
}
