use std::borrow::Cow;
use std::fmt::Write as _;

/// Renders an aligned plain-text table. Cells longer than `max_cell_width`
/// characters are cut and end in `…`; `0` disables the limit.
pub fn render_table(headers: &[String], rows: &[Vec<String>], max_cell_width: usize) -> String {
    let fit = |value: &str| fit_cell(value, max_cell_width);
    let headers = headers.iter().map(|h| fit(h)).collect::<Vec<_>>();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| fit(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers
        .iter()
        .map(|h| display_width(h))
        .collect::<Vec<_>>();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }
    for width in &mut widths {
        *width = (*width).max(3);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(&headers, &widths));
    let separator = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths));
    for row in &rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>], max_cell_width: usize) {
    print!("{}", render_table(headers, rows, max_cell_width));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let padding = width.saturating_sub(display_width(value));
            format!("{value}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line
}

fn fit_cell(value: &str, max_width: usize) -> String {
    let sanitized = sanitize_cell(value);
    if max_width == 0 || display_width(&sanitized) <= max_width {
        return sanitized.into_owned();
    }
    let mut cut = sanitized
        .chars()
        .take(max_width.saturating_sub(1))
        .collect::<String>();
    cut.push('…');
    cut
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
