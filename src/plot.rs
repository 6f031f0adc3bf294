//! `plot` command: project two columns and write the points a chart of the
//! requested kind would draw.

use std::{io::Write, path::Path};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use serde::Serialize;

use crate::{
    cli::{PlotArgs, PointFormat},
    config::Settings,
    data::Value,
    dataset::Dataset,
    io_utils,
    projection::{ChartKind, ChartPoint, project_columns, suggest_axes},
    store::DatasetStore,
    table,
};

#[derive(Debug, Serialize)]
struct Axis<'a> {
    name: &'a str,
    label: &'a str,
}

#[derive(Debug, Serialize)]
struct PlotDocument<'a> {
    dataset: &'a str,
    chart: String,
    x: Axis<'a>,
    y: Axis<'a>,
    points: &'a [ChartPoint],
}

/// Picks the axes: explicit names win, otherwise the first two numeric
/// columns fill whichever axis was not given.
pub fn resolve_axes(
    dataset: &Dataset,
    x: Option<&str>,
    y: Option<&str>,
) -> Result<(String, String)> {
    let suggested = suggest_axes(&dataset.columns);
    let x = x.or(suggested.map(|(sx, _)| sx));
    let y = y.or(suggested.map(|(_, sy)| sy));
    match (x, y) {
        (Some(x), Some(y)) => Ok((x.to_string(), y.to_string())),
        _ => Err(anyhow!(
            "Please select both X and Y axes; dataset '{}' has fewer than two numeric columns",
            dataset.name
        )),
    }
}

fn cell(value: &Option<Value>) -> String {
    value.as_ref().map(|v| v.as_display()).unwrap_or_default()
}

pub fn write_points(
    output: Option<&Path>,
    format: PointFormat,
    dataset: &Dataset,
    chart: ChartKind,
    (x, y): (&str, &str),
    points: &[ChartPoint],
    max_cell_width: usize,
) -> Result<()> {
    match format {
        PointFormat::Table => {
            let headers = vec![
                dataset.label_for(x).to_string(),
                dataset.label_for(y).to_string(),
            ];
            let rows = points
                .iter()
                .map(|p| vec![cell(&p.x), cell(&p.y)])
                .collect::<Vec<_>>();
            let mut out = io_utils::open_output(output)?;
            out.write_all(table::render_table(&headers, &rows, max_cell_width).as_bytes())?;
            out.flush()?;
        }
        PointFormat::Csv => {
            let mut writer = io_utils::open_csv_writer(output)?;
            writer.write_record(["x", "y"])?;
            for point in points {
                writer.write_record([cell(&point.x), cell(&point.y)])?;
            }
            writer.flush()?;
        }
        PointFormat::Json => {
            let document = PlotDocument {
                dataset: &dataset.id,
                chart: chart.to_string(),
                x: Axis {
                    name: x,
                    label: dataset.label_for(x),
                },
                y: Axis {
                    name: y,
                    label: dataset.label_for(y),
                },
                points,
            };
            let mut out = io_utils::open_output(output)?;
            serde_json::to_writer_pretty(&mut out, &document).context("Writing plot JSON")?;
            writeln!(out)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn execute(args: &PlotArgs, store: &dyn DatasetStore, settings: &Settings) -> Result<()> {
    let dataset = store
        .get_by_id(&args.id)?
        .ok_or_else(|| anyhow!("Dataset '{}' not found", args.id))?;
    let (x, y) = resolve_axes(&dataset, args.x.as_deref(), args.y.as_deref())?;
    for axis in [&x, &y] {
        if dataset.column(axis).is_none() && axis != "id" {
            warn!("Column '{axis}' is not part of dataset '{}'", dataset.name);
        }
    }

    let points = project_columns(&dataset, &x, &y);
    let window = args.chart.window(&points);
    write_points(
        args.output.as_deref(),
        args.format,
        &dataset,
        args.chart,
        (x.as_str(), y.as_str()),
        window,
        settings.max_cell_width,
    )?;
    info!(
        "Projected {} point(s) ({} drawn as {}) from dataset '{}'",
        points.len(),
        window.len(),
        args.chart,
        dataset.name
    );
    Ok(())
}
