use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{manual::ManualColumn, projection::ChartKind};

#[derive(Debug, Parser)]
#[command(author, version, about = "Store tabular data sets and project columns for charting", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Directory holding stored datasets (defaults to .chartdeck)
    #[arg(long = "store", env = "CHARTDECK_STORE", global = true)]
    pub store: Option<PathBuf>,
    /// Owner whose datasets are created and listed
    #[arg(long = "owner", env = "CHARTDECK_OWNER", global = true)]
    pub owner: Option<String>,
    /// YAML config file (defaults to ./chartdeck.yml when present)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a CSV file and store it as a dataset
    Upload(UploadArgs),
    /// Store hand-typed comma-separated rows against declared columns
    Manual(ManualArgs),
    /// List stored datasets, newest first
    List,
    /// Show the rows of a dataset, with optional search and paging
    Show(ShowArgs),
    /// List the columns of a dataset
    Columns(DatasetArgs),
    /// Project two columns of a dataset into chart points
    Plot(PlotArgs),
    /// Delete a dataset
    Delete(DatasetArgs),
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// CSV file to ingest (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Dataset name (defaults to the file name without its .csv extension)
    #[arg(short, long)]
    pub name: Option<String>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ManualArgs {
    /// Dataset name
    #[arg(short, long)]
    pub name: String,
    /// Column declarations of the form `name:type` (string, number, date, boolean)
    #[arg(short = 'c', long = "column", required = true, action = clap::ArgAction::Append)]
    pub columns: Vec<ManualColumn>,
    /// Rows typed inline, one per line
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    pub data: Option<String>,
    /// File holding the rows (`-` reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// Dataset id as printed by `upload` or `list`
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Dataset id as printed by `upload` or `list`
    pub id: String,
    /// Case-insensitive text to match against any value of a row
    #[arg(short, long)]
    pub search: Option<String>,
    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page (overrides the configured page size)
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum PointFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Dataset id as printed by `upload` or `list`
    pub id: String,
    /// Column for the x axis (defaults to the first numeric column)
    #[arg(short = 'x', long = "x")]
    pub x: Option<String>,
    /// Column for the y axis (defaults to the second numeric column)
    #[arg(short = 'y', long = "y")]
    pub y: Option<String>,
    /// Chart kind; pie charts keep only the first ten points
    #[arg(long = "chart", value_enum, default_value_t = ChartKind::Line)]
    pub chart: ChartKind,
    /// Output format for the points
    #[arg(long = "format", value_enum, default_value_t = PointFormat::Table)]
    pub format: PointFormat,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}
