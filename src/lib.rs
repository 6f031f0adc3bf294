pub mod cli;
pub mod columns;
pub mod config;
pub mod csv_import;
pub mod data;
pub mod dataset;
pub mod error;
pub mod infer;
pub mod ingest;
pub mod io_utils;
pub mod manual;
pub mod metadata;
pub mod plot;
pub mod preview;
pub mod projection;
pub mod store;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use crate::{
    cli::{Cli, Commands},
    config::{ConfigFile, Settings},
    ingest::IngestReport,
    store::{DatasetStore, JsonDirStore},
};

pub use crate::{
    csv_import::parse_csv,
    error::IngestError,
    manual::parse_manual,
    projection::project_columns,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("chartdeck", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let file = ConfigFile::discover(cli.global.config.as_deref())?;
    let settings = Settings::resolve(
        cli.global.store.as_deref(),
        cli.global.owner.as_deref(),
        file,
    )?;
    debug!("Resolved settings: {settings:?}");
    let store = JsonDirStore::open(&settings.store_dir)
        .with_context(|| format!("Opening dataset store {:?}", settings.store_dir))?;

    match cli.command {
        Commands::Upload(args) => handle_upload(&args, &store, &settings),
        Commands::Manual(args) => handle_manual(&args, &store, &settings),
        Commands::List => handle_list(&store, &settings),
        Commands::Show(args) => preview::execute(&args, &store, &settings),
        Commands::Columns(args) => columns::execute(&args, &store, &settings),
        Commands::Plot(args) => plot::execute(&args, &store, &settings),
        Commands::Delete(args) => handle_delete(&args, &store),
    }
}

fn handle_upload(
    args: &cli::UploadArgs,
    store: &dyn DatasetStore,
    settings: &Settings,
) -> Result<()> {
    info!("Uploading '{}'", args.input.display());
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let text = io_utils::read_input_text(&args.input, encoding)?;
    let name = args
        .name
        .clone()
        .or_else(|| default_dataset_name(&args.input))
        .unwrap_or_default();
    let imported = ingest::import_csv(store, &name, &text, settings.owner.as_deref())
        .with_context(|| format!("Importing {:?}", args.input))?;
    report_skipped(&imported.report);
    println!(
        "{}\tLoaded {} records with {} columns",
        imported.dataset.id,
        imported.dataset.row_count(),
        imported.dataset.columns.len()
    );
    Ok(())
}

fn handle_manual(
    args: &cli::ManualArgs,
    store: &dyn DatasetStore,
    settings: &Settings,
) -> Result<()> {
    let block = match (&args.data, &args.input) {
        (Some(data), _) => data.clone(),
        (None, Some(path)) => {
            let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
            io_utils::read_input_text(path, encoding)?
        }
        (None, None) => return Err(anyhow!("Provide rows with --data or --input")),
    };
    let imported = ingest::import_manual(
        store,
        &args.name,
        &block,
        &args.columns,
        settings.owner.as_deref(),
    )
    .context("Creating dataset from manual input")?;
    report_skipped(&imported.report);
    println!(
        "{}\tCreated dataset with {} rows",
        imported.dataset.id,
        imported.dataset.row_count()
    );
    Ok(())
}

fn handle_list(store: &dyn DatasetStore, settings: &Settings) -> Result<()> {
    let datasets = store.list_for_owner(settings.owner.as_deref())?;
    if datasets.is_empty() {
        info!("No datasets stored yet");
        return Ok(());
    }
    let headers = vec![
        "id".to_string(),
        "name".to_string(),
        "rows".to_string(),
        "columns".to_string(),
        "created".to_string(),
    ];
    let rows = datasets
        .iter()
        .map(|d| {
            vec![
                d.id.clone(),
                d.name.clone(),
                d.row_count().to_string(),
                d.columns.len().to_string(),
                d.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect::<Vec<_>>();
    // Ids must stay copyable, so this table is never truncated.
    table::print_table(&headers, &rows, 0);
    Ok(())
}

fn handle_delete(args: &cli::DatasetArgs, store: &dyn DatasetStore) -> Result<()> {
    if !store.delete_by_id(&args.id)? {
        return Err(anyhow!("Dataset '{}' not found", args.id));
    }
    info!("Deleted dataset {}", args.id);
    Ok(())
}

fn report_skipped(report: &IngestReport) {
    if !report.rejected.is_empty() {
        warn!(
            "Skipped {} line(s) with the wrong number of values: {:?}",
            report.rejected.len(),
            report.rejected_lines()
        );
    }
}

/// The upload name used when none is given: the file name without `.csv`.
pub fn default_dataset_name(path: &Path) -> Option<String> {
    if io_utils::is_dash(path) {
        return None;
    }
    let file_name = path.file_name()?.to_str()?;
    Some(file_name.strip_suffix(".csv").unwrap_or(file_name).to_string())
}
