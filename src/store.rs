//! Dataset persistence behind the [`DatasetStore`] trait.
//!
//! Ingestion and projection never own a store; workflows take one as a
//! `&dyn DatasetStore`. [`JsonDirStore`] keeps one JSON document per dataset
//! in a directory and backs the CLI; [`MemoryStore`] is the in-process
//! variant used by tests and embedders.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use log::{debug, warn};
use uuid::Uuid;

use crate::dataset::{Dataset, NewDataset};

pub trait DatasetStore: Send + Sync {
    fn create(&self, dataset: NewDataset) -> Result<Dataset>;

    /// Datasets belonging to `owner`, newest first. `None` selects datasets
    /// stored without an owner.
    fn list_for_owner(&self, owner: Option<&str>) -> Result<Vec<Dataset>>;

    fn get_by_id(&self, id: &str) -> Result<Option<Dataset>>;

    /// Returns `false` when no dataset with `id` exists.
    fn delete_by_id(&self, id: &str) -> Result<bool>;
}

fn new_dataset_id() -> String {
    Uuid::new_v4().to_string()
}

fn newest_first(datasets: &mut [Dataset]) {
    datasets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: Mutex<Vec<Dataset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Dataset>>> {
        self.datasets
            .lock()
            .map_err(|_| anyhow!("Dataset store lock poisoned"))
    }
}

impl DatasetStore for MemoryStore {
    fn create(&self, dataset: NewDataset) -> Result<Dataset> {
        let created = dataset.into_dataset(new_dataset_id(), Utc::now());
        self.lock()?.push(created.clone());
        Ok(created)
    }

    fn list_for_owner(&self, owner: Option<&str>) -> Result<Vec<Dataset>> {
        // Reverse first so equal timestamps still list the latest insert first.
        let mut matching = self
            .lock()?
            .iter()
            .rev()
            .filter(|d| d.owner_id.as_deref() == owner)
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut matching);
        Ok(matching)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Dataset>> {
        Ok(self.lock()?.iter().find(|d| d.id == id).cloned())
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut datasets = self.lock()?;
        let before = datasets.len();
        datasets.retain(|d| d.id != id);
        Ok(datasets.len() != before)
    }
}

#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Creating dataset store directory {root:?}"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an id to its document path. Ids are generated UUIDs, so anything
    /// that could escape the store directory is simply unknown.
    fn document_path(&self, id: &str) -> Option<PathBuf> {
        let safe = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        safe.then(|| self.root.join(format!("{id}.json")))
    }

    fn read_document(path: &Path) -> Result<Dataset> {
        let file = File::open(path).with_context(|| format!("Opening dataset file {path:?}"))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing dataset file {path:?}"))
    }

    fn write_document(&self, path: &Path, dataset: &Dataset) -> Result<()> {
        let staging = path.with_extension("json.tmp");
        {
            let file = File::create(&staging)
                .with_context(|| format!("Creating dataset file {staging:?}"))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, dataset).context("Writing dataset JSON")?;
            writer.flush().context("Flushing dataset JSON")?;
        }
        fs::rename(&staging, path)
            .with_context(|| format!("Moving dataset file into place at {path:?}"))
    }
}

impl DatasetStore for JsonDirStore {
    fn create(&self, dataset: NewDataset) -> Result<Dataset> {
        let id = new_dataset_id();
        let path = self
            .document_path(&id)
            .ok_or_else(|| anyhow!("Generated dataset id '{id}' is not a valid file name"))?;
        let created = dataset.into_dataset(id, Utc::now());
        self.write_document(&path, &created)?;
        debug!("Stored dataset '{}' at {:?}", created.name, path);
        Ok(created)
    }

    fn list_for_owner(&self, owner: Option<&str>) -> Result<Vec<Dataset>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Listing dataset store {:?}", self.root))?;
        let mut datasets = Vec::new();
        for entry in entries {
            let path = entry.context("Reading dataset store entry")?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_document(&path) {
                Ok(dataset) if dataset.owner_id.as_deref() == owner => datasets.push(dataset),
                Ok(_) => {}
                Err(err) => warn!("Skipping unreadable dataset file {path:?}: {err:#}"),
            }
        }
        newest_first(&mut datasets);
        Ok(datasets)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Dataset>> {
        let Some(path) = self.document_path(id) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::read_document(&path).map(Some)
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        let Some(path) = self.document_path(id) else {
            return Ok(false);
        };
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| format!("Deleting dataset file {path:?}")),
        }
    }
}
