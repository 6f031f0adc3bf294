//! Runtime settings: command-line flags and environment over an optional
//! YAML config file over built-in defaults.
//!
//! ```yaml
//! store_dir: /var/lib/chartdeck
//! owner: ana
//! page_size: 25
//! max_cell_width: 30
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "chartdeck.yml";
pub const DEFAULT_STORE_DIR: &str = ".chartdeck";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_CELL_WIDTH: usize = 40;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub store_dir: Option<PathBuf>,
    pub owner: Option<String>,
    pub page_size: Option<usize>,
    pub max_cell_width: Option<usize>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Reading config file {path:?}"))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    /// Loads `explicit` when given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] from the working directory if present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    debug!("Using config file {fallback:?}");
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub owner: Option<String>,
    pub page_size: usize,
    pub max_cell_width: usize,
}

impl Settings {
    pub fn resolve(
        store_dir: Option<&Path>,
        owner: Option<&str>,
        file: ConfigFile,
    ) -> Result<Self> {
        let page_size = file.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        ensure!(page_size > 0, "page_size must be at least 1");
        let owner = owner
            .map(str::to_string)
            .or(file.owner)
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());
        Ok(Self {
            store_dir: store_dir
                .map(Path::to_path_buf)
                .or(file.store_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            owner,
            page_size,
            max_cell_width: file.max_cell_width.unwrap_or(DEFAULT_MAX_CELL_WIDTH),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_win_over_config_file() {
        let file = ConfigFile {
            store_dir: Some(PathBuf::from("/srv/data")),
            owner: Some("file-owner".to_string()),
            page_size: Some(25),
            max_cell_width: None,
        };
        let settings =
            Settings::resolve(Some(Path::new("/tmp/store")), Some("cli-owner"), file).unwrap();
        assert_eq!(settings.store_dir, PathBuf::from("/tmp/store"));
        assert_eq!(settings.owner.as_deref(), Some("cli-owner"));
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.max_cell_width, DEFAULT_MAX_CELL_WIDTH);
    }

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let settings = Settings::resolve(None, Some("  "), ConfigFile::default()).unwrap();
        assert_eq!(settings.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
        assert_eq!(settings.owner, None);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let file = ConfigFile {
            page_size: Some(0),
            ..ConfigFile::default()
        };
        assert!(Settings::resolve(None, None, file).is_err());
    }

    #[test]
    fn config_file_parses_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chartdeck.yml");
        fs::write(&path, "store_dir: data\nowner: ana\npage_size: 5\n").unwrap();
        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.store_dir, Some(PathBuf::from("data")));
        assert_eq!(file.page_size, Some(5));

        fs::write(&path, "colour: blue\n").unwrap();
        assert!(ConfigFile::load(&path).is_err());
    }
}
