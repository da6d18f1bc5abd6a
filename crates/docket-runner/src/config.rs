use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use docket_storage::{ACTIVE_DATASET, COMPLETED_DATASET};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the dataset files; relative paths resolve against the root.
    pub data_dir: String,
    #[serde(default = "default_active_file")]
    pub active_file: String,
    #[serde(default = "default_completed_file")]
    pub completed_file: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub count: usize,
    pub title_len: usize,
    pub max_size: u64,
    pub max_priority: i64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { count: 200, title_len: 10, max_size: 1000, max_priority: 100 }
    }
}

fn default_active_file() -> String {
    ACTIVE_DATASET.to_string()
}

fn default_completed_file() -> String {
    COMPLETED_DATASET.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: "output".to_string(),
                active_file: default_active_file(),
                completed_file: default_completed_file(),
            },
            seed: SeedConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse docket.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Load the config under `root`, writing the defaults there first if absent.
    pub fn load_or_init(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    pub fn data_dir(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.storage.data_dir).to_string();
        root.join(expanded)
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".docket").join("docket.toml")
    }
}
