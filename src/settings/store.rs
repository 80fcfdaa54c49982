//! Settings store
//!
//! Owns the one in-memory copy of the settings document and its backing file.
//! Every change rewrites the whole file.

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::SettingsDocument;

pub struct SettingsStore {
    path: PathBuf,
    document: SettingsDocument,
}

impl SettingsStore {
    /// Load the document at `path`, writing the defaults there first if the file is missing
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            log::info!("No settings file at {}, creating defaults", path.display());
            let store = Self {
                path,
                document: SettingsDocument::default(),
            };
            store.save()?;
            return Ok(store);
        }

        let content = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read settings file {}", path.display()))?;
        let document: SettingsDocument = serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse settings file {}", path.display()))?;

        log::info!("Loaded settings from: {}", path.display());
        Ok(Self { path, document })
    }

    /// Overwrite the backing file with the current document
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create settings directory {}", parent.display()))?;
        }

        let mut json = serde_json::to_string_pretty(&self.document).context("Failed to serialize settings")?;
        json.push('\n');
        fs::write(&self.path, json).wrap_err_with(|| format!("Failed to write settings file {}", self.path.display()))?;

        log::debug!("Saved settings to: {}", self.path.display());
        Ok(())
    }

    /// Apply a change to the document and persist it
    pub fn update<T>(&mut self, change: impl FnOnce(&mut SettingsDocument) -> T) -> Result<T> {
        let out = change(&mut self.document);
        self.save()?;
        Ok(out)
    }

    pub fn document(&self) -> &SettingsDocument {
        &self.document
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
