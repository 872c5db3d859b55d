//! Local key-value store: a flat TOML table of string pairs on disk.
//!
//! This is the desktop counterpart of a browser's `localStorage`. It is read
//! in full on every access and rewritten atomically (`<file>.tmp` + rename)
//! on every mutation.
//!
//! Only the login flag lives here today.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name inside the application data directory.
pub const STORE_FILE: &str = "local_storage.toml";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} is not a valid key-value file: {message}")]
    Parse { path: String, message: String },
    #[error("cannot serialize {path}: {message}")]
    Serialize { path: String, message: String },
}

/// String-to-string store backed by one TOML file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the per-user data directory, e.g.
    /// `~/.local/share/gem-billing/local_storage.toml` on Linux.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    /// Remove `key`. Removing an absent key is not an error and does not
    /// touch the file.
    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.display(),
                    source,
                })
            }
        };
        toml::from_str(&text).map_err(|e| StoreError::Parse {
            path: self.display(),
            message: e.to_string(),
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.display(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let text = toml::to_string(items).map_err(|e| StoreError::Serialize {
            path: self.display(),
            message: e.to_string(),
        })?;

        let file_name = self
            .path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let tmp_path = self.path.with_file_name(format!("{file_name}.tmp"));

        if let Err(e) = std::fs::write(&tmp_path, text) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_err(e));
        }
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            write_err(e)
        })
    }

    fn display(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}
