//! Durable key-value storage.
//!
//! The original product kept everything in browser local storage: a flat,
//! string-keyed blob store that survives reloads. This module renders that
//! as an injectable port so the persistence boundary is testable: a
//! file-backed store for the real application and an in-memory store for
//! tests.
//!
//! Writes are fire-and-forget overwrites. There is no versioning and no
//! conflict handling; the single-threaded event loop is the only writer.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// String-keyed blob store. Keys are flat names such as `cvData`;
/// values are opaque (in practice, JSON documents).
pub trait Storage {
    /// Reads the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, overwriting any prior value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Root of the app's data directory, which holds the storage directory
/// and the log file.
///
/// The `THYNK_DATA_DIR` environment variable overrides the platform
/// location, so everything the app writes lands under one directory.
///
/// - Linux: `~/.local/share/Thynk/`
/// - macOS: `~/Library/Application Support/Thynk/`
/// - Windows: `%APPDATA%\Thynk\`
pub fn data_root() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("THYNK_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    Ok(dirs::data_dir()
        .context("Failed to determine data directory")?
        .join("Thynk"))
}

/// File-backed store: one file per key under a storage directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).context(format!(
            "Failed to create storage directory: {}",
            dir.display()
        ))?;
        Ok(Self { dir })
    }

    /// Gets the default storage directory: `storage/` under [`data_root`],
    /// so the `THYNK_DATA_DIR` override applies here too.
    pub fn default_dir() -> Result<PathBuf> {
        Ok(data_root()?.join("storage"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", path.display());
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        // Write to temp file, then atomic rename
        fs::write(&temp_path, value).context(format!(
            "Failed to write temp storage file: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &path).context(format!(
            "Failed to rename temp storage file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).context(format!(
                "Failed to remove storage file: {}",
                path.display()
            ))?;
        }
        Ok(())
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get("cvData"), None);

        store.set("cvData", "{\"a\":1}").unwrap();
        assert_eq!(store.get("cvData"), Some("{\"a\":1}".to_string()));

        // Overwrite replaces the prior value
        store.set("cvData", "{\"a\":2}").unwrap();
        assert_eq!(store.get("cvData"), Some("{\"a\":2}".to_string()));

        store.remove("cvData").unwrap();
        assert_eq!(store.get("cvData"), None);
    }

    #[test]
    fn test_memory_storage_remove_absent_key_is_ok() {
        let mut store = MemoryStorage::new();
        assert!(store.remove("user").is_ok());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStorage::open(temp_dir.path().join("store")).unwrap();

        assert_eq!(store.get("selectedTemplate"), None);
        store.set("selectedTemplate", "modern").unwrap();
        assert_eq!(store.get("selectedTemplate"), Some("modern".to_string()));

        store.remove("selectedTemplate").unwrap();
        assert_eq!(store.get("selectedTemplate"), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("store");

        {
            let mut store = FileStorage::open(dir.clone()).unwrap();
            store.set("user", "{\"name\":\"Ada\"}").unwrap();
        }

        let store = FileStorage::open(dir).unwrap();
        assert_eq!(store.get("user"), Some("{\"name\":\"Ada\"}".to_string()));
    }

    #[test]
    fn test_data_root_override_covers_storage_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::env::set_var("THYNK_DATA_DIR", temp_dir.path());
        let root = data_root().unwrap();
        let storage_dir = FileStorage::default_dir().unwrap();
        std::env::remove_var("THYNK_DATA_DIR");

        assert_eq!(root, temp_dir.path());
        assert_eq!(storage_dir, temp_dir.path().join("storage"));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = FileStorage::open(nested.clone()).unwrap();
        assert!(nested.exists());
        assert_eq!(store.get("anything"), None);
    }
}
