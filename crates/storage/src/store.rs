//! Output Store Implementation

use crate::StorageError;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Subdirectory for alert records and alert reports
pub const ALERTS_DIR: &str = "alerts";
/// Subdirectory for text reports
pub const REPORTS_DIR: &str = "reports";

/// File-backed artifact store rooted at one output directory.
///
/// Relative paths passed to the save methods resolve against the root;
/// parent directories are created on demand.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    /// Create a store rooted at `root`; nothing is touched on disk yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path relative to the root
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Create the root along with the alerts and reports subdirectories
    pub fn ensure_layout(&self) -> Result<(), StorageError> {
        for dir in [
            self.root.clone(),
            self.root.join(ALERTS_DIR),
            self.root.join(REPORTS_DIR),
        ] {
            create_dir(&dir)?;
        }
        info!("Output directory ready: {}", self.root.display());
        Ok(())
    }

    /// Serialize `value` as pretty JSON
    pub fn save_json<T: Serialize + ?Sized>(
        &self,
        relative: impl AsRef<Path>,
        value: &T,
    ) -> Result<PathBuf, StorageError> {
        let json = serde_json::to_string_pretty(value)?;
        self.write(relative.as_ref(), json.as_bytes())
    }

    pub fn save_text(
        &self,
        relative: impl AsRef<Path>,
        text: &str,
    ) -> Result<PathBuf, StorageError> {
        self.write(relative.as_ref(), text.as_bytes())
    }

    /// Load a JSON document relative to the root
    pub fn load_json<T: DeserializeOwned>(
        &self,
        relative: impl AsRef<Path>,
    ) -> Result<T, StorageError> {
        load_json_file(&self.path(relative))
    }

    fn write(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(&path, bytes).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// Load a JSON document from an absolute or working-directory path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let bytes = fs::read(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// File name of the form `<prefix>_<yyyymmdd_HHMMSS>.<ext>`
pub fn timestamped_name(prefix: &str, ext: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), ext)
}

fn create_dir(dir: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(|source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: f64,
    }

    #[test]
    fn test_ensure_layout_creates_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path().join("outputs"));
        store.ensure_layout().unwrap();
        assert!(store.path(ALERTS_DIR).is_dir());
        assert!(store.path(REPORTS_DIR).is_dir());
    }

    #[test]
    fn test_json_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path());
        let sample = Sample {
            name: "xuancheng".to_string(),
            value: 21.5,
        };
        let path = store.save_json("nested/sample.json", &sample).unwrap();
        assert!(path.ends_with("nested/sample.json"));

        let back: Sample = store.load_json("nested/sample.json").unwrap();
        assert_eq!(back, sample);
        let back: Sample = load_json_file(&path).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_save_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path());
        let path = store.save_text("report.txt", "hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = OutputStore::new(dir.path());
        let err = store.load_json::<Sample>("absent.json").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_timestamped_name() {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 5, 3).unwrap();
        assert_eq!(
            timestamped_name("weather_report", "txt", at),
            "weather_report_20240701_090503.txt"
        );
    }
}
