//! Storage Layer
//!
//! Writes pipeline artifacts (prediction results, alert records, reports)
//! under a single output directory.

mod store;

pub use store::{load_json_file, timestamped_name, OutputStore, ALERTS_DIR, REPORTS_DIR};

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
