use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EtlError, Result};
use crate::models::{RawSnapshot, WeatherRecord};

/// Reads every raw snapshot in a directory and flattens each to one row.
pub struct SnapshotReader {
    raw_dir: PathBuf,
}

impl SnapshotReader {
    pub fn new(raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
        }
    }

    /// Flatten all `*.json` files in the raw directory, in filesystem listing
    /// order (not guaranteed chronological).
    ///
    /// The first malformed snapshot aborts the whole read; callers therefore
    /// only ever write a complete row collection downstream.
    pub fn read_all(&self) -> Result<Vec<WeatherRecord>> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.raw_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            records.push(self.read_one(&path)?);
        }

        debug!(count = records.len(), "snapshots flattened");
        Ok(records)
    }

    fn read_one(&self, path: &Path) -> Result<WeatherRecord> {
        let contents = fs::read_to_string(path)?;
        let snapshot: RawSnapshot = serde_json::from_str(&contents)?;

        snapshot.flatten().map_err(|e| match e {
            EtlError::MissingData(msg) => {
                EtlError::MissingData(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }
}
