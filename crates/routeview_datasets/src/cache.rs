use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::SystemTime,
};

use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::DatasetError;

struct CacheEntry {
    modified: SystemTime,
    document: Arc<Value>,
}

/// Parsed documents keyed by path, revalidated against the file's
/// modification time on every load.
///
/// Entries are never evicted. Concurrent loads of a stale path may both
/// reparse; the last insert wins.
#[derive(Default)]
pub struct DocumentCache {
    entries: RwLock<FxHashMap<PathBuf, CacheEntry>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self))]
    pub async fn load(&self, path: &Path) -> Result<Arc<Value>, DatasetError> {
        let modified = tokio::fs::metadata(path)
            .await
            .and_then(|metadata| metadata.modified())
            .map_err(DatasetError::io(path))?;

        let cached = {
            let entries = self.entries.read();
            entries
                .get(path)
                .filter(|entry| entry.modified == modified)
                .map(|entry| Arc::clone(&entry.document))
        };

        if let Some(document) = cached {
            debug!("cache hit");
            return Ok(document);
        }

        debug!("cache miss, parsing");
        let bytes = tokio::fs::read(path).await.map_err(DatasetError::io(path))?;
        let document: Value = serde_json::from_slice(&bytes).map_err(|error| {
            warn!(%error, "malformed document");
            DatasetError::Parse {
                path: path.to_path_buf(),
                line: error.line(),
                column: error.column(),
                message: error.to_string(),
            }
        })?;

        let document = Arc::new(document);
        self.entries.write().insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                document: Arc::clone(&document),
            },
        );

        Ok(document)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
