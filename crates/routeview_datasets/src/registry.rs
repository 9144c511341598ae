use std::{
    fs::Metadata,
    io,
    path::{Component, Path, PathBuf},
};

use jiff::Timestamp;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    dataset_entry::{DatasetEntry, dataset_filename, parse_dataset_filename},
    error::DatasetError,
    file_utils::contained_metadata,
    mock_set::{MockSet, SetDocument, parse_set_id, scan_set},
};

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub data_root: PathBuf,
    /// File name of the result documents without the `.json` extension.
    pub base_name: String,
    /// Used when a request names neither a file, a set nor a version.
    pub default_file: Option<String>,
}

/// What a request asks for. Criteria are applied in order: file, set,
/// version, then the configured default and finally the latest version.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatasetQuery {
    pub version: Option<u64>,
    pub file: Option<String>,
    pub set: Option<u64>,
}

pub struct DatasetRegistry {
    config: RegistryConfig,
}

fn escapes_lexically(file: &str) -> bool {
    Path::new(file).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

impl DatasetRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        DatasetRegistry { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    async fn canonical_root(&self) -> Result<PathBuf, DatasetError> {
        tokio::fs::canonicalize(&self.config.data_root)
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => DatasetError::NoDatasets(self.config.data_root.clone()),
                _ => DatasetError::Io {
                    path: self.config.data_root.clone(),
                    source,
                },
            })
    }

    /// Result documents in the data root, ascending by version. For equal
    /// versions the unnumbered file comes first, so the last entry is the
    /// latest.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetEntry>, DatasetError> {
        let root = match self.canonical_root().await {
            Ok(root) => root,
            Err(DatasetError::NoDatasets(_)) => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        let mut datasets = Vec::new();
        let mut entries = tokio::fs::read_dir(&root)
            .await
            .map_err(DatasetError::io(&root))?;

        while let Some(entry) = entries.next_entry().await.map_err(DatasetError::io(&root))? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some((version, numbered)) = parse_dataset_filename(&self.config.base_name, name)
            else {
                continue;
            };

            let Some(metadata) = contained_metadata(&root, &entry.path())
                .await
                .filter(Metadata::is_file)
            else {
                continue;
            };

            datasets.push(DatasetEntry {
                name: name.to_owned(),
                version,
                numbered,
                path: entry.path(),
                modified: metadata
                    .modified()
                    .ok()
                    .and_then(|modified| Timestamp::try_from(modified).ok()),
            });
        }

        datasets.sort_by(|a, b| {
            (a.version, a.numbered, &a.name).cmp(&(b.version, b.numbered, &b.name))
        });

        Ok(datasets)
    }

    /// Numbered subdirectories of the data root, ascending by id.
    pub async fn list_sets(&self) -> Result<Vec<MockSet>, DatasetError> {
        let root = match self.canonical_root().await {
            Ok(root) => root,
            Err(DatasetError::NoDatasets(_)) => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        let mut directories = Vec::new();
        let mut entries = tokio::fs::read_dir(&root)
            .await
            .map_err(DatasetError::io(&root))?;

        while let Some(entry) = entries.next_entry().await.map_err(DatasetError::io(&root))? {
            let Some(id) = entry.file_name().to_str().and_then(parse_set_id) else {
                continue;
            };

            let is_dir = contained_metadata(&root, &entry.path())
                .await
                .is_some_and(|metadata| metadata.is_dir());

            if is_dir {
                directories.push((id, entry.path()));
            }
        }

        directories.sort();

        let mut sets = Vec::with_capacity(directories.len());
        for (id, path) in directories {
            sets.push(scan_set(&root, id, path).await?);
        }

        Ok(sets)
    }

    /// Resolves a query to the path of a result document.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &DatasetQuery) -> Result<PathBuf, DatasetError> {
        if let Some(file) = &query.file {
            return self.resolve_file(file).await;
        }

        if let Some(set) = query.set {
            return self.resolve_set(set, SetDocument::Response).await;
        }

        let datasets = self.list_datasets().await?;

        if let Some(version) = query.version {
            return datasets
                .into_iter()
                .rev()
                .find(|dataset| dataset.version == version)
                .map(|dataset| dataset.path)
                .ok_or(DatasetError::VersionNotFound(version));
        }

        if let Some(default_file) = &self.config.default_file {
            match self.resolve_file(default_file).await {
                Ok(path) => return Ok(path),
                Err(error) => debug!(%error, "configured default dataset unavailable"),
            }
        }

        let latest = datasets
            .into_iter()
            .last()
            .ok_or_else(|| DatasetError::NoDatasets(self.config.data_root.clone()))?;

        debug!(name = %latest.name, version = latest.version, "resolved latest dataset");
        Ok(latest.path)
    }

    /// Resolves the request document of a set.
    #[instrument(skip(self))]
    pub async fn resolve_request(&self, set: u64) -> Result<PathBuf, DatasetError> {
        self.resolve_set(set, SetDocument::Request).await
    }

    async fn resolve_file(&self, file: &str) -> Result<PathBuf, DatasetError> {
        if escapes_lexically(file) {
            warn!(file, "rejected dataset path outside of the data root");
            return Err(DatasetError::PathEscape(file.to_owned()));
        }

        let root = self.canonical_root().await?;
        let resolved = match tokio::fs::canonicalize(root.join(file)).await {
            Ok(resolved) => resolved,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(DatasetError::FileNotFound(file.to_owned()));
            }
            Err(source) => {
                return Err(DatasetError::Io {
                    path: root.join(file),
                    source,
                });
            }
        };

        // symlinks may still point elsewhere
        if !resolved.starts_with(&root) {
            warn!(file, "rejected dataset path outside of the data root");
            return Err(DatasetError::PathEscape(file.to_owned()));
        }

        if !tokio::fs::metadata(&resolved)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
        {
            return Err(DatasetError::FileNotFound(file.to_owned()));
        }

        Ok(resolved)
    }

    async fn resolve_set(&self, set: u64, document: SetDocument) -> Result<PathBuf, DatasetError> {
        let not_found = match document {
            SetDocument::Request => DatasetError::SetRequestNotFound(set),
            SetDocument::Response => DatasetError::SetResponseNotFound(set),
        };

        let root = match self.canonical_root().await {
            Ok(root) => root,
            Err(DatasetError::NoDatasets(_)) => return Err(not_found),
            Err(error) => return Err(error),
        };

        let set_directory = root.join(set.to_string());
        let is_dir = contained_metadata(&root, &set_directory)
            .await
            .is_some_and(|metadata| metadata.is_dir());

        if is_dir {
            let mock_set = scan_set(&root, set, set_directory).await?;
            if let Some(path) = mock_set.document_path(document) {
                return Ok(path);
            }
        }

        if document == SetDocument::Response {
            let fallback = root.join(dataset_filename(&self.config.base_name, set));
            let is_file = contained_metadata(&root, &fallback)
                .await
                .is_some_and(|metadata| metadata.is_file());

            if is_file {
                debug!(set, path = %fallback.display(), "set resolved from the data root");
                return Ok(fallback);
            }
        }

        Err(not_found)
    }
}
