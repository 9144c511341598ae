use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Version {0} not found")]
    VersionNotFound(u64),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Set {0} has no response document")]
    SetResponseNotFound(u64),

    #[error("Set {0} has no request document")]
    SetRequestNotFound(u64),

    #[error("No datasets found in {}", .0.display())]
    NoDatasets(PathBuf),

    /// The requested file resolves outside of the data root.
    #[error("Path escapes the data root: {0}")]
    PathEscape(String),

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> DatasetError {
        let path = path.into();
        move |source| DatasetError::Io { path, source }
    }

    /// Whether callers should see this as a missing resource. Path escapes
    /// are reported as missing as well.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DatasetError::VersionNotFound(_)
                | DatasetError::FileNotFound(_)
                | DatasetError::SetResponseNotFound(_)
                | DatasetError::SetRequestNotFound(_)
                | DatasetError::NoDatasets(_)
                | DatasetError::PathEscape(_)
        )
    }
}
