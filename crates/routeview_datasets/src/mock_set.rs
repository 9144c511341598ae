//! Mock sets: numbered subdirectories of the data root bundling the input
//! CSVs, the request and the response of one optimization run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{error::DatasetError, file_utils::contained_metadata};

pub const RESPONSE_FILENAMES: &[&str] = &[
    "response.json",
    "nextbillion_response.json",
    "result.json",
    "output.json",
];

pub const REQUEST_FILENAMES: &[&str] = &["request.json", "nextbillion_request.json", "input.json"];

const JOBS_CSV_PREFIX: &str = "input_jobs";
const VEHICLES_CSV_PREFIX: &str = "input_vehicles";
const CSV_EXTENSION: &str = ".csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDocument {
    Request,
    Response,
}

impl SetDocument {
    fn filenames(self) -> &'static [&'static str] {
        match self {
            SetDocument::Request => REQUEST_FILENAMES,
            SetDocument::Response => RESPONSE_FILENAMES,
        }
    }
}

/// Files found in one set directory, by file name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MockSet {
    pub id: u64,
    #[serde(skip)]
    pub path: PathBuf,
    pub jobs_csv: Option<String>,
    pub vehicles_csv: Option<String>,
    pub request: Option<String>,
    pub response: Option<String>,
}

impl MockSet {
    pub fn document_path(&self, document: SetDocument) -> Option<PathBuf> {
        let filename = match document {
            SetDocument::Request => self.request.as_ref(),
            SetDocument::Response => self.response.as_ref(),
        };

        filename.map(|filename| self.path.join(filename))
    }
}

pub(crate) fn parse_set_id(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    name.parse().ok()
}

fn first_conventional(filenames: &[String], document: SetDocument) -> Option<String> {
    document
        .filenames()
        .iter()
        .copied()
        .find(|candidate| filenames.iter().any(|filename| filename == candidate))
        .map(str::to_owned)
}

fn first_csv(filenames: &[String], prefix: &str) -> Option<String> {
    filenames
        .iter()
        .find(|filename| filename.starts_with(prefix) && filename.ends_with(CSV_EXTENSION))
        .cloned()
}

async fn file_names(root: &Path, directory: &Path) -> Result<Vec<String>, DatasetError> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(DatasetError::io(directory))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(DatasetError::io(directory))?
    {
        let is_file = contained_metadata(root, &entry.path())
            .await
            .is_some_and(|metadata| metadata.is_file());

        if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
            names.push(name.to_owned());
        }
    }

    names.sort();
    Ok(names)
}

/// Scans a set directory. Entries resolving outside of the canonical `root`
/// are ignored.
pub(crate) async fn scan_set(
    root: &Path,
    id: u64,
    path: PathBuf,
) -> Result<MockSet, DatasetError> {
    let filenames = file_names(root, &path).await?;

    Ok(MockSet {
        id,
        jobs_csv: first_csv(&filenames, JOBS_CSV_PREFIX),
        vehicles_csv: first_csv(&filenames, VEHICLES_CSV_PREFIX),
        request: first_conventional(&filenames, SetDocument::Request),
        response: first_conventional(&filenames, SetDocument::Response),
        path,
    })
}
