use std::path::PathBuf;

use jiff::Timestamp;
use serde::Serialize;

const EXTENSION: &str = ".json";

/// One result document matching `<base>[_<version>].json`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatasetEntry {
    pub name: String,
    pub version: u64,
    #[serde(skip)]
    pub numbered: bool,
    #[serde(skip)]
    pub path: PathBuf,
    pub modified: Option<Timestamp>,
}

/// Parses the version out of a dataset filename.
///
/// Returns `(version, numbered)`; the bare `<base>.json` is version 0 and
/// not numbered.
pub fn parse_dataset_filename(base: &str, filename: &str) -> Option<(u64, bool)> {
    let stem = filename.strip_suffix(EXTENSION)?.strip_prefix(base)?;

    if stem.is_empty() {
        return Some((0, false));
    }

    let digits = stem.strip_prefix('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok().map(|version| (version, true))
}

pub fn dataset_filename(base: &str, version: u64) -> String {
    format!("{base}_{version}{EXTENSION}")
}
