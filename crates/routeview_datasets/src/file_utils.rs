use std::{fs::Metadata, path::Path};

use tracing::warn;

/// Metadata of `path` with symlinks followed.
///
/// `None` when the target is missing or resolves outside of `root`, which
/// must already be canonical.
pub(crate) async fn contained_metadata(root: &Path, path: &Path) -> Option<Metadata> {
    let resolved = tokio::fs::canonicalize(path).await.ok()?;

    if !resolved.starts_with(root) {
        warn!(path = %path.display(), "skipping link outside of the data root");
        return None;
    }

    tokio::fs::metadata(&resolved).await.ok()
}
