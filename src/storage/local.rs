// Local persistence of submitted images until the worker hosts them

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::types::AppResult;

/// Write `data` under `dir` with a fresh unique name, keeping the
/// original file's extension so the image host can infer its type.
pub async fn persist_upload(
    dir: &Path,
    original_name: Option<&str>,
    data: &[u8],
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir).await?;

    let stem = Uuid::new_v4().to_string();
    let file_name = match original_name.and_then(extension_of) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    };

    let path = dir.join(file_name);
    fs::write(&path, data).await?;
    debug!(path = %path.display(), size = data.len(), "Persisted upload");

    Ok(path)
}

/// Delete a persisted upload. A file that is already gone is not an error.
pub async fn remove_upload(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed uploaded image"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove uploaded image"),
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
}
