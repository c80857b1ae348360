use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RunControlError};

/// Lists the `*.csv` training files of `dir` in lexicographic path order.
///
/// The order fixes the file index suffix of every population column, so it
/// must not depend on how the filesystem enumerates entries. Hidden files
/// are skipped; `exclude` removes one file for leave-one-out evaluation.
pub fn list_training_files(dir: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RunControlError::MissingTrainingDirectory(dir.to_path_buf()));
    }

    let excluded = exclude.map(canonical_or_self);
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| RunControlError::io(dir, e))? {
        let entry = entry.map_err(|e| RunControlError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == "csv") {
            continue;
        }
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if hidden {
            continue;
        }
        if excluded.as_deref() == Some(canonical_or_self(&path).as_path()) {
            tracing::info!("excluding {} from the training population", path.display());
            continue;
        }
        files.push(path);
    }

    if files.is_empty() {
        return Err(RunControlError::EmptyTrainingSet(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

fn canonical_or_self(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/training.rs"]
mod tests;
