//! Source discovery: recursive directory walk for `.scala` files.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScalatError};

/// Collects every `.scala` file under the given roots, in a stable order.
///
/// A root that is itself a file is taken as-is, whatever its extension;
/// explicitly named inputs are never filtered out.
pub fn collect_sources(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else if root.is_dir() {
            visit(root, &mut files)?;
        } else {
            return Err(ScalatError::MissingRoot(root.clone()));
        }
    }
    files.sort();
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| ScalatError::Walk {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ScalatError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            visit(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "scala") {
            files.push(path);
        }
    }
    Ok(())
}
