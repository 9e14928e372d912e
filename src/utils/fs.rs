use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::{format_from_path, OptimizerError, OptimizerResult, PathError};

/// Get file size in bytes
pub fn get_file_size(path: impl AsRef<Path>) -> OptimizerResult<u64> {
    fs::metadata(path.as_ref())
        .map(|m| m.len())
        .map_err(|e| OptimizerError::io(format!("Failed to get file size: {}", e)))
}

/// Get file size in kilobytes (1 KB = 1024 bytes)
pub fn get_file_size_kb(path: impl AsRef<Path>) -> OptimizerResult<f64> {
    get_file_size(path).map(|bytes| bytes as f64 / 1024.0)
}

/// Create a directory and all of its parents
pub fn create_dir_all(path: impl AsRef<Path>) -> OptimizerResult<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| PathError::io_at(path, e).into())
}

/// Lists the eligible images directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into, and entries that are not regular
/// files are skipped even when their name carries an image extension.
pub fn list_images(dir: impl AsRef<Path>) -> OptimizerResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| PathError::io_at(dir, e))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PathError::io_at(dir, e))?.path();
        if path.is_file() && format_from_path(&path).is_some() {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

/// Write `data` to `path` via a temporary sibling so a failed write never
/// leaves a truncated file under the final name.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> OptimizerResult<()> {
    let path = path.as_ref();
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| OptimizerError::from(PathError::NotFile(path.to_path_buf())))?;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = fs::write(&tmp_path, data).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(PathError::io_at(path, e).into());
    }
    Ok(())
}
