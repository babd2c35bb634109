//! Filesystem utilities.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// A directory that was wiped and recreated for this run.
///
/// If the guard is dropped without [`RecreatedDir::commit`], the directory
/// is removed again so a failed run leaves no half-written tree behind.
#[derive(Debug)]
pub struct RecreatedDir {
    path: PathBuf,
    committed: bool,
}

impl RecreatedDir {
    /// Remove `path` if it exists and create it empty.
    pub fn acquire(path: &Path) -> Result<Self> {
        remove_dir_all_if_exists(path)?;
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;

        Ok(RecreatedDir {
            path: path.to_path_buf(),
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the directory.
    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for RecreatedDir {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        tracing::warn!("removing incomplete directory {}", self.path.display());
        if let Err(e) = fs::remove_dir_all(&self.path) {
            tracing::warn!("failed to remove {}: {}", self.path.display(), e);
        }
    }
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Create a single directory.
pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// Read a file as text, replacing invalid UTF-8.
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write a string to a file.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy a file verbatim. Copying a file onto itself is a no-op.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if src == dst {
        return Ok(());
    }
    fs::copy(src, dst).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dst.display())
    })?;
    Ok(())
}

/// Absolute form of `path` with `.` and `..` resolved.
///
/// Existing prefixes are canonicalized so symlinks are followed; the rest
/// of the path does not need to exist.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .context("failed to read the current directory")?
            .join(path)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => {
                resolved.push(other);
                if let Ok(real) = resolved.canonicalize() {
                    resolved = real;
                }
            }
        }
    }
    Ok(resolved)
}

/// Immediate children of `dir`, sorted by file name.
pub fn list_dir_sorted(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Mark a file as executable (`0755`).
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("failed to make executable: {}", path.display()))
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
