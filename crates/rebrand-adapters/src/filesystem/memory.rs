//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use rebrand_core::{
    application::{ApplicationError, ports::ProjectFilesystem},
    error::{RebrandError, RebrandResult},
};

/// In-memory filesystem for testing.
///
/// Directories exist implicitly as ancestors of files. Paths can be marked
/// unwritable to exercise failure handling.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    read_only: HashSet<PathBuf>,
    writes: usize,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file (testing helper).
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.insert(path.into(), content.into());
        }
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    /// Raw bytes of a file.
    pub fn read_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Make writes to `path` fail.
    pub fn set_read_only(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.into());
        }
    }

    /// Number of successful writes and copies so far.
    pub fn write_count(&self) -> usize {
        self.inner.read().map(|inner| inner.writes).unwrap_or(0)
    }

    /// All file paths.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn store(&self, path: &Path, content: Vec<u8>) -> RebrandResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        if inner.read_only.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Permission denied".into(),
            }
            .into());
        }
        inner.files.insert(path.to_path_buf(), content);
        inner.writes += 1;
        Ok(())
    }
}

impl ProjectFilesystem for MemoryFilesystem {
    fn list_files(&self, root: &Path, excluded: &[PathBuf]) -> RebrandResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(|_| lock_error(root))?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .filter(|p| !excluded.iter().any(|x| p.starts_with(x)))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> RebrandResult<Vec<u8>> {
        self.read_bytes(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> RebrandResult<()> {
        self.store(path, content.to_vec())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> RebrandResult<()> {
        let bytes = self.read(from)?;
        self.store(to, bytes)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.keys().any(|p| p.starts_with(path)))
            .unwrap_or(false)
    }

    fn is_readable_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }
}

fn lock_error(path: &Path) -> RebrandError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Memory filesystem lock poisoned".into(),
    }
    .into()
}
