//! Local filesystem adapter using std::fs, walkdir and tempfile.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rebrand_core::{
    application::{ApplicationError, ports::ProjectFilesystem},
    error::{RebrandError, RebrandResult},
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Production filesystem implementation.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target, so a reader sees either the old or the new
/// content. Symlinks are not followed during traversal.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFilesystem for LocalFilesystem {
    fn list_files(&self, root: &Path, excluded: &[PathBuf]) -> RebrandResult<Vec<PathBuf>> {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !excluded.iter().any(|x| e.path().starts_with(x)));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(map_io_error(root, e.into(), "walk directory"));
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!(root = %root.display(), count = files.len(), "Listed files");
        Ok(files)
    }

    fn read(&self, path: &Path) -> RebrandResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> RebrandResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let permissions = std::fs::metadata(path).ok().map(|m| m.permissions());

        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| map_io_error(path, e, "create temp file"))?;
        temp.write_all(content)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| map_io_error(path, e, "write temp file"))?;
        if let Some(permissions) = permissions {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }

        temp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> RebrandResult<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::copy(from, to).map_err(|e| map_io_error(to, e, "copy file"))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_readable_file(&self, path: &Path) -> bool {
        path.is_file() && std::fs::File::open(path).is_ok()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> RebrandError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_files_sorted_and_skips_excluded() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("lib/src")).unwrap();
        std::fs::create_dir_all(root.join("build/out")).unwrap();
        std::fs::write(root.join("lib/src/b.dart"), "b").unwrap();
        std::fs::write(root.join("lib/a.dart"), "a").unwrap();
        std::fs::write(root.join("build/out/c.dart"), "c").unwrap();

        let files = LocalFilesystem::new()
            .list_files(root, &[root.join("build")])
            .unwrap();

        assert_eq!(files, vec![root.join("lib/a.dart"), root.join("lib/src/b.dart")]);
    }

    #[test]
    fn single_file_root_lists_itself() {
        let dir = TempDir::new().unwrap();
        let readme = dir.path().join("README.md");
        std::fs::write(&readme, "# app").unwrap();

        let files = LocalFilesystem::new().list_files(&readme, &[]).unwrap();
        assert_eq!(files, vec![readme]);
    }

    #[test]
    fn write_atomic_replaces_content_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.dart");
        std::fs::write(&path, "old").unwrap();

        LocalFilesystem::new().write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gradlew");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        LocalFilesystem::new()
            .write_atomic(&path, b"#!/bin/sh\necho hi\n")
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn copy_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("bell.png");
        std::fs::write(&from, [0x89, b'P', b'N', b'G']).unwrap();
        let to = dir.path().join("res/drawable/ic_stat_notification.png");

        LocalFilesystem::new().copy_file(&from, &to).unwrap();
        assert_eq!(std::fs::read(&to).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn readable_file_check() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("icon.png");
        std::fs::write(&file, "x").unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.is_readable_file(&file));
        assert!(!fs.is_readable_file(dir.path()));
        assert!(!fs.is_readable_file(&dir.path().join("missing.png")));
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let err = LocalFilesystem::new()
            .read(Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
