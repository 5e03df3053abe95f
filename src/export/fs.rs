//! Filesystem access for exported playlist files

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem operations the exporter needs
pub trait ExportFs {
    /// Whether `path` exists and is a directory
    fn folder_exists(&self, path: &Path) -> bool;

    /// Write `content` to `path`, creating or truncating the file
    fn write_text_file(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// The local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ExportFs for LocalFs {
    fn folder_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn write_text_file(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)?;
        debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// Checks folders on the local filesystem but only records writes
#[derive(Debug, Default)]
pub struct DryRunFs {
    planned: RefCell<Vec<(PathBuf, usize)>>,
}

impl DryRunFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths that would have been written, with their content length
    pub fn planned(&self) -> Vec<(PathBuf, usize)> {
        self.planned.borrow().clone()
    }
}

impl ExportFs for DryRunFs {
    fn folder_exists(&self, path: &Path) -> bool {
        LocalFs.folder_exists(path)
    }

    fn write_text_file(&self, path: &Path, content: &str) -> io::Result<()> {
        debug!("[dry run] Would write {}", path.display());
        self.planned
            .borrow_mut()
            .push((path.to_path_buf(), content.len()));
        Ok(())
    }
}

impl<T: ExportFs + ?Sized> ExportFs for &T {
    fn folder_exists(&self, path: &Path) -> bool {
        (**self).folder_exists(path)
    }

    fn write_text_file(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write_text_file(path, content)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    /// In-memory filesystem for tests
    #[derive(Debug, Default)]
    pub struct MemoryFs {
        folders: HashSet<PathBuf>,
        files: RefCell<BTreeMap<PathBuf, String>>,
        writes: RefCell<Vec<PathBuf>>,
        read_only: HashSet<PathBuf>,
    }

    impl MemoryFs {
        pub fn with_folder(path: &str) -> Self {
            let mut fs = Self::default();
            fs.folders.insert(PathBuf::from(path));
            fs
        }

        /// Make writes to this exact path fail
        pub fn deny(mut self, path: &str) -> Self {
            self.read_only.insert(PathBuf::from(path));
            self
        }

        pub fn file(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }

        pub fn files(&self) -> BTreeMap<PathBuf, String> {
            self.files.borrow().clone()
        }

        /// Every write attempt in order, including overwrites
        pub fn writes(&self) -> Vec<PathBuf> {
            self.writes.borrow().clone()
        }
    }

    impl ExportFs for MemoryFs {
        fn folder_exists(&self, path: &Path) -> bool {
            self.folders.contains(path)
        }

        fn write_text_file(&self, path: &Path, content: &str) -> io::Result<()> {
            if self.read_only.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.writes.borrow_mut().push(path.to_path_buf());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_fs_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Rock.m3u");

        LocalFs.write_text_file(&path, "#EXTM3U\nlong/old/entry.mp3\n").unwrap();
        LocalFs.write_text_file(&path, "#EXTM3U\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "#EXTM3U\n");
    }

    #[test]
    fn test_local_fs_folder_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(LocalFs.folder_exists(dir.path()));
        assert!(!LocalFs.folder_exists(&file));
        assert!(!LocalFs.folder_exists(&dir.path().join("missing")));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Rock.m3u");
        let fs = DryRunFs::new();

        fs.write_text_file(&path, "#EXTM3U\n").unwrap();

        assert!(!path.exists());
        assert_eq!(fs.planned(), vec![(path, 8)]);
    }
}
