//! FileSystem trait definition

use crate::permissions::Permissions;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Metadata about a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    /// Packed mode word (see [`crate::fs::mode`]).
    pub mode: u32,
    pub size: u64,
    pub uid: u32,
    pub gid: u32,
    pub modified: Option<DateTime<Local>>,
}

impl FileMetadata {
    pub fn permissions(&self) -> Permissions {
        Permissions::from_mode(self.mode)
    }

    pub fn is_dir(&self) -> bool {
        self.permissions().is_dir()
    }

    pub fn is_symlink(&self) -> bool {
        self.permissions().is_link()
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists, following symlinks
    fn exists(&self, path: &Path) -> bool;

    /// Metadata of the path itself, without following a trailing symlink
    fn symlink_metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Metadata of the path with symlinks resolved
    fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Target a symlink points to
    fn read_link(&self, path: &Path) -> Result<PathBuf>;

    /// List directory contents, sorted by name
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Apply POSIX permission bits (`0o7777` range), following symlinks
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;

    /// Packed mode word without following a trailing symlink
    fn symlink_mode(&self, path: &Path) -> Result<u32> {
        Ok(self.symlink_metadata(path)?.mode)
    }

    /// Packed mode word with symlinks resolved
    fn mode(&self, path: &Path) -> Result<u32> {
        Ok(self.metadata(path)?.mode)
    }
}
