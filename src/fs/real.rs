use super::mode;
use super::{DirEntry, FileMetadata, FileSystem};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn convert(meta: &fs::Metadata) -> FileMetadata {
    use std::os::unix::fs::MetadataExt;

    FileMetadata {
        mode: mode::from_posix(meta.mode()),
        size: meta.len(),
        uid: meta.uid(),
        gid: meta.gid(),
        modified: meta.modified().ok().map(DateTime::<Local>::from),
    }
}

#[cfg(not(unix))]
fn convert(meta: &fs::Metadata) -> FileMetadata {
    let file_type = meta.file_type();
    let perm = if meta.permissions().readonly() {
        0o444
    } else {
        0o666
    };
    let st_mode = if file_type.is_symlink() {
        mode::S_IFLNK | 0o777
    } else if file_type.is_dir() {
        mode::S_IFDIR | perm | 0o111
    } else {
        mode::S_IFREG | perm
    };

    FileMetadata {
        mode: mode::from_posix(st_mode),
        size: meta.len(),
        uid: 0,
        gid: 0,
        modified: meta.modified().ok().map(DateTime::<Local>::from),
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn symlink_metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::symlink_metadata(path)
            .context(format!("Failed to get metadata for {:?}", path))?;
        Ok(convert(&meta))
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::metadata(path).context(format!("Failed to get metadata for {:?}", path))?;
        Ok(convert(&meta))
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        fs::read_link(path).context(format!("Failed to read link {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let entries = fs::read_dir(path).context(format!("Failed to read directory {:?}", path))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            result.push(DirEntry {
                path: entry.path(),
                name: entry.file_name().to_string_lossy().to_string(),
            });
        }
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mode = mode & mode::POSIX_PERM_MASK;
        debug!(path = %path.display(), mode = %format!("{:04o}", mode), "chmod");
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .context(format!("Failed to set permissions on {:?}", path))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        let mut perms = fs::metadata(path)
            .context(format!("Failed to get metadata for {:?}", path))?
            .permissions();
        debug!(path = %path.display(), mode = %format!("{:04o}", mode), "chmod");
        perms.set_readonly(mode & 0o222 == 0);
        fs::set_permissions(path, perms)
            .context(format!("Failed to set permissions on {:?}", path))
    }
}
