use super::mode::{self, POSIX_PERM_MASK, S_IFDIR, S_IFLNK, S_IFMT, S_IFREG};
use super::{DirEntry, FileMetadata, FileSystem};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Link chains longer than this are reported as loops.
const MAX_LINK_DEPTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEntry {
    /// POSIX `st_mode`
    pub st_mode: u32,
    pub size: u64,
    pub uid: u32,
    pub gid: u32,
    pub modified: Option<DateTime<Local>>,
    pub target: Option<PathBuf>,
}

impl MockEntry {
    pub fn new(st_mode: u32) -> Self {
        Self {
            st_mode,
            size: 0,
            uid: 0,
            gid: 0,
            modified: None,
            target: None,
        }
    }

    fn to_metadata(&self) -> FileMetadata {
        FileMetadata {
            mode: mode::from_posix(self.st_mode),
            size: self.size,
            uid: self.uid,
            gid: self.gid,
            modified: self.modified,
        }
    }
}

pub struct MockFileSystem {
    entries: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            root,
        }
    }

    /// Adds a regular file with permission bits `perm` and `size` bytes.
    pub fn add_file(&self, path: impl AsRef<Path>, perm: u32, size: u64) {
        let mut entry = MockEntry::new(S_IFREG | (perm & POSIX_PERM_MASK));
        entry.size = size;
        self.add_entry(path, entry);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>, perm: u32) {
        self.add_entry(path, MockEntry::new(S_IFDIR | (perm & POSIX_PERM_MASK)));
    }

    /// Adds a symlink. Relative targets resolve against the link's parent.
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        let mut entry = MockEntry::new(S_IFLNK | 0o777);
        entry.target = Some(target.as_ref().to_path_buf());
        self.add_entry(path, entry);
    }

    /// Adds an entry with an arbitrary `st_mode` (fifos, sockets, devices).
    pub fn add_node(&self, path: impl AsRef<Path>, st_mode: u32) {
        self.add_entry(path, MockEntry::new(st_mode));
    }

    pub fn add_entry(&self, path: impl AsRef<Path>, entry: MockEntry) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(parent) = path.parent() {
            self.ensure_parents(&mut entries, parent);
        }

        entries.insert(path, entry);
    }

    pub fn set_owner(&self, path: impl AsRef<Path>, uid: u32, gid: u32) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(&path) {
            entry.uid = uid;
            entry.gid = gid;
        }
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        let mut clean = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    clean.pop();
                }
                other => clean.push(other),
            }
        }
        clean
    }

    fn ensure_parents(&self, entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            entries
                .entry(current.clone())
                .or_insert_with(|| MockEntry::new(S_IFDIR | 0o755));
        }
    }

    /// Follows symlinks until a non-link entry is reached.
    fn resolve(&self, path: &Path) -> Result<(PathBuf, MockEntry)> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut current = self.normalize_path(path);

        for _ in 0..MAX_LINK_DEPTH {
            let entry = entries
                .get(&current)
                .ok_or_else(|| anyhow!("Path not found: {:?}", current))?;

            match (&entry.target, entry.st_mode & S_IFMT) {
                (Some(target), S_IFLNK) => {
                    let base = current.parent().map(Path::to_path_buf).unwrap_or_default();
                    current = self.normalize_path(&base.join(target));
                }
                _ => return Ok((current, entry.clone())),
            }
        }

        Err(anyhow!("Too many levels of symbolic links: {:?}", path))
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok()
    }

    fn symlink_metadata(&self, path: &Path) -> Result<FileMetadata> {
        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .get(&path)
            .ok_or_else(|| anyhow!("Path not found: {:?}", path))?;
        Ok(entry.to_metadata())
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let (_, entry) = self.resolve(path)?;
        Ok(entry.to_metadata())
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&path)
            .and_then(|e| e.target.clone())
            .ok_or_else(|| anyhow!("Not a symlink: {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let (path, entry) = self.resolve(path)?;
        if entry.st_mode & S_IFMT != S_IFDIR {
            return Err(anyhow!("Not a directory: {:?}", path));
        }

        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut result: Vec<DirEntry> = entries
            .keys()
            .filter(|p| p.parent() == Some(path.as_path()))
            .map(|p| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            })
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        let (resolved, _) = self.resolve(path)?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .get_mut(&resolved)
            .ok_or_else(|| anyhow!("Path not found: {:?}", resolved))?;
        entry.st_mode = (entry.st_mode & S_IFMT) | (mode & POSIX_PERM_MASK);
        Ok(())
    }
}
