//! Snapshot of one path: metadata plus decoded permissions.

use crate::fs::{clean_path, FileSystem};
use crate::permissions::{Permissions, PermissionsReport};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    /// Whether the path (or a link's target) could be stat'ed.
    pub exists: bool,
    /// Zero for kinds that carry no size.
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
    pub uid: u32,
    pub gid: u32,
    pub permissions: Permissions,
    pub link_target: Option<PathBuf>,
}

impl FileEntry {
    pub fn load<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Self {
        let path = clean_path(path);
        let path = path.as_path();
        let permissions = Permissions::resolve(fs, path);

        let followed = fs.metadata(path);
        let exists = followed.is_ok();
        let meta = followed.or_else(|_| fs.symlink_metadata(path)).ok();
        if meta.is_none() {
            debug!(path = %path.display(), "entry does not exist");
        }

        let link_target = if permissions.is_link() {
            fs.read_link(path).ok()
        } else {
            None
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let (size, modified, uid, gid) = match &meta {
            Some(m) if exists && permissions.has_size() => (m.size, m.modified, m.uid, m.gid),
            Some(m) => (0, m.modified, m.uid, m.gid),
            None => (0, None, 0, 0),
        };

        Self {
            path: path.to_path_buf(),
            name,
            exists,
            size,
            modified,
            uid,
            gid,
            permissions,
            link_target,
        }
    }

    /// A link whose target could not be resolved.
    pub fn is_dangling(&self) -> bool {
        self.permissions.is_link() && !self.exists
    }

    pub fn owner(&self) -> String {
        self.uid.to_string()
    }

    pub fn group(&self) -> String {
        self.gid.to_string()
    }

    pub fn newer_than(&self, t: DateTime<Local>) -> bool {
        self.modified.map(|m| m > t).unwrap_or(false)
    }

    pub fn older_than(&self, t: DateTime<Local>) -> bool {
        self.modified.map(|m| m < t).unwrap_or(false)
    }

    pub fn report(&self) -> EntryReport {
        EntryReport {
            path: self.path.clone(),
            name: self.name.clone(),
            exists: self.exists,
            size: self.permissions.has_size().then_some(self.size),
            modified: self.modified,
            uid: self.uid,
            gid: self.gid,
            link_target: self.link_target.clone(),
            dangling: self.is_dangling(),
            permissions: self.permissions.report(),
        }
    }
}

/// Serializable form of a [`FileEntry`].
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub path: PathBuf,
    pub name: String,
    pub exists: bool,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Local>>,
    pub uid: u32,
    pub gid: u32,
    pub link_target: Option<PathBuf>,
    pub dangling: bool,
    pub permissions: PermissionsReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mode::S_IFIFO;
    use crate::fs::{MockEntry, MockFileSystem};
    use chrono::Duration;

    #[test]
    fn test_load_regular_file() {
        let fs = MockFileSystem::new();
        fs.add_file("notes.txt", 0o640, 42);
        fs.set_owner("notes.txt", 1000, 100);

        let entry = FileEntry::load(&fs, Path::new("/mock/notes.txt"));
        assert!(entry.exists);
        assert_eq!(entry.name, "notes.txt");
        assert_eq!(entry.size, 42);
        assert_eq!(entry.owner(), "1000");
        assert_eq!(entry.group(), "100");
        assert_eq!(entry.permissions.octal(), "0640");
        assert!(entry.link_target.is_none());
    }

    #[test]
    fn test_sizeless_kinds_report_zero() {
        let fs = MockFileSystem::new();
        let mut pipe = MockEntry::new(S_IFIFO | 0o644);
        pipe.size = 99;
        fs.add_entry("pipe", pipe);

        let entry = FileEntry::load(&fs, Path::new("/mock/pipe"));
        assert_eq!(entry.size, 0);
        assert_eq!(entry.report().size, None);
    }

    #[test]
    fn test_symlink_entry() {
        let fs = MockFileSystem::new();
        fs.add_file("target", 0o644, 7);
        fs.add_symlink("link", "target");

        let entry = FileEntry::load(&fs, Path::new("/mock/link"));
        assert!(entry.permissions.is_link());
        assert!(!entry.is_dangling());
        assert_eq!(entry.size, 7);
        assert_eq!(entry.link_target, Some(PathBuf::from("target")));
    }

    #[test]
    fn test_dangling_symlink_entry() {
        let fs = MockFileSystem::new();
        fs.add_symlink("dead", "nowhere");

        let entry = FileEntry::load(&fs, Path::new("/mock/dead"));
        assert!(!entry.exists);
        assert!(entry.is_dangling());
        assert_eq!(entry.permissions.octal(), "0000");
        assert!(entry.report().dangling);
    }

    #[test]
    fn test_missing_entry() {
        let fs = MockFileSystem::new();
        let entry = FileEntry::load(&fs, Path::new("/mock/ghost"));
        assert!(!entry.exists);
        assert!(!entry.is_dangling());
        assert_eq!(entry.permissions, Permissions::default());
    }

    #[test]
    fn test_age_comparisons() {
        let fs = MockFileSystem::new();
        let now = Local::now();
        let mut file = MockEntry::new(0o100644);
        file.modified = Some(now - Duration::hours(2));
        fs.add_entry("old", file);

        let entry = FileEntry::load(&fs, Path::new("/mock/old"));
        assert!(entry.newer_than(now - Duration::days(1)));
        assert!(entry.older_than(now));
        assert!(!entry.newer_than(now));
    }
}
