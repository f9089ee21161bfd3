//! FileSystem abstraction for testable file operations

pub mod mode;
mod mock;
mod real;
mod r#trait;

pub use mock::{MockEntry, MockFileSystem};
pub use r#trait::{DirEntry, FileMetadata, FileSystem};
pub use real::RealFileSystem;

use std::path::{Path, PathBuf};

/// Lexically cleans `path`: repeated separators, `.` segments and a trailing
/// separator are dropped. A trailing separator would make the OS follow a
/// final symlink even on `lstat`.
pub fn clean_path(path: &Path) -> PathBuf {
    path.components().collect()
}
