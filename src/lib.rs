//! permscope - decode, score and render file permission mode words
//!
//! A packed 32-bit mode word carries the entry kind, the setuid, setgid and
//! sticky flags, a link flag, eleven reserved bits and three read/write/execute
//! triads. This library decomposes such words into a [`Permissions`] value,
//! scores how much access they grant, and renders them as fixed-width
//! listing lines whose decorations come from a pluggable [`Palette`].
//!
//! # Core Concepts
//!
//! - **Mode word**: the packed integer, see [`permissions::consts`] for its
//!   bit layout
//! - **Triad**: the three access bits of owner, group or world ([`Permission`])
//! - **Risk**: a [0, 1] score weighting world access over group over owner
//! - **Decorations**: strings (possibly ANSI-styled) looked up per [`Token`]
//!
//! # Example Usage
//!
//! ```
//! use permscope::{EntryKind, Palette, Permissions, RiskBand};
//!
//! let perms = Permissions::from_mode(0o644);
//! assert_eq!(perms.kind(), EntryKind::File);
//! assert_eq!(perms.risk_band(), RiskBand::None);
//! assert_eq!(perms.render(&Palette::plain()), "  ---- rw- r-- r-- 0644    ");
//! ```
//!
//! # Project Structure
//!
//! - [`bitmask`]: masked and shifted views over a `u32`
//! - [`permissions`]: mode word decoding, risk scoring and access adjustments
//! - [`fs`]: filesystem collaborator with real and in-memory implementations
//! - [`entry`]: per-path snapshots for listings
//! - [`render`]: decoration tokens, palettes and line layout
//! - [`cli`]: the `permscope` command line

pub mod bitmask;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod fs;
pub mod permissions;
pub mod render;
pub mod util;

pub use bitmask::Bitmask;
pub use config::{ColorMode, ConfigError, PermscopeConfig};
pub use entry::{EntryReport, FileEntry};
pub use error::{parse_mode, ParseModeError};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use permissions::{
    EntryKind, Permission, Permissions, PermissionsReport, RiskBand, RISK_HIGH, RISK_LOW,
    RISK_MEDIUM,
};
pub use render::{ColumnWidths, Decorations, Palette, Renderer, Token};
pub use util::{init_logging, parse_level, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
