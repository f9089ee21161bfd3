//! Permission decoding
//!
//! A [`Permissions`] value is the structured decomposition of one packed
//! mode word: entry kind, special mode flags, three [`Permission`] triads and
//! the reserved bit region that is carried along uninterpreted.
//!
//! Decoding is total: every 32-bit pattern has an interpretation, and
//! [`Permissions::bits`] recomposes exactly the word that was decoded.
//!
//! # Example
//!
//! ```
//! use permscope::{EntryKind, Permissions};
//!
//! let perms = Permissions::from_mode(0o755);
//! assert_eq!(perms.kind(), EntryKind::File);
//! assert_eq!(perms.octal(), "0755");
//! assert_eq!(perms.bits(), 0o755);
//! ```

pub mod consts;
mod kind;
mod permission;
mod risk;

pub use kind::EntryKind;
pub use permission::Permission;
pub use risk::{RiskBand, RISK_HIGH, RISK_LOW, RISK_MEDIUM};

use crate::bitmask::Bitmask;
use crate::fs::{clean_path, mode, FileSystem, RealFileSystem};
use crate::render::{Decorations, LineBuilder, Palette, Token};
use consts::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Permissions {
    raw: u32,
    kind: EntryKind,
    type_field: Bitmask,
    mode_field: Bitmask,
    reserved: Bitmask,
    link: bool,
    sticky: bool,
    setuid: bool,
    setgid: bool,
    owner: Permission,
    group: Permission,
    world: Permission,
}

impl Permissions {
    pub fn from_mode(raw: u32) -> Self {
        let mut perms = Self::default();
        perms.set(raw);
        perms
    }

    /// Replaces all decoded state with the decomposition of `raw`.
    pub fn set(&mut self, raw: u32) -> &mut Self {
        self.raw = raw;

        // not interpreted, kept so `bits` reproduces the input
        self.reserved = Bitmask::with_mask(raw, MASK_RESERVED, SHIFT_RESERVED);

        self.mode_field = Bitmask::with_mask(raw, MASK_MODE, SHIFT_MODE);
        self.link = self.mode_field.matches_any(MODE_LINK);
        self.sticky = self.mode_field.matches_any(MODE_STICKY);
        self.setuid = self.mode_field.matches_any(MODE_SETUID);
        self.setgid = self.mode_field.matches_any(MODE_SETGID);

        self.type_field = Bitmask::with_mask(raw, MASK_TYPE, SHIFT_TYPE);
        self.kind = EntryKind::classify(self.type_field);

        self.owner = Permission::new(
            Bitmask::with_mask(raw, MASK_PERM_OWNER, SHIFT_PERM_OWNER).value(),
        );
        self.group = Permission::new(
            Bitmask::with_mask(raw, MASK_PERM_GROUP, SHIFT_PERM_GROUP).value(),
        );
        self.world = Permission::new(
            Bitmask::with_mask(raw, MASK_PERM_WORLD, SHIFT_PERM_WORLD).value(),
        );

        self
    }

    /// Decodes the permissions of `path`.
    ///
    /// A symlink is decoded from its target's mode and then flagged as a
    /// link, so callers see what the link grants access to. Stat failures
    /// (missing path, dangling link, access denied) decode as mode 0. The
    /// path is cleaned first, so `link/` still reports the link itself.
    pub fn resolve<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Self {
        let path = clean_path(path);
        let path = path.as_path();
        let mut perms = Self::from_mode(mode_or_zero(fs.symlink_mode(path), path));

        if perms.is_link() {
            debug!(path = %path.display(), "resolving symlink target");
            perms.set(mode_or_zero(fs.mode(path), path));
            perms.link = true;
        }

        perms
    }

    /// [`Permissions::resolve`] against the real filesystem.
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::resolve(&RealFileSystem::new(), path.as_ref())
    }

    /// The word last passed to [`Permissions::set`].
    pub fn raw(&self) -> u32 {
        self.raw
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn reserved(&self) -> Bitmask {
        self.reserved
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_link(&self) -> bool {
        self.link
    }

    pub fn is_block_device(&self) -> bool {
        self.kind == EntryKind::BlockDevice
    }

    pub fn is_char_device(&self) -> bool {
        self.kind == EntryKind::CharDevice
    }

    pub fn is_fifo(&self) -> bool {
        self.kind == EntryKind::Fifo
    }

    pub fn is_socket(&self) -> bool {
        self.kind == EntryKind::Socket
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn is_setuid(&self) -> bool {
        self.setuid
    }

    pub fn is_setgid(&self) -> bool {
        self.setgid
    }

    pub fn has_size(&self) -> bool {
        self.kind.has_size()
    }

    pub fn has_no_size(&self) -> bool {
        !self.has_size()
    }

    pub fn owner(&self) -> &Permission {
        &self.owner
    }

    pub fn group(&self) -> &Permission {
        &self.group
    }

    pub fn world(&self) -> &Permission {
        &self.world
    }

    pub fn owner_mut(&mut self) -> &mut Permission {
        &mut self.owner
    }

    pub fn group_mut(&mut self) -> &mut Permission {
        &mut self.group
    }

    pub fn world_mut(&mut self) -> &mut Permission {
        &mut self.world
    }

    pub fn is_readable(&self) -> bool {
        self.world.has_read()
    }

    pub fn is_readable_group(&self) -> bool {
        self.group.has_read()
    }

    pub fn is_readable_owner(&self) -> bool {
        self.owner.has_read()
    }

    pub fn is_writable(&self) -> bool {
        self.world.has_write()
    }

    pub fn is_writable_group(&self) -> bool {
        self.group.has_write()
    }

    pub fn is_writable_owner(&self) -> bool {
        self.owner.has_write()
    }

    pub fn is_executable(&self) -> bool {
        self.world.has_exec()
    }

    pub fn is_executable_group(&self) -> bool {
        self.group.has_exec()
    }

    pub fn is_executable_owner(&self) -> bool {
        self.owner.has_exec()
    }

    /// Overall exposure in `[0, 1]`. World access weighs 4, group 2 and
    /// owner 1, so full access for the owner alone scores 1/7 while the same
    /// access for the world scores 4/7.
    pub fn risk(&self) -> f64 {
        let w = self.world.risk() * 4.0;
        let g = self.group.risk() * 2.0;
        let o = self.owner.risk();
        (w + g + o) / 7.0
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk())
    }

    /// Recomposes the mode word from the decoded fields, including any
    /// edits made to the triads since decoding.
    pub fn bits(&self) -> u32 {
        self.type_field
            .shift_left(SHIFT_TYPE)
            .set(self.mode_field.shift_left(SHIFT_MODE).value())
            .set(self.reserved.shift_left(SHIFT_RESERVED).value())
            .set(self.perm_bits())
            .value()
    }

    fn perm_bits(&self) -> u32 {
        self.owner
            .mask()
            .shift_left(SHIFT_PERM_OWNER)
            .set(self.group.mask().shift_left(SHIFT_PERM_GROUP).value())
            .set(self.world.mask().shift_left(SHIFT_PERM_WORLD).value())
            .value()
    }

    /// POSIX permission and special bits (`0o7777` range), as chmod takes them.
    pub fn posix_mode(&self) -> u32 {
        mode::to_posix(self.bits()) & mode::POSIX_PERM_MASK
    }

    #[cfg(unix)]
    pub fn file_mode(&self) -> std::fs::Permissions {
        use std::os::unix::fs::PermissionsExt;
        std::fs::Permissions::from_mode(self.posix_mode())
    }

    /// Zero-padded octal of the nine permission bits, e.g. `"0755"`.
    pub fn octal(&self) -> String {
        format!("{:04o}", self.perm_bits())
    }

    /// Grants execute, together with read, to each `true` subject and revokes
    /// execute from the others.
    pub fn grant_exec(&mut self, owner: bool, group: bool, world: bool) {
        for (triad, on) in self.subjects_mut(owner, group, world) {
            if on {
                triad.set_exec();
                triad.set_read();
            } else {
                triad.clear_exec();
            }
        }
    }

    pub fn grant_exec_all(&mut self) {
        self.grant_exec(true, true, true);
    }

    /// Grants read to each `true` subject. Subjects losing read lose execute too.
    pub fn grant_read(&mut self, owner: bool, group: bool, world: bool) {
        for (triad, on) in self.subjects_mut(owner, group, world) {
            if on {
                triad.set_read();
            } else {
                triad.clear_read();
                triad.clear_exec();
            }
        }
    }

    pub fn grant_read_all(&mut self) {
        self.grant_read(true, true, true);
    }

    pub fn grant_write(&mut self, owner: bool, group: bool, world: bool) {
        for (triad, on) in self.subjects_mut(owner, group, world) {
            if on {
                triad.set_write();
            } else {
                triad.clear_write();
            }
        }
    }

    pub fn grant_write_all(&mut self) {
        self.grant_write(true, true, true);
    }

    fn subjects_mut(
        &mut self,
        owner: bool,
        group: bool,
        world: bool,
    ) -> [(&mut Permission, bool); 3] {
        [
            (&mut self.owner, owner),
            (&mut self.group, group),
            (&mut self.world, world),
        ]
    }

    fn render_mode<D: Decorations + ?Sized>(&self, tokens: &D) -> String {
        let none = tokens.token(Token::ModeNone);
        let mut line = LineBuilder::new();
        line.push_alt(self.sticky, tokens.token(Token::ModeSticky), none)
            .push_alt(self.setuid, tokens.token(Token::ModeSetuid), none)
            .push_alt(self.setgid, tokens.token(Token::ModeSetgid), none);
        line.finish(false)
    }

    /// Single-line summary: link marker, kind, special modes, the three
    /// triads, octal and the risk indicator, in fixed columns.
    pub fn render<D: Decorations + ?Sized>(&self, tokens: &D) -> String {
        let mut line = LineBuilder::new();
        line.push_alt(
            self.link,
            tokens.token(Token::Link),
            tokens.token(Token::NoLink),
        )
        .pad(1)
        .push(tokens.token(self.kind.token()))
        .push(&self.render_mode(tokens))
        .pad(1)
        .push(&self.owner.render(tokens))
        .pad(1)
        .push(&self.group.render(tokens))
        .pad(1)
        .push(&self.world.render(tokens))
        .pad(1)
        .push(&self.octal())
        .pad(1)
        .push(&self.risk_band().render(tokens));
        line.finish(false)
    }

    pub fn report(&self) -> PermissionsReport {
        PermissionsReport {
            mode: self.bits(),
            posix_mode: mode::to_posix(self.bits()),
            octal: self.octal(),
            kind: self.kind,
            link: self.link,
            sticky: self.sticky,
            setuid: self.setuid,
            setgid: self.setgid,
            owner: self.owner,
            group: self.group,
            world: self.world,
            reserved: self.reserved,
            risk: self.risk(),
            risk_band: self.risk_band(),
        }
    }
}

fn mode_or_zero(result: anyhow::Result<u32>, path: &Path) -> u32 {
    result.unwrap_or_else(|err| {
        debug!(path = %path.display(), error = %err, "stat failed, decoding as empty mode");
        0
    })
}

impl From<u32> for Permissions {
    fn from(raw: u32) -> Self {
        Self::from_mode(raw)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Palette::plain()))
    }
}

/// Serializable snapshot of a decoded mode word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionsReport {
    pub mode: u32,
    pub posix_mode: u32,
    pub octal: String,
    pub kind: EntryKind,
    pub link: bool,
    pub sticky: bool,
    pub setuid: bool,
    pub setgid: bool,
    pub owner: Permission,
    pub group: Permission,
    pub world: Permission,
    pub reserved: Bitmask,
    pub risk: f64,
    pub risk_band: RiskBand,
}
