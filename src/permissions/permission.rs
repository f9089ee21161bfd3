use super::consts::{PERM_EXEC, PERM_READ, PERM_RWX, PERM_WRITE};
use crate::bitmask::Bitmask;
use crate::render::{Decorations, LineBuilder, Palette, Token};
use serde::Serialize;
use std::fmt;

/// Read/write/execute bits granted to one subject (owner, group or world).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Permission {
    mask: Bitmask,
}

impl Permission {
    /// Builds a triad from a right-aligned 3-bit value. Bits above the triad
    /// are dropped.
    pub const fn new(bits: u32) -> Self {
        Self {
            mask: Bitmask::new(bits & PERM_RWX),
        }
    }

    pub const fn bits(&self) -> u32 {
        self.mask.value()
    }

    pub(crate) const fn mask(&self) -> Bitmask {
        self.mask
    }

    pub const fn has_read(&self) -> bool {
        self.mask.matches_any(PERM_READ)
    }

    pub const fn has_write(&self) -> bool {
        self.mask.matches_any(PERM_WRITE)
    }

    pub const fn has_exec(&self) -> bool {
        self.mask.matches_any(PERM_EXEC)
    }

    pub fn set_read(&mut self) {
        self.mask = self.mask.set(PERM_READ);
    }

    pub fn set_write(&mut self) {
        self.mask = self.mask.set(PERM_WRITE);
    }

    pub fn set_exec(&mut self) {
        self.mask = self.mask.set(PERM_EXEC);
    }

    pub fn clear_read(&mut self) {
        self.mask = self.mask.clear(PERM_READ);
    }

    pub fn clear_write(&mut self) {
        self.mask = self.mask.clear(PERM_WRITE);
    }

    pub fn clear_exec(&mut self) {
        self.mask = self.mask.clear(PERM_EXEC);
    }

    /// Sets each bit whose flag is `true`; bits passed as `false` are left alone.
    pub fn set(&mut self, r: bool, w: bool, x: bool) {
        if r {
            self.set_read();
        }
        if w {
            self.set_write();
        }
        if x {
            self.set_exec();
        }
    }

    /// Clears each bit whose flag is `true`; bits passed as `false` are left alone.
    pub fn clear(&mut self, r: bool, w: bool, x: bool) {
        if r {
            self.clear_read();
        }
        if w {
            self.clear_write();
        }
        if x {
            self.clear_exec();
        }
    }

    /// Exposure of this triad in `[0, 1]`: exec weighs 4, write 2, read 1.
    pub fn risk(&self) -> f64 {
        let mut score = 0.0;
        if self.has_exec() {
            score += 4.0;
        }
        if self.has_write() {
            score += 2.0;
        }
        if self.has_read() {
            score += 1.0;
        }
        score / 7.0
    }

    /// Renders the three positions in read, write, exec order. An absent bit
    /// still emits the "none" token so columns line up.
    pub fn render<D: Decorations + ?Sized>(&self, tokens: &D) -> String {
        let none = tokens.token(Token::PermNone);
        let mut line = LineBuilder::new();
        line.push_alt(self.has_read(), tokens.token(Token::PermRead), none)
            .push_alt(self.has_write(), tokens.token(Token::PermWrite), none)
            .push_alt(self.has_exec(), tokens.token(Token::PermExec), none);
        line.finish(false)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Palette::plain()))
    }
}

impl Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
