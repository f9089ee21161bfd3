use super::line::{pad_left, pad_right, visible_width, LineBuilder};
use super::{Decorations, Palette, Token};
use crate::entry::FileEntry;
use crate::permissions::{EntryKind, Permissions};
use indicatif::BinaryBytes;

const SIZE_WIDTH: usize = 12;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIMESTAMP_WIDTH: usize = 19;

/// Widths of the owner and group columns across a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub owner: usize,
    pub group: usize,
}

impl ColumnWidths {
    pub fn new(owner: usize, group: usize) -> Self {
        Self { owner, group }
    }

    pub fn measure<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |acc, e| Self {
            owner: acc.owner.max(visible_width(&e.owner())),
            group: acc.group.max(visible_width(&e.group())),
        })
    }
}

/// Binds a palette to a color switch. With color off every rendered line
/// has its ANSI sequences stripped.
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    color: bool,
}

impl Renderer {
    pub fn new(palette: Palette, color: bool) -> Self {
        Self { palette, color }
    }

    pub fn plain() -> Self {
        Self::new(Palette::plain(), false)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn color(&self) -> bool {
        self.color
    }

    fn token(&self, token: Token) -> &str {
        self.palette.token(token)
    }

    pub fn permissions(&self, perms: &Permissions) -> String {
        let mut line = LineBuilder::new();
        line.push(&perms.render(&self.palette));
        line.finish(!self.color)
    }

    /// Permission summary followed by owner and group columns.
    pub fn summary(
        &self,
        perms: &Permissions,
        owner: &str,
        group: &str,
        widths: ColumnWidths,
    ) -> String {
        let mut line = LineBuilder::new();
        self.push_summary(&mut line, perms, owner, group, widths);
        line.finish(!self.color)
    }

    fn push_summary(
        &self,
        line: &mut LineBuilder,
        perms: &Permissions,
        owner: &str,
        group: &str,
        widths: ColumnWidths,
    ) {
        line.push(&perms.render(&self.palette))
            .pad(1)
            .push(&pad_left(owner, widths.owner))
            .pad(1)
            .push(&pad_right(group, widths.group));
    }

    /// Full listing line: summary, size, timestamp, kind indicator, name and
    /// link target.
    pub fn entry(&self, entry: &FileEntry, widths: ColumnWidths) -> String {
        let perms = &entry.permissions;
        let mut line = LineBuilder::new();
        self.push_summary(&mut line, perms, &entry.owner(), &entry.group(), widths);
        line.pad(1);

        if perms.has_size() && entry.exists {
            line.push(&pad_left(&BinaryBytes(entry.size).to_string(), SIZE_WIDTH));
        } else {
            line.push(&pad_left(self.token(Token::NoSize), SIZE_WIDTH));
        }
        line.pad(1);

        match entry.modified {
            Some(ts) => line.push(&ts.format(TIMESTAMP_FORMAT).to_string()),
            None => line.push(&pad_right(self.token(Token::NoSize), TIMESTAMP_WIDTH)),
        };
        line.pad(1);

        let indicator = match perms.kind() {
            EntryKind::Directory => Token::IndicatorDir,
            EntryKind::CharDevice => Token::IndicatorCharDevice,
            EntryKind::BlockDevice => Token::IndicatorBlockDevice,
            EntryKind::Fifo => Token::IndicatorFifo,
            EntryKind::Socket => Token::IndicatorSocket,
            EntryKind::File => Token::IndicatorFile,
        };
        line.push(self.token(indicator)).pad(1);
        if perms.is_sticky() {
            line.push(self.token(Token::IndicatorSticky)).pad(1);
        }
        line.push(&entry.name);

        if perms.is_link() {
            line.pad(1).push(self.token(Token::IndicatorLink)).pad(1);
            match (&entry.link_target, entry.is_dangling()) {
                (Some(target), false) => line.push(&target.display().to_string()),
                _ => line.push(self.token(Token::Dangling)),
            };
        }

        line.finish(!self.color)
    }

    /// Renders a listing with owner and group columns aligned across entries.
    pub fn entries(&self, entries: &[FileEntry]) -> Vec<String> {
        let widths = ColumnWidths::measure(entries);
        entries.iter().map(|e| self.entry(e, widths)).collect()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::plain()
    }
}
