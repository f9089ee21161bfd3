use super::consts::{TYPE_BLOCK_DEVICE, TYPE_CHAR_DEVICE, TYPE_DIR, TYPE_FIFO, TYPE_SOCKET};
use crate::bitmask::Bitmask;
use crate::render::Token;
use serde::Serialize;
use std::fmt;

/// Primary classification of a directory entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    #[default]
    File,
    Directory,
    Fifo,
    Socket,
    CharDevice,
    BlockDevice,
}

impl EntryKind {
    /// Classifies a type field (already shifted down). The first pattern that
    /// fully matches wins; the char-device pattern is a superset of the
    /// block-device one and is therefore tested first.
    pub fn classify(type_field: Bitmask) -> Self {
        if type_field.matches(TYPE_DIR) {
            EntryKind::Directory
        } else if type_field.matches(TYPE_FIFO) {
            EntryKind::Fifo
        } else if type_field.matches(TYPE_SOCKET) {
            EntryKind::Socket
        } else if type_field.matches(TYPE_CHAR_DEVICE) {
            EntryKind::CharDevice
        } else if type_field.matches(TYPE_BLOCK_DEVICE) {
            EntryKind::BlockDevice
        } else {
            EntryKind::File
        }
    }

    /// Only plain files carry a meaningful size.
    pub fn has_size(self) -> bool {
        self == EntryKind::File
    }

    pub fn token(self) -> Token {
        match self {
            EntryKind::File => Token::KindFile,
            EntryKind::Directory => Token::KindDir,
            EntryKind::Fifo => Token::KindFifo,
            EntryKind::Socket => Token::KindSocket,
            EntryKind::CharDevice => Token::KindCharDevice,
            EntryKind::BlockDevice => Token::KindBlockDevice,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Fifo => "fifo",
            EntryKind::Socket => "socket",
            EntryKind::CharDevice => "char-device",
            EntryKind::BlockDevice => "block-device",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
