//! Conversion between POSIX `st_mode` values and the packed mode word.
//!
//! The packed word keeps the permission triads in the low nine bits like
//! POSIX does, but moves the file type and the setuid/setgid/sticky flags into
//! the high bits (see [`crate::permissions::consts`]).

use crate::bitmask::Bitmask;
use crate::permissions::consts::{
    MASK_MODE, MASK_PERM, MASK_TYPE, MODE_LINK, MODE_SETGID, MODE_SETUID, MODE_STICKY,
    SHIFT_MODE, SHIFT_TYPE, TYPE_BLOCK_DEVICE, TYPE_CHAR_DEVICE, TYPE_DIR, TYPE_FIFO, TYPE_SOCKET,
};
use crate::permissions::EntryKind;

pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;
pub const S_ISUID: u32 = 0o4000;
pub const S_ISGID: u32 = 0o2000;
pub const S_ISVTX: u32 = 0o1000;

/// Bits accepted by chmod.
pub const POSIX_PERM_MASK: u32 = 0o7777;

const fn type_bits(flag: u32) -> u32 {
    flag << SHIFT_TYPE
}

const fn mode_bits(flag: u32) -> u32 {
    flag << SHIFT_MODE
}

/// Packs a POSIX `st_mode` into a mode word. Unknown file types pack as plain
/// files.
pub fn from_posix(st_mode: u32) -> u32 {
    let mut word = st_mode & MASK_PERM;

    word |= match st_mode & S_IFMT {
        S_IFBLK => type_bits(TYPE_BLOCK_DEVICE),
        S_IFCHR => type_bits(TYPE_CHAR_DEVICE),
        S_IFDIR => type_bits(TYPE_DIR),
        S_IFIFO => type_bits(TYPE_FIFO),
        S_IFLNK => mode_bits(MODE_LINK),
        S_IFSOCK => type_bits(TYPE_SOCKET),
        _ => 0,
    };

    if st_mode & S_ISUID != 0 {
        word |= mode_bits(MODE_SETUID);
    }
    if st_mode & S_ISGID != 0 {
        word |= mode_bits(MODE_SETGID);
    }
    if st_mode & S_ISVTX != 0 {
        word |= mode_bits(MODE_STICKY);
    }

    word
}

/// Unpacks a mode word into a POSIX `st_mode`. The link flag wins over any
/// type bits; otherwise the type is picked with the same priority the decoder
/// uses. Reserved bits have no POSIX counterpart and are dropped.
pub fn to_posix(word: u32) -> u32 {
    let type_field = Bitmask::with_mask(word, MASK_TYPE, SHIFT_TYPE);
    let mode_field = Bitmask::with_mask(word, MASK_MODE, SHIFT_MODE);

    let mut st_mode = word & MASK_PERM;

    st_mode |= if mode_field.matches_any(MODE_LINK) {
        S_IFLNK
    } else {
        match EntryKind::classify(type_field) {
            EntryKind::File => S_IFREG,
            EntryKind::Directory => S_IFDIR,
            EntryKind::Fifo => S_IFIFO,
            EntryKind::Socket => S_IFSOCK,
            EntryKind::CharDevice => S_IFCHR,
            EntryKind::BlockDevice => S_IFBLK,
        }
    };

    if mode_field.matches_any(MODE_SETUID) {
        st_mode |= S_ISUID;
    }
    if mode_field.matches_any(MODE_SETGID) {
        st_mode |= S_ISGID;
    }
    if mode_field.matches_any(MODE_STICKY) {
        st_mode |= S_ISVTX;
    }

    st_mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_file_keeps_only_permission_bits() {
        assert_eq!(from_posix(0o100644), 0o644);
    }

    #[test]
    fn test_directory() {
        assert_eq!(from_posix(0o040755), 0x8000_0000 | 0o755);
    }

    #[test]
    fn test_symlink_sets_link_flag() {
        assert_eq!(from_posix(0o120777), 0x0800_0000 | 0o777);
    }

    #[test]
    fn test_devices() {
        // block: device bit only, char: device bit plus char bit
        assert_eq!(from_posix(0o060660), 0x0400_0000 | 0o660);
        assert_eq!(from_posix(0o020666), 0x0420_0000 | 0o666);
    }

    #[test]
    fn test_special_bits() {
        assert_eq!(from_posix(0o104755), 0x0080_0000 | 0o755);
        assert_eq!(from_posix(0o102755), 0x0040_0000 | 0o755);
        assert_eq!(from_posix(0o041777), 0x8000_0000 | 0x0010_0000 | 0o777);
    }

    #[test]
    fn test_posix_round_trip() {
        for st_mode in [
            0o100644, 0o100000, 0o040755, 0o041777, 0o120777, 0o010644, 0o140755, 0o020666,
            0o060660, 0o104755, 0o102711, 0o107777,
        ] {
            assert_eq!(to_posix(from_posix(st_mode)), st_mode, "{:o}", st_mode);
        }
    }

    #[test]
    fn test_zero_word_is_regular_file() {
        assert_eq!(to_posix(0), S_IFREG);
    }
}
