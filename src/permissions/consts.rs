//! Bit layout of the packed mode word.
//!
//! The six field masks below are disjoint and together cover all 32 bits,
//! which is what makes decoding followed by recomposition lossless.

pub const MASK_TYPE: u32 = 0b1111_0111_0010_0000_0000_0000_0000_0000;
pub const MASK_MODE: u32 = 0b0000_1000_1101_0000_0000_0000_0000_0000;
/// Bits between the special-mode field and the permission triads. Carried
/// verbatim, never interpreted.
pub const MASK_RESERVED: u32 = 0b0000_0000_0000_1111_1111_1110_0000_0000;
pub const MASK_PERM: u32 = 0o777;
pub const MASK_PERM_OWNER: u32 = 0o700;
pub const MASK_PERM_GROUP: u32 = 0o070;
pub const MASK_PERM_WORLD: u32 = 0o007;

pub const SHIFT_TYPE: u32 = 21;
pub const SHIFT_MODE: u32 = 20;
pub const SHIFT_RESERVED: u32 = 9;
pub const SHIFT_PERM: u32 = 0;
pub const SHIFT_PERM_OWNER: u32 = 6;
pub const SHIFT_PERM_GROUP: u32 = 3;
pub const SHIFT_PERM_WORLD: u32 = 0;

// Mode field, after SHIFT_MODE.
pub const MODE_STICKY: u32 = 0b0000_0001;
pub const MODE_SETGID: u32 = 0b0000_0100;
pub const MODE_SETUID: u32 = 0b0000_1000;
pub const MODE_LINK: u32 = 0b1000_0000;

// Type field, after SHIFT_TYPE.
pub const TYPE_CHAR: u32 = 0b000_0000_0001;
pub const TYPE_SOCKET: u32 = 0b000_0000_1000;
pub const TYPE_FIFO: u32 = 0b000_0001_0000;
pub const TYPE_BLOCK_DEVICE: u32 = 0b000_0010_0000;
/// Block-device marker plus [`TYPE_CHAR`].
pub const TYPE_CHAR_DEVICE: u32 = TYPE_BLOCK_DEVICE | TYPE_CHAR;
pub const TYPE_DIR: u32 = 0b100_0000_0000;

// Triad bits.
pub const PERM_READ: u32 = 0b100;
pub const PERM_WRITE: u32 = 0b010;
pub const PERM_EXEC: u32 = 0b001;
pub const PERM_RWX: u32 = PERM_READ | PERM_WRITE | PERM_EXEC;
