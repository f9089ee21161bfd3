//! Immutable 32-bit bitmask
//!
//! [`Bitmask`] is the arithmetic substrate for mode-word decoding. Every
//! operation takes `self` by value and returns a new mask, so a mask can be
//! copied freely and never observes another instance.
//!
//! Shifts follow logical unsigned semantics: bits shifted past either end are
//! dropped, and a shift count of 32 or more yields an empty mask instead of
//! panicking.
//!
//! # Example
//!
//! ```
//! use permscope::Bitmask;
//!
//! let word = Bitmask::new(0o755);
//! let owner = word.mask(0o700, 6);
//! assert_eq!(owner.value(), 0b111);
//! assert!(word.matches_any(0o005));
//! ```

use serde::Serialize;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Bitmask(u32);

impl Bitmask {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Builds a mask from `value & mask`, shifted right by `shift`.
    pub const fn with_mask(value: u32, mask: u32, shift: u32) -> Self {
        Self::new(value).mask(mask, shift)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn and(self, v: u32) -> Self {
        Self(self.0 & v)
    }

    pub const fn and_not(self, v: u32) -> Self {
        Self(self.0 & !v)
    }

    pub const fn or(self, v: u32) -> Self {
        Self(self.0 | v)
    }

    pub const fn xor(self, v: u32) -> Self {
        Self(self.0 ^ v)
    }

    pub const fn not(self) -> Self {
        Self(!self.0)
    }

    /// Logical right shift. Counts of 32 or more clear the mask.
    pub const fn shift_right(self, n: u32) -> Self {
        match self.0.checked_shr(n) {
            Some(v) => Self(v),
            None => Self(0),
        }
    }

    /// Logical left shift. Counts of 32 or more clear the mask.
    pub const fn shift_left(self, n: u32) -> Self {
        match self.0.checked_shl(n) {
            Some(v) => Self(v),
            None => Self(0),
        }
    }

    /// Sets bit `n`. Indices of 32 or more leave the mask unchanged.
    pub const fn set_bit(self, n: u32) -> Self {
        self.or(Self(1).shift_left(n).0)
    }

    /// Clears bit `n`. Indices of 32 or more leave the mask unchanged.
    pub const fn clear_bit(self, n: u32) -> Self {
        self.and_not(Self(1).shift_left(n).0)
    }

    pub const fn set(self, v: u32) -> Self {
        self.or(v)
    }

    pub const fn clear(self, v: u32) -> Self {
        self.and_not(v)
    }

    /// True when every bit of `v` is present.
    pub const fn matches(self, v: u32) -> bool {
        self.0 & v == v
    }

    /// True when at least one bit of `v` is present.
    pub const fn matches_any(self, v: u32) -> bool {
        self.0 & v != 0
    }

    /// Extracts a field: AND with `m`, then shift right by `shift`.
    pub const fn mask(self, m: u32, shift: u32) -> Self {
        self.and(m).shift_right(shift)
    }
}

impl From<u32> for Bitmask {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Bitmask> for u32 {
    fn from(mask: Bitmask) -> Self {
        mask.0
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

impl fmt::Binary for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::Octal for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

impl BitAnd for Bitmask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs.0)
    }
}

impl BitOr for Bitmask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs.0)
    }
}

impl BitXor for Bitmask {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs.0)
    }
}

impl Not for Bitmask {
    type Output = Self;

    fn not(self) -> Self {
        Bitmask::not(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operators() {
        let m = Bitmask::new(0b1100);
        assert_eq!(m.and(0b1010).value(), 0b1000);
        assert_eq!(m.and_not(0b0100).value(), 0b1000);
        assert_eq!(m.or(0b0011).value(), 0b1111);
        assert_eq!(m.xor(0b1010).value(), 0b0110);
        assert_eq!(m.not().value(), !0b1100u32);
    }

    #[test]
    fn test_operations_do_not_mutate() {
        let m = Bitmask::new(0b1);
        let _ = m.set(0b10).shift_left(4).not();
        assert_eq!(m.value(), 0b1);
    }

    #[test]
    fn test_shifts() {
        let m = Bitmask::new(0x8000_0001);
        assert_eq!(m.shift_left(1).value(), 0x0000_0002);
        assert_eq!(m.shift_right(31).value(), 1);
        assert_eq!(m.shift_right(0), m);
    }

    #[test]
    fn test_shift_out_of_range_clears() {
        let m = Bitmask::new(u32::MAX);
        assert_eq!(m.shift_left(32).value(), 0);
        assert_eq!(m.shift_right(32).value(), 0);
        assert_eq!(m.shift_right(1000).value(), 0);
    }

    #[test]
    fn test_set_and_clear_bit() {
        let m = Bitmask::new(0).set_bit(3).set_bit(31);
        assert_eq!(m.value(), 0x8000_0008);
        assert_eq!(m.clear_bit(31).value(), 0b1000);
        // out of range index is a no-op
        assert_eq!(m.set_bit(40), m);
        assert_eq!(m.clear_bit(40), m);
    }

    #[test]
    fn test_match_predicates() {
        let m = Bitmask::new(0b0110);
        assert!(m.matches(0b0100));
        assert!(m.matches(0b0110));
        assert!(!m.matches(0b0111));
        assert!(m.matches_any(0b0011));
        assert!(!m.matches_any(0b1001));
        // the empty pattern is always fully matched but never partially
        assert!(m.matches(0));
        assert!(!m.matches_any(0));
    }

    #[test]
    fn test_mask_extracts_field() {
        let word = 0o4755u32;
        assert_eq!(Bitmask::with_mask(word, 0o700, 6).value(), 0b111);
        assert_eq!(Bitmask::with_mask(word, 0o070, 3).value(), 0b101);
        assert_eq!(Bitmask::with_mask(word, 0o007, 0).value(), 0b101);
    }

    #[test]
    fn test_std_ops() {
        let a = Bitmask::new(0b1100);
        let b = Bitmask::new(0b1010);
        assert_eq!((a & b).value(), 0b1000);
        assert_eq!((a | b).value(), 0b1110);
        assert_eq!((a ^ b).value(), 0b0110);
        assert_eq!((!a).value(), !0b1100u32);
    }

    #[test]
    fn test_display_is_32_binary_digits() {
        let s = Bitmask::new(5).to_string();
        assert_eq!(s.len(), 32);
        assert!(s.ends_with("101"));
        assert_eq!(format!("{:o}", Bitmask::new(0o755)), "755");
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_value(Bitmask::new(0o1025)).unwrap();
        assert_eq!(json, serde_json::json!(0o1025));
    }
}
