//! Represents all of the logic related to value sizes, and various
//! utilities surrounding them.

use std::fmt;

/// Represents the size of some value in bytes. [Size] is a utility type
/// that allows one to convert between bits and bytes, and to truncate raw
/// integer bit patterns to the size.
#[derive(Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size {
    value: u64,
}

impl Size {
    /// The [Size::ZERO] is used for zero-length regions.
    pub const ZERO: Size = Size { value: 0 };

    /// Create a [Size] from the number of bytes.
    pub const fn from_bytes(value: u64) -> Self {
        Self { value }
    }

    /// Return the [Size] in bytes.
    #[inline]
    pub const fn bytes(self) -> u64 {
        self.value
    }

    /// Convert the [Size] into the number of bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.value * 8
    }

    /// Truncates `value` to `self` bits.
    #[inline]
    pub const fn truncate(self, value: u64) -> u64 {
        let size = self.bits();
        if size == 0 {
            // Truncated until nothing is left.
            return 0;
        }

        if size >= u64::BITS as u64 {
            return value;
        }

        let shift = u64::BITS as u64 - size;
        // Shift left to drop out leftover values, shift right to fill with
        // zeroes.
        (value << shift) >> shift
    }

    /// The largest unsigned integer that fits in this size. Sizes wider than
    /// eight bytes saturate at [`u64::MAX`].
    #[inline]
    pub const fn unsigned_int_max(self) -> u64 {
        self.truncate(u64::MAX)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}b", self.value)
    }
}
