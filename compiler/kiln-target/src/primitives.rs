//! Defines the primitive integer widths that the VM operates on. Every
//! width-indexed operation (arithmetic, loads and stores) is selected by an
//! [IntWidth], and this is where the mask and sign bit of each width live.

use std::fmt;

use num_enum::TryFromPrimitive;

use crate::size::Size;

/// Integer width variants. The discriminant of each variant is the number
/// of bits in the width, so an [IntWidth] can be recovered from a raw bit
/// count with [`IntWidth::try_from`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum IntWidth {
    I8 = 8,
    I16 = 16,
    I32 = 32,
    I64 = 64,
}

impl IntWidth {
    /// All of the supported widths, narrowest first.
    pub const ALL: [IntWidth; 4] = [IntWidth::I8, IntWidth::I16, IntWidth::I32, IntWidth::I64];

    /// Get the size of the [IntWidth] in bytes.
    #[inline]
    pub const fn size(self) -> Size {
        match self {
            IntWidth::I8 => Size::from_bytes(1),
            IntWidth::I16 => Size::from_bytes(2),
            IntWidth::I32 => Size::from_bytes(4),
            IntWidth::I64 => Size::from_bytes(8),
        }
    }

    /// Get the number of bits in the [IntWidth].
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// A mask with every bit of the width set, i.e. `2^bits - 1`.
    #[inline]
    pub const fn mask(self) -> u64 {
        self.size().unsigned_int_max()
    }

    /// A mask with only the most significant bit of the width set.
    #[inline]
    pub const fn sign_bit(self) -> u64 {
        1 << (self.bits() - 1)
    }

    /// Truncate a raw value to this width.
    #[inline]
    pub const fn truncate(self, value: u64) -> u64 {
        value & self.mask()
    }

    /// Whether `value` carries any bits above this width.
    #[inline]
    pub const fn fits(self, value: u64) -> bool {
        value & !self.mask() == 0
    }

    /// Convert the [IntWidth] into the name of the integer type.
    pub const fn to_name(self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_masks() {
        assert_eq!(IntWidth::I8.mask(), 0xff);
        assert_eq!(IntWidth::I16.mask(), 0xffff);
        assert_eq!(IntWidth::I32.mask(), 0xffff_ffff);
        assert_eq!(IntWidth::I64.mask(), u64::MAX);

        assert_eq!(IntWidth::I8.sign_bit(), 0x80);
        assert_eq!(IntWidth::I64.sign_bit(), 1 << 63);
    }

    #[test]
    fn test_width_from_bits() {
        assert_eq!(IntWidth::try_from(32u8).ok(), Some(IntWidth::I32));
        assert!(IntWidth::try_from(24u8).is_err());
    }

    #[test]
    fn test_width_fits() {
        assert!(IntWidth::I8.fits(0xff));
        assert!(!IntWidth::I8.fits(0x100));
        assert!(IntWidth::I64.fits(u64::MAX));
        assert_eq!(IntWidth::I16.truncate(0x1_2345), 0x2345);
    }
}
