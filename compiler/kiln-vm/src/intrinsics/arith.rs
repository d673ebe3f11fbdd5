//! Unsigned overflow-checked addition over every supported [IntWidth].
//!
//! Overflow is detected with the carry identity
//! `(!sum & left) | (!sum & right) | (left & right)`, examined at the most
//! significant bit of the width. This works the same at every width and
//! never needs an accumulator wider than the operands, which matters for
//! [IntWidth::I64].

use kiln_target::IntWidth;
use kiln_utils::derive_more::Constructor;

/// The result of an overflow-checked addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct OverflowResult {
    /// The sum modulo `2^width`.
    pub truncated_sum: u64,

    /// Whether the unsigned sum did not fit in the width.
    pub overflow: bool,
}

/// Whether the addition `left + right` that produced `sum` carried out of
/// the top bit of `width`. All three values must already be truncated.
#[inline]
fn carries_out(width: IntWidth, left: u64, right: u64, sum: u64) -> bool {
    ((!sum & left) | (!sum & right) | (left & right)) & width.sign_bit() != 0
}

/// Compute `left + right` in `width` bits. Both operands are masked to the
/// width first, so any bit pattern is accepted.
pub fn add_with_overflow(width: IntWidth, left: u64, right: u64) -> OverflowResult {
    let left = width.truncate(left);
    let right = width.truncate(right);
    let sum = width.truncate(left.wrapping_add(right));

    OverflowResult::new(sum, carries_out(width, left, right, sum))
}

/// Compute `left + right + carry_in` in `width` bits, as two additions.
/// The result overflows if either of them does.
pub fn add_with_overflow_carry(
    width: IntWidth,
    left: u64,
    right: u64,
    carry_in: u64,
) -> OverflowResult {
    let base = add_with_overflow(width, left, right);
    let carried = add_with_overflow(width, base.truncated_sum, carry_in);

    OverflowResult::new(carried.truncated_sum, base.overflow | carried.overflow)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_add_i8() {
        assert_eq!(add_with_overflow(IntWidth::I8, 250, 10), OverflowResult::new(4, true));
        assert_eq!(add_with_overflow(IntWidth::I8, 10, 20), OverflowResult::new(30, false));
        assert_eq!(add_with_overflow(IntWidth::I8, 128, 128), OverflowResult::new(0, true));
        assert_eq!(add_with_overflow(IntWidth::I8, 127, 128), OverflowResult::new(255, false));
    }

    #[test]
    fn test_add_i8_exhaustive() {
        for left in 0..=u8::MAX {
            for right in 0..=u8::MAX {
                let (sum, overflow) = left.overflowing_add(right);
                let result = add_with_overflow(IntWidth::I8, left.into(), right.into());

                assert_eq!(result, OverflowResult::new(sum.into(), overflow), "{left} + {right}");
            }
        }
    }

    #[test]
    fn test_add_top_width() {
        assert_eq!(add_with_overflow(IntWidth::I32, 0xffff_ffff, 1), OverflowResult::new(0, true));
        assert_eq!(
            add_with_overflow(IntWidth::I64, u64::MAX, u64::MAX),
            OverflowResult::new(u64::MAX - 1, true)
        );
        assert_eq!(
            add_with_overflow(IntWidth::I64, 1 << 63, (1 << 63) - 1),
            OverflowResult::new(u64::MAX, false)
        );
    }

    #[test]
    fn test_operands_are_masked() {
        // Bits above the width are dropped before adding.
        assert_eq!(add_with_overflow(IntWidth::I8, 0x1_0a, 0x2_14), OverflowResult::new(30, false));
        assert_eq!(
            add_with_overflow(IntWidth::I16, 0xdead_ffff, 0x0000_0001),
            OverflowResult::new(0, true)
        );
    }

    #[test]
    fn test_carry_chain_i64() {
        // The base add does not overflow, adding the carry does.
        let base = add_with_overflow(IntWidth::I64, u64::MAX, 0);
        assert_eq!(base, OverflowResult::new(u64::MAX, false));

        assert_eq!(
            add_with_overflow_carry(IntWidth::I64, u64::MAX, 0, 1),
            OverflowResult::new(0, true)
        );
    }

    #[test]
    fn test_carry_both_overflow() {
        // Both halves of the addition overflow, which is still a single carry.
        assert_eq!(
            add_with_overflow_carry(IntWidth::I8, 0xff, 0xff, 0xff),
            OverflowResult::new(0xfd, true)
        );
        assert_eq!(add_with_overflow_carry(IntWidth::I16, 1, 2, 0), OverflowResult::new(3, false));
    }

    #[test]
    fn test_carry_i8_exhaustive() {
        for left in 0..=u8::MAX {
            for right in 0..=u8::MAX {
                for carry_in in [0u8, 1] {
                    let total = u16::from(left) + u16::from(right) + u16::from(carry_in);
                    let result = add_with_overflow_carry(
                        IntWidth::I8,
                        left.into(),
                        right.into(),
                        carry_in.into(),
                    );

                    assert_eq!(result, OverflowResult::new(total as u64 & 0xff, total > 0xff));
                }
            }
        }
    }
}
