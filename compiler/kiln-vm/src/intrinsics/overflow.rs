//! Overflow-checked addition intrinsics that write their results into
//! memory.
//!
//! `uadd_with_overflow` materialises the `{ sum, overflow }` pair at a
//! target address: the sum with a store of the operand width, and the
//! overflow flag as a single byte `flag_offset` bytes further on. The
//! offset is fixed by the layout of the result pair at the call site.
//!
//! `uadd_with_overflow_and_carry` is the building block for carry chains.
//! It writes only the carry-out and returns the sum by value so that the
//! caller can assemble a wider result from consecutive limbs.

use kiln_target::IntWidth;
use paste::paste;

use super::arith::{OverflowResult, add_with_overflow, add_with_overflow_carry};
use crate::{
    error::RuntimeResult,
    memory::{Address, HasMemoryAccess},
};

/// Write an [OverflowResult] into a result pair at `target`. The sum is
/// always written before the flag.
pub fn store_overflow_result<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    width: IntWidth,
    result: OverflowResult,
    target: Address,
    flag_offset: u64,
) -> RuntimeResult<()> {
    memory.store_int(target, width, result.truncated_sum)?;
    memory.store_bool(target.offset(flag_offset), result.overflow)
}

/// Write the carry-out of an [OverflowResult] as a `width` sized `0` or `1`.
pub fn store_carry_out<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    width: IntWidth,
    result: OverflowResult,
    carry_out: Address,
) -> RuntimeResult<()> {
    memory.store_int(carry_out, width, u64::from(result.overflow))
}

/// Add `left` and `right` in `width` bits and store the truncated sum at
/// `target` and the overflow flag at `target + flag_offset`. Returns
/// `target`.
pub fn uadd_with_overflow<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    width: IntWidth,
    left: u64,
    right: u64,
    target: Address,
    flag_offset: u64,
) -> RuntimeResult<Address> {
    let result = add_with_overflow(width, left, right);
    store_overflow_result(memory, width, result, target, flag_offset)?;

    Ok(target)
}

/// Add `left`, `right` and `carry_in` in `width` bits, store whether the
/// addition carried at `carry_out` and return the truncated sum.
pub fn uadd_with_overflow_and_carry<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    width: IntWidth,
    left: u64,
    right: u64,
    carry_in: u64,
    carry_out: Address,
) -> RuntimeResult<u64> {
    let result = add_with_overflow_carry(width, left, right, carry_in);
    store_carry_out(memory, width, result, carry_out)?;

    Ok(result.truncated_sum)
}

/// Generate the entry points for each width that take and return the
/// native integer type of that width.
macro_rules! width_specialised_intrinsics {
    ($($ty:ident => $width:ident),* $(,)?) => {
        paste! {
            $(
                #[doc = "[uadd_with_overflow] on `" $ty "` operands."]
                pub fn [<uadd_with_overflow_ $width:lower>]<M: HasMemoryAccess + ?Sized>(
                    memory: &mut M,
                    left: $ty,
                    right: $ty,
                    target: Address,
                    flag_offset: u64,
                ) -> RuntimeResult<Address> {
                    uadd_with_overflow(
                        memory,
                        IntWidth::$width,
                        left.into(),
                        right.into(),
                        target,
                        flag_offset,
                    )
                }

                #[doc = "[uadd_with_overflow_and_carry] on `" $ty "` operands."]
                pub fn [<uadd_with_overflow_and_carry_ $width:lower>]<M: HasMemoryAccess + ?Sized>(
                    memory: &mut M,
                    left: $ty,
                    right: $ty,
                    carry_in: $ty,
                    carry_out: Address,
                ) -> RuntimeResult<$ty> {
                    let sum = uadd_with_overflow_and_carry(
                        memory,
                        IntWidth::$width,
                        left.into(),
                        right.into(),
                        carry_in.into(),
                        carry_out,
                    )?;

                    // The sum is already truncated to the width.
                    Ok(sum as $ty)
                }
            )*
        }
    };
}

width_specialised_intrinsics!(u8 => I8, u16 => I16, u32 => I32, u64 => I64);
