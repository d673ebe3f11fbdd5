//! Materialisation of aggregate literals directly into memory. Only the
//! all-zero literal needs an intrinsic, everything else is built from
//! ordinary stores by the evaluator.

use kiln_target::Size;

use crate::{
    error::RuntimeResult,
    memory::{Address, HasMemoryAccess},
};

/// Zero `length` bytes starting at `address` and return `address`. A
/// `length` of zero writes nothing.
pub fn zero_init_aggregate<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    address: Address,
    length: Size,
) -> RuntimeResult<Address> {
    memory.fill_zero(address, length)?;
    Ok(address)
}
