//! Additions wider than any single [IntWidth], assembled from a chain of
//! [uadd_with_overflow_and_carry] calls.
//!
//! Limbs are ordered least significant first. Each step reads the carry
//! back from the carry cell written by the previous step, exactly as
//! evaluated code threading the carry through memory would.

use kiln_target::IntWidth;

use super::overflow::uadd_with_overflow_and_carry;
use crate::{
    error::RuntimeResult,
    memory::{Address, HasMemoryAccess},
};

/// The result of a multi-limb addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideSum {
    /// The limbs of the sum, least significant first.
    pub limbs: Vec<u64>,

    /// Whether the addition carried out of the most significant limb.
    pub carry: bool,
}

/// Add two numbers made of `width` limbs. If one operand has fewer limbs
/// than the other, its missing upper limbs are zero. `carry_cell` is
/// scratch memory of `width` bytes used for the carry between limbs.
pub fn add_wide<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    width: IntWidth,
    left: &[u64],
    right: &[u64],
    carry_cell: Address,
) -> RuntimeResult<WideSum> {
    let limb_count = left.len().max(right.len());
    let mut limbs = Vec::with_capacity(limb_count);
    let mut carry = 0;

    for index in 0..limb_count {
        let l = left.get(index).copied().unwrap_or_default();
        let r = right.get(index).copied().unwrap_or_default();

        limbs.push(uadd_with_overflow_and_carry(memory, width, l, r, carry, carry_cell)?);
        carry = memory.load_int(carry_cell, width)?;
    }

    Ok(WideSum { limbs, carry: carry != 0 })
}

/// Add two 128-bit numbers as a pair of 64-bit limbs.
pub fn add_u128<M: HasMemoryAccess + ?Sized>(
    memory: &mut M,
    left: u128,
    right: u128,
    carry_cell: Address,
) -> RuntimeResult<(u128, bool)> {
    let split = |value: u128| [value as u64, (value >> 64) as u64];

    let WideSum { limbs, carry } =
        add_wide(memory, IntWidth::I64, &split(left), &split(right), carry_cell)?;
    let value = limbs.iter().rev().fold(0u128, |acc, limb| (acc << 64) | u128::from(*limb));

    Ok((value, carry))
}
