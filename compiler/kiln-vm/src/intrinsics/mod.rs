//! Intrinsics that the evaluator can call into. A call site is described
//! by an [Intrinsic], which carries the constants fixed when the call site
//! was built, and is invoked with the already evaluated [IntrinsicArgs].

pub mod aggregate;
pub mod arith;
pub mod overflow;
pub mod wide;

use std::fmt;

use kiln_target::{IntWidth, Size};

use self::{
    aggregate::zero_init_aggregate,
    arith::{add_with_overflow, add_with_overflow_carry},
    overflow::{store_carry_out, store_overflow_result},
};
use crate::{
    error::{RuntimeError, RuntimeResult},
    memory::{Address, HasMemoryAccess},
};

/// A call site of an intrinsic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Intrinsic {
    /// Overflow-checked unsigned addition, storing the `{ sum, overflow }`
    /// pair at the target address. The overflow flag lives `flag_offset`
    /// bytes after the sum.
    UAddWithOverflow { width: IntWidth, flag_offset: u64 },

    /// Unsigned addition with a carry-in, storing the carry-out and
    /// producing the sum.
    UAddWithOverflowAndCarry { width: IntWidth },

    /// Zero initialise an aggregate of `length` bytes.
    ZeroInitAggregate { length: Size },
}

/// The evaluated operands of an intrinsic call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntrinsicArgs {
    Add { left: u64, right: u64, target: Address },
    AddWithCarry { left: u64, right: u64, carry_in: u64, carry_out: Address },
    Aggregate { address: Address },
}

/// The value an intrinsic call evaluates to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntrinsicValue {
    Address(Address),
    Int(u64),
}

/// Everything an intrinsic call produced. The VM records `overflow` in its
/// flags, the evaluator only sees `value`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IntrinsicOutcome {
    pub value: IntrinsicValue,

    /// Whether an arithmetic intrinsic overflowed, [None] for intrinsics
    /// that do no arithmetic.
    pub overflow: Option<bool>,
}

/// Resolve the [IntWidth] of an integer type with `bits` bits.
fn width_of(bits: u8) -> RuntimeResult<IntWidth> {
    IntWidth::try_from(bits).map_err(|_| RuntimeError::UnsupportedWidth { bits })
}

impl Intrinsic {
    /// Create an overflow-checked addition call site for integers of `bits`
    /// bits, whose overflow flag is stored `flag_offset` bytes after the sum.
    pub fn uadd_with_overflow(bits: u8, flag_offset: u64) -> RuntimeResult<Self> {
        Ok(Intrinsic::UAddWithOverflow { width: width_of(bits)?, flag_offset })
    }

    /// Create a carry-chain addition call site for integers of `bits` bits.
    pub fn uadd_with_overflow_and_carry(bits: u8) -> RuntimeResult<Self> {
        Ok(Intrinsic::UAddWithOverflowAndCarry { width: width_of(bits)? })
    }

    /// The integer width the intrinsic operates on, if any.
    pub fn width(&self) -> Option<IntWidth> {
        match *self {
            Intrinsic::UAddWithOverflow { width, .. }
            | Intrinsic::UAddWithOverflowAndCarry { width } => Some(width),
            Intrinsic::ZeroInitAggregate { .. } => None,
        }
    }

    /// Describes the kind of [IntrinsicArgs] that this intrinsic accepts.
    fn expected_args(&self) -> &'static str {
        match self {
            Intrinsic::UAddWithOverflow { .. } => "`left, right, target`",
            Intrinsic::UAddWithOverflowAndCarry { .. } => "`left, right, carry_in, carry_out`",
            Intrinsic::ZeroInitAggregate { .. } => "`address`",
        }
    }

    /// Run the intrinsic against `memory`.
    pub fn execute<M: HasMemoryAccess + ?Sized>(
        &self,
        memory: &mut M,
        args: IntrinsicArgs,
    ) -> RuntimeResult<IntrinsicOutcome> {
        match (*self, args) {
            (
                Intrinsic::UAddWithOverflow { width, flag_offset },
                IntrinsicArgs::Add { left, right, target },
            ) => {
                let result = add_with_overflow(width, left, right);
                store_overflow_result(memory, width, result, target, flag_offset)?;

                Ok(IntrinsicOutcome {
                    value: IntrinsicValue::Address(target),
                    overflow: Some(result.overflow),
                })
            }
            (
                Intrinsic::UAddWithOverflowAndCarry { width },
                IntrinsicArgs::AddWithCarry { left, right, carry_in, carry_out },
            ) => {
                let result = add_with_overflow_carry(width, left, right, carry_in);
                store_carry_out(memory, width, result, carry_out)?;

                Ok(IntrinsicOutcome {
                    value: IntrinsicValue::Int(result.truncated_sum),
                    overflow: Some(result.overflow),
                })
            }
            (Intrinsic::ZeroInitAggregate { length }, IntrinsicArgs::Aggregate { address }) => {
                let address = zero_init_aggregate(memory, address, length)?;
                Ok(IntrinsicOutcome { value: IntrinsicValue::Address(address), overflow: None })
            }
            (intrinsic, _) => Err(RuntimeError::ArgumentMismatch {
                intrinsic,
                expected: intrinsic.expected_args(),
            }),
        }
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intrinsic::UAddWithOverflow { width, flag_offset } => {
                write!(f, "uadd.with.overflow.{width} (flag +{flag_offset})")
            }
            Intrinsic::UAddWithOverflowAndCarry { width } => {
                write!(f, "uadd.with.overflow.carry.{width}")
            }
            Intrinsic::ZeroInitAggregate { length } => write!(f, "zeroinit.aggregate {length}"),
        }
    }
}

impl fmt::Display for IntrinsicArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntrinsicArgs::Add { left, right, target } => {
                write!(f, "{left:#x}, {right:#x} -> {target}")
            }
            IntrinsicArgs::AddWithCarry { left, right, carry_in, carry_out } => {
                write!(f, "{left:#x}, {right:#x}, carry {carry_in:#x} -> {carry_out}")
            }
            IntrinsicArgs::Aggregate { address } => write!(f, "{address}"),
        }
    }
}

impl fmt::Display for IntrinsicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntrinsicValue::Address(address) => write!(f, "{address}"),
            IntrinsicValue::Int(value) => write!(f, "{value:#x}"),
        }
    }
}
