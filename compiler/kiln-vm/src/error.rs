//! Errors that can be raised while the VM executes an intrinsic. The
//! arithmetic itself is total, so every error here originates either in
//! the memory space or in a malformed call from the evaluator.
use std::{error, fmt};

use kiln_target::Size;

use crate::{intrinsics::Intrinsic, memory::Address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryAccessKind {
    Load,
    Store,
}

impl fmt::Display for MemoryAccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryAccessKind::Load => write!(f, "load"),
            MemoryAccessKind::Store => write!(f, "store"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// An access touched bytes outside of the memory space.
    MemoryAccessViolation { kind: MemoryAccessKind, address: Address, size: Size, total: Size },

    /// The evaluator supplied operands that do not fit the intrinsic that
    /// the call site was created for.
    ArgumentMismatch { intrinsic: Intrinsic, expected: &'static str },

    /// A call site was requested for an integer type whose bit count is
    /// not one of the supported widths.
    UnsupportedWidth { bits: u8 },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::MemoryAccessViolation { kind, address, size, total } => {
                write!(
                    f,
                    "memory access violation: tried to `{kind}` {} bytes at `{address}`, but memory size is {}",
                    size.bytes(),
                    total.bytes()
                )
            }
            RuntimeError::ArgumentMismatch { intrinsic, expected } => {
                write!(f, "intrinsic `{intrinsic}` expects {expected} arguments")
            }
            RuntimeError::UnsupportedWidth { bits } => {
                write!(f, "no arithmetic intrinsic operates on {bits}-bit integers")
            }
        }
    }
}

impl error::Error for RuntimeError {}
