//! Kiln virtual machine implementation and intrinsic dispatch.

use std::cell::Cell;

use kiln_target::IntWidth;
use kiln_utils::log;

use crate::{
    error::RuntimeResult,
    intrinsics::{Intrinsic, IntrinsicArgs, IntrinsicValue},
    memory::Memory,
    settings::{OperandPolicy, VmSettings},
};

/// Interpreter flags represent generated context from the current
/// execution. These flags store information about the last executed
/// intrinsic (if relevant).
#[derive(Debug, Default)]
pub struct InterpreterFlags {
    /// If the most recent arithmetic intrinsic resulted in an 'overflow'.
    pub overflow: Cell<bool>,
}

/// The [Interpreter] owns the memory space of a program, and is what the
/// evaluator goes through to call intrinsics against that memory.
#[derive(Debug)]
pub struct Interpreter {
    /// The memory space of the VM.
    memory: Memory,

    /// The settings the VM was created with.
    settings: VmSettings,

    /// Interpreter flags represent the result of some operation that has
    /// occurred.
    flags: InterpreterFlags,
}

impl Interpreter {
    /// Create a new [Interpreter] with a zeroed memory space of the size
    /// given in `settings`.
    #[must_use]
    pub fn new(settings: VmSettings) -> Self {
        Self::with_memory(Memory::new(settings.memory_size), settings)
    }

    /// Create a new [Interpreter] over an existing memory space.
    #[must_use]
    pub fn with_memory(memory: Memory, settings: VmSettings) -> Self {
        Self { memory, settings, flags: InterpreterFlags::default() }
    }

    /// Get a reference to the memory space.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Get a mutable reference to the memory space.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn settings(&self) -> &VmSettings {
        &self.settings
    }

    pub fn flags(&self) -> &InterpreterFlags {
        &self.flags
    }

    /// Call an intrinsic with evaluated operands, and return what the call
    /// evaluates to. The overflow flag is only updated by arithmetic
    /// intrinsics that complete.
    pub fn call_intrinsic(
        &mut self,
        intrinsic: Intrinsic,
        args: IntrinsicArgs,
    ) -> RuntimeResult<IntrinsicValue> {
        if self.settings.trace_intrinsics {
            log::trace!("call `{intrinsic}` with {args}");
        }

        if let Some(width) = intrinsic.width() {
            self.check_operands(intrinsic, width, args);
        }

        let outcome = intrinsic.execute(&mut self.memory, args)?;

        if let Some(overflow) = outcome.overflow {
            self.flags.overflow.set(overflow);
        }

        if let (Intrinsic::UAddWithOverflowAndCarry { .. }, IntrinsicValue::Int(sum)) =
            (intrinsic, outcome.value)
        {
            log::debug!("`{intrinsic}` produced {sum:#x}, carry {}", self.flags.overflow.get());
        }

        Ok(outcome.value)
    }

    /// Report operands that do not fit in the width of the intrinsic,
    /// according to the [OperandPolicy].
    fn check_operands(&self, intrinsic: Intrinsic, width: IntWidth, args: IntrinsicArgs) {
        if self.settings.operand_policy == OperandPolicy::Mask {
            return;
        }

        let operands = match args {
            IntrinsicArgs::Add { left, right, .. } => [Some(left), Some(right), None],
            IntrinsicArgs::AddWithCarry { left, right, carry_in, .. } => {
                [Some(left), Some(right), Some(carry_in)]
            }
            IntrinsicArgs::Aggregate { .. } => return,
        };

        for operand in operands.into_iter().flatten().filter(|operand| !width.fits(*operand)) {
            log::warn!("`{intrinsic}` received operand {operand:#x} wider than {width}, masking it");
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(VmSettings::default())
    }
}
