//! Settings that can be applied to the VM when it is created.

use kiln_target::Size;

/// What the VM does with operands that carry bits above the width of the
/// intrinsic they are passed to. Intrinsics always mask such operands, this
/// only controls whether the caller is told about it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OperandPolicy {
    /// Mask silently.
    #[default]
    Mask,

    /// Mask, and emit a warning naming the offending operand.
    Warn,
}

/// Various settings that are present on the VM when it is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmSettings {
    /// The size of the memory space that the VM allocates.
    pub memory_size: Size,

    /// Whether every intrinsic call is logged at `trace` level.
    pub trace_intrinsics: bool,

    /// How operands wider than their intrinsic are reported.
    pub operand_policy: OperandPolicy,
}

impl VmSettings {
    /// The default memory size, 64KiB.
    pub const DEFAULT_MEMORY_SIZE: Size = Size::from_bytes(64 * 1024);

    /// Create new [VmSettings] with a memory space of the given size.
    pub fn new(memory_size: Size) -> Self {
        Self { memory_size, ..Default::default() }
    }

    /// Specify whether intrinsic calls should be traced.
    pub fn set_trace_intrinsics(&mut self, value: bool) -> &mut Self {
        self.trace_intrinsics = value;
        self
    }

    /// Specify the [OperandPolicy].
    pub fn set_operand_policy(&mut self, policy: OperandPolicy) -> &mut Self {
        self.operand_policy = policy;
        self
    }
}

impl Default for VmSettings {
    fn default() -> Self {
        Self {
            memory_size: Self::DEFAULT_MEMORY_SIZE,
            trace_intrinsics: false,
            operand_policy: OperandPolicy::default(),
        }
    }
}
