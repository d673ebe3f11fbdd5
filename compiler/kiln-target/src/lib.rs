//! Primitive sizes and integer widths shared by the kiln virtual machine.
//! This is kept separate from the VM so that anything describing the
//! shape of values in memory can speak the same vocabulary.

pub mod primitives;
pub mod size;

pub use primitives::IntWidth;
pub use size::Size;
