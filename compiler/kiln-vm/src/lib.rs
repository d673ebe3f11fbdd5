//! Kiln virtual machine crate. This contains the intrinsics that evaluated
//! bitcode calls into for overflow-checked arithmetic and aggregate
//! initialisation, together with the memory space they operate on.

pub mod error;
pub mod intrinsics;
pub mod memory;
pub mod settings;
pub mod vm;
