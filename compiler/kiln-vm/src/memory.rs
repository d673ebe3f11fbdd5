//! The memory space that intrinsics read from and write into.
//!
//! Intrinsics never own memory. They are handed something that implements
//! [HasMemoryAccess] and only ever go through its typed loads and stores,
//! so the allocation, bounds checking and byte order policy all belong to
//! the implementor. [Memory] is the flat implementation the [Interpreter]
//! uses.
//!
//! [Interpreter]: crate::vm::Interpreter

use std::{fmt, ops::Range};

use kiln_target::{IntWidth, Size};

use crate::error::{MemoryAccessKind, RuntimeError, RuntimeResult};

/// An opaque byte offset into a memory space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address {
    /// The address of the first byte in a memory space.
    pub const NULL: Address = Address(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw byte offset of the [Address].
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Compute the address `bytes` after this one. This is plain pointer
    /// arithmetic, whether the result is accessible is up to the memory.
    pub const fn offset(self, bytes: u64) -> Address {
        Address(self.0.wrapping_add(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Typed access to a byte-addressable memory space.
///
/// Failures are reported to the caller unchanged, intrinsics do not try to
/// recover from them.
pub trait HasMemoryAccess {
    fn store_u8(&mut self, address: Address, value: u8) -> RuntimeResult<()>;

    fn store_u16(&mut self, address: Address, value: u16) -> RuntimeResult<()>;

    fn store_u32(&mut self, address: Address, value: u32) -> RuntimeResult<()>;

    fn store_u64(&mut self, address: Address, value: u64) -> RuntimeResult<()>;

    /// Set `length` bytes starting at `address` to zero.
    fn fill_zero(&mut self, address: Address, length: Size) -> RuntimeResult<()>;

    fn load_u8(&self, address: Address) -> RuntimeResult<u8>;

    fn load_u16(&self, address: Address) -> RuntimeResult<u16>;

    fn load_u32(&self, address: Address) -> RuntimeResult<u32>;

    fn load_u64(&self, address: Address) -> RuntimeResult<u64>;

    /// Store a boolean as a single `0` or `1` byte.
    fn store_bool(&mut self, address: Address, value: bool) -> RuntimeResult<()> {
        self.store_u8(address, u8::from(value))
    }

    fn load_bool(&self, address: Address) -> RuntimeResult<bool> {
        Ok(self.load_u8(address)? != 0)
    }

    /// Store the low `width` bits of `value` using the store of that width.
    fn store_int(&mut self, address: Address, width: IntWidth, value: u64) -> RuntimeResult<()> {
        let value = width.truncate(value);

        match width {
            IntWidth::I8 => self.store_u8(address, value as u8),
            IntWidth::I16 => self.store_u16(address, value as u16),
            IntWidth::I32 => self.store_u32(address, value as u32),
            IntWidth::I64 => self.store_u64(address, value),
        }
    }

    /// Load an integer of the given width, zero extended.
    fn load_int(&self, address: Address, width: IntWidth) -> RuntimeResult<u64> {
        Ok(match width {
            IntWidth::I8 => self.load_u8(address)?.into(),
            IntWidth::I16 => self.load_u16(address)?.into(),
            IntWidth::I32 => self.load_u32(address)?.into(),
            IntWidth::I64 => self.load_u64(address)?,
        })
    }
}

/// A flat, little-endian memory space of a fixed size. Once created, the
/// size of the memory cannot be modified.
#[derive(Debug, Clone)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a new zeroed memory space.
    pub fn new(size: Size) -> Self {
        Memory { data: vec![0; size.bytes() as usize] }
    }

    /// The total size of the memory space.
    pub fn size(&self) -> Size {
        Size::from_bytes(self.data.len() as u64)
    }

    /// Fill `length` bytes starting at `address` with `value`.
    pub fn fill(&mut self, address: Address, length: Size, value: u8) -> RuntimeResult<()> {
        let range = self.verify_access(MemoryAccessKind::Store, address, length)?;
        self.data[range].fill(value);
        Ok(())
    }

    /// Read `length` bytes starting at `address`.
    pub fn bytes(&self, address: Address, length: Size) -> RuntimeResult<&[u8]> {
        let range = self.verify_access(MemoryAccessKind::Load, address, length)?;
        Ok(&self.data[range])
    }

    /// Verify that an access of `size` bytes at `address` stays within the
    /// memory space, and return the range of bytes it covers. Zero sized
    /// accesses never touch memory and are always allowed.
    fn verify_access(
        &self,
        kind: MemoryAccessKind,
        address: Address,
        size: Size,
    ) -> RuntimeResult<Range<usize>> {
        if size == Size::ZERO {
            return Ok(0..0);
        }

        let total = self.size();

        match address.value().checked_add(size.bytes()) {
            Some(end) if end <= total.bytes() => Ok(address.value() as usize..end as usize),
            _ => Err(RuntimeError::MemoryAccessViolation { kind, address, size, total }),
        }
    }

    fn read<const N: usize>(&self, address: Address) -> RuntimeResult<[u8; N]> {
        let range = self.verify_access(MemoryAccessKind::Load, address, Size::from_bytes(N as u64))?;

        let mut value = [0; N];
        value.copy_from_slice(&self.data[range]);
        Ok(value)
    }

    fn write(&mut self, address: Address, value: &[u8]) -> RuntimeResult<()> {
        let size = Size::from_bytes(value.len() as u64);
        let range = self.verify_access(MemoryAccessKind::Store, address, size)?;

        self.data[range].copy_from_slice(value);
        Ok(())
    }
}

impl HasMemoryAccess for Memory {
    fn store_u8(&mut self, address: Address, value: u8) -> RuntimeResult<()> {
        self.write(address, &value.to_le_bytes())
    }

    fn store_u16(&mut self, address: Address, value: u16) -> RuntimeResult<()> {
        self.write(address, &value.to_le_bytes())
    }

    fn store_u32(&mut self, address: Address, value: u32) -> RuntimeResult<()> {
        self.write(address, &value.to_le_bytes())
    }

    fn store_u64(&mut self, address: Address, value: u64) -> RuntimeResult<()> {
        self.write(address, &value.to_le_bytes())
    }

    fn fill_zero(&mut self, address: Address, length: Size) -> RuntimeResult<()> {
        self.fill(address, length, 0)
    }

    fn load_u8(&self, address: Address) -> RuntimeResult<u8> {
        self.read(address).map(u8::from_le_bytes)
    }

    fn load_u16(&self, address: Address) -> RuntimeResult<u16> {
        self.read(address).map(u16::from_le_bytes)
    }

    fn load_u32(&self, address: Address) -> RuntimeResult<u32> {
        self.read(address).map(u32::from_le_bytes)
    }

    fn load_u64(&self, address: Address) -> RuntimeResult<u64> {
        self.read(address).map(u64::from_le_bytes)
    }
}
