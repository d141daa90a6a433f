//! Low-level byte order and safe reading/writing utilities for wire decoding.
//!
//! Provides endian-aware, bounds-checked primitive access over byte buffers. All reads go
//! through [`crate::wire::io::WireNum`], which abstracts the conversion between fixed-size
//! byte arrays and primitive values; writes append to a growable buffer so encoders never
//! have to pre-compute message sizes.
//!
//! # Key Components
//!
//! - [`crate::wire::io::WireNum`] - Trait defining little-endian conversions for primitives
//! - [`crate::wire::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::wire::io::read_le_at`] - Read a value at an offset, advancing the offset
//! - [`crate::wire::io::put_le`] - Append a value to an output buffer
//!
//! # Error Handling
//!
//! Reading functions return [`crate::Result`] and fail with [`crate::Error::OutOfBounds`]
//! when the buffer holds fewer bytes than the requested type needs. Writes are infallible;
//! the output buffer grows as needed.

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe binary data access.
///
/// Implemented for the unsigned integer widths the wire format uses. Each implementation
/// defines a `Bytes` associated type representing the fixed-size byte array for that type,
/// and converts to and from little-endian byte order.
pub trait WireNum: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte array in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte array in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

impl WireNum for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        bytes[0]
    }

    fn to_le_bytes(self) -> Self::Bytes {
        [self]
    }
}

impl WireNum for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }

    fn to_le_bytes(self) -> Self::Bytes {
        u16::to_le_bytes(self)
    }
}

impl WireNum for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }

    fn to_le_bytes(self) -> Self::Bytes {
        u32::to_le_bytes(self)
    }
}

impl WireNum for u64 {
    type Bytes = [u8; 8];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u64::from_le_bytes(bytes)
    }

    fn to_le_bytes(self) -> Self::Bytes {
        u64::to_le_bytes(self)
    }
}

/// Read a `T` from the start of `data` in little-endian byte order.
///
/// ## Arguments
/// * 'data' - The buffer to read from
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `size_of::<T>()`.
pub fn read_le<T: WireNum>(data: &[u8]) -> Result<T> {
    let size = std::mem::size_of::<T>();
    if data.len() < size {
        return Err(OutOfBounds);
    }

    match T::Bytes::try_from(&data[..size]) {
        Ok(bytes) => Ok(T::from_le_bytes(bytes)),
        Err(_) => Err(OutOfBounds),
    }
}

/// Read a `T` at `*offset` in little-endian byte order, advancing `*offset` past it.
///
/// ## Arguments
/// * 'data'   - The buffer to read from
/// * 'offset' - Position to read at; advanced by `size_of::<T>()` on success
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_le_at<T: WireNum>(data: &[u8], offset: &mut usize) -> Result<T> {
    let size = std::mem::size_of::<T>();
    if *offset > data.len() || data.len() - *offset < size {
        return Err(OutOfBounds);
    }

    let value = read_le::<T>(&data[*offset..])?;
    *offset += size;
    Ok(value)
}

/// Append a `T` to `out` in little-endian byte order.
pub fn put_le<T: WireNum>(out: &mut Vec<u8>, value: T) {
    out.extend_from_slice(value.to_le_bytes().as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_primitives() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut offset = 0;

        let first: u16 = read_le_at(&data, &mut offset).unwrap();
        let second: u16 = read_le_at(&data, &mut offset).unwrap();
        let third: u32 = read_le_at(&data, &mut offset).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(offset, 8);
    }

    #[test]
    fn read_out_of_bounds() {
        let data = [0x01, 0x02];
        assert!(read_le::<u32>(&data).is_err());

        let mut offset = 1;
        assert!(read_le_at::<u16>(&data, &mut offset).is_err());
        assert_eq!(offset, 1);
    }

    #[test]
    fn write_then_read() {
        let mut out = Vec::new();
        put_le(&mut out, 0xABCDu16);
        put_le(&mut out, 0x1234_5678u32);
        assert_eq!(out, [0xCD, 0xAB, 0x78, 0x56, 0x34, 0x12]);

        let mut offset = 0;
        assert_eq!(read_le_at::<u16>(&out, &mut offset).unwrap(), 0xABCD);
        assert_eq!(read_le_at::<u32>(&out, &mut offset).unwrap(), 0x1234_5678);
    }
}
