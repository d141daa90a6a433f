//! Tagged field encoding for the structured wire messages.
//!
//! Every message is a flat concatenation of fields, each framed as
//! `[u16 field id][u32 byte length][length bytes]` in little-endian order. Nested messages
//! are carried as the payload of a length-delimited field using the same layout, so a
//! decoder can always skip a field it does not recognize. That skip-by-length property is
//! what gives the format its forward compatibility: decoders ignore unknown ids instead of
//! rejecting them.
//!
//! Encoders emit fields in ascending id order (repeated fields in insertion order), which
//! keeps the byte output deterministic for a fixed logical message.
//!
//! # Key Components
//!
//! - [`crate::wire::field::FieldWriter`] - Builds a message by appending framed fields
//! - [`crate::wire::field::FieldReader`] - Iterates (id, payload) pairs of a message

use crate::{
    wire::io::{put_le, read_le_at},
    Result,
};

/// Builds an encoded message by appending framed fields to an owned buffer.
///
/// The writer does not enforce id ordering; codecs are expected to emit fields in
/// ascending id order to keep serialization deterministic.
#[derive(Default)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    /// Create an empty message writer.
    #[must_use]
    pub fn new() -> Self {
        FieldWriter { buf: Vec::new() }
    }

    /// Append a raw byte field.
    pub fn bytes(&mut self, id: u16, payload: &[u8]) {
        put_le(&mut self.buf, id);
        // Field payloads are always addressable in memory, u32 cannot overflow here
        #[allow(clippy::cast_possible_truncation)]
        put_le(&mut self.buf, payload.len() as u32);
        self.buf.extend_from_slice(payload);
    }

    /// Append a `u32` field.
    pub fn u32(&mut self, id: u16, value: u32) {
        self.bytes(id, &value.to_le_bytes());
    }

    /// Append a UTF-8 string field.
    pub fn str(&mut self, id: u16, value: &str) {
        self.bytes(id, value.as_bytes());
    }

    /// Append a nested message field.
    pub fn message(&mut self, id: u16, nested: FieldWriter) {
        self.bytes(id, &nested.buf);
    }

    /// Consume the writer and return the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Iterates the fields of an encoded message as (id, payload) pairs.
///
/// The reader borrows the message buffer; payload slices point directly into it.
pub struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    /// Create a reader over an encoded message.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        FieldReader { data, offset: 0 }
    }

    /// Advance to the next field.
    ///
    /// Returns `Ok(None)` at the end of the message.
    ///
    /// # Errors
    /// Returns an error if a field frame is truncated or its declared length exceeds the
    /// remaining buffer.
    pub fn next_field(&mut self) -> Result<Option<(u16, &'a [u8])>> {
        if self.offset == self.data.len() {
            return Ok(None);
        }

        let id = read_le_at::<u16>(self.data, &mut self.offset)?;
        let len = read_le_at::<u32>(self.data, &mut self.offset)? as usize;
        if self.data.len() - self.offset < len {
            return Err(malformed_error!(
                "Field {} declares {} bytes but only {} remain",
                id,
                len,
                self.data.len() - self.offset
            ));
        }

        let payload = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(Some((id, payload)))
    }
}

/// Decode a `u32` field payload.
///
/// # Errors
/// Returns an error if the payload is not exactly 4 bytes.
pub fn decode_u32(payload: &[u8]) -> Result<u32> {
    if payload.len() != 4 {
        return Err(malformed_error!(
            "Expected 4 byte field payload, found {}",
            payload.len()
        ));
    }

    let mut offset = 0;
    read_le_at::<u32>(payload, &mut offset)
}

/// Decode a UTF-8 string field payload.
///
/// # Errors
/// Returns an error if the payload is not valid UTF-8.
pub fn decode_str(payload: &[u8]) -> Result<&str> {
    std::str::from_utf8(payload).map_err(|_| malformed_error!("Field payload is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted_roundtrip() {
        let mut inner = FieldWriter::new();
        inner.u32(1, 23);
        inner.str(2, "unchecked");

        let mut outer = FieldWriter::new();
        outer.str(1, "layout/main");
        outer.message(4, inner);
        let bytes = outer.finish();

        let mut reader = FieldReader::new(&bytes);

        let (id, payload) = reader.next_field().unwrap().unwrap();
        assert_eq!(id, 1);
        assert_eq!(decode_str(payload).unwrap(), "layout/main");

        let (id, payload) = reader.next_field().unwrap().unwrap();
        assert_eq!(id, 4);
        let mut nested = FieldReader::new(payload);
        let (id, payload) = nested.next_field().unwrap().unwrap();
        assert_eq!(id, 1);
        assert_eq!(decode_u32(payload).unwrap(), 23);
        let (id, payload) = nested.next_field().unwrap().unwrap();
        assert_eq!(id, 2);
        assert_eq!(decode_str(payload).unwrap(), "unchecked");
        assert!(nested.next_field().unwrap().is_none());

        assert!(reader.next_field().unwrap().is_none());
    }

    #[test]
    fn unknown_fields_are_skippable() {
        let mut writer = FieldWriter::new();
        writer.u32(1, 7);
        writer.bytes(999, &[0xDE, 0xAD, 0xBE, 0xEF, 0x00]);
        writer.u32(2, 8);
        let bytes = writer.finish();

        let mut reader = FieldReader::new(&bytes);
        let mut seen = Vec::new();
        while let Some((id, _)) = reader.next_field().unwrap() {
            seen.push(id);
        }
        assert_eq!(seen, [1, 999, 2]);
    }

    #[test]
    fn truncated_field_fails() {
        let mut writer = FieldWriter::new();
        writer.bytes(1, &[0xAA; 16]);
        let bytes = writer.finish();

        // Chop the payload short of its declared length
        let mut reader = FieldReader::new(&bytes[..10]);
        assert!(reader.next_field().is_err());
    }
}
