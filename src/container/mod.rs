//! The container stream: length-prefixed header plus 4-byte-aligned raw payload.
//!
//! # Architecture
//!
//! A container bundles compiled-file metadata with the compiled content itself:
//!
//! ```text
//! [u32 header_length][header bytes][0-3 zero padding bytes][payload bytes]
//! ```
//!
//! The header is a serialized [`crate::model::ResourceFile`] message. Padding brings the
//! total header region (prefix + message + padding) to a multiple of 4 bytes measured
//! from stream start, so the payload begins at a 4-byte-aligned offset. Downstream
//! consumers reinterpret payloads as packed binary structures; alignment lets them do so
//! directly over the buffer without copying.
//!
//! Padding length is never stored: writer and reader both derive it from the header
//! length through the same pure function, [`padding_for`].
//!
//! # Key Components
//!
//! - [`ContainerWriter`] - Streams a header then payload bytes into any [`std::io::Write`]
//! - [`ContainerReader`] - Zero-copy view over a complete in-memory container
//! - [`MappedContainer`] - Memory-mapped variant for reading containers from disk

mod mapped;
mod reader;
mod writer;

pub use mapped::MappedContainer;
pub use reader::ContainerReader;
pub use writer::ContainerWriter;

/// Width of the header length prefix in bytes.
pub const PREFIX_LEN: usize = 4;

/// Zero bytes required after a header of `header_len` bytes so the next stream offset is
/// 4-byte aligned.
///
/// Pure function of the header length; the writer and both readers share it so the two
/// sides cannot drift.
#[must_use]
pub fn padding_for(header_len: usize) -> usize {
    (4 - (PREFIX_LEN + header_len) % 4) % 4
}
