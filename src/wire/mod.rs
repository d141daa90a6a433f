//! Low-level wire encoding primitives shared by the table and compiled-file codecs.
//!
//! Two layers live here: [`io`] provides bounds-checked little-endian primitive access,
//! and [`field`] frames those primitives into tagged, length-delimited fields so messages
//! stay forward compatible across schema revisions. The codecs in [`crate::codec`] compose
//! these into the actual message shapes; nothing in this module knows about resources.

pub mod field;
pub mod io;

pub use field::{decode_str, decode_u32, FieldReader, FieldWriter};
