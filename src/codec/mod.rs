//! Wire codecs for the two structured message types.
//!
//! [`table`] flattens a [`crate::model::ResourceTable`] into the shared-pool-plus-tree
//! message and rebuilds an independently owned table from it; [`file`] does the same for
//! the lightweight [`crate::model::ResourceFile`] header the container format carries.
//! Both ride on [`crate::wire`] for framing, tolerate unknown fields (reported through
//! [`crate::Diagnostics`]), and abort with no partial output on structural damage.

pub mod file;
pub mod table;

pub use file::{deserialize_file, serialize_file};
pub use table::{deserialize_table, serialize_table};
