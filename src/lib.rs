// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'container/mapped.rs' uses mmap to map a container file into memory

//! # restable
//!
//! [![Crates.io](https://img.shields.io/crates/v/restable.svg)](https://crates.io/crates/restable)
//! [![Documentation](https://docs.rs/restable/badge.svg)](https://docs.rs/restable)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/restable/restable/blob/main/LICENSE)
//!
//! An in-memory model for hierarchically named, configuration-qualified resources, with a
//! lossless binary serialization layer and a 4-byte-aligned container format for bundling
//! compiled payloads with their metadata. Built in pure Rust with no runtime dependencies
//! beyond a handful of small, well-established crates.
//!
//! ## Features
//!
//! - **📦 Complete resource model** - Packages, typed entry groups, configuration-qualified
//!   value bindings, and a deduplicating string pool
//! - **🔍 Rich configuration axes** - Locale, density, orientation, input, screen-dimension
//!   and platform-version qualifiers with a canonical textual form
//! - **⚡ Lossless binary codec** - Deterministic, forward-compatible wire format for whole
//!   tables and compiled-file headers
//! - **🧱 Aligned container streams** - Length-prefixed headers with payloads guaranteed to
//!   start on a 4-byte boundary, readable zero-copy or memory-mapped
//! - **🛡️ Memory safe** - Bounds-checked decoding with comprehensive error handling; damaged
//!   input never yields a partially populated table
//!
//! ## Quick Start
//!
//! Add `restable` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! restable = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use restable::prelude::*;
//!
//! let mut table = ResourceTable::new();
//! table.create_package("com.app.a", Some(0x7f));
//!
//! let name = ResourceName::parse("com.app.a:string/greeting")?;
//! table.add_string(&name, ConfigDescription::default(), "hello")?;
//!
//! let bytes = codec::serialize_table(&table)?;
//! let decoded = codec::deserialize_table(&bytes, &Diagnostics::new())?;
//! assert!(decoded.find_resource(&name).is_some());
//! # Ok::<(), restable::Error>(())
//! ```
//!
//! ### Container Streams
//!
//! Compiled payloads travel alongside their metadata in a container stream:
//!
//! ```rust
//! use restable::container::{ContainerReader, ContainerWriter};
//! use restable::model::{ConfigDescription, ResourceFile, ResourceName, Source};
//! use restable::Diagnostics;
//!
//! let file = ResourceFile {
//!     name: ResourceName::parse("com.app.a:layout/main")?,
//!     config: ConfigDescription::parse("hdpi-v9")?,
//!     source: Source::new("res/layout-hdpi-v9/main.xml"),
//!     exported_symbols: Vec::new(),
//! };
//!
//! let mut writer = ContainerWriter::new(Vec::new(), &file)?;
//! writer.write(b"compiled payload")?;
//! let bytes = writer.finish()?;
//!
//! let reader = ContainerReader::new(&bytes, &Diagnostics::new())?;
//! assert_eq!(reader.data(), b"compiled payload");
//! # Ok::<(), restable::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `restable` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`model`] - Resource names, ids, configurations, values, and the table aggregate
//! - [`codec`] - Serialization and deserialization of tables and compiled-file headers
//! - [`container`] - The aligned header-plus-payload stream format
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### The Resource Model
//!
//! A [`model::ResourceTable`] holds packages, each a two-level tree of resource types and
//! named entries. An entry maps configuration descriptions to polymorphic values: interned
//! strings, file references, symbolic references to other resources, raw primitives, and
//! quantity-keyed or positional collections. Construction enforces duplicate-definition and
//! symbol-visibility rules up front, so a table that builds without error is well formed.
//!
//! ### The Wire Layer
//!
//! The [`codec`] module flattens a table into a single self-contained message with a shared
//! string pool, and rebuilds an equivalent table from those bytes. Encoding is
//! deterministic; decoding skips unknown fields (reporting them through [`Diagnostics`]) so
//! newer producers remain readable by older consumers.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with comprehensive error information:
//!
//! ```rust
//! use restable::{codec, Diagnostics, Error};
//!
//! match codec::deserialize_table(&[0xFF, 0xFF], &Diagnostics::new()) {
//!     Ok(table) => println!("decoded {} packages", table.packages().len()),
//!     Err(Error::Malformed { message, .. }) => println!("malformed input: {message}"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

#[macro_use]
pub(crate) mod error;

pub(crate) mod wire;

mod diagnostics;

/// Convenient re-exports of the most commonly used types.
///
/// This module provides a curated selection of the most frequently used types
/// from across the library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use restable::prelude::*;
///
/// let mut table = ResourceTable::new();
/// table.create_package("com.app.a", Some(0x7f));
/// assert_eq!(table.packages().len(), 1);
/// ```
pub mod prelude;

/// The in-memory resource model: names, ids, configurations, values, and the table.
///
/// This module contains every entity the serialization layer operates on:
///
/// - **Addressing**: [`model::ResourceName`] for symbolic names,
///   [`model::ResourceId`] for packed numeric ids
/// - **Configurations**: [`model::ConfigDescription`] and its qualifier axes, with a
///   canonical string form used both for display and on the wire
/// - **Values**: [`model::Value`], [`model::Item`], [`model::Plural`], and
///   [`model::Array`] - the closed set of things a resource can be bound to
/// - **Aggregation**: [`model::ResourceTable`] with its mutation operations and
///   [`model::StringPool`] for deduplicated string storage
/// - **File metadata**: [`model::ResourceFile`] describing a compiled payload
///
/// # Examples
///
/// ```rust
/// use restable::model::{ConfigDescription, ResourceName, ResourceTable};
///
/// let mut table = ResourceTable::new();
/// table.create_package("com.app.a", Some(0x7f));
///
/// let name = ResourceName::parse("com.app.a:string/title")?;
/// table.add_string(&name, ConfigDescription::default(), "Title")?;
/// table.add_string(&name, ConfigDescription::parse("hdpi")?, "Title (hdpi)")?;
///
/// let found = table.find_resource(&name).unwrap();
/// assert_eq!(found.entry.values.len(), 2);
/// # Ok::<(), restable::Error>(())
/// ```
pub mod model;

/// Binary codecs for resource tables and compiled-file headers.
///
/// Two message types share one wire discipline:
///
/// - [`codec::serialize_table`] / [`codec::deserialize_table`] - a whole
///   [`model::ResourceTable`], flattened around a shared string pool
/// - [`codec::serialize_file`] / [`codec::deserialize_file`] - the lightweight
///   [`model::ResourceFile`] header the container format carries
///
/// Encoding is deterministic: equal tables produce identical bytes. Decoding is
/// forward-compatible: unknown fields are skipped and reported through [`Diagnostics`],
/// while structural damage aborts with [`Error::Malformed`] and no partial output.
///
/// # Examples
///
/// ```rust
/// use restable::{codec, model::ResourceTable, Diagnostics};
///
/// let table = ResourceTable::new();
/// let bytes = codec::serialize_table(&table)?;
/// let decoded = codec::deserialize_table(&bytes, &Diagnostics::new())?;
/// assert!(decoded.packages().is_empty());
/// # Ok::<(), restable::Error>(())
/// ```
pub mod codec;

/// The container stream format: length-prefixed header plus aligned payload.
///
/// A container bundles a serialized [`model::ResourceFile`] header with arbitrary payload
/// bytes, padding the header region so the payload always starts at a 4-byte-aligned
/// offset. Consumers can therefore reinterpret payloads as packed binary structures
/// directly over the buffer.
///
/// # Key Types
///
/// - [`container::ContainerWriter`] - Streams a container into any [`std::io::Write`]
/// - [`container::ContainerReader`] - Zero-copy view over an in-memory container
/// - [`container::MappedContainer`] - Memory-mapped variant for files on disk
pub mod container;

/// `restable` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use restable::{model::ResourceTable, Result};
///
/// fn build_table() -> Result<ResourceTable> {
///     let mut table = ResourceTable::new();
///     table.create_package("com.app.a", Some(0x7f));
///     Ok(table)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `restable` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for table mutation, wire decoding, and container framing.
///
/// # Examples
///
/// ```rust
/// use restable::{codec, Diagnostics, Error};
///
/// match codec::deserialize_table(&[0x00], &Diagnostics::new()) {
///     Ok(_) => println!("decoded"),
///     Err(Error::Malformed { message, .. }) => println!("malformed: {}", message),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
pub use error::Error;

/// Non-fatal observations collected while decoding.
///
/// Decoders report recoverable oddities - unknown wire fields, unexpected but skippable
/// data - through a [`Diagnostics`] container rather than failing. See the type docs for
/// severity and category breakdowns.
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
