//! The in-memory entity model: names, configurations, values, and the table aggregate.
//!
//! # Architecture
//!
//! The model is layered leaves-first:
//!
//! - [`pool`] - deduplicated string storage; all String-typed content indirects through it
//! - [`id`] / [`name`] - numeric and symbolic resource addressing
//! - [`config`] - the configuration qualifier axes and their canonical string form
//! - [`value`] - the closed sum type of scalar items and compound collections
//! - [`table`] - packages, types, entries and the mutation operations
//! - [`file`] - compiled-file metadata attached to payloads by the container format
//!
//! Everything here is synchronous and single-producer; the codecs in [`crate::codec`]
//! consume a finished table and produce a fresh, independently owned one on decode.

pub mod config;
pub mod file;
pub mod id;
pub mod name;
pub mod pool;
pub mod source;
pub mod table;
pub mod value;

pub use config::{
    ConfigAxes, ConfigDescription, Density, Keyboard, Navigation, Orientation, ScreenLong,
    ScreenSize, Touchscreen,
};
pub use file::{ExportedSymbol, ResourceFile};
pub use id::ResourceId;
pub use name::{ResourceName, ResourceType};
pub use pool::{PoolRef, StringPool};
pub use source::Source;
pub use table::{Entry, Package, ResourceTable, SearchResult, Symbol, SymbolState, TypeGroup};
pub use value::{Array, Item, Plural, PluralCategory, Value, ValueKind};
