//! # restable Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! library. Import this module to get quick access to the essential types for building,
//! serializing, and reading resource tables and containers.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all restable operations
pub use crate::Error;

/// The result type used throughout restable
pub use crate::Result;

/// Non-fatal decode observations
pub use crate::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Codec and Container Entry Points
// ================================================================================================

/// Table and compiled-file wire codecs
pub use crate::codec;

/// Container stream writer and readers
pub use crate::container::{ContainerReader, ContainerWriter, MappedContainer};

// ================================================================================================
// Resource Addressing
// ================================================================================================

/// Symbolic resource names and the resource type namespace
pub use crate::model::{ResourceName, ResourceType};

/// Packed numeric resource ids
pub use crate::model::ResourceId;

// ================================================================================================
// Configurations
// ================================================================================================

/// Configuration descriptions and their qualifier axes
pub use crate::model::{
    ConfigAxes, ConfigDescription, Density, Keyboard, Navigation, Orientation, ScreenLong,
    ScreenSize, Touchscreen,
};

// ================================================================================================
// Values
// ================================================================================================

/// The polymorphic value types bound to entries
pub use crate::model::{Array, Item, Plural, PluralCategory, Value, ValueKind};

// ================================================================================================
// The Table and its Constituents
// ================================================================================================

/// The table aggregate and its structural pieces
pub use crate::model::{
    Entry, Package, ResourceTable, SearchResult, Symbol, SymbolState, TypeGroup,
};

/// Deduplicated string storage
pub use crate::model::{PoolRef, StringPool};

/// Source attribution for values and compiled files
pub use crate::model::Source;

// ================================================================================================
// Compiled-File Metadata
// ================================================================================================

/// Compiled-file headers carried by containers
pub use crate::model::{ExportedSymbol, ResourceFile};
