//! Compiled-file metadata: the structured header a container carries with its payload.

use crate::model::{config::ConfigDescription, name::ResourceName, source::Source};

/// A symbol declared inside a compiled payload, such as an id defined within a layout.
///
/// Exported symbols live in the compiled-file header, not in the resource table itself;
/// their order is source-declaration order and is preserved exactly on round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSymbol {
    /// The declared symbol's name
    pub name: ResourceName,
    /// 1-based line of the declaration within the source file
    pub line: u32,
}

/// Metadata describing one compiled resource file.
///
/// This is the structured header of the container format: which resource the payload
/// implements, under which configuration, where it came from, and which symbols it
/// exports.
///
/// # Examples
///
/// ```rust
/// use restable::model::{ConfigDescription, ExportedSymbol, ResourceFile, ResourceName, Source};
///
/// let file = ResourceFile {
///     name: ResourceName::parse("com.app.a:layout/main")?,
///     config: ConfigDescription::parse("hdpi-v9")?,
///     source: Source::new("res/layout-hdpi-v9/main.xml"),
///     exported_symbols: vec![ExportedSymbol {
///         name: ResourceName::parse("@+id/unchecked")?,
///         line: 23,
///     }],
/// };
/// assert_eq!(file.exported_symbols.len(), 1);
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// The resource this file provides a value for
    pub name: ResourceName,
    /// The configuration the file applies under
    pub config: ConfigDescription,
    /// The originating source path
    pub source: Source,
    /// Symbols declared inside the payload, in source-declaration order
    pub exported_symbols: Vec<ExportedSymbol>,
}
