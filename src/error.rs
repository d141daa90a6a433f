use thiserror::Error;

use crate::model::name::ResourceName;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure modes of table construction, wire encoding and decoding, and
/// container framing. Each variant provides specific context about the failure mode so callers
/// can react appropriately.
///
/// # Error Categories
///
/// ## Table Mutation Errors
/// - [`Error::DuplicateDefinition`] - Conflicting value at the same (name, config) slot
/// - [`Error::VisibilityConflict`] - Symbol-state downgrade or resource-id collision
///
/// ## Wire Decoding Errors
/// - [`Error::Malformed`] - Corrupted or invalid wire bytes
/// - [`Error::OutOfBounds`] - Attempted to read beyond buffer boundaries
/// - [`Error::Empty`] - Empty input provided where a message was expected
///
/// ## Container Errors
/// - [`Error::Io`] - The underlying write destination or mapped file failed
/// - [`Error::MissingPayload`] - `finish` called before any payload write
///
/// All mutation operations leave the table in its prior valid state when they return an error,
/// and decoders never hand back a partially populated table.
///
/// # Examples
///
/// ```rust
/// use restable::{codec, Diagnostics, Error};
///
/// let diag = Diagnostics::new();
/// match codec::deserialize_table(&[0xFF, 0xFF], &diag) {
///     Ok(table) => {
///         println!("decoded {} packages", table.packages().len());
///     }
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("malformed input: {} ({}:{})", message, file, line);
///     }
///     Err(e) => {
///         eprintln!("other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input bytes are damaged and could not be decoded.
    ///
    /// This error indicates that wire bytes do not conform to the expected message or
    /// container layout. The error includes the source location where the malformation
    /// was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while decoding a buffer.
    ///
    /// This error occurs when trying to read data beyond the end of the input. It is a
    /// safety check to prevent overruns during wire decoding.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Provided input was empty.
    ///
    /// This error occurs when an empty buffer is provided where an encoded message or
    /// container was expected.
    #[error("Provided input was empty")]
    Empty,

    /// A value was already defined at the same name and configuration.
    ///
    /// Raised by table construction when an incoming definition conflicts with an existing
    /// non-weak value of different content at the same (name, config) slot. Identical
    /// re-additions and weak placeholders never raise this.
    #[error("Duplicate definition of resource {name} for config '{config}'")]
    DuplicateDefinition {
        /// The fully qualified resource name that was defined twice
        name: ResourceName,
        /// The canonical form of the configuration the conflict occurred in
        config: String,
    },

    /// A symbol-visibility change or id assignment conflicts with prior declarations.
    ///
    /// Raised when a Public symbol would be downgraded, or when a numeric resource id is
    /// already bound to a different name (or does not match the owning package id).
    #[error("Visibility conflict - {0}")]
    VisibilityConflict(String),

    /// The underlying sink or file reported an I/O failure.
    ///
    /// Wraps I/O errors from the caller-supplied sink during container writes, and from
    /// opening a memory-mapped container. Container writes are fatal on first error; no
    /// partially committed state is retained.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// `finish` was called on a container writer before any payload bytes were written.
    ///
    /// A container always bundles a header with a payload region; finishing with nothing
    /// written indicates a caller bug, not a serialization failure.
    #[error("Container finished without any payload data")]
    MissingPayload,
}
