//! Diagnostics collection for wire decoding.
//!
//! Decoding tolerates minor schema evolution: unknown fields are skipped rather than
//! rejected, and each skip is worth reporting without failing the decode. The
//! [`Diagnostics`] container collects those non-fatal observations so callers can decide
//! how to surface them; the core never formats user-facing messages itself.
//!
//! The container is single-threaded, matching the rest of the library: decoding is a
//! bounded in-memory transformation with no internal concurrency, so entries are kept in
//! a [`std::cell::RefCell`] and appended through `&self`.

use std::cell::RefCell;
use std::fmt;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    Info,

    /// Warning about potentially problematic input.
    ///
    /// The decode still succeeds, but some data was skipped or replaced and the result
    /// may differ from what the producer intended.
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
        }
    }
}

/// Category indicating the source of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Issues in the shared string pool section.
    Pool,

    /// Issues in a serialized configuration.
    Config,

    /// Issues in a serialized value.
    Value,

    /// Issues in table structure (packages, types, entries).
    Table,

    /// Issues in container framing.
    Container,

    /// Anything not fitting the other categories.
    General,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Pool => write!(f, "Pool"),
            DiagnosticCategory::Config => write!(f, "Config"),
            DiagnosticCategory::Value => write!(f, "Value"),
            DiagnosticCategory::Table => write!(f, "Table"),
            DiagnosticCategory::Container => write!(f, "Container"),
            DiagnosticCategory::General => write!(f, "General"),
        }
    }
}

/// A single diagnostic entry.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Human-readable description of the observation.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)
    }
}

/// Container for diagnostic entries reported during a decode.
///
/// # Examples
///
/// ```rust
/// use restable::{DiagnosticCategory, Diagnostics};
///
/// let diag = Diagnostics::new();
/// diag.warning(DiagnosticCategory::Table, "unknown field 12 skipped");
///
/// assert_eq!(diag.len(), 1);
/// for entry in diag.entries() {
///     println!("{entry}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: RefCell<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Record an informational entry.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.entries.borrow_mut().push(Diagnostic {
            severity: DiagnosticSeverity::Info,
            category,
            message: message.into(),
        });
    }

    /// Record a warning entry.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.entries.borrow_mut().push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            category,
            message: message.into(),
        });
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns true if any warning was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.severity == DiagnosticSeverity::Warning)
    }

    /// Snapshot of the recorded entries in report order.
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }
}
