//! Source-file attribution carried by values and symbols.

use std::fmt;

/// Attribution to a position in an originating source file.
///
/// Carried by values and symbols purely for diagnostics; the core never interprets the
/// path. The line number, when present, is 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    /// Path of the originating file
    pub path: String,
    /// 1-based line within the file, if known
    pub line: Option<u32>,
}

impl Source {
    /// Create a source pointing at a whole file.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            line: None,
        }
    }

    /// Create a source pointing at a specific line of a file.
    #[must_use]
    pub fn with_line(path: impl Into<String>, line: u32) -> Self {
        Source {
            path: path.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}
