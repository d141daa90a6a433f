//! Symbolic resource names: the type namespace and the `package:type/entry` form.

use std::fmt;
use std::str::FromStr;

use crate::Result;

/// The resource type axis of a [`ResourceName`].
///
/// Each variant names one of the well-known type directories a resource can live under.
/// The string form (via [`fmt::Display`] / [`FromStr`]) is the lowercase directory name
/// used in qualified references such as `layout/main`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceType {
    /// Animation resources
    Anim,
    /// Simple value arrays
    Array,
    /// Style attribute definitions
    Attr,
    /// Boolean values
    Bool,
    /// Color values and state lists
    Color,
    /// Dimension values
    Dimen,
    /// Drawable graphics
    Drawable,
    /// Generated id symbols
    Id,
    /// Integer values
    Integer,
    /// View hierarchy layouts
    Layout,
    /// Menu definitions
    Menu,
    /// Launcher icon drawables
    Mipmap,
    /// Quantity-dependent strings
    Plurals,
    /// Uninterpreted raw files
    Raw,
    /// Localizable strings
    String,
    /// Style definitions
    Style,
    /// Declared styleable attribute groups
    Styleable,
    /// Arbitrary XML files
    Xml,
}

/// A fully qualified resource name: package, type, and entry.
///
/// Names are how resources are addressed before (and independently of) numeric id
/// assignment. The package component may be empty for names local to the table being
/// built; comparisons are purely structural.
///
/// # Examples
///
/// ```rust
/// use restable::model::{ResourceName, ResourceType};
///
/// let name = ResourceName::parse("@com.app.a:layout/main")?;
/// assert_eq!(name.package, "com.app.a");
/// assert_eq!(name.kind, ResourceType::Layout);
/// assert_eq!(name.entry, "main");
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName {
    /// Owning package, empty when the name is package-local
    pub package: String,
    /// The resource type the entry belongs to
    pub kind: ResourceType,
    /// The entry name within the type
    pub entry: String,
}

impl ResourceName {
    /// Create a name from its components.
    #[must_use]
    pub fn new(package: impl Into<String>, kind: ResourceType, entry: impl Into<String>) -> Self {
        ResourceName {
            package: package.into(),
            kind,
            entry: entry.into(),
        }
    }

    /// Parse a reference-syntax name of the form `[@][+]{package:}type/entry`.
    ///
    /// The leading `@` of reference syntax and the `+` create-marker are accepted and
    /// dropped; they are producer-side concerns and not part of the name's identity.
    ///
    /// # Errors
    /// Returns an error if the `type/entry` structure is missing, the type is not a known
    /// [`ResourceType`], or the entry component is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.strip_prefix('@').unwrap_or(raw);
        let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let (package, rest) = match trimmed.split_once(':') {
            Some((package, rest)) => (package, rest),
            None => ("", trimmed),
        };

        let Some((kind, entry)) = rest.split_once('/') else {
            return Err(malformed_error!("Resource name '{}' has no type/entry separator", raw));
        };

        if entry.is_empty() {
            return Err(malformed_error!("Resource name '{}' has an empty entry", raw));
        }

        let kind = ResourceType::from_str(kind)
            .map_err(|_| malformed_error!("Unknown resource type '{}' in '{}'", kind, raw))?;

        Ok(ResourceName::new(package, kind, entry))
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}/{}", self.kind, self.entry)
        } else {
            write!(f, "{}:{}/{}", self.package, self.kind, self.entry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_qualified() {
        let name = ResourceName::parse("@com.app.a:layout/main").unwrap();
        assert_eq!(name.package, "com.app.a");
        assert_eq!(name.kind, ResourceType::Layout);
        assert_eq!(name.entry, "main");
    }

    #[test]
    fn parse_create_marker() {
        let name = ResourceName::parse("@+id/unchecked").unwrap();
        assert_eq!(name.package, "");
        assert_eq!(name.kind, ResourceType::Id);
        assert_eq!(name.entry, "unchecked");
    }

    #[test]
    fn parse_bare() {
        let name = ResourceName::parse("string/text").unwrap();
        assert_eq!(name.package, "");
        assert_eq!(name.kind, ResourceType::String);
        assert_eq!(name.entry, "text");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ResourceName::parse("no-separator").is_err());
        assert!(ResourceName::parse("notatype/main").is_err());
        assert!(ResourceName::parse("layout/").is_err());
    }

    #[test]
    fn display_roundtrip() {
        for raw in ["com.app.a:layout/main", "id/unchecked"] {
            assert_eq!(ResourceName::parse(raw).unwrap().to_string(), raw);
        }
    }
}
