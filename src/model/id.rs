//! Packed numeric resource identifiers.

use std::fmt;

/// A numeric resource identifier packing package, type, and entry components.
///
/// Resource ids are 32-bit values where:
/// - The high byte (bits 24-31) is the package id
/// - The next byte (bits 16-23) is the type id within that package
/// - The low 16 bits (bits 0-15) are the entry index within that type
///
/// Pre-link tables may carry no ids at all; a fully linked table has every component
/// populated and non-zero for package and type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Creates a resource id from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        ResourceId(value)
    }

    /// Creates a resource id from its three components
    #[must_use]
    pub fn from_parts(package: u8, kind: u8, entry: u16) -> Self {
        ResourceId((u32::from(package) << 24) | (u32::from(kind) << 16) | u32::from(entry))
    }

    /// Returns the raw id value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the package id component (high byte)
    #[must_use]
    pub fn package_id(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the type id component (bits 16-23)
    #[must_use]
    pub fn type_id(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Extracts the entry index component (low 16 bits)
    #[must_use]
    pub fn entry_id(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Returns true if both the package and type components are non-zero
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.package_id() != 0 && self.type_id() != 0
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value)
    }
}

impl From<ResourceId> for u32 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResourceId(0x{:08x}, package: 0x{:02x}, type: 0x{:02x}, entry: {})",
            self.0,
            self.package_id(),
            self.type_id(),
            self.entry_id()
        )
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components() {
        let id = ResourceId::new(0x7f02_0001);
        assert_eq!(id.package_id(), 0x7f);
        assert_eq!(id.type_id(), 0x02);
        assert_eq!(id.entry_id(), 1);
        assert!(id.is_valid());
    }

    #[test]
    fn from_parts_matches_new() {
        assert_eq!(
            ResourceId::from_parts(0x7f, 0x02, 0x0001),
            ResourceId::new(0x7f02_0001)
        );
    }

    #[test]
    fn zero_components_are_invalid() {
        assert!(!ResourceId::new(0x0002_0001).is_valid());
        assert!(!ResourceId::new(0x7f00_0001).is_valid());
        assert!(!ResourceId::new(0).is_valid());
    }

    #[test]
    fn display_formats_hex() {
        assert_eq!(ResourceId::new(0x7f020000).to_string(), "0x7f020000");
    }
}
