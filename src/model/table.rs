//! The resource table aggregate: packages, types, entries and their bindings.
//!
//! A [`ResourceTable`] maps symbolic names to configuration-qualified [`Value`]s through a
//! three-level hierarchy: [`Package`] (by name, optional numeric id byte) contains
//! [`TypeGroup`]s (one per [`ResourceType`]), which contain [`Entry`]s (by entry name).
//! Each entry carries an optional [`ResourceId`], a [`Symbol`] visibility state, and its
//! (config, value) bindings.
//!
//! Tables are built incrementally by a single producer through [`ResourceTable::add_resource`]
//! and [`ResourceTable::set_symbol_state`]; both validate before mutating, so a failed call
//! leaves the table exactly as it was. A pre-link table may carry no numeric ids at all and
//! is keyed purely by name; a fully linked table has every package, type and entry id
//! populated.
//!
//! Packages keep insertion order (serialization order is caller-controlled); types and
//! entries live in sorted maps, and bindings are keyed by the configuration's total order,
//! which together make serialization deterministic.

use std::collections::BTreeMap;

use crate::{
    model::{
        config::ConfigDescription,
        id::ResourceId,
        name::{ResourceName, ResourceType},
        pool::StringPool,
        source::Source,
        value::{Item, Value},
    },
    Error, Result,
};

/// Visibility of a resource symbol.
///
/// Ordered as a lattice: `Undefined < Private < Public`. Transitions may only move up;
/// [`ResourceTable::set_symbol_state`] rejects downgrades.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::FromRepr,
)]
#[repr(u32)]
pub enum SymbolState {
    /// No visibility declared
    #[default]
    Undefined = 0,
    /// Explicitly private to the owning package
    Private = 1,
    /// Part of the package's stable external API
    Public = 2,
}

/// A visibility declaration with optional attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbol {
    /// The declared visibility
    pub state: SymbolState,
    /// Where the declaration came from, for diagnostics
    pub source: Option<Source>,
}

impl Symbol {
    /// A public symbol declaration with no attribution.
    #[must_use]
    pub fn public() -> Self {
        Symbol {
            state: SymbolState::Public,
            source: None,
        }
    }
}

/// A resource name's per-type record: id, visibility, and per-config values.
#[derive(Debug, Default)]
pub struct Entry {
    /// Assigned numeric id, absent pre-linking
    pub id: Option<ResourceId>,
    /// Declared visibility of this entry
    pub symbol: Symbol,
    /// The configuration-qualified value bindings, unique per configuration
    pub values: BTreeMap<ConfigDescription, Value>,
}

/// All entries of one resource type within a package.
#[derive(Debug)]
pub struct TypeGroup {
    /// The resource type this group holds
    pub kind: ResourceType,
    /// Assigned numeric type id byte, absent pre-linking
    pub id: Option<u8>,
    /// Aggregate visibility: raised to Public when any entry goes Public
    pub symbol: Symbol,
    /// Entries by name
    pub entries: BTreeMap<String, Entry>,
}

impl TypeGroup {
    fn new(kind: ResourceType) -> Self {
        TypeGroup {
            kind,
            id: None,
            symbol: Symbol::default(),
            entries: BTreeMap::new(),
        }
    }
}

/// A named package of resource types.
#[derive(Debug)]
pub struct Package {
    /// The package name (reverse-domain convention)
    pub name: String,
    /// Assigned numeric package id byte, absent for per-module tables
    pub id: Option<u8>,
    /// Type groups by resource type
    pub types: BTreeMap<ResourceType, TypeGroup>,
}

impl Package {
    /// The type group for `kind`, if any entries of that type exist.
    #[must_use]
    pub fn type_group(&self, kind: ResourceType) -> Option<&TypeGroup> {
        self.types.get(&kind)
    }
}

/// A successful [`ResourceTable::find_resource`] lookup.
pub struct SearchResult<'a> {
    /// The owning package
    pub package: &'a Package,
    /// The owning type group
    pub type_group: &'a TypeGroup,
    /// The entry itself
    pub entry: &'a Entry,
}

// Outcome of the duplicate-policy check for an occupied (name, config) slot.
enum AddDisposition {
    Insert,
    Keep,
}

/// The aggregate table: an ordered set of packages plus the owned string pool.
///
/// # Examples
///
/// ```rust
/// use restable::model::{ConfigDescription, ResourceName, ResourceTable, SymbolState};
///
/// let mut table = ResourceTable::new();
/// table.create_package("com.app.a", Some(0x7f));
///
/// let name = ResourceName::parse("com.app.a:string/text")?;
/// table.add_string(&name, ConfigDescription::default(), "hi")?;
///
/// let found = table.find_resource(&name).unwrap();
/// assert_eq!(found.entry.symbol.state, SymbolState::Undefined);
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ResourceTable {
    packages: Vec<Package>,
    pool: StringPool,
}

impl ResourceTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        ResourceTable::default()
    }

    /// The packages in insertion order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The table's string pool.
    #[must_use]
    pub fn string_pool(&self) -> &StringPool {
        &self.pool
    }

    /// Mutable access to the string pool, for interning value strings.
    pub fn string_pool_mut(&mut self) -> &mut StringPool {
        &mut self.pool
    }

    /// Find or create the package `name`, recording `id` if one is supplied.
    pub fn create_package(&mut self, name: &str, id: Option<u8>) -> &mut Package {
        let index = match self.packages.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.packages.push(Package {
                    name: name.to_owned(),
                    id: None,
                    types: BTreeMap::new(),
                });
                self.packages.len() - 1
            }
        };

        let package = &mut self.packages[index];
        if package.id.is_none() {
            package.id = id;
        }
        package
    }

    /// Look up a resource by name.
    ///
    /// Returns direct references into the owning table, or `None` when any level of the
    /// hierarchy is missing.
    #[must_use]
    pub fn find_resource(&self, name: &ResourceName) -> Option<SearchResult<'_>> {
        let package = self.packages.iter().find(|p| p.name == name.package)?;
        let type_group = package.types.get(&name.kind)?;
        let entry = type_group.entries.get(&name.entry)?;
        Some(SearchResult {
            package,
            type_group,
            entry,
        })
    }

    /// Add a value binding for `name` under `config`.
    ///
    /// Identical re-additions are no-ops; a weak existing value is replaced; an incoming
    /// weak value never displaces an existing strong one.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateDefinition`] if a strong value of different content is
    /// already bound at (name, config). The table is unchanged on error.
    pub fn add_resource(
        &mut self,
        name: &ResourceName,
        config: ConfigDescription,
        value: Value,
    ) -> Result<()> {
        self.add_resource_impl(name, None, config, value)
    }

    /// Add a value binding together with a pre-assigned numeric id.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateDefinition`] on a value conflict, or
    /// [`Error::VisibilityConflict`] if `id` contradicts an id already bound to this entry
    /// or the owning package's id byte. The table is unchanged on error.
    pub fn add_resource_with_id(
        &mut self,
        name: &ResourceName,
        id: ResourceId,
        config: ConfigDescription,
        value: Value,
    ) -> Result<()> {
        self.add_resource_impl(name, Some(id), config, value)
    }

    /// Intern `text` and bind it as a string value.
    ///
    /// # Errors
    /// Same failure modes as [`ResourceTable::add_resource`].
    pub fn add_string(
        &mut self,
        name: &ResourceName,
        config: ConfigDescription,
        text: &str,
    ) -> Result<()> {
        let r = self.pool.make_ref(text);
        self.add_resource(name, config, Value::item(Item::String(r)))
    }

    /// Intern `path` and bind it as a file reference.
    ///
    /// # Errors
    /// Same failure modes as [`ResourceTable::add_resource`].
    pub fn add_file_reference(
        &mut self,
        name: &ResourceName,
        config: ConfigDescription,
        path: &str,
    ) -> Result<()> {
        let r = self.pool.make_ref(path);
        self.add_resource(name, config, Value::item(Item::FileReference(r)))
    }

    /// Bind a by-name reference to another resource.
    ///
    /// # Errors
    /// Same failure modes as [`ResourceTable::add_resource`].
    pub fn add_reference(
        &mut self,
        name: &ResourceName,
        config: ConfigDescription,
        target: ResourceName,
    ) -> Result<()> {
        self.add_resource(
            name,
            config,
            Value::item(Item::Reference {
                name: target,
                id: None,
            }),
        )
    }

    /// Declare the visibility of `name`, optionally binding a numeric id.
    ///
    /// Public visibility propagates to the owning type group. Re-declaring an equal or
    /// higher state is idempotent.
    ///
    /// # Errors
    /// Returns [`Error::VisibilityConflict`] if the transition would downgrade the current
    /// state, or if `id` conflicts with an already bound id. The table is unchanged on
    /// error.
    pub fn set_symbol_state(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        symbol: Symbol,
    ) -> Result<()> {
        // Validate against current state before touching anything
        self.check_id_consistency(name, id)?;
        if let Some(found) = self.find_resource(name) {
            if symbol.state < found.entry.symbol.state {
                return Err(Error::VisibilityConflict(format!(
                    "cannot downgrade {} from {} to {}",
                    name, found.entry.symbol.state, symbol.state
                )));
            }
        }

        let entry = self.find_or_create_entry(name);
        if entry.symbol.state < symbol.state {
            entry.symbol = symbol.clone();
        }
        if let Some(id) = id {
            entry.id = Some(id);
        }

        if symbol.state == SymbolState::Public {
            // Safe: find_or_create_entry built the whole chain above
            let package = self
                .packages
                .iter_mut()
                .find(|p| p.name == name.package)
                .ok_or_else(|| malformed_error!("package vanished during symbol update"))?;
            let type_group = package
                .types
                .get_mut(&name.kind)
                .ok_or_else(|| malformed_error!("type group vanished during symbol update"))?;
            if type_group.symbol.state < SymbolState::Public {
                type_group.symbol = Symbol::public();
            }
            if let Some(id) = id {
                if type_group.id.is_none() {
                    type_group.id = Some(id.type_id());
                }
                if package.id.is_none() {
                    package.id = Some(id.package_id());
                }
            }
        }

        Ok(())
    }

    fn add_resource_impl(
        &mut self,
        name: &ResourceName,
        id: Option<ResourceId>,
        config: ConfigDescription,
        value: Value,
    ) -> Result<()> {
        self.check_id_consistency(name, id)?;

        let disposition = match self
            .find_resource(name)
            .and_then(|found| found.entry.values.get(&config))
        {
            None => AddDisposition::Insert,
            Some(existing) if existing.is_weak() => AddDisposition::Insert,
            Some(existing) if existing.content_eq(&value) => AddDisposition::Keep,
            Some(_) if value.is_weak() => AddDisposition::Keep,
            Some(_) => {
                return Err(Error::DuplicateDefinition {
                    name: name.clone(),
                    config: config.to_string(),
                })
            }
        };

        let entry = self.find_or_create_entry(name);
        if let Some(id) = id {
            entry.id = Some(id);
        }
        if matches!(disposition, AddDisposition::Insert) {
            entry.values.insert(config, value);
        }

        Ok(())
    }

    // Id checks shared by add_resource_with_id and set_symbol_state: an entry id may be
    // assigned once, and its package byte must agree with an already assigned package id.
    fn check_id_consistency(&self, name: &ResourceName, id: Option<ResourceId>) -> Result<()> {
        let Some(id) = id else {
            return Ok(());
        };

        if let Some(package) = self.packages.iter().find(|p| p.name == name.package) {
            if let Some(package_id) = package.id {
                if package_id != id.package_id() {
                    return Err(Error::VisibilityConflict(format!(
                        "id {} does not belong to package '{}' (id 0x{:02x})",
                        id, package.name, package_id
                    )));
                }
            }
            if let Some(type_group) = package.types.get(&name.kind) {
                if let Some(type_id) = type_group.id {
                    if type_id != id.type_id() {
                        return Err(Error::VisibilityConflict(format!(
                            "id {} does not match type '{}' (id 0x{:02x})",
                            id, name.kind, type_id
                        )));
                    }
                }
                if let Some(entry) = type_group.entries.get(&name.entry) {
                    if let Some(existing) = entry.id {
                        if existing != id {
                            return Err(Error::VisibilityConflict(format!(
                                "{} is already assigned id {}, cannot rebind to {}",
                                name, existing, id
                            )));
                        }
                    }
                }
            }
        }

        // An id may only ever be bound to one name
        for package in &self.packages {
            for (kind, type_group) in &package.types {
                for (entry_name, entry) in &type_group.entries {
                    if entry.id == Some(id)
                        && !(package.name == name.package
                            && *kind == name.kind
                            && *entry_name == name.entry)
                    {
                        return Err(Error::VisibilityConflict(format!(
                            "id {} is already bound to {}",
                            id,
                            ResourceName::new(package.name.clone(), *kind, entry_name.clone())
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub(crate) fn find_or_create_entry(&mut self, name: &ResourceName) -> &mut Entry {
        let entry_name = name.entry.clone();
        self.find_or_create_type_group(&name.package.clone(), name.kind)
            .entries
            .entry(entry_name)
            .or_default()
    }

    pub(crate) fn find_or_create_type_group(
        &mut self,
        package: &str,
        kind: ResourceType,
    ) -> &mut TypeGroup {
        self.create_package(package, None)
            .types
            .entry(kind)
            .or_insert_with(|| TypeGroup::new(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::ValueKind;

    fn name(raw: &str) -> ResourceName {
        ResourceName::parse(raw).unwrap()
    }

    #[test]
    fn add_and_find() {
        let mut table = ResourceTable::new();
        table.create_package("com.app.a", Some(0x7f));
        table
            .add_string(&name("com.app.a:string/text"), ConfigDescription::default(), "hi")
            .unwrap();

        let found = table.find_resource(&name("com.app.a:string/text")).unwrap();
        assert_eq!(found.package.name, "com.app.a");
        assert_eq!(found.package.id, Some(0x7f));
        assert_eq!(found.type_group.kind, ResourceType::String);
        assert_eq!(found.entry.values.len(), 1);

        assert!(table.find_resource(&name("com.app.a:string/missing")).is_none());
        assert!(table.find_resource(&name("other:string/text")).is_none());
    }

    #[test]
    fn weak_value_is_replaceable() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:id/foo");
        let config = ConfigDescription::default();

        table.add_resource(&n, config.clone(), Value::id()).unwrap();
        assert!(table.find_resource(&n).unwrap().entry.values[&config].is_weak());

        table
            .add_resource(&n, config.clone(), Value::item(Item::Id))
            .unwrap();
        assert!(!table.find_resource(&n).unwrap().entry.values[&config].is_weak());
    }

    #[test]
    fn weak_over_weak_takes_last() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:id/foo");
        let config = ConfigDescription::default();

        let first = Value::id().with_source(Source::new("first.xml"));
        let second = Value::id().with_source(Source::new("second.xml"));
        table.add_resource(&n, config.clone(), first).unwrap();
        table.add_resource(&n, config.clone(), second).unwrap();

        let bound = &table.find_resource(&n).unwrap().entry.values[&config];
        assert_eq!(bound.source.as_ref().unwrap().path, "second.xml");
    }

    #[test]
    fn strong_duplicate_fails() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:string/text");
        let config = ConfigDescription::default();

        table.add_string(&n, config.clone(), "hi").unwrap();
        let err = table.add_string(&n, config.clone(), "bye").unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition { .. }));

        // Prior binding survives intact
        let r = match &table.find_resource(&n).unwrap().entry.values[&config].kind {
            ValueKind::Item(Item::String(r)) => *r,
            other => panic!("unexpected value {other:?}"),
        };
        assert_eq!(table.string_pool().get(r), Some("hi"));
    }

    #[test]
    fn identical_readdition_is_noop() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:string/text");
        let config = ConfigDescription::default();

        table.add_string(&n, config.clone(), "hi").unwrap();
        table.add_string(&n, config.clone(), "hi").unwrap();
        assert_eq!(table.find_resource(&n).unwrap().entry.values.len(), 1);
    }

    #[test]
    fn weak_never_displaces_strong() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:id/foo");
        let config = ConfigDescription::default();

        table.add_resource(&n, config.clone(), Value::item(Item::Id)).unwrap();
        table.add_resource(&n, config.clone(), Value::id()).unwrap();
        assert!(!table.find_resource(&n).unwrap().entry.values[&config].is_weak());
    }

    #[test]
    fn distinct_configs_do_not_conflict() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:string/text");

        table.add_string(&n, ConfigDescription::default(), "hi").unwrap();
        table
            .add_string(&n, ConfigDescription::parse("en-rUS").unwrap(), "hello")
            .unwrap();
        assert_eq!(table.find_resource(&n).unwrap().entry.values.len(), 2);
    }

    #[test]
    fn visibility_is_monotonic() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:layout/main");
        let id = ResourceId::new(0x7f02_0000);

        table.set_symbol_state(&n, Some(id), Symbol::public()).unwrap();
        // Idempotent with the same id
        table.set_symbol_state(&n, Some(id), Symbol::public()).unwrap();

        let err = table
            .set_symbol_state(&n, None, Symbol::default())
            .unwrap_err();
        assert!(matches!(err, Error::VisibilityConflict(_)));

        let found = table.find_resource(&n).unwrap();
        assert_eq!(found.entry.symbol.state, SymbolState::Public);
        assert_eq!(found.type_group.symbol.state, SymbolState::Public);
        assert_eq!(found.entry.id, Some(id));
    }

    #[test]
    fn conflicting_id_rebind_fails() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:layout/main");

        table
            .set_symbol_state(&n, Some(ResourceId::new(0x7f02_0000)), Symbol::public())
            .unwrap();
        let err = table
            .set_symbol_state(&n, Some(ResourceId::new(0x7f02_0001)), Symbol::public())
            .unwrap_err();
        assert!(matches!(err, Error::VisibilityConflict(_)));
    }

    #[test]
    fn id_collision_across_names_fails() {
        let mut table = ResourceTable::new();
        let id = ResourceId::new(0x7f02_0000);

        table
            .set_symbol_state(&name("com.app.a:layout/main"), Some(id), Symbol::public())
            .unwrap();
        let err = table
            .set_symbol_state(&name("com.app.a:layout/other"), Some(id), Symbol::public())
            .unwrap_err();
        assert!(matches!(err, Error::VisibilityConflict(_)));
    }

    #[test]
    fn id_must_match_package_id() {
        let mut table = ResourceTable::new();
        table.create_package("com.app.a", Some(0x7f));

        let err = table
            .add_resource_with_id(
                &name("com.app.a:id/foo"),
                ResourceId::new(0x0102_0000),
                ConfigDescription::default(),
                Value::id(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::VisibilityConflict(_)));
        assert!(table.find_resource(&name("com.app.a:id/foo")).is_none());
    }

    #[test]
    fn table_is_debug_printable() {
        let mut table = ResourceTable::new();
        table.create_package("com.app.a", Some(0x7f));
        table
            .add_string(&name("com.app.a:string/text"), ConfigDescription::default(), "hi")
            .unwrap();

        let rendered = format!("{table:?}");
        assert!(rendered.contains("com.app.a"));
    }

    #[test]
    fn private_to_public_upgrade() {
        let mut table = ResourceTable::new();
        let n = name("com.app.a:string/text");

        let private = Symbol {
            state: SymbolState::Private,
            source: None,
        };
        table.set_symbol_state(&n, None, private).unwrap();
        table.set_symbol_state(&n, None, Symbol::public()).unwrap();
        assert_eq!(
            table.find_resource(&n).unwrap().entry.symbol.state,
            SymbolState::Public
        );
    }
}
