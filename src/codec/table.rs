//! Serialization of [`ResourceTable`] to and from its flattened wire message.
//!
//! The wire shape mirrors the aggregate: a shared string pool section followed by the
//! package/type/entry tree, with values encoded as tagged variants. String-bearing values
//! reference the pool by index instead of duplicating text inline; on decode those indices
//! are resolved against the decoded pool and re-interned into the fresh table, so handle
//! values may be renumbered while content is preserved exactly.
//!
//! Serialization is deterministic for a fixed table: packages are flattened in table
//! order, types and entries in their sorted map order, bindings in configuration order,
//! and plural slots in category order with absent categories omitted.

use std::str::FromStr;

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    model::{
        config::ConfigDescription,
        id::ResourceId,
        name::{ResourceName, ResourceType},
        pool::StringPool,
        source::Source,
        table::{Entry, Package, ResourceTable, Symbol, SymbolState, TypeGroup},
        value::{Array, Item, Plural, PluralCategory, Value, ValueKind},
    },
    wire::{decode_str, decode_u32, FieldReader, FieldWriter},
    Result,
};

// Field ids, per message. Unknown ids are skipped on decode.
const TABLE_POOL: u16 = 1;
const TABLE_PACKAGE: u16 = 2;

const POOL_STRING: u16 = 1;

const PACKAGE_ID: u16 = 1;
const PACKAGE_NAME: u16 = 2;
const PACKAGE_TYPE: u16 = 3;

const TYPE_ID: u16 = 1;
const TYPE_NAME: u16 = 2;
const TYPE_ENTRY: u16 = 3;

const ENTRY_ID: u16 = 1;
const ENTRY_NAME: u16 = 2;
const ENTRY_SYMBOL: u16 = 3;
const ENTRY_BINDING: u16 = 4;

const SYMBOL_STATE: u16 = 1;
const SYMBOL_SOURCE_PATH: u16 = 2;
const SYMBOL_SOURCE_LINE: u16 = 3;

const BINDING_CONFIG: u16 = 1;
const BINDING_VALUE: u16 = 2;

const VALUE_TAG: u16 = 1;
const VALUE_WEAK: u16 = 2;
const VALUE_SOURCE_PATH: u16 = 3;
const VALUE_SOURCE_LINE: u16 = 4;
const VALUE_DATA_A: u16 = 5;
const VALUE_DATA_B: u16 = 6;
const VALUE_SLOT: u16 = 7;

const SLOT_CATEGORY: u16 = 1;
const SLOT_ITEM: u16 = 2;

// Variant tags for the value message.
const TAG_STRING: u32 = 1;
const TAG_FILE_REFERENCE: u32 = 2;
const TAG_REFERENCE: u32 = 3;
const TAG_ID: u32 = 4;
const TAG_PRIMITIVE: u32 = 5;
const TAG_PLURAL: u32 = 6;
const TAG_ARRAY: u32 = 7;

/// Serialize a table to its wire message.
///
/// The output is deterministic for a fixed table. Serialization is total over valid
/// tables; the only failure mode is a dangling pool handle, which indicates a broken
/// invariant in the producer rather than a user error.
///
/// # Errors
/// Returns an error if a value references a string absent from the table's pool.
pub fn serialize_table(table: &ResourceTable) -> Result<Vec<u8>> {
    let mut msg = FieldWriter::new();

    let mut pool = FieldWriter::new();
    for text in table.string_pool().iter() {
        pool.str(POOL_STRING, text);
    }
    msg.message(TABLE_POOL, pool);

    for package in table.packages() {
        msg.message(TABLE_PACKAGE, serialize_package(package, table.string_pool())?);
    }

    Ok(msg.finish())
}

fn serialize_package(package: &Package, pool: &StringPool) -> Result<FieldWriter> {
    let mut msg = FieldWriter::new();
    if let Some(id) = package.id {
        msg.u32(PACKAGE_ID, u32::from(id));
    }
    msg.str(PACKAGE_NAME, &package.name);
    for type_group in package.types.values() {
        msg.message(PACKAGE_TYPE, serialize_type(type_group, pool)?);
    }
    Ok(msg)
}

fn serialize_type(type_group: &TypeGroup, pool: &StringPool) -> Result<FieldWriter> {
    let mut msg = FieldWriter::new();
    if let Some(id) = type_group.id {
        msg.u32(TYPE_ID, u32::from(id));
    }
    msg.str(TYPE_NAME, &type_group.kind.to_string());
    for (name, entry) in &type_group.entries {
        msg.message(TYPE_ENTRY, serialize_entry(name, entry, pool)?);
    }
    Ok(msg)
}

fn serialize_entry(name: &str, entry: &Entry, pool: &StringPool) -> Result<FieldWriter> {
    let mut msg = FieldWriter::new();
    if let Some(id) = entry.id {
        msg.u32(ENTRY_ID, id.value());
    }
    msg.str(ENTRY_NAME, name);
    if entry.symbol.state != SymbolState::Undefined {
        msg.message(ENTRY_SYMBOL, serialize_symbol(&entry.symbol));
    }
    for (config, value) in &entry.values {
        let mut binding = FieldWriter::new();
        binding.str(BINDING_CONFIG, &config.to_string());
        binding.message(BINDING_VALUE, serialize_value(value, pool)?);
        msg.message(ENTRY_BINDING, binding);
    }
    Ok(msg)
}

fn serialize_symbol(symbol: &Symbol) -> FieldWriter {
    let mut msg = FieldWriter::new();
    msg.u32(SYMBOL_STATE, symbol.state as u32);
    if let Some(source) = &symbol.source {
        msg.str(SYMBOL_SOURCE_PATH, &source.path);
        if let Some(line) = source.line {
            msg.u32(SYMBOL_SOURCE_LINE, line);
        }
    }
    msg
}

fn serialize_value(value: &Value, pool: &StringPool) -> Result<FieldWriter> {
    let mut msg = FieldWriter::new();
    msg.u32(VALUE_TAG, value_tag(&value.kind));
    if value.weak {
        msg.u32(VALUE_WEAK, 1);
    }
    if let Some(source) = &value.source {
        msg.str(VALUE_SOURCE_PATH, &source.path);
        if let Some(line) = source.line {
            msg.u32(VALUE_SOURCE_LINE, line);
        }
    }

    match &value.kind {
        ValueKind::Item(item) => serialize_item_payload(item, &mut msg, pool)?,
        ValueKind::Plural(plural) => {
            for (category, item) in plural.iter() {
                let mut slot = FieldWriter::new();
                slot.u32(SLOT_CATEGORY, category as u32);
                slot.message(SLOT_ITEM, serialize_item(item, pool)?);
                msg.message(VALUE_SLOT, slot);
            }
        }
        ValueKind::Array(array) => {
            for item in &array.items {
                let mut slot = FieldWriter::new();
                slot.message(SLOT_ITEM, serialize_item(item, pool)?);
                msg.message(VALUE_SLOT, slot);
            }
        }
    }

    Ok(msg)
}

fn serialize_item(item: &Item, pool: &StringPool) -> Result<FieldWriter> {
    let mut msg = FieldWriter::new();
    msg.u32(VALUE_TAG, item_tag(item));
    serialize_item_payload(item, &mut msg, pool)?;
    Ok(msg)
}

fn serialize_item_payload(item: &Item, msg: &mut FieldWriter, pool: &StringPool) -> Result<()> {
    match item {
        Item::String(r) | Item::FileReference(r) => {
            if pool.get(*r).is_none() {
                return Err(malformed_error!(
                    "Value references string {} absent from the owning pool",
                    r.index()
                ));
            }
            msg.u32(VALUE_DATA_A, r.index());
        }
        Item::Reference { name, id } => {
            msg.str(VALUE_DATA_A, &name.to_string());
            if let Some(id) = id {
                msg.u32(VALUE_DATA_B, id.value());
            }
        }
        Item::Id => {}
        Item::Primitive { data_type, data } => {
            msg.u32(VALUE_DATA_A, u32::from(*data_type));
            msg.u32(VALUE_DATA_B, *data);
        }
    }
    Ok(())
}

fn value_tag(kind: &ValueKind) -> u32 {
    match kind {
        ValueKind::Item(item) => item_tag(item),
        ValueKind::Plural(_) => TAG_PLURAL,
        ValueKind::Array(_) => TAG_ARRAY,
    }
}

fn item_tag(item: &Item) -> u32 {
    match item {
        Item::String(_) => TAG_STRING,
        Item::FileReference(_) => TAG_FILE_REFERENCE,
        Item::Reference { .. } => TAG_REFERENCE,
        Item::Id => TAG_ID,
        Item::Primitive { .. } => TAG_PRIMITIVE,
    }
}

/// Deserialize a table from its wire message.
///
/// Produces a fresh, independently owned table; string content is re-interned into the
/// new table's pool, so handle values need not match the producer's. Unknown fields are
/// skipped and reported to `diag`; structural damage aborts the decode with no partial
/// table.
///
/// # Errors
/// Returns an error if a string index is out of range, a configuration or resource name
/// does not parse, a value or plural-category tag is unrecognized, or any field frame is
/// truncated.
pub fn deserialize_table(data: &[u8], diag: &Diagnostics) -> Result<ResourceTable> {
    let mut table = ResourceTable::new();
    let mut pool_strings: Vec<String> = Vec::new();

    let mut reader = FieldReader::new(data);
    while let Some((id, payload)) = reader.next_field()? {
        match id {
            TABLE_POOL => {
                let mut pool_reader = FieldReader::new(payload);
                while let Some((id, payload)) = pool_reader.next_field()? {
                    if id == POOL_STRING {
                        pool_strings.push(decode_str(payload)?.to_owned());
                    } else {
                        skip_unknown(diag, DiagnosticCategory::Pool, id);
                    }
                }
            }
            TABLE_PACKAGE => deserialize_package(payload, &pool_strings, &mut table, diag)?,
            _ => skip_unknown(diag, DiagnosticCategory::Table, id),
        }
    }

    Ok(table)
}

fn deserialize_package(
    data: &[u8],
    pool_strings: &[String],
    table: &mut ResourceTable,
    diag: &Diagnostics,
) -> Result<()> {
    let mut id: Option<u8> = None;
    let mut name: Option<String> = None;
    let mut types: Vec<&[u8]> = Vec::new();

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            PACKAGE_ID => id = Some(decode_id_byte(payload)?),
            PACKAGE_NAME => name = Some(decode_str(payload)?.to_owned()),
            PACKAGE_TYPE => types.push(payload),
            _ => skip_unknown(diag, DiagnosticCategory::Table, field),
        }
    }

    let name = name.ok_or_else(|| malformed_error!("Package message is missing its name"))?;
    table.create_package(&name, id);

    for type_payload in types {
        deserialize_type(type_payload, pool_strings, &name, table, diag)?;
    }
    Ok(())
}

fn deserialize_type(
    data: &[u8],
    pool_strings: &[String],
    package: &str,
    table: &mut ResourceTable,
    diag: &Diagnostics,
) -> Result<()> {
    let mut id: Option<u8> = None;
    let mut kind: Option<ResourceType> = None;
    let mut entries: Vec<&[u8]> = Vec::new();

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            TYPE_ID => id = Some(decode_id_byte(payload)?),
            TYPE_NAME => {
                let raw = decode_str(payload)?;
                kind = Some(
                    ResourceType::from_str(raw)
                        .map_err(|_| malformed_error!("Unknown resource type '{}'", raw))?,
                );
            }
            TYPE_ENTRY => entries.push(payload),
            _ => skip_unknown(diag, DiagnosticCategory::Table, field),
        }
    }

    let kind = kind.ok_or_else(|| malformed_error!("Type message is missing its name"))?;

    for entry_payload in entries {
        deserialize_entry(entry_payload, pool_strings, package, kind, table, diag)?;
    }

    if let Some(id) = id {
        table.find_or_create_type_group(package, kind).id = Some(id);
    }
    Ok(())
}

fn deserialize_entry(
    data: &[u8],
    pool_strings: &[String],
    package: &str,
    kind: ResourceType,
    table: &mut ResourceTable,
    diag: &Diagnostics,
) -> Result<()> {
    let mut id: Option<ResourceId> = None;
    let mut name: Option<String> = None;
    let mut symbol = Symbol::default();
    let mut values: Vec<(ConfigDescription, Value)> = Vec::new();

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            ENTRY_ID => id = Some(ResourceId::new(decode_u32(payload)?)),
            ENTRY_NAME => name = Some(decode_str(payload)?.to_owned()),
            ENTRY_SYMBOL => symbol = deserialize_symbol(payload, diag)?,
            ENTRY_BINDING => values.push(deserialize_binding(payload, pool_strings, table, diag)?),
            _ => skip_unknown(diag, DiagnosticCategory::Table, field),
        }
    }

    let name = name.ok_or_else(|| malformed_error!("Entry message is missing its name"))?;
    let resource = ResourceName::new(package, kind, name);

    let is_public = symbol.state == SymbolState::Public;
    let entry = table.find_or_create_entry(&resource);
    entry.id = id;
    entry.symbol = symbol;
    for (config, value) in values {
        entry.values.insert(config, value);
    }

    // Entry-level visibility raises the owning type group, same as the mutation path
    if is_public {
        let type_group = table.find_or_create_type_group(package, kind);
        if type_group.symbol.state < SymbolState::Public {
            type_group.symbol = Symbol::public();
        }
    }
    Ok(())
}

fn deserialize_symbol(data: &[u8], diag: &Diagnostics) -> Result<Symbol> {
    let mut state = SymbolState::Undefined;
    let mut path: Option<String> = None;
    let mut line: Option<u32> = None;

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            SYMBOL_STATE => {
                let raw = decode_u32(payload)?;
                state = SymbolState::from_repr(raw)
                    .ok_or_else(|| malformed_error!("Unknown symbol state {}", raw))?;
            }
            SYMBOL_SOURCE_PATH => path = Some(decode_str(payload)?.to_owned()),
            SYMBOL_SOURCE_LINE => line = Some(decode_u32(payload)?),
            _ => skip_unknown(diag, DiagnosticCategory::Table, field),
        }
    }

    Ok(Symbol {
        state,
        source: path.map(|path| Source { path, line }),
    })
}

fn deserialize_binding(
    data: &[u8],
    pool_strings: &[String],
    table: &mut ResourceTable,
    diag: &Diagnostics,
) -> Result<(ConfigDescription, Value)> {
    let mut config: Option<ConfigDescription> = None;
    let mut value: Option<Value> = None;

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            BINDING_CONFIG => config = Some(ConfigDescription::parse(decode_str(payload)?)?),
            BINDING_VALUE => value = Some(deserialize_value(payload, pool_strings, table, diag)?),
            _ => skip_unknown(diag, DiagnosticCategory::Table, field),
        }
    }

    match (config, value) {
        (Some(config), Some(value)) => Ok((config, value)),
        _ => Err(malformed_error!("Binding message is missing its config or value")),
    }
}

struct RawValue<'a> {
    tag: Option<u32>,
    weak: bool,
    source_path: Option<String>,
    source_line: Option<u32>,
    data_a: Option<&'a [u8]>,
    data_b: Option<&'a [u8]>,
    slots: Vec<&'a [u8]>,
}

fn read_raw_value<'a>(data: &'a [u8], diag: &Diagnostics) -> Result<RawValue<'a>> {
    let mut raw = RawValue {
        tag: None,
        weak: false,
        source_path: None,
        source_line: None,
        data_a: None,
        data_b: None,
        slots: Vec::new(),
    };

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            VALUE_TAG => raw.tag = Some(decode_u32(payload)?),
            VALUE_WEAK => raw.weak = decode_u32(payload)? != 0,
            VALUE_SOURCE_PATH => raw.source_path = Some(decode_str(payload)?.to_owned()),
            VALUE_SOURCE_LINE => raw.source_line = Some(decode_u32(payload)?),
            VALUE_DATA_A => raw.data_a = Some(payload),
            VALUE_DATA_B => raw.data_b = Some(payload),
            VALUE_SLOT => raw.slots.push(payload),
            _ => skip_unknown(diag, DiagnosticCategory::Value, field),
        }
    }
    Ok(raw)
}

fn deserialize_value(
    data: &[u8],
    pool_strings: &[String],
    table: &mut ResourceTable,
    diag: &Diagnostics,
) -> Result<Value> {
    let raw = read_raw_value(data, diag)?;
    let tag = raw
        .tag
        .ok_or_else(|| malformed_error!("Value message carries no variant tag"))?;

    let kind = match tag {
        TAG_PLURAL => {
            let mut plural = Plural::new();
            for slot in &raw.slots {
                let (category, item) = deserialize_slot(slot, pool_strings, table, diag)?;
                let category = category
                    .ok_or_else(|| malformed_error!("Plural slot carries no category tag"))?;
                plural.set(category, item);
            }
            ValueKind::Plural(plural)
        }
        TAG_ARRAY => {
            let mut array = Array::default();
            for slot in &raw.slots {
                let (_, item) = deserialize_slot(slot, pool_strings, table, diag)?;
                array.items.push(item);
            }
            ValueKind::Array(array)
        }
        _ => ValueKind::Item(deserialize_item_payload(
            tag,
            raw.data_a,
            raw.data_b,
            pool_strings,
            table,
        )?),
    };

    Ok(Value {
        kind,
        weak: raw.weak,
        source: raw.source_path.map(|path| Source {
            path,
            line: raw.source_line,
        }),
    })
}

fn deserialize_slot(
    data: &[u8],
    pool_strings: &[String],
    table: &mut ResourceTable,
    diag: &Diagnostics,
) -> Result<(Option<PluralCategory>, Item)> {
    let mut category: Option<PluralCategory> = None;
    let mut item: Option<Item> = None;

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            SLOT_CATEGORY => {
                let raw = decode_u32(payload)?;
                category = Some(
                    PluralCategory::from_repr(raw)
                        .ok_or_else(|| malformed_error!("Unknown plural category tag {}", raw))?,
                );
            }
            SLOT_ITEM => {
                let raw = read_raw_value(payload, diag)?;
                let tag = raw
                    .tag
                    .ok_or_else(|| malformed_error!("Slot item carries no variant tag"))?;
                item = Some(deserialize_item_payload(
                    tag,
                    raw.data_a,
                    raw.data_b,
                    pool_strings,
                    table,
                )?);
            }
            _ => skip_unknown(diag, DiagnosticCategory::Value, field),
        }
    }

    let item = item.ok_or_else(|| malformed_error!("Slot message carries no item"))?;
    Ok((category, item))
}

fn deserialize_item_payload(
    tag: u32,
    data_a: Option<&[u8]>,
    data_b: Option<&[u8]>,
    pool_strings: &[String],
    table: &mut ResourceTable,
) -> Result<Item> {
    match tag {
        TAG_STRING | TAG_FILE_REFERENCE => {
            let index = decode_u32(
                data_a.ok_or_else(|| malformed_error!("String value carries no pool index"))?,
            )?;
            let text = pool_strings.get(index as usize).ok_or_else(|| {
                malformed_error!(
                    "String index {} is out of range for a pool of {} entries",
                    index,
                    pool_strings.len()
                )
            })?;
            let r = table.string_pool_mut().make_ref(text);
            if tag == TAG_STRING {
                Ok(Item::String(r))
            } else {
                Ok(Item::FileReference(r))
            }
        }
        TAG_REFERENCE => {
            let name = decode_str(
                data_a.ok_or_else(|| malformed_error!("Reference value carries no target"))?,
            )?;
            let id = data_b.map(decode_u32).transpose()?.map(ResourceId::new);
            Ok(Item::Reference {
                name: ResourceName::parse(name)?,
                id,
            })
        }
        TAG_ID => Ok(Item::Id),
        TAG_PRIMITIVE => {
            let data_type = decode_u32(
                data_a.ok_or_else(|| malformed_error!("Primitive value carries no type byte"))?,
            )?;
            let data = decode_u32(
                data_b.ok_or_else(|| malformed_error!("Primitive value carries no payload"))?,
            )?;
            if data_type > u32::from(u8::MAX) {
                return Err(malformed_error!("Primitive type byte {} out of range", data_type));
            }
            // Range checked above
            #[allow(clippy::cast_possible_truncation)]
            Ok(Item::Primitive {
                data_type: data_type as u8,
                data,
            })
        }
        _ => Err(malformed_error!("Unrecognized value variant tag {}", tag)),
    }
}

fn decode_id_byte(payload: &[u8]) -> Result<u8> {
    let raw = decode_u32(payload)?;
    if raw > u32::from(u8::MAX) {
        return Err(malformed_error!("Id byte {} out of range", raw));
    }
    // Range checked above
    #[allow(clippy::cast_possible_truncation)]
    Ok(raw as u8)
}

fn skip_unknown(diag: &Diagnostics, category: DiagnosticCategory, field: u16) {
    diag.warning(category, format!("unknown field {field} skipped"));
}
