//! End-to-end round-trip tests for the table codec and the container format.
//!
//! These tests build tables the way a resource compiler would - mixed value kinds,
//! pre-assigned ids, public symbols, weak placeholders - push them through the full
//! serialize/deserialize cycle, and verify the decoded table is behaviorally equal to the
//! original. Container tests cover the alignment guarantee across header sizes.

use restable::prelude::*;
use std::io::Write as _;

/// A single-package table exercising every value kind and symbol feature at once.
fn build_app_table() -> Result<ResourceTable> {
    let mut table = ResourceTable::new();
    table.create_package("com.app.a", Some(0x7f));

    let layout_main = ResourceName::parse("com.app.a:layout/main")?;
    table.add_file_reference(
        &layout_main,
        ConfigDescription::default(),
        "res/layout/main.xml",
    )?;
    table.set_symbol_state(
        &layout_main,
        Some(ResourceId::new(0x7f02_0000)),
        Symbol::public(),
    )?;

    let layout_other = ResourceName::parse("com.app.a:layout/other")?;
    table.add_reference(
        &layout_other,
        ConfigDescription::default(),
        layout_main.clone(),
    )?;

    let string_text = ResourceName::parse("com.app.a:string/text")?;
    table.add_string(&string_text, ConfigDescription::default(), "hi")?;

    let id_foo = ResourceName::parse("com.app.a:id/foo")?;
    table.add_resource(&id_foo, ConfigDescription::default(), Value::id())?;

    let plurals_hey = ResourceName::parse("com.app.a:plurals/hey")?;
    let one = table.string_pool_mut().make_ref("one");
    let mut plural = Plural::new();
    plural.set(PluralCategory::One, Item::String(one));
    table.add_resource(
        &plurals_hey,
        ConfigDescription::default(),
        Value::new(ValueKind::Plural(plural)),
    )?;

    let array_nums = ResourceName::parse("com.app.a:array/nums")?;
    table.add_resource(
        &array_nums,
        ConfigDescription::default(),
        Value::new(ValueKind::Array(Array {
            items: vec![
                Item::Primitive {
                    data_type: 0x10,
                    data: 1,
                },
                Item::Primitive {
                    data_type: 0x10,
                    data: 2,
                },
            ],
        })),
    )?;

    Ok(table)
}

fn roundtrip(table: &ResourceTable) -> Result<(ResourceTable, Diagnostics)> {
    let bytes = codec::serialize_table(table)?;
    let diag = Diagnostics::new();
    let decoded = codec::deserialize_table(&bytes, &diag)?;
    Ok((decoded, diag))
}

#[test]
fn table_roundtrip_preserves_everything() -> Result<()> {
    let table = build_app_table()?;
    let (decoded, diag) = roundtrip(&table)?;
    assert!(diag.is_empty(), "clean input should decode silently");

    let package = &decoded.packages()[0];
    assert_eq!(package.name, "com.app.a");
    assert_eq!(package.id, Some(0x7f));

    // layout/main: file reference, public, id intact
    let main = decoded
        .find_resource(&ResourceName::parse("com.app.a:layout/main")?)
        .expect("layout/main survives");
    assert_eq!(main.entry.id, Some(ResourceId::new(0x7f02_0000)));
    assert_eq!(main.entry.symbol.state, SymbolState::Public);
    assert_eq!(main.type_group.symbol.state, SymbolState::Public);
    let value = &main.entry.values[&ConfigDescription::default()];
    match &value.kind {
        ValueKind::Item(Item::FileReference(r)) => {
            assert_eq!(decoded.string_pool().get(*r), Some("res/layout/main.xml"));
        }
        other => panic!("expected file reference, got {other:?}"),
    }

    // layout/other: by-name reference
    let other = decoded
        .find_resource(&ResourceName::parse("com.app.a:layout/other")?)
        .expect("layout/other survives");
    match &other.entry.values[&ConfigDescription::default()].kind {
        ValueKind::Item(Item::Reference { name, id }) => {
            assert_eq!(name.entry, "main");
            assert_eq!(*id, None);
        }
        k => panic!("expected reference, got {k:?}"),
    }

    // string/text: interned through the decoded pool
    let text = decoded
        .find_resource(&ResourceName::parse("com.app.a:string/text")?)
        .expect("string/text survives");
    match &text.entry.values[&ConfigDescription::default()].kind {
        ValueKind::Item(Item::String(r)) => {
            assert_eq!(decoded.string_pool().get(*r), Some("hi"));
        }
        k => panic!("expected string, got {k:?}"),
    }

    // id/foo: weakness survives the wire
    let foo = decoded
        .find_resource(&ResourceName::parse("com.app.a:id/foo")?)
        .expect("id/foo survives");
    assert!(foo.entry.values[&ConfigDescription::default()].is_weak());

    // plurals/hey: exactly the one populated slot
    let hey = decoded
        .find_resource(&ResourceName::parse("com.app.a:plurals/hey")?)
        .expect("plurals/hey survives");
    match &hey.entry.values[&ConfigDescription::default()].kind {
        ValueKind::Plural(plural) => {
            let slots: Vec<_> = plural.iter().collect();
            assert_eq!(slots.len(), 1);
            match slots[0] {
                (PluralCategory::One, Item::String(r)) => {
                    assert_eq!(decoded.string_pool().get(*r), Some("one"));
                }
                s => panic!("expected one slot, got {s:?}"),
            }
        }
        k => panic!("expected plural, got {k:?}"),
    }

    // array/nums: order and contents
    let nums = decoded
        .find_resource(&ResourceName::parse("com.app.a:array/nums")?)
        .expect("array/nums survives");
    match &nums.entry.values[&ConfigDescription::default()].kind {
        ValueKind::Array(array) => assert_eq!(array.items.len(), 2),
        k => panic!("expected array, got {k:?}"),
    }

    Ok(())
}

#[test]
fn serialization_is_deterministic() -> Result<()> {
    let table = build_app_table()?;
    let first = codec::serialize_table(&table)?;
    let second = codec::serialize_table(&table)?;
    assert_eq!(first, second);

    // A decode/re-encode cycle is also byte-stable
    let (decoded, _) = roundtrip(&table)?;
    let third = codec::serialize_table(&decoded)?;
    let fourth = codec::serialize_table(&decoded)?;
    assert_eq!(third, fourth);
    Ok(())
}

#[test]
fn configured_values_roundtrip_per_config() -> Result<()> {
    let mut table = ResourceTable::new();
    table.create_package("com.app.a", Some(0x7f));

    let name = ResourceName::parse("com.app.a:string/title")?;
    for (config, text) in [
        ("hdpi", "high"),
        ("hdpi-v9", "high, nine"),
        ("en-rGB-xhdpi", "colour"),
        ("land-sw600dp", "wide"),
    ] {
        table.add_string(&name, ConfigDescription::parse(config)?, text)?;
    }
    table.add_string(&name, ConfigDescription::default(), "plain")?;

    let (decoded, diag) = roundtrip(&table)?;
    assert!(diag.is_empty());

    let found = decoded.find_resource(&name).expect("entry survives");
    assert_eq!(found.entry.values.len(), 5);
    for (config, text) in [
        ("hdpi", "high"),
        ("hdpi-v9", "high, nine"),
        ("en-rGB-xhdpi", "colour"),
        ("land-sw600dp", "wide"),
    ] {
        let value = &found.entry.values[&ConfigDescription::parse(config)?];
        match &value.kind {
            ValueKind::Item(Item::String(r)) => {
                assert_eq!(decoded.string_pool().get(*r), Some(text), "config {config}");
            }
            k => panic!("expected string for {config}, got {k:?}"),
        }
    }
    Ok(())
}

#[test]
fn decoded_table_accepts_further_mutation() -> Result<()> {
    let table = build_app_table()?;
    let (mut decoded, _) = roundtrip(&table)?;

    // The decoded table is a first-class table, not a frozen view
    let name = ResourceName::parse("com.app.a:string/extra")?;
    decoded.add_string(&name, ConfigDescription::default(), "added after decode")?;
    assert!(decoded.find_resource(&name).is_some());

    // And the duplicate rules still hold
    let existing = ResourceName::parse("com.app.a:string/text")?;
    let err = decoded
        .add_string(&existing, ConfigDescription::default(), "different")
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateDefinition { .. }));
    Ok(())
}

fn sample_compiled_file(source_path: &str) -> Result<ResourceFile> {
    Ok(ResourceFile {
        name: ResourceName::parse("com.app.a:layout/main")?,
        config: ConfigDescription::parse("hdpi-v9")?,
        source: Source::new(source_path),
        exported_symbols: vec![ExportedSymbol {
            name: ResourceName::parse("@+id/unchecked")?,
            line: 23,
        }],
    })
}

#[test]
fn container_roundtrip() -> Result<()> {
    let file = sample_compiled_file("res/layout-hdpi-v9/main.xml")?;
    let mut writer = ContainerWriter::new(Vec::new(), &file)?;
    writer.write(b"1234")?;
    let bytes = writer.finish()?;

    let diag = Diagnostics::new();
    let reader = ContainerReader::new(&bytes, &diag)?;
    assert!(diag.is_empty());

    assert_eq!(reader.data(), b"1234");
    let decoded = reader.file();
    assert_eq!(decoded.name, file.name);
    assert_eq!(decoded.config, ConfigDescription::parse("hdpi-v9")?);
    assert_eq!(decoded.source.path, "res/layout-hdpi-v9/main.xml");
    assert_eq!(decoded.exported_symbols.len(), 1);
    assert_eq!(decoded.exported_symbols[0].name.entry, "unchecked");
    assert_eq!(decoded.exported_symbols[0].line, 23);
    Ok(())
}

#[test]
fn container_payload_is_aligned_for_any_header_length() -> Result<()> {
    // Growing the source path sweeps the header length through every residue mod 4
    for extra in 0..8usize {
        let path = format!("res/layout/{}.xml", "x".repeat(extra + 1));
        let file = sample_compiled_file(&path)?;

        let mut writer = ContainerWriter::new(Vec::new(), &file)?;
        writer.write(b"\x01\x02\x03\x04\x05")?;
        let bytes = writer.finish()?;

        let reader = ContainerReader::new(&bytes, &Diagnostics::new())?;
        let offset = reader.data().as_ptr() as usize - bytes.as_ptr() as usize;
        assert_eq!(offset % 4, 0, "payload misaligned for path {path}");
        assert_eq!(reader.data(), b"\x01\x02\x03\x04\x05");
    }
    Ok(())
}

#[test]
fn mapped_container_matches_in_memory_reader() -> Result<()> {
    let file = sample_compiled_file("res/layout-hdpi-v9/main.xml")?;
    let mut writer = ContainerWriter::new(Vec::new(), &file)?;
    writer.write(b"1234")?;
    let bytes = writer.finish()?;

    let mut tmp = tempfile::NamedTempFile::new()?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;

    let mapped = MappedContainer::open(tmp.path(), &Diagnostics::new())?;
    let reader = ContainerReader::new(&bytes, &Diagnostics::new())?;

    assert_eq!(mapped.data(), reader.data());
    assert_eq!(mapped.file(), reader.file());
    Ok(())
}

#[test]
fn damaged_table_bytes_never_yield_a_table() -> Result<()> {
    let bytes = codec::serialize_table(&build_app_table()?)?;

    // Truncation at every prefix length either fails or decodes cleanly; it must not panic
    for cut in 0..bytes.len() {
        let diag = Diagnostics::new();
        let _ = codec::deserialize_table(&bytes[..cut], &diag);
    }
    Ok(())
}
