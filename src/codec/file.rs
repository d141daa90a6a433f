//! Serialization of [`ResourceFile`] metadata to and from its wire message.
//!
//! The compiled-file message is the lightweight sibling of the table message: the
//! configuration and resource name the payload implements, the originating source path,
//! and the exported sub-symbols declared inside the payload. Exported symbols are an
//! ordered sequence; source-declaration order is preserved exactly on round-trip.

use crate::{
    diagnostics::{DiagnosticCategory, Diagnostics},
    model::{
        config::ConfigDescription,
        file::{ExportedSymbol, ResourceFile},
        name::ResourceName,
        source::Source,
    },
    wire::{decode_str, decode_u32, FieldReader, FieldWriter},
    Result,
};

const FILE_NAME: u16 = 1;
const FILE_CONFIG: u16 = 2;
const FILE_SOURCE_PATH: u16 = 3;
const FILE_EXPORTED_SYMBOL: u16 = 4;

const SYMBOL_NAME: u16 = 1;
const SYMBOL_LINE: u16 = 2;

/// Serialize compiled-file metadata to its wire message.
#[must_use]
pub fn serialize_file(file: &ResourceFile) -> Vec<u8> {
    let mut msg = FieldWriter::new();
    msg.str(FILE_NAME, &file.name.to_string());
    msg.str(FILE_CONFIG, &file.config.to_string());
    msg.str(FILE_SOURCE_PATH, &file.source.path);
    for symbol in &file.exported_symbols {
        let mut sym = FieldWriter::new();
        sym.str(SYMBOL_NAME, &symbol.name.to_string());
        sym.u32(SYMBOL_LINE, symbol.line);
        msg.message(FILE_EXPORTED_SYMBOL, sym);
    }
    msg.finish()
}

/// Deserialize compiled-file metadata from its wire message.
///
/// Unknown fields are skipped and reported to `diag`.
///
/// # Errors
/// Returns an error if the required resource-name field is missing, the name or
/// configuration does not parse, or a field frame is truncated.
pub fn deserialize_file(data: &[u8], diag: &Diagnostics) -> Result<ResourceFile> {
    let mut name: Option<ResourceName> = None;
    let mut config = ConfigDescription::default();
    let mut source = Source::default();
    let mut exported_symbols = Vec::new();

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            FILE_NAME => name = Some(ResourceName::parse(decode_str(payload)?)?),
            FILE_CONFIG => config = ConfigDescription::parse(decode_str(payload)?)?,
            FILE_SOURCE_PATH => source.path = decode_str(payload)?.to_owned(),
            FILE_EXPORTED_SYMBOL => exported_symbols.push(deserialize_symbol(payload, diag)?),
            _ => diag.warning(
                DiagnosticCategory::General,
                format!("unknown field {field} skipped"),
            ),
        }
    }

    let name = name
        .ok_or_else(|| malformed_error!("Compiled file message is missing its resource name"))?;

    Ok(ResourceFile {
        name,
        config,
        source,
        exported_symbols,
    })
}

fn deserialize_symbol(data: &[u8], diag: &Diagnostics) -> Result<ExportedSymbol> {
    let mut name: Option<ResourceName> = None;
    let mut line = 0u32;

    let mut reader = FieldReader::new(data);
    while let Some((field, payload)) = reader.next_field()? {
        match field {
            SYMBOL_NAME => name = Some(ResourceName::parse(decode_str(payload)?)?),
            SYMBOL_LINE => line = decode_u32(payload)?,
            _ => diag.warning(
                DiagnosticCategory::General,
                format!("unknown field {field} skipped"),
            ),
        }
    }

    let name =
        name.ok_or_else(|| malformed_error!("Exported symbol message is missing its name"))?;
    Ok(ExportedSymbol { name, line })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> ResourceFile {
        ResourceFile {
            name: ResourceName::parse("com.app.a:layout/main").unwrap(),
            config: ConfigDescription::parse("hdpi-v9").unwrap(),
            source: Source::new("res/layout-hdpi-v9/main.xml"),
            exported_symbols: vec![
                ExportedSymbol {
                    name: ResourceName::parse("@+id/unchecked").unwrap(),
                    line: 23,
                },
                ExportedSymbol {
                    name: ResourceName::parse("@+id/checked").unwrap(),
                    line: 42,
                },
            ],
        }
    }

    #[test]
    fn roundtrip_preserves_symbol_order() {
        let file = sample_file();
        let bytes = serialize_file(&file);

        let diag = Diagnostics::new();
        let decoded = deserialize_file(&bytes, &diag).unwrap();
        assert!(diag.is_empty());
        assert_eq!(decoded, file);
        assert_eq!(decoded.exported_symbols[0].line, 23);
        assert_eq!(decoded.exported_symbols[1].line, 42);
    }

    #[test]
    fn missing_name_fails() {
        let mut msg = FieldWriter::new();
        msg.str(FILE_CONFIG, "hdpi");
        let err = deserialize_file(&msg.finish(), &Diagnostics::new()).unwrap_err();
        assert!(matches!(err, crate::Error::Malformed { .. }));
    }

    #[test]
    fn bad_config_fails() {
        let mut msg = FieldWriter::new();
        msg.str(FILE_NAME, "com.app.a:layout/main");
        msg.str(FILE_CONFIG, "gibberish");
        let err = deserialize_file(&msg.finish(), &Diagnostics::new()).unwrap_err();
        assert!(matches!(err, crate::Error::Malformed { .. }));
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let file = sample_file();
        let mut bytes = serialize_file(&file);

        let mut extra = FieldWriter::new();
        extra.bytes(77, &[1, 2, 3]);
        bytes.extend_from_slice(&extra.finish());

        let diag = Diagnostics::new();
        let decoded = deserialize_file(&bytes, &diag).unwrap();
        assert_eq!(decoded, file);
        assert!(diag.has_warnings());
    }
}
