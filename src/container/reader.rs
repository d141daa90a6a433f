use crate::{
    codec::deserialize_file,
    container::{padding_for, PREFIX_LEN},
    diagnostics::Diagnostics,
    model::file::ResourceFile,
    wire::io::read_le,
    Error, Result,
};

/// Zero-copy view over a complete in-memory container.
///
/// Parsing happens once in [`ContainerReader::new`]; afterwards [`data`] exposes the
/// payload as a direct slice into the original buffer with no copy or reallocation. The
/// payload's starting offset is verified to be a multiple of 4 from the buffer's start,
/// re-deriving the writer's padding from the header length alone.
///
/// [`data`]: ContainerReader::data
///
/// # Examples
///
/// ```rust
/// use restable::container::{ContainerReader, ContainerWriter};
/// use restable::model::{ConfigDescription, ResourceFile, ResourceName, Source};
/// use restable::Diagnostics;
///
/// let file = ResourceFile {
///     name: ResourceName::parse("com.app.a:layout/main")?,
///     config: ConfigDescription::parse("hdpi-v9")?,
///     source: Source::new("res/layout-hdpi-v9/main.xml"),
///     exported_symbols: Vec::new(),
/// };
/// let mut writer = ContainerWriter::new(Vec::new(), &file)?;
/// writer.write(b"1234")?;
/// let bytes = writer.finish()?;
///
/// let reader = ContainerReader::new(&bytes, &Diagnostics::new())?;
/// assert_eq!(reader.data(), b"1234");
/// assert_eq!(reader.file().name, file.name);
/// # Ok::<(), restable::Error>(())
/// ```
pub struct ContainerReader<'a> {
    file: ResourceFile,
    payload: &'a [u8],
}

impl<'a> ContainerReader<'a> {
    /// Parse the header region of `buf` and take a view of the remaining payload.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] for an empty buffer, or a malformed-input error if the
    /// length prefix is truncated, the declared header length exceeds the remaining
    /// buffer, the header message does not parse, or the derived payload offset is not
    /// 4-byte aligned.
    pub fn new(buf: &'a [u8], diag: &Diagnostics) -> Result<Self> {
        if buf.is_empty() {
            return Err(Error::Empty);
        }

        let header_len = read_le::<u32>(buf)? as usize;
        if buf.len() - PREFIX_LEN < header_len {
            return Err(malformed_error!(
                "Container declares a {} byte header but only {} bytes remain",
                header_len,
                buf.len() - PREFIX_LEN
            ));
        }

        let file = deserialize_file(&buf[PREFIX_LEN..PREFIX_LEN + header_len], diag)?;

        let payload_offset = PREFIX_LEN + header_len + padding_for(header_len);
        if payload_offset > buf.len() {
            return Err(malformed_error!("Container is truncated inside its alignment padding"));
        }
        if payload_offset % 4 != 0 {
            return Err(malformed_error!(
                "Container payload starts at unaligned offset {}",
                payload_offset
            ));
        }

        Ok(ContainerReader {
            file,
            payload: &buf[payload_offset..],
        })
    }

    /// The decoded compiled-file header.
    #[must_use]
    pub fn file(&self) -> &ResourceFile {
        &self.file
    }

    /// The raw payload as a direct view into the original buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.payload
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerWriter;
    use crate::model::{
        config::ConfigDescription, file::ExportedSymbol, name::ResourceName, source::Source,
    };

    fn sample_file() -> ResourceFile {
        ResourceFile {
            name: ResourceName::parse("com.app.a:layout/main").unwrap(),
            config: ConfigDescription::parse("hdpi-v9").unwrap(),
            source: Source::new("res/layout-hdpi-v9/main.xml"),
            exported_symbols: vec![ExportedSymbol {
                name: ResourceName::parse("@+id/unchecked").unwrap(),
                line: 23,
            }],
        }
    }

    fn container_with_payload(payload: &[u8]) -> Vec<u8> {
        let mut writer = ContainerWriter::new(Vec::new(), &sample_file()).unwrap();
        writer.write(payload).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn payload_view_is_aligned_and_exact() {
        let bytes = container_with_payload(b"1234");
        let reader = ContainerReader::new(&bytes, &Diagnostics::new()).unwrap();

        assert_eq!(reader.data(), b"1234");
        assert_eq!(reader.len(), 4);

        // The view is a slice of the original buffer, not a copy
        let offset = reader.data().as_ptr() as usize - bytes.as_ptr() as usize;
        assert_eq!(offset % 4, 0);
        assert_eq!(offset + reader.len(), bytes.len());
    }

    #[test]
    fn header_roundtrips() {
        let bytes = container_with_payload(b"xyz");
        let reader = ContainerReader::new(&bytes, &Diagnostics::new()).unwrap();

        let file = reader.file();
        assert_eq!(file.config, ConfigDescription::parse("hdpi-v9").unwrap());
        assert_eq!(file.source.path, "res/layout-hdpi-v9/main.xml");
        assert_eq!(file.exported_symbols.len(), 1);
        assert_eq!(file.exported_symbols[0].line, 23);
    }

    #[test]
    fn empty_buffer_fails() {
        assert!(matches!(
            ContainerReader::new(&[], &Diagnostics::new()),
            Err(Error::Empty)
        ));
    }

    #[test]
    fn oversized_header_length_fails() {
        let bytes = 1024u32.to_le_bytes();
        assert!(ContainerReader::new(&bytes, &Diagnostics::new()).is_err());
    }

    #[test]
    fn truncated_header_fails() {
        let bytes = container_with_payload(b"1234");
        // Cut inside the header message
        assert!(ContainerReader::new(&bytes[..8], &Diagnostics::new()).is_err());
    }
}
