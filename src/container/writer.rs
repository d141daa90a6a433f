use std::io::Write;

use crate::{
    codec::serialize_file,
    container::{padding_for, PREFIX_LEN},
    model::file::ResourceFile,
    Error, Result,
};

/// Streams a container to a caller-supplied sink: header up front, payload as written.
///
/// The header region (length prefix, serialized header, alignment padding) is emitted by
/// the constructor; after that the caller streams payload bytes with [`write`] and commits
/// with [`finish`]. All writes are fatal on first error; once `finish` has returned `Ok`
/// the container is complete and no further failure can occur.
///
/// [`write`]: ContainerWriter::write
/// [`finish`]: ContainerWriter::finish
///
/// # Examples
///
/// ```rust
/// use restable::container::ContainerWriter;
/// use restable::model::{ConfigDescription, ResourceFile, ResourceName, Source};
///
/// let file = ResourceFile {
///     name: ResourceName::parse("com.app.a:layout/main")?,
///     config: ConfigDescription::parse("hdpi-v9")?,
///     source: Source::new("res/layout-hdpi-v9/main.xml"),
///     exported_symbols: Vec::new(),
/// };
///
/// let mut writer = ContainerWriter::new(Vec::new(), &file)?;
/// writer.write(b"1234")?;
/// let bytes = writer.finish()?;
/// assert!(bytes.ends_with(b"1234"));
/// # Ok::<(), restable::Error>(())
/// ```
pub struct ContainerWriter<W: Write> {
    sink: W,
    wrote_payload: bool,
}

impl<W: Write> ContainerWriter<W> {
    /// Serialize `file` and emit the complete header region into `sink`.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the sink rejects the header bytes.
    pub fn new(mut sink: W, file: &ResourceFile) -> Result<Self> {
        let header = serialize_file(file);

        // Header length always fits the prefix: it is bounded by in-memory message size
        #[allow(clippy::cast_possible_truncation)]
        sink.write_all(&(header.len() as u32).to_le_bytes())?;
        sink.write_all(&header)?;

        let padding = [0u8; 4];
        sink.write_all(&padding[..padding_for(header.len())])?;
        debug_assert_eq!((PREFIX_LEN + header.len() + padding_for(header.len())) % 4, 0);

        Ok(ContainerWriter {
            sink,
            wrote_payload: false,
        })
    }

    /// Append payload bytes.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the sink rejects the bytes; the container is then
    /// unusable and must be discarded.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.sink.write_all(data)?;
        self.wrote_payload = true;
        Ok(())
    }

    /// Commit the container and hand the sink back.
    ///
    /// This is the single commit point: a container whose `finish` returned `Ok` is
    /// complete on the sink.
    ///
    /// # Errors
    /// Returns [`Error::MissingPayload`] if no payload was ever written, or
    /// [`Error::Io`] if the final flush fails.
    pub fn finish(mut self) -> Result<W> {
        if !self.wrote_payload {
            return Err(Error::MissingPayload);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}
