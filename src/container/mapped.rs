use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::{
    codec::deserialize_file,
    container::{padding_for, PREFIX_LEN},
    diagnostics::Diagnostics,
    model::file::ResourceFile,
    wire::io::read_le,
    Error, Result,
};

/// A container read directly from disk through a memory mapping.
///
/// Owns the mapping, so unlike [`crate::container::ContainerReader`] it has no lifetime
/// tie to a caller-held buffer; the payload view borrows from the mapping itself. The
/// alignment invariant is identical: the payload starts at a 4-byte-aligned offset from
/// the start of the file.
#[derive(Debug)]
pub struct MappedContainer {
    mmap: Mmap,
    file: ResourceFile,
    payload_offset: usize,
}

impl MappedContainer {
    /// Open and parse a container file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be opened or mapped, [`Error::Empty`] for
    /// a zero-length file, or a malformed-input error under the same conditions as
    /// [`crate::container::ContainerReader::new`].
    pub fn open(path: &Path, diag: &Diagnostics) -> Result<Self> {
        let handle = File::open(path)?;
        // Safety: the mapping is read-only and kept private to this struct
        let mmap = unsafe { Mmap::map(&handle)? };

        if mmap.is_empty() {
            return Err(Error::Empty);
        }

        let header_len = read_le::<u32>(&mmap)? as usize;
        if mmap.len() - PREFIX_LEN < header_len {
            return Err(malformed_error!(
                "Container declares a {} byte header but only {} bytes remain",
                header_len,
                mmap.len() - PREFIX_LEN
            ));
        }

        let file = deserialize_file(&mmap[PREFIX_LEN..PREFIX_LEN + header_len], diag)?;

        let payload_offset = PREFIX_LEN + header_len + padding_for(header_len);
        if payload_offset > mmap.len() {
            return Err(malformed_error!("Container is truncated inside its alignment padding"));
        }

        Ok(MappedContainer {
            mmap,
            file,
            payload_offset,
        })
    }

    /// The decoded compiled-file header.
    #[must_use]
    pub fn file(&self) -> &ResourceFile {
        &self.file
    }

    /// The raw payload as a direct view into the mapping.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.mmap[self.payload_offset..]
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len() - self.payload_offset
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerWriter;
    use crate::model::{config::ConfigDescription, name::ResourceName, source::Source};
    use std::io::Write;

    fn sample_file() -> ResourceFile {
        ResourceFile {
            name: ResourceName::parse("com.app.a:drawable/icon").unwrap(),
            config: ConfigDescription::parse("xhdpi").unwrap(),
            source: Source::new("res/drawable-xhdpi/icon.png"),
            exported_symbols: Vec::new(),
        }
    }

    #[test]
    fn open_roundtrips_payload() {
        let mut writer = ContainerWriter::new(Vec::new(), &sample_file()).unwrap();
        writer.write(b"payload-bytes").unwrap();
        let bytes = writer.finish().unwrap();

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&bytes).unwrap();
        tmp.flush().unwrap();

        let container = MappedContainer::open(tmp.path(), &Diagnostics::new()).unwrap();
        assert_eq!(container.data(), b"payload-bytes");
        assert_eq!(container.file().source.path, "res/drawable-xhdpi/icon.png");
        assert_eq!(container.payload_offset % 4, 0);
    }

    #[test]
    fn missing_file_fails() {
        let err = MappedContainer::open(Path::new("/nonexistent/container"), &Diagnostics::new())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
