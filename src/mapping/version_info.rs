use std::io::{Read, Write};

use crate::errors::{CopyError, Result};

/// Size of a serialized [`VersionHeader`] in bytes.
pub const HEADER_LEN: usize = 16;

/// Leading bytes of every persisted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionHeader {
    pub signature: [u8; 8],
    pub version_written: u32,
    /// Oldest reader version able to read what follows
    pub version_readable_min: u32,
}

impl VersionHeader {
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.signature)?;
        w.write_all(&self.version_written.to_le_bytes())?;
        w.write_all(&self.version_readable_min.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut signature = [0u8; 8];
        r.read_exact(&mut signature)?;
        let mut word = [0u8; 4];
        r.read_exact(&mut word)?;
        let version_written = u32::from_le_bytes(word);
        r.read_exact(&mut word)?;
        let version_readable_min = u32::from_le_bytes(word);
        Ok(Self { signature, version_written, version_readable_min })
    }

    pub fn signature_str(&self) -> String {
        String::from_utf8_lossy(&self.signature).into_owned()
    }
}

/// What a component writes into headers and which headers it accepts.
///
/// - `current`: version written by this build
/// - `readable_min`: oldest reader able to read what this build writes
/// - `read_back_to`: oldest written version this build can still read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub signature: [u8; 8],
    pub current: u32,
    pub readable_min: u32,
    pub read_back_to: u32,
    /// Human readable loader name, used in logs and errors
    pub loader_name: &'static str,
}

impl VersionInfo {
    pub const fn new(signature: &[u8; 8], current: u32, readable_min: u32, read_back_to: u32, loader_name: &'static str) -> Self {
        Self { signature: *signature, current, readable_min, read_back_to, loader_name }
    }

    pub fn header(&self) -> VersionHeader {
        VersionHeader {
            signature: self.signature,
            version_written: self.current,
            version_readable_min: self.readable_min,
        }
    }

    /// Accept `header` only if the signature matches exactly and the written
    /// version lies within `[read_back_to, current]`.
    pub fn check(&self, header: &VersionHeader) -> Result<()> {
        if header.signature != self.signature {
            return Err(CopyError::VersionIncompatible {
                found: format!("signature '{}'", header.signature_str()),
                expected: format!("signature '{}' ({})", self.signature_str(), self.loader_name),
            });
        }
        if header.version_written < self.read_back_to {
            return Err(CopyError::VersionIncompatible {
                found: format!("version {:#010x} (too old)", header.version_written),
                expected: format!("at least {:#010x}", self.read_back_to),
            });
        }
        if header.version_written > self.current {
            return Err(CopyError::VersionIncompatible {
                found: format!("version {:#010x} (too new)", header.version_written),
                expected: format!("at most {:#010x}", self.current),
            });
        }
        if header.version_readable_min > self.current {
            return Err(CopyError::VersionIncompatible {
                found: format!("readable by {:#010x} and later", header.version_readable_min),
                expected: format!("reader version {:#010x}", self.current),
            });
        }
        Ok(())
    }

    pub fn signature_str(&self) -> String {
        String::from_utf8_lossy(&self.signature).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    const INFO: VersionInfo = VersionInfo::new(b"TESTSIGN", 0x0001_0003, 0x0001_0002, 0x0001_0001, "TestLoader");

    fn header(written: u32, readable: u32) -> VersionHeader {
        VersionHeader { signature: *b"TESTSIGN", version_written: written, version_readable_min: readable }
    }

    #[test]
    fn header_layout_is_sixteen_le_bytes() {
        let mut buf = Vec::new();
        INFO.header().write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);
        assert_eq!(&buf[..8], b"TESTSIGN");
        assert_eq!(&buf[8..12], &0x0001_0003u32.to_le_bytes());
        assert_eq!(&buf[12..16], &0x0001_0002u32.to_le_bytes());

        let back = VersionHeader::read_from(&mut buf.as_slice()).unwrap();
        assert_eq!(back, INFO.header());
    }

    #[test]
    fn accepts_versions_within_range() {
        assert!(INFO.check(&header(0x0001_0001, 0x0001_0001)).is_ok());
        assert!(INFO.check(&header(0x0001_0003, 0x0001_0002)).is_ok());
    }

    #[test]
    fn rejects_versions_outside_range() {
        let too_old = INFO.check(&header(0x0001_0000, 0x0001_0000)).unwrap_err();
        assert_eq!(too_old.kind(), ErrorKind::VersionIncompatible);

        let too_new = INFO.check(&header(0x0001_0004, 0x0001_0001)).unwrap_err();
        assert_eq!(too_new.kind(), ErrorKind::VersionIncompatible);

        let needs_newer_reader = INFO.check(&header(0x0001_0002, 0x0001_0004)).unwrap_err();
        assert_eq!(needs_newer_reader.kind(), ErrorKind::VersionIncompatible);
    }

    #[test]
    fn rejects_foreign_signature() {
        let mut h = header(0x0001_0002, 0x0001_0001);
        h.signature = *b"OTHERSIG";
        let err = INFO.check(&h).unwrap_err();
        assert!(err.to_string().contains("OTHERSIG"));
    }

    #[test]
    fn truncated_header_is_io_error() {
        let err = VersionHeader::read_from(&mut &b"TESTSIGN\x01\x00"[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
