use std::io::{Read, Write};

use crate::{
    errors::{CopyError, Result},
    mapping::{ColumnMapping, VersionHeader, VersionInfo, HEADER_LEN},
};

/// Binary form of an ordered mapping list.
///
/// ```text
/// header  signature[8] | version_written: u32 | version_readable_min: u32
/// count   i32
/// entry   output: string | source: string      (count times)
/// string  len: i32 (> 0) | utf-8 bytes
/// ```
///
/// All integers are little-endian. A stream that ends early is an `Io` error,
/// a stream with bad content is a `Format` error.
#[derive(Debug, Clone, Copy)]
pub struct MappingCodec {
    version: VersionInfo,
}

impl MappingCodec {
    pub fn new(version: VersionInfo) -> Self {
        Self { version }
    }

    pub fn encode(&self, mappings: &[ColumnMapping]) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::encoded_len_hint(mappings));
        self.write_mappings(&mut buf, mappings)?;
        Ok(buf)
    }

    /// Decode a complete blob. Bytes left after the declared entries are rejected.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<ColumnMapping>> {
        let mut rest = bytes;
        let mappings = self.read_mappings(&mut rest)?;
        if !rest.is_empty() {
            return Err(CopyError::format(format!(
                "{} trailing bytes after {} mappings", rest.len(), mappings.len()
            )));
        }
        Ok(mappings)
    }

    pub fn write_mappings<W: Write>(&self, w: &mut W, mappings: &[ColumnMapping]) -> Result<()> {
        // validate everything first so a bad list never produces a partial stream
        let count = i32::try_from(mappings.len())
            .map_err(|_| CopyError::format(format!("too many mappings: {}", mappings.len())))?;
        for m in mappings {
            Self::check_name(&m.output, "output")?;
            Self::check_name(&m.source, "source")?;
        }

        self.version.header().write_to(w)?;
        w.write_all(&count.to_le_bytes())?;
        for m in mappings {
            write_string(w, &m.output)?;
            write_string(w, &m.source)?;
        }
        tracing::debug!(
            loader = self.version.loader_name,
            version = self.version.current,
            count,
            "encoded column mappings"
        );
        Ok(())
    }

    pub fn read_mappings<R: Read>(&self, r: &mut R) -> Result<Vec<ColumnMapping>> {
        let header = VersionHeader::read_from(r)?;
        self.version.check(&header)?;

        let count = read_i32(r)?;
        if count < 0 {
            return Err(CopyError::format(format!("negative mapping count: {count}")));
        }

        // count comes from the stream; don't trust it for the allocation size
        let mut mappings = Vec::with_capacity((count as usize).min(1024));
        for i in 0..count {
            let output = read_string(r).map_err(|e| in_entry(e, i, "output"))?;
            let source = read_string(r).map_err(|e| in_entry(e, i, "source"))?;
            mappings.push(ColumnMapping { output, source });
        }
        tracing::debug!(
            loader = self.version.loader_name,
            version = header.version_written,
            count,
            "decoded column mappings"
        );
        Ok(mappings)
    }

    fn check_name(name: &str, what: &str) -> Result<()> {
        if name.is_empty() {
            return Err(CopyError::format(format!("empty {what} name")));
        }
        if i32::try_from(name.len()).is_err() {
            return Err(CopyError::format(format!("{what} name too long: {} bytes", name.len())));
        }
        Ok(())
    }

    fn encoded_len_hint(mappings: &[ColumnMapping]) -> usize {
        HEADER_LEN + 4 + mappings.iter().map(|m| 8 + m.output.len() + m.source.len()).sum::<usize>()
    }
}

fn in_entry(err: CopyError, index: i32, field: &str) -> CopyError {
    match err {
        CopyError::Format(msg) => CopyError::Format(format!("mapping {index} {field}: {msg}")),
        other => other,
    }
}

fn write_string<W: Write>(w: &mut W, s: &str) -> Result<()> {
    let len = s.len() as i32;
    w.write_all(&len.to_le_bytes())?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn read_i32<R: Read>(r: &mut R) -> Result<i32> {
    let mut word = [0u8; 4];
    r.read_exact(&mut word)?;
    Ok(i32::from_le_bytes(word))
}

fn read_string<R: Read>(r: &mut R) -> Result<String> {
    let len = read_i32(r)?;
    if len == 0 {
        return Err(CopyError::format("zero-length string"));
    }
    if len < 0 {
        return Err(CopyError::format(format!("invalid string length prefix: {len}")));
    }

    let len = len as usize;
    let mut bytes = Vec::with_capacity(len.min(4096));
    r.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("string truncated: expected {len} bytes, got {}", bytes.len()),
        ).into());
    }
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{_tests::fixtures::mappings, errors::ErrorKind};

    const INFO: VersionInfo = VersionInfo::new(b"COPYCOLT", 0x0001_0001, 0x0001_0001, 0x0001_0001, "CopyTransform");

    fn codec() -> MappingCodec {
        MappingCodec::new(INFO)
    }

    #[test]
    fn round_trip_keeps_order_and_pairs() {
        let m = mappings(&[("a", "x"), ("b", "y"), ("a", "x"), ("größe", "size")]);
        let bytes = codec().encode(&m).unwrap();
        assert_eq!(codec().decode(&bytes).unwrap(), m);
    }

    #[test]
    fn empty_list_round_trips() {
        let bytes = codec().encode(&[]).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 4);
        assert!(codec().decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn wire_layout() {
        let bytes = codec().encode(&mappings(&[("a", "xy")])).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(b"COPYCOLT");
        expected.extend_from_slice(&0x0001_0001u32.to_le_bytes());
        expected.extend_from_slice(&0x0001_0001u32.to_le_bytes());
        expected.extend_from_slice(&1i32.to_le_bytes());
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(b"xy");
        expected.extend_from_slice(&1i32.to_le_bytes());
        expected.extend_from_slice(b"a");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn negative_count_is_format_error() {
        let mut bytes = codec().encode(&mappings(&[("x", "a"), ("y", "b")])).unwrap();
        bytes[HEADER_LEN..HEADER_LEN + 4].copy_from_slice(&(-3i32).to_le_bytes());
        assert_eq!(codec().decode(&bytes).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn zero_length_string_is_format_error() {
        let mut bytes = codec().encode(&mappings(&[("a", "x")])).unwrap();
        // first string length prefix follows the count
        let at = HEADER_LEN + 4;
        bytes[at..at + 4].copy_from_slice(&0i32.to_le_bytes());
        let err = codec().decode(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("mapping 0 output"));
    }

    #[test]
    fn invalid_utf8_is_format_error() {
        let mut bytes = codec().encode(&mappings(&[("a", "x")])).unwrap();
        let at = HEADER_LEN + 8;
        bytes[at] = 0xff;
        assert_eq!(codec().decode(&bytes).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn truncation_anywhere_is_io_error() {
        let bytes = codec().encode(&mappings(&[("src", "out"), ("b", "y")])).unwrap();
        for cut in [3, HEADER_LEN, HEADER_LEN + 2, HEADER_LEN + 6, bytes.len() - 1] {
            let err = codec().decode(&bytes[..cut]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Io, "cut at {cut}");
        }
    }

    #[test]
    fn count_larger_than_entries_is_io_error() {
        let mut bytes = codec().encode(&mappings(&[("a", "x")])).unwrap();
        bytes[HEADER_LEN..HEADER_LEN + 4].copy_from_slice(&2i32.to_le_bytes());
        assert_eq!(codec().decode(&bytes).unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn trailing_bytes_are_format_error() {
        let mut bytes = codec().encode(&mappings(&[("a", "x")])).unwrap();
        bytes.push(0);
        assert_eq!(codec().decode(&bytes).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn version_gate_applies_to_well_formed_bodies() {
        let body = codec().encode(&mappings(&[("a", "x")])).unwrap();

        let mut newer = body.clone();
        newer[8..12].copy_from_slice(&0x0001_0002u32.to_le_bytes());
        assert_eq!(codec().decode(&newer).unwrap_err().kind(), ErrorKind::VersionIncompatible);

        let mut older = body.clone();
        older[8..12].copy_from_slice(&0x0001_0000u32.to_le_bytes());
        assert_eq!(codec().decode(&older).unwrap_err().kind(), ErrorKind::VersionIncompatible);

        let mut foreign = body;
        foreign[..8].copy_from_slice(b"NOTCOPYT");
        assert_eq!(codec().decode(&foreign).unwrap_err().kind(), ErrorKind::VersionIncompatible);
    }

    #[test]
    fn encoding_empty_names_fails_before_writing() {
        let mut buf = Vec::new();
        let err = codec().write_mappings(&mut buf, &[ColumnMapping::new("a", "x"), ColumnMapping::new("b", "")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(buf.is_empty());
    }

    #[test]
    fn streaming_read_leaves_following_bytes() {
        let mut stream = codec().encode(&mappings(&[("a", "x")])).unwrap();
        stream.extend_from_slice(b"next");
        let mut r = stream.as_slice();
        let m = codec().read_mappings(&mut r).unwrap();
        assert_eq!(m, mappings(&[("a", "x")]));
        assert_eq!(r, b"next");
    }
}
