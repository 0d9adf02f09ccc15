//! Serialization of metadata records

mod record;

pub use record::block_size;

use crate::codec::{set_bytes, set_uint};
use crate::error::{CodecError, Error, Result};
use crate::options::Options;
use crate::types::{MetadataRecord, OFFSET_SIZE, SIGNATURE, TRAILER_SIZE};

/// Encoded size of `record` including offset and signature
pub fn encoded_size(record: &MetadataRecord) -> Result<usize> {
    block_size(record)?
        .checked_add(TRAILER_SIZE)
        .ok_or_else(|| Error::encode("Appendix", "block size overflows"))
}

/// Encode `record` as a block to be appended to a host of `host_len` bytes
///
/// The returned buffer holds the fields, the block offset (`host_len`) and
/// the signature.
pub fn encode_record(record: &MetadataRecord, host_len: u64) -> Result<Vec<u8>> {
    encode_record_with(record, host_len, &Options::default())
}

/// Encode `record` with explicit options
pub fn encode_record_with(
    record: &MetadataRecord,
    host_len: u64,
    options: &Options,
) -> Result<Vec<u8>> {
    let offset = u32::try_from(host_len).map_err(|_| Error::InvalidOffset {
        reason: "host file too large for a 4-byte offset",
    })?;

    let total = encoded_size(record)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(total)
        .map_err(|_| Error::AllocationFailed {
            field: "Block",
            size: total,
        })?;
    buf.resize(total, 0);

    let mut cursor = 0;
    record::encode_into(&mut buf, &mut cursor, record, options)?;

    let trailer = |e: CodecError| Error::FieldEncodeFailed {
        field: "Trailer",
        reason: "out of bounds".into(),
        source: Some(e),
    };
    set_uint(&mut buf, cursor, OFFSET_SIZE, u64::from(offset)).map_err(trailer)?;
    set_bytes(&mut buf, cursor + OFFSET_SIZE, &SIGNATURE).map_err(trailer)?;
    debug_assert_eq!(cursor + TRAILER_SIZE, total);

    tracing::debug!(offset, size = total, "encoded metadata block");
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::{decode_record, locate_block, verify_signature};
    use crate::types::{FIXED_BLOCK_SIZE, FixedText};

    fn sample() -> MetadataRecord {
        let mut record = MetadataRecord {
            version: Some(0x0201),
            width: Some(3),
            height: Some(2),
            date: FixedText::from_text("20231231235959"),
            matrix: Some(vec![-5.5, 0.0, 12.25, 99.0, 100.5, 36.6]),
            emissivity: Some(0.95),
            ambient_temp: Some(-3.0),
            fov: Some(90),
            distance: Some(u32::MAX),
            humidity: Some(100),
            reflective_temp: Some(18.5),
            manufacturer: FixedText::from_text("Thermal Works"),
            product: FixedText::from_text("TW-640"),
            serial_number: FixedText::from_text("TW640-000123"),
            longitude: Some(-122.4194),
            latitude: Some(37.7749),
            altitude: Some(16),
            ..Default::default()
        };
        record.set_appendix(b"inspection note".to_vec()).unwrap();
        record
    }

    #[test]
    fn test_encoded_size() {
        let record = sample();
        let bytes = encode_record(&record, 100).unwrap();
        assert_eq!(bytes.len(), encoded_size(&record).unwrap());
        assert_eq!(bytes.len(), FIXED_BLOCK_SIZE + 24 + 15 + TRAILER_SIZE);
    }

    #[test]
    fn test_trailer_layout() {
        let bytes = encode_record(&sample(), 0x1234).unwrap();
        assert!(verify_signature(&bytes));
        assert_eq!(locate_block(&bytes), Some(0x1234));
        assert_eq!(&bytes[bytes.len() - 16..], &SIGNATURE);
    }

    #[test]
    fn test_field_layout() {
        let bytes = encode_record(&sample(), 1).unwrap();
        assert_eq!(&bytes[0..2], &[0x01, 0x02]);
        assert_eq!(&bytes[2..4], &[3, 0]);
        assert_eq!(&bytes[4..6], &[2, 0]);
        assert_eq!(&bytes[6..20], b"20231231235959");
        assert_eq!(&bytes[20..24], &(-5.5f32).to_le_bytes());
    }

    #[test]
    fn test_roundtrip_through_decode() {
        let record = sample();
        let bytes = encode_record(&record, 1).unwrap();
        let decoded = decode_record(&bytes, 0).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.appendix_text().unwrap(), "inspection note");
    }

    #[test]
    fn test_roundtrip_without_appendix() {
        let mut record = sample();
        record.set_appendix(Vec::new()).unwrap();
        let bytes = encode_record(&record, 1).unwrap();
        assert_eq!(bytes.len(), FIXED_BLOCK_SIZE + 24 + TRAILER_SIZE);
        assert_eq!(decode_record(&bytes, 0).unwrap(), record);
    }

    #[test]
    fn test_empty_record_rejected() {
        let err = encode_record(&MetadataRecord::new(), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldEncodeFailed);
    }

    #[test]
    fn test_offset_must_fit_u32() {
        let err = encode_record(&sample(), u64::from(u32::MAX) + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOffset);
    }
}
