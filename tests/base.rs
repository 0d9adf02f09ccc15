//! Integration tests for sgjw
//!
//! These tests exercise the public read / append / release surface against
//! real files.

use sgjw::{
    ErrorKind, FixedText, MetadataRecord, Options, SIGNATURE, TRAILER_SIZE, append, decode_record,
    parse, read, read_with, release, writer,
};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Minimal JPEG-looking host: SOI, APP0 stub, EOI
const HOST: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01,
    0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

fn host_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(HOST).unwrap();
    file.flush().unwrap();
    file
}

fn record(width: u16, height: u16) -> MetadataRecord {
    let cells = width as usize * height as usize;
    let mut record = MetadataRecord {
        version: Some(0x0102),
        width: Some(width),
        height: Some(height),
        date: FixedText::from_text("20240601101530"),
        matrix: Some((0..cells).map(|i| 20.0 + i as f32 * 0.25).collect()),
        emissivity: Some(0.95),
        ambient_temp: Some(26.5),
        fov: Some(48),
        distance: Some(1200),
        humidity: Some(65),
        reflective_temp: Some(26.5),
        manufacturer: FixedText::from_text("State Grid Instruments"),
        product: FixedText::from_text("IR-384"),
        serial_number: FixedText::from_text("SG20240601-0007"),
        longitude: Some(114.0579),
        latitude: Some(22.5431),
        altitude: Some(35),
        ..Default::default()
    };
    record.set_appendix(Vec::new()).unwrap();
    record
}

// =============================================================================
// File roundtrips
// =============================================================================

#[test]
fn append_then_read() {
    init_tracing();
    let file = host_file();
    let original = record(4, 3);

    append(file.path(), &original).unwrap();
    let parsed = read(file.path()).unwrap();

    assert_eq!(parsed, original);
    assert_eq!(parsed.matrix_at(2, 3), Some(20.0 + 11.0 * 0.25));
}

#[test]
fn append_leaves_host_bytes_untouched() {
    let file = host_file();
    append(file.path(), &record(1, 1)).unwrap();

    let bytes = fs::read(file.path()).unwrap();
    assert_eq!(&bytes[..HOST.len()], HOST);
    assert_eq!(&bytes[bytes.len() - 16..], &SIGNATURE);

    let at = bytes.len() - TRAILER_SIZE;
    let offset = u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());
    assert_eq!(offset as usize, HOST.len());
}

#[test]
fn append_then_read_with_appendix() {
    let file = host_file();
    let mut original = record(2, 2);
    original
        .set_appendix("transformer bushing, phase B".as_bytes().to_vec())
        .unwrap();

    append(file.path(), &original).unwrap();
    let parsed = read_with(file.path(), &Options::quiet()).unwrap();

    assert_eq!(parsed.appendix_length, Some(28));
    assert_eq!(
        parsed.appendix_text().unwrap(),
        "transformer bushing, phase B"
    );
    assert_eq!(parsed, original);
}

#[test]
fn second_append_wins() {
    let file = host_file();
    append(file.path(), &record(1, 1)).unwrap();
    let mut newer = record(2, 1);
    newer.altitude = Some(99);
    append(file.path(), &newer).unwrap();

    assert_eq!(read(file.path()).unwrap(), newer);
}

#[test]
fn text_fields_materialize_up_to_nul() {
    let file = host_file();
    append(file.path(), &record(1, 1)).unwrap();
    let parsed = read(file.path()).unwrap();

    assert_eq!(parsed.manufacturer.unwrap().to_text(), "State Grid Instruments");
    assert_eq!(parsed.product.unwrap().as_bytes().len(), 32);
    assert_eq!(parsed.date.unwrap().to_text(), "20240601101530");
}

// =============================================================================
// Trailer failures
// =============================================================================

#[test]
fn plain_jpeg_has_no_signature() {
    let file = host_file();
    assert_eq!(read(file.path()).unwrap_err().kind(), ErrorKind::InvalidSignature);
}

#[test]
fn any_flipped_signature_bit_is_rejected() {
    let mut bytes = HOST.to_vec();
    bytes.extend_from_slice(&writer::encode_record(&record(1, 1), HOST.len() as u64).unwrap());
    let len = bytes.len();

    for i in len - 16..len {
        let mut corrupt = bytes.clone();
        corrupt[i] ^= 0x80;
        assert_eq!(parse(&corrupt).unwrap_err().kind(), ErrorKind::InvalidSignature);
    }
}

#[test]
fn zero_offset_is_rejected_even_when_well_formed() {
    let original = record(1, 1);
    let bytes = writer::encode_record(&original, 0).unwrap();

    assert_eq!(parse(&bytes).unwrap_err().kind(), ErrorKind::InvalidOffset);
    // The block itself is fine when decoded directly.
    assert_eq!(decode_record(&bytes, 0).unwrap(), original);
}

#[test]
fn truncated_block_fails_field_decode() {
    let mut bytes = HOST.to_vec();
    let block = writer::encode_record(&record(2, 2), HOST.len() as u64).unwrap();
    // Keep only the first 30 bytes of the block, then re-attach the trailer.
    bytes.extend_from_slice(&block[..30]);
    bytes.extend_from_slice(&block[block.len() - TRAILER_SIZE..]);

    assert_eq!(parse(&bytes).unwrap_err().kind(), ErrorKind::FieldDecodeFailed);
}

#[test]
fn oversized_appendix_length_fails_field_decode() {
    let original = record(1, 1);
    let mut bytes = HOST.to_vec();
    bytes.extend_from_slice(&writer::encode_record(&original, HOST.len() as u64).unwrap());

    // appendix_length is the last 4 bytes before the trailer
    let at = bytes.len() - TRAILER_SIZE - 4;
    bytes[at..at + 4].copy_from_slice(&u32::MAX.to_le_bytes());

    assert_eq!(parse(&bytes).unwrap_err().kind(), ErrorKind::FieldDecodeFailed);
}

// =============================================================================
// Concrete single-cell scenario
// =============================================================================

#[test]
fn single_cell_matrix_decodes_to_one() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x0100u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(b"20240101000000");
    bytes.extend_from_slice(&[0x00, 0x00, 0x80, 0x3F]);
    bytes.extend_from_slice(&[0u8; 4 + 4 + 1 + 4 + 1 + 4 + 32 * 3 + 8 + 8 + 4]);
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&SIGNATURE);

    let parsed = decode_record(&bytes, 0).unwrap();
    assert_eq!(parsed.matrix, Some(vec![1.0]));
    assert_eq!(parsed.appendix, None);
}

// =============================================================================
// Release
// =============================================================================

#[test]
fn release_twice_is_safe() {
    let file = host_file();
    append(file.path(), &record(3, 3)).unwrap();
    let mut parsed = read(file.path()).unwrap();

    release(&mut parsed);
    assert!(parsed.is_empty());
    let after_once = parsed.clone();

    release(&mut parsed);
    assert_eq!(parsed, after_once);
    assert_eq!(parsed, MetadataRecord::default());
}

#[test]
fn incomplete_record_is_not_written() {
    let file = host_file();
    let mut partial = record(2, 2);
    partial.serial_number = None;

    let err = append(file.path(), &partial).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldEncodeFailed);
    assert_eq!(fs::read(file.path()).unwrap(), HOST);
}

#[test]
fn mismatched_appendix_is_not_written() {
    let file = host_file();
    let mut bad = record(1, 1);
    bad.appendix_length = Some(4);
    bad.appendix = Some(b"too long".to_vec());

    assert_eq!(
        append(file.path(), &bad).unwrap_err().kind(),
        ErrorKind::FieldEncodeFailed
    );
    assert_eq!(fs::read(file.path()).unwrap(), HOST);
}
