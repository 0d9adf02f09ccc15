//! Descriptor-driven record decoding

use crate::codec::{get_bytes, get_float32, get_float32_array, get_float64, get_uint};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::types::{Count, FIELDS, FieldDescriptor, FieldKind, FieldValue, MetadataRecord};
use std::borrow::Cow;

/// Decode a metadata block starting at `start`
pub fn decode_record(buffer: &[u8], start: usize) -> Result<MetadataRecord> {
    decode_record_with(buffer, start, &Options::default())
}

/// Decode a metadata block starting at `start`, with explicit options
///
/// Fails on the first field that cannot be decoded; nothing decoded so far
/// survives the failure.
pub fn decode_record_with(
    buffer: &[u8],
    start: usize,
    options: &Options,
) -> Result<MetadataRecord> {
    let mut record = MetadataRecord::new();
    let mut cursor = start;

    match decode_into(buffer, &mut cursor, &mut record, options) {
        Ok(()) => Ok(record),
        Err(e) => {
            tracing::warn!(error = %e, cursor, "metadata block decode failed");
            record.release();
            Err(e)
        }
    }
}

fn decode_into(
    buffer: &[u8],
    cursor: &mut usize,
    record: &mut MetadataRecord,
    options: &Options,
) -> Result<()> {
    for desc in &FIELDS {
        let cells = match desc.count {
            Count::One => 0,
            Count::Cells => record.cell_count().ok_or_else(|| Error::FieldDecodeFailed {
                field: desc.label(),
                reason: "matrix dimensions not decoded".into(),
                source: None,
            })?,
        };
        decode_one(buffer, cursor, desc, cells, record, options)?;
    }

    match record.appendix_length {
        Some(len) if len > 0 => {
            let desc = FieldDescriptor::appendix(len as usize);
            decode_one(buffer, cursor, &desc, 0, record, options)?;
        }
        _ => {}
    }

    Ok(())
}

fn decode_one(
    buffer: &[u8],
    cursor: &mut usize,
    desc: &FieldDescriptor,
    cells: usize,
    record: &mut MetadataRecord,
    options: &Options,
) -> Result<()> {
    let (value, consumed) = decode_field(buffer, *cursor, desc, cells)?;

    if options.diagnostics {
        tracing::debug!(
            field = desc.label(),
            offset = *cursor,
            raw = %value.raw_hex(),
            value = %value,
            "decoded field"
        );
    }

    record
        .store(desc.field, value)
        .map_err(|rejected| Error::FieldDecodeFailed {
            field: desc.label(),
            reason: format!("{:?} value does not fit slot", rejected.kind()),
            source: None,
        })?;

    *cursor += consumed;
    Ok(())
}

/// Decode one field at `offset`, returning the value and the bytes consumed
pub(crate) fn decode_field(
    buffer: &[u8],
    offset: usize,
    desc: &FieldDescriptor,
    cells: usize,
) -> Result<(FieldValue<'static>, usize)> {
    let field = desc.label();
    let len = desc.byte_len(cells).ok_or_else(|| Error::FieldDecodeFailed {
        field,
        reason: format!("{cells} cells overflow the address space"),
        source: None,
    })?;

    // Whole field must be in bounds before anything is allocated.
    let raw = get_bytes(buffer, offset, len).map_err(|e| Error::decode(field, e))?;

    let value = match desc.kind {
        FieldKind::U8 => FieldValue::U8(read_uint(buffer, offset, desc)? as u8),
        FieldKind::U16 => FieldValue::U16(read_uint(buffer, offset, desc)? as u16),
        FieldKind::U32 => FieldValue::U32(read_uint(buffer, offset, desc)? as u32),
        FieldKind::F32 => {
            FieldValue::F32(get_float32(buffer, offset).map_err(|e| Error::decode(field, e))?)
        }
        FieldKind::F64 => {
            FieldValue::F64(get_float64(buffer, offset).map_err(|e| Error::decode(field, e))?)
        }
        FieldKind::Chars => FieldValue::Chars(Cow::Owned(copy_bytes(field, raw)?)),
        FieldKind::Bytes => FieldValue::Bytes(Cow::Owned(copy_bytes(field, raw)?)),
        FieldKind::FloatMatrix => {
            let mut matrix = Vec::new();
            matrix
                .try_reserve_exact(cells)
                .map_err(|_| Error::AllocationFailed { field, size: len })?;
            matrix.resize(cells, 0.0f32);
            get_float32_array(buffer, offset, &mut matrix).map_err(|e| Error::decode(field, e))?;
            FieldValue::FloatMatrix(Cow::Owned(matrix))
        }
    };

    Ok((value, len))
}

fn read_uint(buffer: &[u8], offset: usize, desc: &FieldDescriptor) -> Result<u64> {
    get_uint(buffer, offset, desc.width).map_err(|e| Error::decode(desc.label(), e))
}

fn copy_bytes(field: &'static str, raw: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.try_reserve_exact(raw.len())
        .map_err(|_| Error::AllocationFailed {
            field,
            size: raw.len(),
        })?;
    out.extend_from_slice(raw);
    Ok(out)
}
