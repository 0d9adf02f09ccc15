//! Descriptor-driven record encoding

use crate::codec::{set_bytes, set_float32, set_float32_array, set_float64, set_uint};
use crate::error::{CodecError, Error, Result};
use crate::options::Options;
use crate::types::{
    Count, FIELDS, FIXED_BLOCK_SIZE, FLOAT32_SIZE, FieldDescriptor, FieldKind, FieldValue,
    MetadataRecord,
};

/// Size of the encoded block (without trailer), validating the record
///
/// Every slot must be set, the matrix must hold `width × height` cells and
/// the appendix must match `appendix_length` exactly.
pub fn block_size(record: &MetadataRecord) -> Result<usize> {
    for desc in &FIELDS {
        if record.value(desc.field).is_none() {
            return Err(Error::encode(desc.label(), "slot is unset"));
        }
    }

    let cells = record
        .cell_count()
        .ok_or_else(|| Error::encode("Matrix", "dimensions unset"))?;
    let matrix_len = record.matrix.as_ref().map_or(0, Vec::len);
    if matrix_len != cells {
        return Err(Error::encode(
            "Matrix",
            format!("holds {matrix_len} cells, width × height is {cells}"),
        ));
    }

    let appendix_len = appendix_len(record)?;

    FIXED_BLOCK_SIZE
        .checked_add(cells * FLOAT32_SIZE)
        .and_then(|n| n.checked_add(appendix_len))
        .ok_or_else(|| Error::encode("Appendix", "block size overflows"))
}

/// Declared appendix length, checked against the appendix buffer
pub(crate) fn appendix_len(record: &MetadataRecord) -> Result<usize> {
    let declared = record.appendix_length.unwrap_or(0) as usize;
    let actual = record.appendix.as_ref().map(Vec::len);
    match actual {
        None if declared == 0 => Ok(0),
        None => Err(Error::encode("Appendix", "slot is unset")),
        Some(actual) if actual == declared => Ok(declared),
        Some(actual) => Err(Error::encode(
            "Appendix",
            format!("holds {actual} bytes, appendix length is {declared}"),
        )),
    }
}

/// Encode every field of `record` into `buf` from `cursor` onwards
pub(crate) fn encode_into(
    buf: &mut [u8],
    cursor: &mut usize,
    record: &MetadataRecord,
    options: &Options,
) -> Result<()> {
    for desc in &FIELDS {
        encode_one(buf, cursor, desc, record, options)?;
    }

    let len = appendix_len(record)?;
    if len > 0 {
        encode_one(buf, cursor, &FieldDescriptor::appendix(len), record, options)?;
    }

    Ok(())
}

fn encode_one(
    buf: &mut [u8],
    cursor: &mut usize,
    desc: &FieldDescriptor,
    record: &MetadataRecord,
    options: &Options,
) -> Result<()> {
    let value = record
        .value(desc.field)
        .ok_or_else(|| Error::encode(desc.label(), "slot is unset"))?;

    let written = encode_field(buf, *cursor, desc, &value)?;

    if options.diagnostics {
        tracing::debug!(
            field = desc.label(),
            offset = *cursor,
            raw = %value.raw_hex(),
            value = %value,
            "encoded field"
        );
    }

    *cursor += written;
    Ok(())
}

/// Encode one field at `offset`, returning the bytes written
pub(crate) fn encode_field(
    buf: &mut [u8],
    offset: usize,
    desc: &FieldDescriptor,
    value: &FieldValue<'_>,
) -> Result<usize> {
    let field = desc.label();
    let oob = |e: CodecError| Error::FieldEncodeFailed {
        field,
        reason: "out of bounds".into(),
        source: Some(e),
    };

    let result = match (desc.kind, value) {
        (FieldKind::U8, FieldValue::U8(v)) => set_uint(buf, offset, desc.width, u64::from(*v)),
        (FieldKind::U16, FieldValue::U16(v)) => set_uint(buf, offset, desc.width, u64::from(*v)),
        (FieldKind::U32, FieldValue::U32(v)) => set_uint(buf, offset, desc.width, u64::from(*v)),
        (FieldKind::F32, FieldValue::F32(v)) => set_float32(buf, offset, *v),
        (FieldKind::F64, FieldValue::F64(v)) => set_float64(buf, offset, *v),
        (FieldKind::Chars, FieldValue::Chars(b)) | (FieldKind::Bytes, FieldValue::Bytes(b)) => {
            if b.len() != desc.width {
                return Err(Error::encode(
                    field,
                    format!("holds {} bytes, field is {}", b.len(), desc.width),
                ));
            }
            set_bytes(buf, offset, b)
        }
        (FieldKind::FloatMatrix, FieldValue::FloatMatrix(m)) => set_float32_array(buf, offset, m),
        (kind, other) => {
            return Err(Error::encode(
                field,
                format!("{:?} value for {kind:?} field", other.kind()),
            ));
        }
    };
    result.map_err(oob)?;

    let cells = match (desc.count, value) {
        (Count::Cells, FieldValue::FloatMatrix(m)) => m.len(),
        _ => 0,
    };
    desc.byte_len(cells)
        .ok_or_else(|| Error::encode(field, "size overflows"))
}
