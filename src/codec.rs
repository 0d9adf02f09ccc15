//! Bounds-checked little-endian byte codec
//!
//! Every accessor validates `offset + width <= buffer.len()` before touching
//! the buffer and reports a [`CodecError`] instead of reading past the end.
//! Integers wider than 8 bytes are clamped to 8.

use crate::error::CodecError;
use byteorder::{ByteOrder, LittleEndian};
use std::ops::Range;

/// Largest integer width the codec reads or writes
pub const MAX_UINT_BYTES: usize = 8;

fn span(available: usize, offset: usize, len: usize) -> Result<Range<usize>, CodecError> {
    let err = CodecError {
        offset,
        len,
        available,
    };
    let end = offset.checked_add(len).ok_or(err)?;
    if end > available {
        return Err(err);
    }
    Ok(offset..end)
}

/// Read an unsigned integer of `nbytes` (little-endian)
pub fn get_uint(buffer: &[u8], offset: usize, nbytes: usize) -> Result<u64, CodecError> {
    let nbytes = nbytes.min(MAX_UINT_BYTES);
    let range = span(buffer.len(), offset, nbytes)?;
    if nbytes == 0 {
        return Ok(0);
    }
    Ok(LittleEndian::read_uint(&buffer[range], nbytes))
}

/// Read an IEEE-754 f32 (little-endian)
pub fn get_float32(buffer: &[u8], offset: usize) -> Result<f32, CodecError> {
    let bits = get_uint(buffer, offset, 4)? as u32;
    Ok(f32::from_bits(bits))
}

/// Read an IEEE-754 f64 (little-endian)
pub fn get_float64(buffer: &[u8], offset: usize) -> Result<f64, CodecError> {
    let bits = get_uint(buffer, offset, 8)?;
    Ok(f64::from_bits(bits))
}

/// Borrow a verbatim run of `len` bytes
pub fn get_bytes(buffer: &[u8], offset: usize, len: usize) -> Result<&[u8], CodecError> {
    let range = span(buffer.len(), offset, len)?;
    Ok(&buffer[range])
}

/// Fill `dst` with consecutive f32 values starting at `offset`
pub fn get_float32_array(buffer: &[u8], offset: usize, dst: &mut [f32]) -> Result<(), CodecError> {
    let len = dst.len().checked_mul(4).ok_or(CodecError {
        offset,
        len: usize::MAX,
        available: buffer.len(),
    })?;
    let range = span(buffer.len(), offset, len)?;
    LittleEndian::read_f32_into(&buffer[range], dst);
    Ok(())
}

/// Write the low `nbytes` of `value` (little-endian)
pub fn set_uint(
    buffer: &mut [u8],
    offset: usize,
    nbytes: usize,
    value: u64,
) -> Result<(), CodecError> {
    let nbytes = nbytes.min(MAX_UINT_BYTES);
    let range = span(buffer.len(), offset, nbytes)?;
    if nbytes == 0 {
        return Ok(());
    }
    let value = if nbytes == MAX_UINT_BYTES {
        value
    } else {
        value & ((1u64 << (8 * nbytes)) - 1)
    };
    LittleEndian::write_uint(&mut buffer[range], value, nbytes);
    Ok(())
}

/// Write an IEEE-754 f32 (little-endian)
pub fn set_float32(buffer: &mut [u8], offset: usize, value: f32) -> Result<(), CodecError> {
    set_uint(buffer, offset, 4, u64::from(value.to_bits()))
}

/// Write an IEEE-754 f64 (little-endian)
pub fn set_float64(buffer: &mut [u8], offset: usize, value: f64) -> Result<(), CodecError> {
    set_uint(buffer, offset, 8, value.to_bits())
}

/// Copy `bytes` verbatim to `offset`
pub fn set_bytes(buffer: &mut [u8], offset: usize, bytes: &[u8]) -> Result<(), CodecError> {
    let range = span(buffer.len(), offset, bytes.len())?;
    buffer[range].copy_from_slice(bytes);
    Ok(())
}

/// Write consecutive f32 values starting at `offset`
pub fn set_float32_array(buffer: &mut [u8], offset: usize, src: &[f32]) -> Result<(), CodecError> {
    let len = src.len().checked_mul(4).ok_or(CodecError {
        offset,
        len: usize::MAX,
        available: buffer.len(),
    })?;
    let range = span(buffer.len(), offset, len)?;
    LittleEndian::write_f32_into(src, &mut buffer[range]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_uint_widths() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(get_uint(&data, 0, 1).unwrap(), 0x01);
        assert_eq!(get_uint(&data, 0, 2).unwrap(), 0x0201);
        assert_eq!(get_uint(&data, 0, 4).unwrap(), 0x04030201);
        assert_eq!(get_uint(&data, 0, 8).unwrap(), 0x0807060504030201);
        assert_eq!(get_uint(&data, 6, 2).unwrap(), 0x0807);
    }

    #[test]
    fn test_get_uint_clamps_above_eight() {
        let data = [0xFFu8; 12];
        assert_eq!(get_uint(&data, 0, 12).unwrap(), u64::MAX);
    }

    #[test]
    fn test_get_uint_out_of_bounds() {
        let data = [0u8; 3];
        let err = get_uint(&data, 0, 4).unwrap_err();
        assert_eq!(
            err,
            CodecError {
                offset: 0,
                len: 4,
                available: 3
            }
        );
        assert!(get_uint(&data, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_get_float32_bit_pattern() {
        let data = [0x00, 0x00, 0x80, 0x3F];
        assert_eq!(get_float32(&data, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_get_float64() {
        let data = (-273.15f64).to_le_bytes();
        assert_eq!(get_float64(&data, 0).unwrap(), -273.15);
    }

    #[test]
    fn test_get_bytes_is_verbatim() {
        let data = b"20240102030405tail";
        assert_eq!(get_bytes(data, 0, 14).unwrap(), b"20240102030405");
        assert!(get_bytes(data, 10, 9).is_err());
    }

    #[test]
    fn test_float32_array() {
        let mut buf = vec![0u8; 12];
        set_float32_array(&mut buf, 0, &[1.5, -2.0, 36.6]).unwrap();
        let mut out = [0f32; 3];
        get_float32_array(&buf, 0, &mut out).unwrap();
        assert_eq!(out, [1.5, -2.0, 36.6]);

        let mut too_many = [0f32; 4];
        assert!(get_float32_array(&buf, 0, &mut too_many).is_err());
    }

    #[test]
    fn test_set_uint_truncates_to_width() {
        let mut buf = [0u8; 4];
        set_uint(&mut buf, 1, 2, 0x1234_5678).unwrap();
        assert_eq!(buf, [0x00, 0x78, 0x56, 0x00]);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut buf = [0u8; 4];
        assert!(set_float64(&mut buf, 0, 1.0).is_err());
        assert!(set_bytes(&mut buf, 2, b"abc").is_err());
        assert_eq!(buf, [0u8; 4]);
    }

    #[test]
    fn test_chained() {
        let mut buf = vec![0u8; 12];
        set_uint(&mut buf, 0, 4, 42).unwrap();
        set_float64(&mut buf, 4, 123.5).unwrap();
        assert_eq!(get_uint(&buf, 0, 4).unwrap(), 42);
        assert_eq!(get_float64(&buf, 4).unwrap(), 123.5);
    }
}
