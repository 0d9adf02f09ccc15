//! Trailer location

use crate::codec::get_uint;
use crate::types::{OFFSET_SIZE, SIGNATURE, TRAILER_SIZE};

/// True iff the buffer ends with the 16-byte signature
pub fn verify_signature(buffer: &[u8]) -> bool {
    buffer.ends_with(&SIGNATURE)
}

/// Decode the block offset stored just before the signature
///
/// Returns `None` if the buffer cannot hold an offset and a signature.
/// A returned offset of 0 is structurally valid here; rejecting it is up to
/// the caller.
pub fn locate_block(buffer: &[u8]) -> Option<usize> {
    let start = buffer.len().checked_sub(TRAILER_SIZE)?;
    let offset = get_uint(buffer, start, OFFSET_SIZE).ok()?;
    usize::try_from(offset).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trailer(offset: u32) -> Vec<u8> {
        let mut bytes = offset.to_le_bytes().to_vec();
        bytes.extend_from_slice(&SIGNATURE);
        bytes
    }

    #[test]
    fn test_verify_signature() {
        assert!(verify_signature(&SIGNATURE));
        let mut bytes = b"jpeg bytes".to_vec();
        bytes.extend_from_slice(&trailer(3));
        assert!(verify_signature(&bytes));
    }

    #[test]
    fn test_verify_signature_too_short() {
        assert!(!verify_signature(&SIGNATURE[1..]));
        assert!(!verify_signature(&[]));
    }

    #[test]
    fn test_verify_signature_single_bit_flip() {
        for byte in 0..SIGNATURE.len() {
            for bit in 0..8 {
                let mut bytes = vec![0xAA; 40];
                bytes.extend_from_slice(&SIGNATURE);
                let at = bytes.len() - SIGNATURE.len() + byte;
                bytes[at] ^= 1 << bit;
                assert!(!verify_signature(&bytes), "byte {byte} bit {bit}");
            }
        }
    }

    #[test]
    fn test_locate_block() {
        let mut bytes = vec![0u8; 100];
        bytes.extend_from_slice(&trailer(0x0102_0304));
        assert_eq!(locate_block(&bytes), Some(0x0102_0304));
    }

    #[test]
    fn test_locate_block_too_short() {
        let bytes = trailer(7);
        assert_eq!(locate_block(&bytes), Some(7));
        assert_eq!(locate_block(&bytes[1..]), None);
    }

    #[test]
    fn test_locate_block_zero_is_reported() {
        assert_eq!(locate_block(&trailer(0)), Some(0));
    }
}
