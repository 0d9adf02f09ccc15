//! Trailer constants

/// Signature closing every file that carries a metadata block
pub const SIGNATURE: [u8; SIGNATURE_SIZE] = [
    0x37, 0x66, 0x07, 0x1A, 0x12, 0x3A, 0x4C, 0x9F, 0xA9, 0x5D, 0x21, 0xD2, 0xDA, 0x7D, 0x26, 0xBC,
];

/// Signature size in bytes
pub const SIGNATURE_SIZE: usize = 16;

/// Block offset size in bytes (u32, little-endian)
pub const OFFSET_SIZE: usize = 4;

/// Offset plus signature
pub const TRAILER_SIZE: usize = OFFSET_SIZE + SIGNATURE_SIZE;
