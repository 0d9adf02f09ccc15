//! sgjw - thermal-imaging metadata trailer for JPEG files
//!
//! Embeds and extracts a block of thermal acquisition parameters appended to
//! the tail of an otherwise ordinary JPEG. The host file is treated as opaque
//! bytes; the block is found through a trailing 16-byte signature and the
//! 4-byte offset stored just before it.
//!
//! # Layout
//!
//! ```text
//! [ original JPEG bytes ]
//! [ metadata block: fixed fields, matrix, optional appendix ]
//! [ u32 LE offset of the block within the file ]
//! [ 16-byte signature ]
//! ```
//!
//! The block is decoded and encoded by walking one descriptor table
//! ([`FIELDS`]), so both directions always agree on field order.
//!
//! # Example
//!
//! ```rust
//! use sgjw::{FixedText, MetadataRecord, parse, writer};
//!
//! let mut record = MetadataRecord {
//!     version: Some(0x0100),
//!     width: Some(2),
//!     height: Some(1),
//!     date: FixedText::from_text("20240315123000"),
//!     matrix: Some(vec![36.5, 37.1]),
//!     emissivity: Some(0.95),
//!     ambient_temp: Some(23.0),
//!     fov: Some(56),
//!     distance: Some(3),
//!     humidity: Some(45),
//!     reflective_temp: Some(23.0),
//!     manufacturer: FixedText::from_text("ACME"),
//!     product: FixedText::from_text("IR-1"),
//!     serial_number: FixedText::from_text("0042"),
//!     longitude: Some(116.4),
//!     latitude: Some(39.9),
//!     altitude: Some(50),
//!     ..Default::default()
//! };
//! record.set_appendix(b"inspection".to_vec()).unwrap();
//!
//! let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
//! let block = writer::encode_record(&record, jpeg.len() as u64).unwrap();
//! jpeg.extend_from_slice(&block);
//!
//! assert_eq!(parse(&jpeg).unwrap(), record);
//! ```

pub mod codec;
pub mod error;
pub mod io;
pub mod options;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{CodecError, Error, ErrorKind, Result};
pub use io::{append, append_with, read, read_with};
pub use options::Options;
pub use parser::{decode_record, decode_record_with, locate_block, parse, parse_with, verify_signature};
pub use types::{
    FIELDS, Field, FieldDescriptor, FieldKind, FieldValue, FixedText, MetadataRecord, SIGNATURE,
    TRAILER_SIZE, release,
};
pub use writer::{encode_record, encode_record_with, encoded_size};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::MatrixError;
