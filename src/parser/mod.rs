//! Binary parser for the sgjw trailer
//!
//! The host file is treated as opaque bytes; only the trailer at its end is
//! interpreted.

mod record;
mod trailer;

pub use record::{decode_record, decode_record_with};
pub use trailer::{locate_block, verify_signature};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::types::{MetadataRecord, TRAILER_SIZE};

/// Parse the metadata block carried at the tail of `bytes`
pub fn parse(bytes: &[u8]) -> Result<MetadataRecord> {
    parse_with(bytes, &Options::default())
}

/// Parse the metadata block carried at the tail of `bytes`, with explicit options
///
/// A located offset of 0 is rejected as [`Error::InvalidOffset`] even though
/// it is a structurally valid position.
pub fn parse_with(bytes: &[u8], options: &Options) -> Result<MetadataRecord> {
    if !verify_signature(bytes) {
        tracing::warn!(len = bytes.len(), "trailer signature verification failed");
        return Err(Error::InvalidSignature);
    }
    tracing::debug!("trailer signature verified");

    let offset = locate_block(bytes).ok_or(Error::InvalidOffset {
        reason: "buffer too short for block offset",
    })?;
    if offset == 0 {
        tracing::warn!("block offset is zero");
        return Err(Error::InvalidOffset {
            reason: "offset is zero",
        });
    }
    tracing::debug!(offset, "located metadata block");

    // The block never extends into its own trailer.
    let body = &bytes[..bytes.len() - TRAILER_SIZE];
    decode_record_with(body, offset, options)
}
