//! Reading and appending trailers on host files
//!
//! The whole host file is read into memory before parsing, and a new block
//! is written with a single append. Concurrent operations on the same path
//! must be serialized by the caller.

use crate::error::{Error, Result};
use crate::options::Options;
use crate::types::MetadataRecord;
use crate::{parser, writer};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Read the metadata record carried by the file at `path`
pub fn read(path: impl AsRef<Path>) -> Result<MetadataRecord> {
    read_with(path, &Options::default())
}

/// Read the metadata record carried by the file at `path`, with explicit options
pub fn read_with(path: impl AsRef<Path>, options: &Options) -> Result<MetadataRecord> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidParameters("empty path"));
    }

    let buffer = read_whole(path)?;
    tracing::debug!(path = %path.display(), size = buffer.len(), "read host file");

    parser::parse_with(&buffer, options)
}

/// Append `record` as a trailer to the file at `path`
pub fn append(path: impl AsRef<Path>, record: &MetadataRecord) -> Result<()> {
    append_with(path, record, &Options::default())
}

/// Append `record` as a trailer to the file at `path`, with explicit options
///
/// The block offset written is the file's current length. An empty host is
/// refused because its block would sit at offset 0, which readers reject.
pub fn append_with(
    path: impl AsRef<Path>,
    record: &MetadataRecord,
    options: &Options,
) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidParameters("empty path"));
    }

    let write_err = |source: io::Error| Error::FileWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => write_err(e),
        })?;

    let host_len = file.metadata().map_err(write_err)?.len();
    if host_len == 0 {
        return Err(Error::InvalidOffset {
            reason: "host file is empty",
        });
    }

    let block = writer::encode_record_with(record, host_len, options)?;
    file.write_all(&block).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    tracing::debug!(
        path = %path.display(),
        offset = host_len,
        size = block.len(),
        "appended metadata block"
    );
    Ok(())
}

fn read_whole(path: &Path) -> Result<Vec<u8>> {
    let io_err = |source: io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => io_err(e),
    })?;

    let expected = file.metadata().map_err(io_err)?.len();
    let capacity = usize::try_from(expected).map_err(|_| Error::AllocationFailed {
        field: "File",
        size: usize::MAX,
    })?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| Error::AllocationFailed {
            field: "File",
            size: capacity,
        })?;
    file.read_to_end(&mut buffer).map_err(io_err)?;

    if buffer.len() as u64 != expected {
        tracing::warn!(expected, actual = buffer.len(), "read size mismatch");
        return Err(Error::ReadSizeMismatch {
            expected,
            actual: buffer.len() as u64,
        });
    }

    Ok(buffer)
}
