// Licensed under the Apache-2.0 license

use std::path::PathBuf;

use thiserror::Error;

pub type BootImageResult<T> = Result<T, BootImageError>;

/// Every failure the packer can hit. None of them are transient, so none are
/// retried.
#[derive(Error, Debug)]
pub enum BootImageError {
    #[error("malformed DER signature at byte {offset}: {reason}")]
    MalformedSignatureEncoding { offset: usize, reason: &'static str },
    #[error("malformed public key: expected a {expected} byte uncompressed point (marker 0x04), got {actual} bytes with marker {marker:?}")]
    MalformedKeyEncoding {
        expected: usize,
        actual: usize,
        marker: Option<u8>,
    },
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    #[error("{region} does not fit: addr=0x{addr:x} off={offset} len=0x{len:x} (buffer 0x{size:x} bytes)")]
    PlacementOutOfBounds {
        region: String,
        addr: u32,
        offset: i64,
        len: usize,
        size: usize,
    },
    #[error("{region} [0x{start:x}..0x{end:x}) overlaps {other} [0x{other_start:x}..0x{other_end:x})")]
    PlacementOverlap {
        region: String,
        start: u64,
        end: u64,
        other: String,
        other_start: u64,
        other_end: u64,
    },
    #[error("{what} 0x{value:x} is not aligned to {align} bytes")]
    MisalignedOffset {
        what: &'static str,
        value: u64,
        align: u32,
    },
    #[error("signing failed: `{command}`: {detail}")]
    ExternalSigningFailure { command: String, detail: String },
    #[error("line {line}: malformed hex word {content:?}: {reason}")]
    MalformedHexLine {
        line: usize,
        content: String,
        reason: &'static str,
    },
    #[error("need {expected} bytes for a boot header, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },
    #[error("invalid boot header: {0}")]
    InvalidHeader(&'static str),
    #[error("payload of {0} bytes does not fit the header length fields")]
    PayloadTooLarge(usize),
    #[error("invalid layout {path:?}: {detail}")]
    Layout { path: PathBuf, detail: String },
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
