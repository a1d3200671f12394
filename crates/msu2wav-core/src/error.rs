//! Error types for MSU1 decoding and conversion.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Structural problems with an MSU1 stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsuFormatError {
    /// The stream does not start with `MSU1`.
    #[error("bad magic: expected \"MSU1\", found {found:02x?}")]
    BadMagic {
        /// The leading bytes actually present (up to 4).
        found: Vec<u8>,
    },

    /// The magic is present but the loop field is cut off.
    #[error("truncated header: stream is {len} bytes, need at least 8")]
    TruncatedHeader {
        /// Total stream length.
        len: usize,
    },

    /// The payload is too large for the RIFF size fields.
    #[error("payload of {len} bytes does not fit a RIFF container")]
    PayloadTooLarge {
        /// Payload length in bytes.
        len: u64,
    },
}

/// Errors that can occur while converting one file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Open {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Input is not a usable MSU1 stream.
    #[error("{}: {source}", path.display())]
    Format {
        /// Input path.
        path: PathBuf,
        /// What is wrong with the stream.
        #[source]
        source: MsuFormatError,
    },

    /// Output could not be created or truncated.
    #[error("cannot create {}: {source}", path.display())]
    WriteOpen {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output was opened but writing to it failed.
    #[error("failed writing {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The loop value could not be written to the report channel.
    #[error("failed to report loop point: {source}")]
    Report {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Open { .. } => "MSU_001",
            ConvertError::Format { .. } => "MSU_002",
            ConvertError::WriteOpen { .. } => "MSU_003",
            ConvertError::Write { .. } => "MSU_004",
            ConvertError::Report { .. } => "MSU_005",
        }
    }

    /// Short category name.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::Open { .. } => "open",
            ConvertError::Format { .. } => "format",
            ConvertError::WriteOpen { .. } => "write_open",
            ConvertError::Write { .. } => "write",
            ConvertError::Report { .. } => "report",
        }
    }
}
