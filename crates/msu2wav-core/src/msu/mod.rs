//! MSU1 streamed-PCM container decoding.
//!
//! An MSU1 file is the magic `MSU1`, a little-endian u32 loop start (in
//! sample frames), then raw interleaved 16-bit stereo PCM at 44100 Hz.

mod header;

pub use header::{MsuHeader, MSU_HEADER_SIZE, MSU_MAGIC};

use crate::error::MsuFormatError;
use crate::wav::MAX_PAYLOAD_LEN;

/// A fully loaded MSU1 stream.
#[derive(Debug, Clone)]
pub struct MsuFile {
    header: MsuHeader,
    data: Vec<u8>,
}

impl MsuFile {
    /// Validates the header of a whole-file buffer and takes ownership of it.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, MsuFormatError> {
        let header = MsuHeader::parse(&data)?;

        let payload_len = (data.len() - MSU_HEADER_SIZE) as u64;
        if payload_len > MAX_PAYLOAD_LEN as u64 {
            return Err(MsuFormatError::PayloadTooLarge { len: payload_len });
        }

        log::debug!(
            "parsed MSU1 header: loop_start={} payload_len={}",
            header.loop_start,
            payload_len
        );

        Ok(Self { header, data })
    }

    /// The parsed header.
    pub fn header(&self) -> MsuHeader {
        self.header
    }

    /// Loop start in sample frames.
    pub fn loop_start(&self) -> u32 {
        self.header.loop_start
    }

    /// PCM bytes following the header.
    pub fn payload(&self) -> &[u8] {
        &self.data[MSU_HEADER_SIZE..]
    }

    /// Length of the PCM payload in bytes.
    pub fn payload_len(&self) -> u32 {
        // bounded by MAX_PAYLOAD_LEN in from_bytes
        self.payload().len() as u32
    }
}
