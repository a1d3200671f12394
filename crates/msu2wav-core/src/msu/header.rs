//! MSU1 stream header.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::MsuFormatError;

/// MSU1 file magic identifier.
pub const MSU_MAGIC: &[u8; 4] = b"MSU1";

/// Size of the header preceding the PCM payload.
pub const MSU_HEADER_SIZE: usize = 8;

/// Parsed MSU1 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsuHeader {
    /// Sample frame playback resumes from after reaching the end.
    pub loop_start: u32,
}

impl MsuHeader {
    /// Parses the header at the start of `data`.
    ///
    /// Only the magic is validated; `loop_start` may point anywhere.
    pub fn parse(data: &[u8]) -> Result<Self, MsuFormatError> {
        let magic = &data[..data.len().min(MSU_MAGIC.len())];
        if magic != MSU_MAGIC {
            return Err(MsuFormatError::BadMagic {
                found: magic.to_vec(),
            });
        }

        if data.len() < MSU_HEADER_SIZE {
            return Err(MsuFormatError::TruncatedHeader { len: data.len() });
        }

        Ok(Self {
            loop_start: LittleEndian::read_u32(&data[4..MSU_HEADER_SIZE]),
        })
    }
}
