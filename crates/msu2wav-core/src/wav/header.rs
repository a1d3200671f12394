//! RIFF/WAVE header: the RIFF descriptor, the `fmt ` chunk and the `data`
//! chunk preamble.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

use super::format::{WavFormat, FMT_CHUNK_SIZE, WAVE_FORMAT_PCM};

/// Size of the canonical PCM header (12 + 24 + 8 bytes).
pub const RIFF_HEADER_SIZE: usize = 44;

/// Bytes of the header counted by the RIFF size field (everything after it).
const RIFF_SIZE_BASE: u32 = RIFF_HEADER_SIZE as u32 - 8;

/// Canonical 44-byte RIFF/WAVE header.
///
/// `trailing_chunk_size` covers chunks written after the PCM data (the
/// `smpl` chunk), which still live inside the RIFF container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffHeader {
    /// `fmt ` chunk parameters.
    pub format: WavFormat,
    /// Size of the `data` chunk payload in bytes.
    pub data_size: u32,
    /// On-disk size of all chunks that follow the PCM data.
    pub trailing_chunk_size: u32,
}

impl RiffHeader {
    /// Creates a header for `data_size` bytes of PCM with nothing after it.
    pub fn new(format: WavFormat, data_size: u32) -> Self {
        Self {
            format,
            data_size,
            trailing_chunk_size: 0,
        }
    }

    /// Value of the RIFF chunk size field (file size minus 8).
    pub fn riff_size(&self) -> u32 {
        RIFF_SIZE_BASE + self.data_size + self.trailing_chunk_size
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // RIFF descriptor
        writer.write_all(b"RIFF")?;
        writer.write_u32::<LittleEndian>(self.riff_size())?;
        writer.write_all(b"WAVE")?;

        // fmt chunk
        writer.write_all(b"fmt ")?;
        writer.write_u32::<LittleEndian>(FMT_CHUNK_SIZE)?;
        writer.write_u16::<LittleEndian>(WAVE_FORMAT_PCM)?;
        writer.write_u16::<LittleEndian>(self.format.channels)?;
        writer.write_u32::<LittleEndian>(self.format.sample_rate)?;
        writer.write_u32::<LittleEndian>(self.format.byte_rate())?;
        writer.write_u16::<LittleEndian>(self.format.block_align())?;
        writer.write_u16::<LittleEndian>(self.format.bits_per_sample)?;

        // data chunk preamble; the payload itself is copied by the caller
        writer.write_all(b"data")?;
        writer.write_u32::<LittleEndian>(self.data_size)?;

        Ok(())
    }

    /// Encodes the header into a fixed-size buffer.
    pub fn to_bytes(&self) -> [u8; RIFF_HEADER_SIZE] {
        let mut buf = [0u8; RIFF_HEADER_SIZE];
        let mut cursor = &mut buf[..];
        self.write(&mut cursor)
            .expect("header fits its fixed-size buffer");
        buf
    }
}
