//! Header builder: computes every size field of the output container from
//! the payload length and the optional loop point.

use std::io::{self, Write};

use super::format::WavFormat;
use super::header::{RiffHeader, RIFF_HEADER_SIZE};
use super::smpl::{SamplerChunk, SMPL_CHUNK_SIZE};

/// Largest payload whose RIFF size field still fits in a u32 with a
/// sampler chunk attached.
pub const MAX_PAYLOAD_LEN: u32 = u32::MAX - (RIFF_HEADER_SIZE - 8 + SMPL_CHUNK_SIZE) as u32;

/// Everything written around the PCM payload of one output file.
///
/// Built fresh per file; nothing here carries over between conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Header written before the payload.
    pub riff: RiffHeader,
    /// Sampler chunk written after the payload, if loop metadata is embedded.
    pub sampler: Option<SamplerChunk>,
}

impl WavHeader {
    /// Builds the header for `payload_len` bytes of MSU1 PCM.
    ///
    /// `loop_start` is `Some` only when a sampler chunk should be embedded.
    /// `payload_len` must not exceed [`MAX_PAYLOAD_LEN`].
    pub fn build(payload_len: u32, loop_start: Option<u32>) -> Self {
        let sampler = loop_start.map(|start| SamplerChunk::single_loop(start, payload_len));

        let mut riff = RiffHeader::new(WavFormat::msu(), payload_len);
        if sampler.is_some() {
            riff.trailing_chunk_size = SMPL_CHUNK_SIZE as u32;
        }

        Self { riff, sampler }
    }

    /// Total size of the output file, payload included.
    pub fn file_size(&self) -> u64 {
        self.riff.riff_size() as u64 + 8
    }

    /// Writes the 44-byte header.
    pub fn write_header<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.riff.write(writer)
    }

    /// Writes the sampler chunk, if any.
    pub fn write_trailer<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match &self.sampler {
            Some(chunk) => chunk.write(writer),
            None => Ok(()),
        }
    }

    /// Writes a complete WAV file: header, payload, then trailer.
    pub fn write_wav<W: Write>(&self, writer: &mut W, payload: &[u8]) -> io::Result<()> {
        self.write_header(writer)?;
        writer.write_all(payload)?;
        self.write_trailer(writer)
    }

    /// Writes a complete WAV file to a byte vector.
    pub fn write_wav_to_vec(&self, payload: &[u8]) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.file_size() as usize);
        self.write_wav(&mut buffer, payload)
            .expect("writing to Vec should not fail");
        buffer
    }
}
