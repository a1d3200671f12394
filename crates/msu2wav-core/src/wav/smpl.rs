//! Sampler (`smpl`) chunk carrying a single loop region.
//!
//! Layout (all fields little-endian u32):
//!
//! | offset | field                 |
//! |--------|-----------------------|
//! | 0      | `"smpl"`              |
//! | 4      | chunk size (60)       |
//! | 8      | manufacturer          |
//! | 12     | product               |
//! | 16     | sample period         |
//! | 20     | MIDI unity note       |
//! | 24     | MIDI pitch fraction   |
//! | 28     | SMPTE format          |
//! | 32     | SMPTE offset          |
//! | 36     | number of loops       |
//! | 40     | sampler data size     |
//! | 44     | loop record (24 bytes)|

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Chunk identifier.
pub const SMPL_CHUNK_ID: &[u8; 4] = b"smpl";

/// Size of one loop record.
pub const SAMPLE_LOOP_SIZE: usize = 24;

/// Value of the chunk size field for a chunk with one loop.
pub const SMPL_CHUNK_BODY_SIZE: u32 = 36 + SAMPLE_LOOP_SIZE as u32;

/// Total on-disk size of the chunk, including its 8-byte preamble.
pub const SMPL_CHUNK_SIZE: usize = 8 + SMPL_CHUNK_BODY_SIZE as usize;

/// MIDI note that plays the sample at its recorded pitch (middle C).
pub const MIDI_UNITY_NOTE: u32 = 60;

/// Bytes per 16-bit stereo sample frame.
const BYTES_PER_FRAME: u32 = 4;

/// Loop playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    /// Play start to end, then jump back to start.
    Forward,
    /// Alternate direction at each end.
    PingPong,
    /// Play end to start.
    Backward,
}

impl LoopType {
    fn code(self) -> u32 {
        match self {
            LoopType::Forward => 0,
            LoopType::PingPong => 1,
            LoopType::Backward => 2,
        }
    }

    fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(LoopType::Forward),
            1 => Some(LoopType::PingPong),
            2 => Some(LoopType::Backward),
            _ => None,
        }
    }
}

/// One loop region, expressed in sample frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLoop {
    /// Cue point identifier.
    pub cue_point_id: u32,
    /// Loop direction.
    pub loop_type: LoopType,
    /// First frame of the loop.
    pub start: u32,
    /// Last frame of the loop.
    pub end: u32,
    /// Fractional frame offset.
    pub fraction: u32,
    /// Repeat count (0 = infinite).
    pub play_count: u32,
}

impl SampleLoop {
    /// Forward loop from `start` to the frame count of `payload_len` bytes.
    pub fn forward(start: u32, payload_len: u32) -> Self {
        Self {
            cue_point_id: 0,
            loop_type: LoopType::Forward,
            start,
            end: payload_len / BYTES_PER_FRAME,
            fraction: 0,
            play_count: 0,
        }
    }

    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.cue_point_id)?;
        writer.write_u32::<LittleEndian>(self.loop_type.code())?;
        writer.write_u32::<LittleEndian>(self.start)?;
        writer.write_u32::<LittleEndian>(self.end)?;
        writer.write_u32::<LittleEndian>(self.fraction)?;
        writer.write_u32::<LittleEndian>(self.play_count)?;
        Ok(())
    }

    fn parse(record: &[u8]) -> Option<Self> {
        if record.len() < SAMPLE_LOOP_SIZE {
            return None;
        }
        let field = |i: usize| LittleEndian::read_u32(&record[i * 4..i * 4 + 4]);
        Some(Self {
            cue_point_id: field(0),
            loop_type: LoopType::from_code(field(1))?,
            start: field(2),
            end: field(3),
            fraction: field(4),
            play_count: field(5),
        })
    }
}

/// Sampler chunk with exactly one loop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerChunk {
    /// MIDI note for unity playback.
    pub unity_note: u32,
    /// The loop region.
    pub sample_loop: SampleLoop,
}

impl SamplerChunk {
    /// Chunk looping forward from `loop_start` to the end of `payload_len`
    /// bytes of 16-bit stereo PCM.
    pub fn single_loop(loop_start: u32, payload_len: u32) -> Self {
        Self {
            unity_note: MIDI_UNITY_NOTE,
            sample_loop: SampleLoop::forward(loop_start, payload_len),
        }
    }

    /// Write the chunk to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(SMPL_CHUNK_ID)?;
        writer.write_u32::<LittleEndian>(SMPL_CHUNK_BODY_SIZE)?;

        writer.write_u32::<LittleEndian>(0)?; // manufacturer
        writer.write_u32::<LittleEndian>(0)?; // product
        writer.write_u32::<LittleEndian>(0)?; // sample period
        writer.write_u32::<LittleEndian>(self.unity_note)?;
        writer.write_u32::<LittleEndian>(0)?; // pitch fraction
        writer.write_u32::<LittleEndian>(0)?; // SMPTE format
        writer.write_u32::<LittleEndian>(0)?; // SMPTE offset
        writer.write_u32::<LittleEndian>(1)?; // number of loops
        writer.write_u32::<LittleEndian>(0)?; // sampler data size

        self.sample_loop.write(writer)
    }

    /// Encodes the chunk into a fixed-size buffer.
    pub fn to_bytes(&self) -> [u8; SMPL_CHUNK_SIZE] {
        let mut buf = [0u8; SMPL_CHUNK_SIZE];
        let mut cursor = &mut buf[..];
        self.write(&mut cursor)
            .expect("smpl chunk fits its fixed-size buffer");
        buf
    }
}

/// Reads the first loop record of the first `smpl` chunk in a WAV buffer.
///
/// Returns `None` if the buffer is not RIFF/WAVE, has no `smpl` chunk, or
/// the chunk declares no loops.
pub fn read_sampler_loop(wav_data: &[u8]) -> Option<SampleLoop> {
    let body = super::pcm::find_chunk(wav_data, SMPL_CHUNK_ID)?;
    if body.len() < SMPL_CHUNK_BODY_SIZE as usize {
        return None;
    }
    let num_loops = LittleEndian::read_u32(&body[28..32]);
    if num_loops == 0 {
        return None;
    }
    SampleLoop::parse(&body[36..])
}
