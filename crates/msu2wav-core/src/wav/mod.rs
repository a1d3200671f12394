//! RIFF/WAVE encoding for MSU1 payloads.
//!
//! All multi-byte fields are encoded field by field in little-endian order,
//! so the output does not depend on host struct layout or endianness.

mod builder;
mod format;
mod header;
mod pcm;
mod smpl;


// Re-export public API
pub use builder::{WavHeader, MAX_PAYLOAD_LEN};
pub use format::{WavFormat, FMT_CHUNK_SIZE, WAVE_FORMAT_PCM};
pub use header::{RiffHeader, RIFF_HEADER_SIZE};
pub use pcm::{compute_pcm_hash, extract_pcm_data, pcm_hash};
pub use smpl::{
    read_sampler_loop, LoopType, SampleLoop, SamplerChunk, MIDI_UNITY_NOTE, SMPL_CHUNK_BODY_SIZE,
    SMPL_CHUNK_SIZE,
};
