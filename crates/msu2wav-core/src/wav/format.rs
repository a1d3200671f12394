//! WAV `fmt ` chunk parameters.

/// PCM format tag for the `fmt ` chunk (1 = uncompressed integer PCM).
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Size of the PCM `fmt ` chunk body.
pub const FMT_CHUNK_SIZE: u32 = 16;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// The only layout MSU1 streams carry: 16-bit stereo at 44100 Hz.
    pub const fn msu() -> Self {
        Self {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }

    /// Calculates block align (bytes per sample frame).
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    /// Calculates byte rate (bytes per second).
    pub fn byte_rate(&self) -> u32 {
        self.channels as u32 * self.bits_per_sample as u32 * self.sample_rate / 8
    }
}
