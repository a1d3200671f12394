//! RIFF chunk lookup, PCM extraction and hashing.

use byteorder::{ByteOrder, LittleEndian};

/// Finds the body of the first chunk with the given id in a RIFF/WAVE buffer.
pub(crate) fn find_chunk<'a>(wav_data: &'a [u8], id: &[u8; 4]) -> Option<&'a [u8]> {
    if wav_data.len() < 12 {
        return None;
    }

    // Verify RIFF header
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = LittleEndian::read_u32(&wav_data[pos + 4..pos + 8]) as usize;

        let body_start = pos + 8;
        let body_end = body_start.checked_add(chunk_size)?;
        if chunk_id == id {
            return wav_data.get(body_start..body_end);
        }

        pos = body_end;
        // Pad byte after an odd chunk; absent when the next chunk starts here
        if chunk_size % 2 != 0 && wav_data.get(body_end) == Some(&0) {
            pos += 1;
        }
    }

    None
}

/// Extracts PCM data from a WAV file buffer.
///
/// Returns `None` if the buffer is not RIFF/WAVE or the `data` chunk is
/// missing or truncated.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    find_chunk(wav_data, b"data")
}

/// BLAKE3 hash of a PCM payload, as lowercase hex.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Computes the PCM hash of a WAV file.
///
/// Returns `None` if the format is invalid.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(pcm_hash)
}
