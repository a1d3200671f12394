//! Single-file MSU1 to WAV conversion.

use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};
use crate::msu::MsuFile;
use crate::options::ConvertOptions;
use crate::wav::{pcm_hash, SampleLoop, WavFormat, WavHeader};

/// Extension given to every output file.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Outcome of converting one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    /// Source MSU1 file.
    pub input: PathBuf,
    /// Written WAV file.
    pub output: PathBuf,
    /// Loop start in sample frames, as stored in the source header.
    pub loop_start: u32,
    /// Length of the PCM payload in bytes.
    pub payload_len: u32,
    /// Playback length of the payload.
    pub duration_seconds: f64,
    /// Loop region written to the `smpl` chunk, if one was embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler_loop: Option<SampleLoop>,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// Derives the output path for `input`.
///
/// Everything from the last dot of the file name on is replaced with `.wav`,
/// after an optional `__lp<loop_start>` suffix. Names without a dot are kept
/// whole, and a name whose only dot leads (`.msu`) keeps nothing before it.
/// The file lands in `out_dir` when given, otherwise next to the input.
pub fn output_path(
    input: &Path,
    loop_start: u32,
    append_loop: bool,
    out_dir: Option<&Path>,
) -> PathBuf {
    let file_name = input.file_name().unwrap_or_default();
    let stem = match input.file_stem() {
        // `file_stem` keeps leading-dot names whole
        Some(stem) if stem == file_name && file_name.to_string_lossy().starts_with('.') => {
            OsStr::new("")
        }
        Some(stem) => stem,
        None => OsStr::new(""),
    };

    let mut name: OsString = stem.to_os_string();
    if append_loop {
        name.push(format!("__lp{}", loop_start));
    }
    name.push(".");
    name.push(OUTPUT_EXTENSION);

    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Converts one MSU1 file to WAV.
///
/// When loop printing is enabled the decimal loop value is written to
/// `report` as soon as the header is parsed, before the output is created.
/// A failure after the output is created may leave a truncated file behind.
pub fn convert_file<W: Write + ?Sized>(
    input: &Path,
    options: &ConvertOptions,
    report: &mut W,
) -> ConvertResult<Conversion> {
    let data = fs::read(input).map_err(|source| ConvertError::Open {
        path: input.to_path_buf(),
        source,
    })?;

    let msu = MsuFile::from_bytes(data).map_err(|source| ConvertError::Format {
        path: input.to_path_buf(),
        source,
    })?;

    let modes = options.modes;
    let loop_start = msu.loop_start();

    if modes.print_loop {
        writeln!(report, "{}", loop_start).map_err(|source| ConvertError::Report { source })?;
    }

    let header = WavHeader::build(
        msu.payload_len(),
        modes.embed_sampler_chunk.then_some(loop_start),
    );

    let output = output_path(
        input,
        loop_start,
        modes.append_loop_to_filename,
        options.out_dir.as_deref(),
    );

    let file = File::create(&output).map_err(|source| ConvertError::WriteOpen {
        path: output.clone(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    header
        .write_wav(&mut writer, msu.payload())
        .and_then(|()| writer.flush())
        .map_err(|source| ConvertError::Write {
            path: output.clone(),
            source,
        })?;

    log::debug!("wrote {} ({} bytes)", output.display(), header.file_size());

    Ok(Conversion {
        input: input.to_path_buf(),
        output,
        loop_start,
        payload_len: msu.payload_len(),
        duration_seconds: msu.payload_len() as f64 / WavFormat::msu().byte_rate() as f64,
        sampler_loop: header.sampler.map(|chunk| chunk.sample_loop),
        pcm_hash: pcm_hash(msu.payload()),
    })
}
