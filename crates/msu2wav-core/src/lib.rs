//! msu2wav core
//!
//! Converts MSU1 streamed-PCM audio into RIFF/WAVE files.
//!
//! # Overview
//!
//! An MSU1 file carries an 8-byte header (`MSU1` magic plus a little-endian
//! loop start in sample frames) followed by raw 16-bit stereo PCM at
//! 44100 Hz. Conversion wraps that payload in a canonical 44-byte WAV header
//! and can record the loop point three ways:
//!
//! - **File name**: `track.msu` becomes `track__lp<loop>.wav`
//! - **Report channel**: the decimal loop value is written out, one per line
//! - **Sampler chunk**: a `smpl` chunk with one forward loop is appended
//!
//! # Example
//!
//! ```no_run
//! use msu2wav_core::{run_batch, ConvertOptions, OutputModes};
//!
//! let options = ConvertOptions {
//!     modes: OutputModes::from_flags(false, true, true),
//!     ..Default::default()
//! };
//! let report = run_batch(&["track-1.pcm"], &options, &mut std::io::stdout());
//! assert!(report.is_success());
//! ```
//!
//! # Crate Structure
//!
//! - [`wav`] - RIFF header and `smpl` chunk encoding
//! - [`msu`] - MSU1 header decoding
//! - [`convert_file()`] - Single-file conversion
//! - [`run_batch()`] - Batch conversion with a configurable [`ErrorPolicy`]

pub mod batch;
pub mod convert;
pub mod error;
pub mod msu;
pub mod options;
pub mod wav;

// Re-export main types at crate root
pub use batch::{run_batch, run_batch_with, BatchFailure, BatchReport};
pub use convert::{convert_file, output_path, Conversion};
pub use error::{ConvertError, ConvertResult, MsuFormatError};
pub use msu::{MsuFile, MsuHeader};
pub use options::{ConvertOptions, ErrorPolicy, OutputModes};
pub use wav::WavHeader;
