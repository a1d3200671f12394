//! Integration tests for file conversion and batch handling.
//!
//! Tests verify:
//! - Output header fields against the source length
//! - Byte-exact payload copy and smpl loop fields
//! - Output naming for each reporting mode
//! - Abort and continue batch policies
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p msu2wav-core --test convert
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use msu2wav_core::wav::{compute_pcm_hash, extract_pcm_data, read_sampler_loop, LoopType};
use msu2wav_core::{
    convert_file, run_batch, run_batch_with, ConvertError, ConvertOptions, ErrorPolicy,
    MsuFormatError, OutputModes,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Builds an MSU1 stream whose payload is `payload_len` bytes of a ramp pattern.
fn msu_bytes(loop_start: u32, payload_len: usize) -> Vec<u8> {
    let mut data = b"MSU1".to_vec();
    data.extend_from_slice(&loop_start.to_le_bytes());
    data.extend((0..payload_len).map(|i| (i * 7 % 251) as u8));
    data
}

fn write_msu(dir: &Path, name: &str, loop_start: u32, payload_len: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, msu_bytes(loop_start, payload_len)).unwrap();
    path
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
}

fn options(name: bool, print: bool, smpl: bool) -> ConvertOptions {
    ConvertOptions {
        modes: OutputModes::from_flags(name, print, smpl),
        ..Default::default()
    }
}

// =========================================================================
// Single-file conversion
// =========================================================================

#[test]
fn test_header_sizes_without_sampler() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "track.msu", 12345, 1000);
    let len = fs::metadata(&input).unwrap().len() as u32;

    let conversion = convert_file(&input, &options(false, false, false), &mut io::sink()).unwrap();
    assert_eq!(conversion.output, dir.path().join("track__lp12345.wav"));

    let wav = fs::read(&conversion.output).unwrap();
    assert_eq!(wav.len() as u32, 44 + len - 8);
    assert_eq!(u32_at(&wav, 4), 36 + (len - 8));
    assert_eq!(u32_at(&wav, 40), len - 8);
    assert!(read_sampler_loop(&wav).is_none());
}

#[test]
fn test_payload_copied_verbatim() {
    let dir = tempdir().unwrap();
    let source = msu_bytes(0, 4096);
    let input = dir.path().join("song.pcm");
    fs::write(&input, &source).unwrap();

    let conversion = convert_file(&input, &options(false, false, true), &mut io::sink()).unwrap();
    let wav = fs::read(&conversion.output).unwrap();

    assert_eq!(&wav[44..44 + 4096], &source[8..]);
    assert_eq!(extract_pcm_data(&wav).unwrap(), &source[8..]);
    assert_eq!(compute_pcm_hash(&wav).unwrap(), conversion.pcm_hash);
}

#[test]
fn test_sampler_chunk_fields() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "loop.msu", 0x3039, 1002);
    let len = 8 + 1002u32;

    let conversion = convert_file(&input, &options(false, false, true), &mut io::sink()).unwrap();
    assert_eq!(conversion.output, dir.path().join("loop.wav"));

    let wav = fs::read(&conversion.output).unwrap();
    assert_eq!(wav.len() as u32, 44 + (len - 8) + 68);
    assert_eq!(u32_at(&wav, 4), 36 + (len - 8) + 68);

    let chunk = &wav[44 + 1002..];
    assert_eq!(&chunk[0..4], b"smpl");
    assert_eq!(u32_at(chunk, 4), 60);

    let lp = conversion.sampler_loop.expect("smpl requested");
    assert_eq!(lp.start, 12345);
    assert_eq!(lp.end, (len - 8) / 4);
    assert_eq!(lp.loop_type, LoopType::Forward);
    assert_eq!(lp.play_count, 0);
    assert_eq!(u32_at(chunk, 52), 12345);
    assert_eq!(u32_at(chunk, 56), 250);
}

#[test]
fn test_sampler_loop_read_back() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "loop.msu", 99, 400);

    let conversion = convert_file(&input, &options(true, false, true), &mut io::sink()).unwrap();
    assert_eq!(conversion.output, dir.path().join("loop__lp99.wav"));

    let wav = fs::read(&conversion.output).unwrap();
    assert_eq!(read_sampler_loop(&wav), conversion.sampler_loop);
}

#[test]
fn test_sampler_loop_read_back_odd_payload() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "odd.msu", 5, 1001);

    let conversion = convert_file(&input, &options(false, false, true), &mut io::sink()).unwrap();
    let wav = fs::read(&conversion.output).unwrap();
    assert_eq!(wav.len(), 44 + 1001 + 68);
    assert_eq!(&wav[1045..1049], b"smpl");

    let sampler_loop = read_sampler_loop(&wav).unwrap();
    assert_eq!(Some(sampler_loop), conversion.sampler_loop);
    assert_eq!(sampler_loop.start, 5);
    assert_eq!(sampler_loop.end, 250);
    assert_eq!(extract_pcm_data(&wav).unwrap().len(), 1001);
}

#[test]
fn test_print_loop_reports_decimal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("t.msu");
    fs::write(&input, b"MSU1\x39\x30\x00\x00\x00\x00\x00\x00").unwrap();

    let mut out = Vec::new();
    let conversion = convert_file(&input, &options(false, true, false), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "12345\n");
    assert_eq!(conversion.output, dir.path().join("t.wav"));
}

#[test]
fn test_print_disabled_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "t.msu", 5, 16);

    let mut out = Vec::new();
    convert_file(&input, &options(true, false, true), &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_header_only_input() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "empty.msu", 0, 0);

    let conversion = convert_file(&input, &options(false, false, false), &mut io::sink()).unwrap();
    let wav = fs::read(&conversion.output).unwrap();
    assert_eq!(wav.len(), 44);
    assert_eq!(u32_at(&wav, 4), 36);
    assert_eq!(conversion.duration_seconds, 0.0);
}

#[test]
fn test_duration() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "one-second.msu", 0, 176400);

    let conversion = convert_file(&input, &options(false, false, false), &mut io::sink()).unwrap();
    assert_eq!(conversion.duration_seconds, 1.0);
}

#[test]
fn test_idempotent() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "again.msu", 777, 2048);
    let opts = options(true, false, true);

    let first = convert_file(&input, &opts, &mut io::sink()).unwrap();
    let first_bytes = fs::read(&first.output).unwrap();
    let second = convert_file(&input, &opts, &mut io::sink()).unwrap();
    let second_bytes = fs::read(&second.output).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_out_dir() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    let input = write_msu(dir.path(), "track.msu", 1, 8);

    let opts = ConvertOptions {
        out_dir: Some(out.path().to_path_buf()),
        ..Default::default()
    };
    let conversion = convert_file(&input, &opts, &mut io::sink()).unwrap();
    assert_eq!(conversion.output, out.path().join("track__lp1.wav"));
    assert!(conversion.output.exists());
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_missing_input_is_open_error() {
    let dir = tempdir().unwrap();
    let err = convert_file(
        &dir.path().join("missing.msu"),
        &ConvertOptions::default(),
        &mut io::sink(),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Open { .. }));
}

#[test]
fn test_bad_magic_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.msu");
    fs::write(&input, b"RIFF\0\0\0\0payload").unwrap();

    let mut out = Vec::new();
    let err = convert_file(&input, &options(true, true, true), &mut out).unwrap_err();

    match err {
        ConvertError::Format { path, source } => {
            assert_eq!(path, input);
            assert!(matches!(source, MsuFormatError::BadMagic { .. }));
        }
        other => panic!("expected format error, got {other:?}"),
    }
    assert!(out.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_unwritable_destination() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "track.msu", 0, 8);
    let opts = ConvertOptions {
        out_dir: Some(dir.path().join("does-not-exist")),
        ..Default::default()
    };

    let err = convert_file(&input, &opts, &mut io::sink()).unwrap_err();
    assert!(matches!(err, ConvertError::WriteOpen { .. }));
    assert_eq!(err.kind(), "write_open");
}

// =========================================================================
// Batch policies
// =========================================================================

#[test]
fn test_batch_headers_do_not_accumulate() {
    let dir = tempdir().unwrap();
    let a = write_msu(dir.path(), "a.msu", 1, 4000);
    let b = write_msu(dir.path(), "b.msu", 2, 40);

    let report = run_batch(&[a, b], &options(false, false, true), &mut io::sink());
    assert!(report.is_success());

    let wav_b = fs::read(dir.path().join("b.wav")).unwrap();
    assert_eq!(u32_at(&wav_b, 4), 36 + 40 + 68);
    assert_eq!(u32_at(&wav_b, 40), 40);
    assert_eq!(read_sampler_loop(&wav_b).unwrap().end, 10);
}

#[test]
fn test_batch_abort_skips_remaining() {
    let dir = tempdir().unwrap();
    let good = write_msu(dir.path(), "1.msu", 10, 16);
    let bad = dir.path().join("2.msu");
    fs::write(&bad, b"NOPE\0\0\0\0").unwrap();
    let after = write_msu(dir.path(), "3.msu", 30, 16);

    let opts = ConvertOptions {
        modes: OutputModes::from_flags(false, true, false),
        error_policy: ErrorPolicy::Abort,
        ..Default::default()
    };
    let mut out = Vec::new();
    let report = run_batch(&[good, bad.clone(), after.clone()], &opts, &mut out);

    assert!(report.aborted);
    assert!(!report.is_success());
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].input, bad);
    assert_eq!(report.failures[0].kind, "format");
    assert_eq!(report.skipped, vec![after]);
    assert_eq!(report.total(), 3);

    assert_eq!(String::from_utf8(out).unwrap(), "10\n");
    assert!(dir.path().join("1.wav").exists());
    assert!(!dir.path().join("2.wav").exists());
    assert!(!dir.path().join("3.wav").exists());
}

#[test]
fn test_batch_abort_on_missing_input() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("1.msu");
    let second = write_msu(dir.path(), "2.msu", 20, 16);
    let third = write_msu(dir.path(), "3.msu", 30, 16);

    let opts = ConvertOptions {
        error_policy: ErrorPolicy::Abort,
        ..Default::default()
    };
    let report = run_batch(
        &[missing.clone(), second.clone(), third.clone()],
        &opts,
        &mut io::sink(),
    );

    assert!(report.aborted);
    assert!(report.converted.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].input, missing);
    assert_eq!(report.failures[0].kind, "open");
    assert_eq!(report.failures[0].code, "MSU_001");
    assert_eq!(report.skipped, vec![second, third]);
    assert!(!dir.path().join("2__lp20.wav").exists());
}

#[test]
fn test_batch_abort_on_unwritable_destination() {
    let dir = tempdir().unwrap();
    let first = write_msu(dir.path(), "1.msu", 10, 16);
    let second = write_msu(dir.path(), "2.msu", 20, 16);

    let opts = ConvertOptions {
        modes: OutputModes::from_flags(false, true, false),
        error_policy: ErrorPolicy::Abort,
        out_dir: Some(dir.path().join("no/such/dir")),
    };
    let mut out = Vec::new();
    let report = run_batch(&[first.clone(), second.clone()], &opts, &mut out);

    assert!(report.aborted);
    assert!(report.converted.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].input, first);
    assert_eq!(report.failures[0].kind, "write_open");
    assert_eq!(report.failures[0].code, "MSU_003");
    assert_eq!(report.skipped, vec![second]);

    // The loop line is reported before the output is opened
    assert_eq!(String::from_utf8(out).unwrap(), "10\n");
}

#[test]
fn test_batch_continue_converts_the_rest() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("1.msu");
    fs::write(&bad, b"MS").unwrap();
    let missing = dir.path().join("2.msu");
    let good = write_msu(dir.path(), "3.msu", 30, 16);

    let mut seen = Vec::new();
    let report = run_batch_with(
        &[bad, missing, good],
        &options(false, true, false),
        &mut io::sink(),
        |path, result| seen.push((path.to_path_buf(), result.is_ok())),
    );

    assert!(!report.aborted);
    assert!(report.skipped.is_empty());
    assert_eq!(report.converted.len(), 1);
    let kinds: Vec<_> = report.failures.iter().map(|f| f.kind.as_str()).collect();
    assert_eq!(kinds, vec!["format", "open"]);
    assert_eq!(seen.len(), 3);
    assert!(seen[2].1);
    assert!(dir.path().join("3.wav").exists());
}

#[test]
fn test_batch_report_json() {
    let dir = tempdir().unwrap();
    let input = write_msu(dir.path(), "x.msu", 4, 8);

    let report = run_batch(&[input], &options(true, false, true), &mut io::sink());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["converted"][0]["loop_start"], 4);
    assert_eq!(json["converted"][0]["sampler_loop"]["loop_type"], "forward");
    assert_eq!(json["options"]["error_policy"], "continue");
    assert_eq!(json["aborted"], false);
}
