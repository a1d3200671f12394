//! Convert command implementation
//!
//! Converts a list of MSU1 files and reports progress and a summary.

use anyhow::{Context, Result};
use colored::Colorize;
use msu2wav_core::{
    run_batch, run_batch_with, BatchReport, Conversion, ConvertError, ConvertOptions,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Run the convert command
///
/// # Arguments
/// * `files` - MSU1 inputs, converted in order
/// * `options` - Output modes, error policy and output directory
/// * `json_output` - Whether to print a machine-readable JSON report
///
/// # Returns
/// Exit code: 0 if every file converted, 1 otherwise
pub fn run(files: &[PathBuf], options: &ConvertOptions, json_output: bool) -> Result<ExitCode> {
    log::debug!("converting {} file(s) with {:?}", files.len(), options);

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = if json_output {
        // Loop values are carried in the report; stdout holds only the JSON.
        let report = run_batch(files, options, &mut io::sink());
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize batch report")?;
        writeln!(out, "{}", json).context("Failed to write batch report")?;
        report
    } else {
        run_human(files, options, &mut out)
    };

    out.flush().context("Failed to flush stdout")?;

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Run the batch with colored progress on stderr; stdout carries only the
/// loop values requested with `-o`.
fn run_human<W: Write>(files: &[PathBuf], options: &ConvertOptions, out: &mut W) -> BatchReport {
    let start = Instant::now();
    let total = files.len();
    let mut index = 0;

    let report = run_batch_with(files, options, out, |input, result| {
        index += 1;
        print_item(index, total, input, result);
    });

    print_summary(&report, start.elapsed().as_secs_f64());
    report
}

fn print_item(
    index: usize,
    total: usize,
    input: &Path,
    result: &Result<Conversion, ConvertError>,
) {
    let progress = format!("[{}/{}]", index, total).cyan().bold();
    eprintln!("{} {}", progress, input.display());

    match result {
        Ok(conversion) => {
            let details = format!(
                "loop {} • {:.2}s{}",
                conversion.loop_start,
                conversion.duration_seconds,
                if conversion.sampler_loop.is_some() {
                    " • smpl"
                } else {
                    ""
                }
            );
            eprintln!(
                "  {} {} {}",
                "✓".green().bold(),
                conversion.output.display(),
                details.dimmed()
            );
        }
        Err(e) => {
            eprintln!("  {} [{}] {}", "✗".red().bold(), e.code(), e);
        }
    }
}

fn print_summary(report: &BatchReport, elapsed_secs: f64) {
    let failed = report.failures.len();

    eprintln!(
        "\n{} {} {}",
        "Summary".bold(),
        "•".dimmed(),
        format!("{:.1}s", elapsed_secs).dimmed()
    );
    eprintln!("  Converted: {}", report.converted.len().to_string().green());
    eprintln!(
        "  Failed:    {}",
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().normal()
        }
    );
    if !report.skipped.is_empty() {
        eprintln!(
            "  Skipped:   {} {}",
            report.skipped.len().to_string().yellow(),
            "(stopped at first failure)".dimmed()
        );
    }
}
