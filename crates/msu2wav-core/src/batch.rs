//! Batch conversion over a list of inputs.
//!
//! Each input is converted independently. Under [`ErrorPolicy::Abort`] the
//! first failure breaks out of the iteration and the remaining inputs are
//! reported as skipped without being opened.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use crate::convert::{convert_file, Conversion};
use crate::error::ConvertError;
use crate::options::{ConvertOptions, ErrorPolicy};

/// A failed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The input that failed.
    pub input: PathBuf,
    /// Stable error code (e.g. `MSU_002`).
    pub code: String,
    /// Error category (`open`, `format`, `write_open`, `write`, `report`).
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl BatchFailure {
    fn new(input: &Path, err: &ConvertError) -> Self {
        Self {
            input: input.to_path_buf(),
            code: err.code().to_string(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Settings the batch ran with.
    pub options: ConvertOptions,
    /// Successful conversions, in input order.
    pub converted: Vec<Conversion>,
    /// Failed inputs, in input order.
    pub failures: Vec<BatchFailure>,
    /// Inputs never attempted because the batch aborted.
    pub skipped: Vec<PathBuf>,
    /// Whether the batch stopped early.
    pub aborted: bool,
}

impl BatchReport {
    /// Number of inputs in the batch.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failures.len() + self.skipped.len()
    }

    /// True when every input converted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }
}

/// Converts every input, writing loop values to `report` when enabled.
pub fn run_batch<P, W>(inputs: &[P], options: &ConvertOptions, report: &mut W) -> BatchReport
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    run_batch_with(inputs, options, report, |_, _| {})
}

/// Like [`run_batch`], calling `on_item` after each attempted input.
pub fn run_batch_with<P, W, F>(
    inputs: &[P],
    options: &ConvertOptions,
    report: &mut W,
    mut on_item: F,
) -> BatchReport
where
    P: AsRef<Path>,
    W: Write + ?Sized,
    F: FnMut(&Path, &Result<Conversion, ConvertError>),
{
    let mut converted = Vec::new();
    let mut failures = Vec::new();
    let mut attempted = 0;

    let flow = inputs.iter().try_for_each(|input| {
        let input = input.as_ref();
        attempted += 1;

        let result = convert_file(input, options, &mut *report);
        on_item(input, &result);

        match result {
            Ok(conversion) => {
                converted.push(conversion);
                ControlFlow::Continue(())
            }
            Err(err) => {
                log::warn!("{}", err);
                failures.push(BatchFailure::new(input, &err));
                match options.error_policy {
                    ErrorPolicy::Continue => ControlFlow::Continue(()),
                    ErrorPolicy::Abort => ControlFlow::Break(()),
                }
            }
        }
    });

    let skipped: Vec<PathBuf> = inputs[attempted..]
        .iter()
        .map(|p| p.as_ref().to_path_buf())
        .collect();

    log::info!(
        "batch finished: {} converted, {} failed, {} skipped",
        converted.len(),
        failures.len(),
        skipped.len()
    );

    BatchReport {
        options: options.clone(),
        converted,
        failures,
        skipped,
        aborted: flow.is_break(),
    }
}
