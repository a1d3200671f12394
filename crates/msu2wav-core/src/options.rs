//! Conversion settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the loop point of each input is recorded.
///
/// The three modes are independent and may be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputModes {
    /// Append `__lp<loop>` to the output file name.
    pub append_loop_to_filename: bool,
    /// Write the decimal loop value to the report channel.
    pub print_loop: bool,
    /// Embed a `smpl` chunk carrying the loop region.
    pub embed_sampler_chunk: bool,
}

impl OutputModes {
    /// Builds modes from individual switches, falling back to the file name
    /// suffix when none is set.
    pub fn from_flags(
        append_loop_to_filename: bool,
        print_loop: bool,
        embed_sampler_chunk: bool,
    ) -> Self {
        let any = append_loop_to_filename || print_loop || embed_sampler_chunk;
        Self {
            append_loop_to_filename: append_loop_to_filename || !any,
            print_loop,
            embed_sampler_chunk,
        }
    }
}

impl Default for OutputModes {
    fn default() -> Self {
        Self::from_flags(false, false, false)
    }
}

/// What a batch does when one input fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Record the failure and carry on with the next input.
    #[default]
    Continue,
    /// Stop at the first failure and skip every remaining input.
    Abort,
}

/// Settings shared by every file in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Loop point reporting modes.
    pub modes: OutputModes,
    /// Failure handling across inputs.
    pub error_policy: ErrorPolicy,
    /// Directory for outputs; `None` writes next to each input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}
