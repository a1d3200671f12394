//! msu2wav CLI - converts MSU1 PCM streams to WAV files
//!
//! Each input is written next to itself (or into `--out-dir`) with its
//! extension replaced by `.wav`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use msu2wav_cli::commands;
use msu2wav_core::{ConvertOptions, ErrorPolicy, OutputModes};

/// msu2wav - MSU1 to WAV converter
///
/// With none of -n, -o, -s given, -n is implied.
#[derive(Parser, Debug)]
#[command(name = "msu2wav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Append loop point to output filename (`<name>__lp<loop>.wav`)
    #[arg(short = 'n', long = "name")]
    name: bool,

    /// Print loop point to stdout
    #[arg(short = 'o', long = "stdout")]
    stdout: bool,

    /// Export loop point to a smpl chunk
    #[arg(short = 's', long = "smpl")]
    smpl: bool,

    /// Stop the whole batch at the first failing file
    #[arg(long)]
    fail_fast: bool,

    /// Directory to write outputs into (default: next to each input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output a machine-readable JSON batch report (no colored output)
    #[arg(long)]
    json: bool,

    /// MSU1 files to convert
    #[arg(required = true, value_name = "PCMFILES")]
    files: Vec<PathBuf>,
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            modes: OutputModes::from_flags(self.name, self.stdout, self.smpl),
            error_policy: if self.fail_fast {
                ErrorPolicy::Abort
            } else {
                ErrorPolicy::Continue
            },
            out_dir: self.out_dir.clone(),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let options = cli.convert_options();
    let result = commands::convert::run(&cli.files, &options, cli.json);

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
