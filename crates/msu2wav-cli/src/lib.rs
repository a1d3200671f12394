//! msu2wav CLI library.
//!
//! Command implementations behind the `msu2wav` binary.

pub mod commands;
