//! roadnet CLI library.
//!
//! Command handlers and output formatting for the `roadnet-cli` binary.

pub mod commands;
pub mod output;
