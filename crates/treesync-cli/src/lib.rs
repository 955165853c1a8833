//! Treesync CLI library
//!
//! Command surface of the `treesync` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, Exit};
