//! Treesync common core types and utilities.

pub mod error;
pub mod types;

pub use error::{Error, ErrorCode, Result};
pub use types::*;
