#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// Any format supported by the `image` crate can be read; the written format
/// follows the file extension.
pub mod functional;

pub use crate::error::IoError;
