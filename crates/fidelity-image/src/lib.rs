#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Boundary handling shared by every neighborhood operation.
pub mod border;

/// Error types for the image module.
pub mod error;

/// image representation for image quality processing.
pub mod image;

/// Sample domains (8-bit, 16-bit and normalized float).
pub mod sample;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::sample::SampleType;
