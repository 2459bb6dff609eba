#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// image quality metrics module.
pub mod metrics;

/// module containing parallelization utilities.
pub mod parallel;

mod plane;
mod validate;
