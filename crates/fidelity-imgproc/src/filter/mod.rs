//! Filter operations
//!
//! Every filter reads out of range neighbors through the clamped border
//! accessor, accumulates in `f64` and stores into the sample domain of the
//! destination.

/// Edge preserving bilateral filter
mod bilateral;
pub use bilateral::*;

/// Dense 2D convolution
mod convolution;
pub use convolution::*;

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
