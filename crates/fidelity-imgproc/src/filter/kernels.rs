use fidelity_image::ImageError;

use crate::validate::{ensure_non_negative, ensure_sigma};

/// Force a kernel size to be odd so the kernel has a center tap.
///
/// Even sizes are incremented by one, odd sizes are returned unchanged.
pub fn odd_kernel_size(kernel_size: usize) -> usize {
    if kernel_size % 2 == 0 {
        kernel_size + 1
    } else {
        kernel_size
    }
}

/// Unnormalized gaussian `exp(-(x / σ)² / 2)`.
///
/// A zero distance weighs exactly one for every positive `sigma`, even when
/// `sigma²` underflows. An infinite `sigma` weighs every distance one.
pub(crate) fn gaussian_weight(distance: f64, sigma: f64) -> f64 {
    (-0.5 * (distance / sigma).powi(2)).exp()
}

/// Create a gaussian blur kernel.
///
/// The weight at the centered offset `i` is `exp(-i² / (2σ²))`; the weights are
/// normalized to sum to one so filtering preserves the overall brightness.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Even sizes are incremented by one.
/// * `sigma` - The standard deviation of the gaussian.
///
/// # Returns
///
/// A vector of the kernel.
///
/// # Errors
///
/// Returns an error if `kernel_size` is zero or `sigma` is not a finite positive number.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Result<Vec<f64>, ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    ensure_sigma(sigma)?;

    let kernel_size = odd_kernel_size(kernel_size);
    let mean = (kernel_size / 2) as f64;

    // compute the kernel
    let mut kernel = (0..kernel_size)
        .map(|i| gaussian_weight(i as f64 - mean, sigma))
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);

    Ok(kernel)
}

/// A dense two dimensional kernel with odd sides and a centered anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel2d {
    width: usize,
    height: usize,
    weights: Vec<f64>,
}

impl Kernel2d {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a side is zero or even, or if the number of weights
    /// does not match `width * height`.
    pub fn new(width: usize, height: usize, weights: Vec<f64>) -> Result<Self, ImageError> {
        for side in [width, height] {
            if side == 0 || side % 2 == 0 {
                return Err(ImageError::InvalidKernelSize(side));
            }
        }

        if weights.len() != width * height {
            return Err(ImageError::InvalidKernelLength(
                weights.len(),
                width * height,
            ));
        }

        Ok(Self {
            width,
            height,
            weights,
        })
    }

    /// Width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at column `x` and row `y`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.weights.get(y * self.width + x).copied()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Create the fixed 3x3 sharpen kernel.
///
/// ```text
///  0      -a      0
/// -a   1 + 4a    -a
///  0      -a      0
/// ```
///
/// The weights sum to one for any `amount`, so flat regions are left untouched.
///
/// # Errors
///
/// Returns an error if `amount` is negative or not finite.
pub fn sharpen_kernel(amount: f64) -> Result<Kernel2d, ImageError> {
    ensure_non_negative("amount", amount)?;

    #[rustfmt::skip]
    let weights = vec![
        0.0,     -amount,            0.0,
        -amount, 1.0 + 4.0 * amount, -amount,
        0.0,     -amount,            0.0,
    ];
    Kernel2d::new(3, 3, weights)
}
