use fidelity_image::{Image, ImageError, SampleType};

use crate::{
    filter::gaussian_blur,
    parallel::{for_each_row, ExecutionStrategy},
    validate::{ensure_non_negative, ensure_not_empty, ensure_same_size},
};

/// Sharpen an image by amplifying its difference with a blurred copy.
///
/// For every sample:
///
/// ```text
/// detail = original - blurred
/// detail = 0                        if |detail| < threshold
/// dst    = clamp(original + amount * detail, 0, MAX)
/// ```
///
/// # Arguments
///
/// * `original` - The image to sharpen with shape (H, W, C).
/// * `blurred` - A blurred version of `original` with shape (H, W, C).
/// * `dst` - The output image with shape (H, W, C).
/// * `amount` - Gain applied to the detail layer.
/// * `threshold` - Details smaller than this are treated as noise and dropped.
///
/// # Errors
///
/// Returns an error if an input is empty, the sizes do not match, or `amount`
/// or `threshold` is negative or not finite.
pub fn unsharp_mask<T: SampleType, const C: usize>(
    original: &Image<T, C>,
    blurred: &Image<T, C>,
    dst: &mut Image<T, C>,
    amount: f64,
    threshold: f64,
) -> Result<(), ImageError> {
    ensure_not_empty(original)?;
    ensure_not_empty(blurred)?;
    ensure_same_size(original, blurred)?;
    ensure_same_size(original, dst)?;
    ensure_non_negative("amount", amount)?;
    ensure_non_negative("threshold", threshold)?;

    let row_len = original.cols() * C;
    let original_data = original.as_slice();
    let blurred_data = blurred.as_slice();

    for_each_row(
        dst.as_slice_mut(),
        row_len,
        original.size().area(),
        ExecutionStrategy::default(),
        |r, dst_row| {
            let range = r * row_len..(r + 1) * row_len;
            dst_row
                .iter_mut()
                .zip(original_data[range.clone()].iter())
                .zip(blurred_data[range].iter())
                .for_each(|((d, &o), &b)| {
                    let o = o.as_f64();
                    let mut detail = o - b.as_f64();
                    if detail.abs() < threshold {
                        detail = 0.0;
                    }
                    *d = T::from_f64(o + amount * detail);
                });
        },
    );

    Ok(())
}

/// Parameters of the blur then unsharp mask enhancement pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    /// Size of the gaussian kernel.
    pub kernel_size: usize,
    /// Standard deviation of the gaussian kernel.
    pub sigma: f64,
    /// Gain applied to the detail layer.
    pub amount: f64,
    /// Noise gate of the detail layer.
    pub threshold: f64,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            sigma: 1.0,
            amount: 1.5,
            threshold: 0.0,
        }
    }
}

impl EnhanceParams {
    /// Set the gaussian kernel size.
    pub fn with_kernel_size(mut self, kernel_size: usize) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    /// Set the gaussian sigma.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the sharpening amount.
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    /// Set the detail threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Enhance an image with a gaussian blur followed by an unsharp mask against it.
///
/// # Errors
///
/// Returns an error if a parameter is invalid, `src` is empty or `dst` has a
/// different size.
pub fn enhance<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    params: &EnhanceParams,
) -> Result<(), ImageError> {
    let mut blurred = Image::from_size_val(src.size(), T::default())?;
    gaussian_blur(src, &mut blurred, params.kernel_size, params.sigma)?;
    unsharp_mask(src, &blurred, dst, params.amount, params.threshold)
}
