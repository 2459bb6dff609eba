use fidelity_image::{Image, ImageError, SampleType};

use crate::validate::{ensure_not_empty, ensure_same_size};

/// Compute the mean squared error (MSE) between two images.
///
/// The MSE is defined as:
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// where `I_1` and `I_2` are the two images and `n` is the number of samples
/// over all channels. The sum is accumulated in `f64`.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Returns
///
/// The mean squared error between the two images.
///
/// # Example
///
/// ```
/// use fidelity_image::{Image, ImageSize};
/// use fidelity_imgproc::metrics::mse;
///
/// let image1 = Image::<u8, 1>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///    },
///    vec![0, 1, 2, 3],
/// )
/// .unwrap();
///
/// let image2 = Image::<u8, 1>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///    },
///    vec![0, 3, 2, 3],
/// )
/// .unwrap();
///
/// let mse = mse(&image1, &image2).unwrap();
/// assert_eq!(mse, 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if an image is empty or the sizes do not match.
pub fn mse<T: SampleType, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f64, ImageError> {
    ensure_not_empty(image1)?;
    ensure_same_size(image1, image2)?;

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| {
            let d = a.as_f64() - b.as_f64();
            d * d
        })
        .sum::<f64>();

    Ok(sum / image1.numel() as f64)
}

/// Compute the peak signal-to-noise ratio (PSNR) between two images.
///
/// The PSNR is defined as:
///
/// $ PSNR = 10 \log_{10} \left( \frac{MAX^2}{MSE} \right) $
///
/// where `MAX` is the largest value of the sample domain (255 for `u8`,
/// 65535 for `u16` and 1.0 for floats) and `MSE` is the mean squared error.
///
/// Identical images have a PSNR of `f64::INFINITY`.
///
/// # Example
///
/// ```
/// use fidelity_image::Image;
/// use fidelity_imgproc::metrics::psnr;
///
/// let image1 = Image::<u8, 1>::from_size_val([4, 4].into(), 100).unwrap();
/// let image2 = Image::<u8, 1>::from_size_val([4, 4].into(), 110).unwrap();
///
/// assert_eq!(psnr(&image1, &image1).unwrap(), f64::INFINITY);
/// assert!((psnr(&image1, &image2).unwrap() - 28.1308).abs() < 1e-4);
/// ```
///
/// # Errors
///
/// Returns an error if an image is empty or the sizes do not match.
///
/// # Note
///
/// The PSNR is expressed in decibels (dB). The higher the PSNR, the closer the
/// two images. Underneath, the PSNR is based on the mean squared error [mse].
pub fn psnr<T: SampleType, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f64, ImageError> {
    psnr_with_max(image1, image2, T::MAX)
}

/// Compute the PSNR with an explicit peak value.
///
/// Useful for float images whose samples are not normalized to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if `max_value` is not a finite positive number, an image is
/// empty or the sizes do not match.
pub fn psnr_with_max<T: SampleType, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
    max_value: f64,
) -> Result<f64, ImageError> {
    if !(max_value.is_finite() && max_value > 0.0) {
        return Err(ImageError::InvalidParameter("max_value", max_value));
    }

    let mse = mse(image1, image2)?;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(10.0 * (max_value * max_value / mse).log10())
}
