use fidelity_image::{Image, ImageError, SampleType};

use super::{psnr, ssim_with_config, SsimConfig};

/// PSNR, in dB, above which the normalized PSNR saturates at one.
pub const PSNR_CEILING_DB: f64 = 50.0;

/// Combine a PSNR and an SSIM score into one number.
///
/// `composite = 0.5 · min(psnr / 50, 1) + 0.5 · ssim`
///
/// An infinite PSNR normalizes to one.
///
/// # Errors
///
/// Returns an error if `psnr` or `ssim` is negative or NaN.
///
/// # Example
///
/// ```
/// use fidelity_imgproc::metrics::composite_score;
///
/// assert_eq!(composite_score(f64::INFINITY, 1.0).unwrap(), 1.0);
/// assert_eq!(composite_score(25.0, 0.5).unwrap(), 0.5);
/// assert!(composite_score(-1.0, 0.5).is_err());
/// ```
pub fn composite_score(psnr: f64, ssim: f64) -> Result<f64, ImageError> {
    if psnr.is_nan() || psnr < 0.0 {
        return Err(ImageError::InvalidParameter("psnr", psnr));
    }
    if ssim.is_nan() || ssim < 0.0 {
        return Err(ImageError::InvalidParameter("ssim", ssim));
    }

    let normalized = (psnr / PSNR_CEILING_DB).min(1.0);
    Ok(0.5 * normalized + 0.5 * ssim)
}

/// The quality of a candidate image against a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityResult {
    /// Peak signal-to-noise ratio in dB, infinite for identical images.
    pub psnr: f64,
    /// Structural similarity index.
    pub ssim: f64,
    /// Combination of both, see [`composite_score`].
    pub composite: f64,
}

impl QualityResult {
    /// Build a result from already computed scores.
    pub fn new(psnr: f64, ssim: f64) -> Result<Self, ImageError> {
        Ok(Self {
            psnr,
            ssim,
            composite: composite_score(psnr, ssim)?,
        })
    }

    /// Compare `candidate` against `reference` with the default SSIM parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if an image is empty, the sizes do not match or the
    /// SSIM is negative.
    pub fn compute<T: SampleType, const C: usize>(
        reference: &Image<T, C>,
        candidate: &Image<T, C>,
    ) -> Result<Self, ImageError> {
        Self::compute_with_config(reference, candidate, &SsimConfig::default())
    }

    /// Compare `candidate` against `reference` with custom SSIM parameters.
    pub fn compute_with_config<T: SampleType, const C: usize>(
        reference: &Image<T, C>,
        candidate: &Image<T, C>,
        config: &SsimConfig,
    ) -> Result<Self, ImageError> {
        let psnr = psnr(reference, candidate)?;
        let ssim = ssim_with_config(reference, candidate, config)?;
        let result = Self::new(psnr, ssim)?;

        log::debug!(
            "quality {}: psnr {:.4} dB, ssim {:.6}, composite {:.6}",
            reference.size(),
            result.psnr,
            result.ssim,
            result.composite
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fidelity_image::ImageSize;

    #[test]
    fn test_composite_bounds() -> Result<(), ImageError> {
        assert_eq!(composite_score(50.0, 1.0)?, 1.0);
        assert_eq!(composite_score(80.0, 1.0)?, 1.0);
        assert_eq!(composite_score(f64::INFINITY, 1.0)?, 1.0);
        assert_eq!(composite_score(0.0, 0.0)?, 0.0);
        assert_relative_eq!(composite_score(30.0, 0.9)?, 0.75, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_composite_invalid() {
        assert_eq!(
            composite_score(-1.0, 0.5),
            Err(ImageError::InvalidParameter("psnr", -1.0))
        );
        assert_eq!(
            composite_score(10.0, -0.2),
            Err(ImageError::InvalidParameter("ssim", -0.2))
        );
        assert!(composite_score(f64::NAN, 0.5).is_err());
        assert!(composite_score(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_quality_identical() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let img = Image::<u8, 3>::from_size_val(size, 100)?;

        let result = QualityResult::compute(&img, &img)?;
        assert_eq!(result.psnr, f64::INFINITY);
        assert_eq!(result.ssim, 1.0);
        assert_eq!(result.composite, 1.0);

        Ok(())
    }

    #[test]
    fn test_quality_identical_gray() -> Result<(), ImageError> {
        let img = Image::<u8, 1>::from_size_val([4, 4].into(), 100)?;

        let result = QualityResult::compute(&img, &img)?;
        assert_eq!(result.psnr, f64::INFINITY);
        assert_eq!(result.ssim, 1.0);
        assert_eq!(result.composite, 1.0);

        Ok(())
    }

    #[test]
    fn test_quality_offset() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let reference = Image::<u8, 3>::from_size_val(size, 100)?;
        let candidate = Image::<u8, 3>::from_size_val(size, 110)?;

        let result = QualityResult::compute(&reference, &candidate)?;
        assert_relative_eq!(result.psnr, 28.130803608679106, epsilon = 1e-9);
        assert!(result.ssim < 1.0);
        assert_relative_eq!(
            result.composite,
            0.5 * result.psnr / 50.0 + 0.5 * result.ssim,
            epsilon = 1e-12
        );

        let mismatch = Image::<u8, 3>::from_size_val([4, 5].into(), 100)?;
        assert_eq!(
            QualityResult::compute(&reference, &mismatch),
            Err(ImageError::InvalidImageSize(4, 4, 4, 5))
        );

        Ok(())
    }
}
