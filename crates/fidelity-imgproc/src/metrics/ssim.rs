use fidelity_image::{Image, ImageError, SampleType};

use crate::{
    filter::{kernels::gaussian_kernel_1d, weighted_local_average},
    plane::to_plane,
    validate::{ensure_not_empty, ensure_same_size, ensure_sigma},
};

/// Dynamic range `L` used to derive the SSIM stability constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DynamicRange {
    /// `L = 255` whatever the sample domain.
    #[default]
    EightBit,
    /// `L` is the largest value of the sample domain.
    SampleDomain,
}

impl DynamicRange {
    /// The value of `L` for samples of type `T`.
    pub fn value<T: SampleType>(&self) -> f64 {
        match self {
            DynamicRange::EightBit => 255.0,
            DynamicRange::SampleDomain => T::MAX,
        }
    }
}

/// How the per-channel SSIM maps are reduced to one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelReduction {
    /// Mean of the map of the first channel only.
    #[default]
    FirstChannel,
    /// Mean of the maps of every channel.
    MeanOfChannels,
}

/// Parameters of the structural similarity index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsimConfig {
    /// Size of the gaussian window.
    pub window_size: usize,
    /// Standard deviation of the gaussian window.
    pub sigma: f64,
    /// Luminance stability factor, `C1 = (k1 · L)²`.
    pub k1: f64,
    /// Contrast stability factor, `C2 = (k2 · L)²`.
    pub k2: f64,
    /// Source of `L`.
    pub dynamic_range: DynamicRange,
    /// Channel reduction of the final score.
    pub reduction: ChannelReduction,
}

impl Default for SsimConfig {
    fn default() -> Self {
        Self {
            window_size: 11,
            sigma: 1.5,
            k1: 0.01,
            k2: 0.03,
            dynamic_range: DynamicRange::default(),
            reduction: ChannelReduction::default(),
        }
    }
}

impl SsimConfig {
    /// Set the window size.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the window sigma.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the dynamic range.
    pub fn with_dynamic_range(mut self, dynamic_range: DynamicRange) -> Self {
        self.dynamic_range = dynamic_range;
        self
    }

    /// Set the channel reduction.
    pub fn with_reduction(mut self, reduction: ChannelReduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// The constants `(C1, C2)` for samples of type `T`.
    pub fn stability_constants<T: SampleType>(&self) -> (f64, f64) {
        let l = self.dynamic_range.value::<T>();
        ((self.k1 * l).powi(2), (self.k2 * l).powi(2))
    }

    fn validate(&self) -> Result<(), ImageError> {
        if self.window_size == 0 {
            return Err(ImageError::InvalidKernelSize(self.window_size));
        }
        ensure_sigma(self.sigma)?;
        for (name, k) in [("k1", self.k1), ("k2", self.k2)] {
            if !(k.is_finite() && k > 0.0) {
                return Err(ImageError::InvalidParameter(name, k));
            }
        }
        Ok(())
    }
}

/// Compute the per-pixel structural similarity map of two images.
///
/// With `μ`, `σ²` and `σ_ab` the gaussian windowed means, variances and
/// covariance, every sample of the map is
///
/// ```text
/// (2 μa μb + C1) (2 σab + C2) / ((μa² + μb² + C1) (σa² + σb² + C2))
/// ```
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an image is empty or the
/// sizes do not match.
pub fn ssim_map<T: SampleType, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
    config: &SsimConfig,
) -> Result<Image<f64, C>, ImageError> {
    config.validate()?;
    ensure_not_empty(image1)?;
    ensure_same_size(image1, image2)?;

    let size = image1.size();
    let window = gaussian_kernel_1d(config.window_size, config.sigma)?;

    let a = to_plane(image1);
    let b = to_plane(image2);
    let a_sq = a.iter().map(|v| v * v).collect::<Vec<_>>();
    let b_sq = b.iter().map(|v| v * v).collect::<Vec<_>>();
    let ab = a.iter().zip(b.iter()).map(|(x, y)| x * y).collect::<Vec<_>>();

    let mu_a = weighted_local_average(&a, size, C, &window)?;
    let mu_b = weighted_local_average(&b, size, C, &window)?;
    let e_a_sq = weighted_local_average(&a_sq, size, C, &window)?;
    let e_b_sq = weighted_local_average(&b_sq, size, C, &window)?;
    let e_ab = weighted_local_average(&ab, size, C, &window)?;

    let (c1, c2) = config.stability_constants::<T>();

    let map = (0..a.len())
        .map(|i| {
            let (ma, mb) = (mu_a[i], mu_b[i]);
            let var_a = e_a_sq[i] - ma * ma;
            let var_b = e_b_sq[i] - mb * mb;
            let cov = e_ab[i] - ma * mb;

            let numerator = (2.0 * ma * mb + c1) * (2.0 * cov + c2);
            let denominator = (ma * ma + mb * mb + c1) * (var_a + var_b + c2);
            numerator / denominator
        })
        .collect();

    Image::new(size, map)
}

/// Compute the structural similarity index (SSIM) with a custom configuration.
///
/// # Errors
///
/// See [`ssim_map`].
pub fn ssim_with_config<T: SampleType, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
    config: &SsimConfig,
) -> Result<f64, ImageError> {
    let map = ssim_map(image1, image2, config)?;
    let data = map.as_slice();

    let score = match config.reduction {
        ChannelReduction::FirstChannel => {
            data.iter().step_by(C).sum::<f64>() / map.size().area() as f64
        }
        ChannelReduction::MeanOfChannels => data.iter().sum::<f64>() / data.len() as f64,
    };

    Ok(score)
}

/// Compute the structural similarity index (SSIM) between two images.
///
/// Uses an 11x11 gaussian window with `σ = 1.5`, the constants
/// `C1 = (0.01 · 255)²` and `C2 = (0.03 · 255)²` and reports the mean over the
/// first channel. Identical images score exactly 1.
///
/// # Example
///
/// ```
/// use fidelity_image::Image;
/// use fidelity_imgproc::metrics::ssim;
///
/// let image = Image::<u8, 3>::from_size_val([4, 4].into(), 100).unwrap();
/// assert_eq!(ssim(&image, &image).unwrap(), 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if an image is empty or the sizes do not match.
pub fn ssim<T: SampleType, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f64, ImageError> {
    ssim_with_config(image1, image2, &SsimConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fidelity_image::ImageSize;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn textured(size: ImageSize, seed: u64) -> Result<Image<u8, 3>, ImageError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..size.area() * 3)
            .map(|_| rng.random_range(60..180u8))
            .collect();
        Image::new(size, data)
    }

    #[test]
    fn test_ssim_identity() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 24,
            height: 17,
        };
        let img = textured(size, 7)?;

        assert_relative_eq!(ssim(&img, &img)?, 1.0, epsilon = 1e-12);

        let map = ssim_map(&img, &img, &SsimConfig::default())?;
        for &v in map.as_slice() {
            assert_relative_eq!(v, 1.0, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_ssim_scenario_uniform() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let img = Image::<u8, 3>::from_size_val(size, 100)?;
        assert_relative_eq!(ssim(&img, &img)?, 1.0, epsilon = 1e-12);

        // a uniform offset only changes the luminance term
        let brighter = Image::<u8, 3>::from_size_val(size, 110)?;
        let (c1, _) = SsimConfig::default().stability_constants::<u8>();
        let expected = (2.0 * 100.0 * 110.0 + c1) / (100.0f64.powi(2) + 110.0f64.powi(2) + c1);
        assert_relative_eq!(ssim(&img, &brighter)?, expected, epsilon = 1e-9);

        Ok(())
    }

    #[test]
    fn test_ssim_symmetric() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 20,
            height: 20,
        };
        let img1 = textured(size, 1)?;
        let img2 = textured(size, 2)?;

        let forward = ssim(&img1, &img2)?;
        let backward = ssim(&img2, &img1)?;
        assert_relative_eq!(forward, backward, epsilon = 1e-12);
        assert!(forward < 1.0);

        Ok(())
    }

    #[test]
    fn test_ssim_monotonic_offset() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 16,
            height: 16,
        };
        let base = textured(size, 3)?;

        let mut previous = 1.0 + 1e-12;
        for delta in [0u8, 5, 10, 20, 40, 70] {
            let shifted = Image::<u8, 3>::new(
                size,
                base.as_slice().iter().map(|&v| v + delta).collect(),
            )?;
            let score = ssim(&base, &shifted)?;
            assert!(score < previous, "delta {delta}: {score} >= {previous}");
            previous = score;
        }

        Ok(())
    }

    #[test]
    fn test_ssim_noise_lowers_score() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 32,
            height: 32,
        };
        let clean = Image::<u8, 1>::from_fn(size, |x, y, _| ((x / 4 + y / 4) % 2 * 120 + 60) as u8);

        let mut rng = StdRng::seed_from_u64(42);
        let noisy = Image::<u8, 1>::new(
            size,
            clean
                .as_slice()
                .iter()
                .map(|&v| (v as i32 + rng.random_range(-30..=30)).clamp(0, 255) as u8)
                .collect(),
        )?;

        let score = ssim(&clean, &noisy)?;
        assert!(score > 0.0 && score < 0.99, "score {score}");

        Ok(())
    }

    #[test]
    fn test_ssim_channel_reduction() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let img1 = Image::<u8, 3>::from_size_val(size, 100)?;
        // only the second channel differs
        let img2 = Image::<u8, 3>::from_fn(size, |_, _, ch| if ch == 1 { 150 } else { 100 });

        let first = ssim(&img1, &img2)?;
        assert_relative_eq!(first, 1.0, epsilon = 1e-12);

        let config = SsimConfig::default().with_reduction(ChannelReduction::MeanOfChannels);
        let mean = ssim_with_config(&img1, &img2, &config)?;
        assert!(mean < 1.0);

        let map = ssim_map(&img1, &img2, &config)?;
        let second = map.get_pixel(2, 2, 1)?;
        assert_relative_eq!(mean, (2.0 + second) / 3.0, epsilon = 1e-9);

        Ok(())
    }

    #[test]
    fn test_ssim_dynamic_range() -> Result<(), ImageError> {
        let config = SsimConfig::default();
        let (c1, c2) = config.stability_constants::<f32>();
        assert_relative_eq!(c1, 6.5025, epsilon = 1e-12);
        assert_relative_eq!(c2, 58.5225, epsilon = 1e-12);

        let config = config.with_dynamic_range(DynamicRange::SampleDomain);
        let (c1, c2) = config.stability_constants::<f32>();
        assert_relative_eq!(c1, 1e-4, epsilon = 1e-12);
        assert_relative_eq!(c2, 9e-4, epsilon = 1e-12);
        let (c1, _) = config.stability_constants::<u16>();
        assert_relative_eq!(c1, (0.01f64 * 65535.0).powi(2), epsilon = 1e-9);

        // float images are nearly identical under the 8-bit constants
        let size = ImageSize {
            width: 8,
            height: 8,
        };
        let img1 = Image::<f32, 1>::from_fn(size, |x, y, _| ((x + y) % 3) as f32 / 4.0);
        let img2 = Image::<f32, 1>::from_fn(size, |x, y, _| ((x * y) % 3) as f32 / 4.0);
        let eight_bit = ssim(&img1, &img2)?;
        let sample_domain = ssim_with_config(&img1, &img2, &config)?;
        assert!(eight_bit > 0.99);
        assert!(sample_domain < eight_bit);

        Ok(())
    }

    #[test]
    fn test_ssim_errors() -> Result<(), ImageError> {
        let img1 = Image::<u8, 1>::from_size_val([5, 5].into(), 0)?;
        let img2 = Image::<u8, 1>::from_size_val([5, 4].into(), 0)?;
        let empty = Image::<u8, 1>::new([0, 5].into(), vec![])?;

        assert_eq!(ssim(&img1, &img2), Err(ImageError::InvalidImageSize(5, 5, 5, 4)));
        assert_eq!(ssim(&empty, &empty), Err(ImageError::EmptyImage));
        assert_eq!(
            ssim_with_config(&img1, &img1, &SsimConfig::default().with_window_size(0)),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(
            ssim_with_config(&img1, &img1, &SsimConfig::default().with_sigma(-1.0)),
            Err(ImageError::InvalidSigma(-1.0))
        );
        let config = SsimConfig {
            k2: 0.0,
            ..Default::default()
        };
        assert_eq!(
            ssim_with_config(&img1, &img1, &config),
            Err(ImageError::InvalidParameter("k2", 0.0))
        );

        Ok(())
    }
}
