use fidelity_image::{Image, ImageError, SampleType};

use crate::{
    filter::kernels::gaussian_weight,
    parallel::{for_each_row, ExecutionStrategy},
    validate::{ensure_sigma, ensure_src_dst},
};

/// Neighborhood cap of the fast bilateral preset.
pub const FAST_MAX_KERNEL_SIZE: usize = 9;

/// Parameters of the bilateral filter.
///
/// The neighborhood of every pixel is a `k × k` window with radius `k / 2`,
/// where `k` is [`BilateralConfig::effective_kernel_size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilateralConfig {
    /// Requested neighborhood size.
    pub kernel_size: usize,
    /// Standard deviation of the spatial gaussian, in pixels.
    pub sigma_space: f64,
    /// Standard deviation of the range gaussian, in squared sample units.
    ///
    /// `f64::INFINITY` makes the range weight uniform.
    pub sigma_range: f64,
    /// Upper bound applied to `kernel_size`, if any.
    pub max_kernel_size: Option<usize>,
    /// How rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl BilateralConfig {
    /// Full size bilateral filter without a neighborhood cap.
    pub fn new(kernel_size: usize, sigma_space: f64, sigma_range: f64) -> Self {
        Self {
            kernel_size,
            sigma_space,
            sigma_range,
            max_kernel_size: None,
            strategy: ExecutionStrategy::default(),
        }
    }

    /// Bounded cost preset: the neighborhood never exceeds [`FAST_MAX_KERNEL_SIZE`].
    ///
    /// Requests above the cap are silently filtered with the smaller window,
    /// so the result differs from [`BilateralConfig::new`] for large kernels.
    pub fn fast(kernel_size: usize, sigma_space: f64, sigma_range: f64) -> Self {
        Self::new(kernel_size, sigma_space, sigma_range)
            .with_max_kernel_size(Some(FAST_MAX_KERNEL_SIZE))
    }

    /// Set the neighborhood cap.
    pub fn with_max_kernel_size(mut self, max_kernel_size: Option<usize>) -> Self {
        self.max_kernel_size = max_kernel_size;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The neighborhood size actually used after applying the cap.
    pub fn effective_kernel_size(&self) -> usize {
        match self.max_kernel_size {
            Some(max) => self.kernel_size.min(max),
            None => self.kernel_size,
        }
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a size is zero, `sigma_space` is not a finite positive
    /// number or `sigma_range` is not positive (infinity is accepted).
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.kernel_size == 0 {
            return Err(ImageError::InvalidKernelSize(self.kernel_size));
        }
        if self.max_kernel_size == Some(0) {
            return Err(ImageError::InvalidKernelSize(0));
        }
        ensure_sigma(self.sigma_space)?;
        if self.sigma_range.is_nan() || self.sigma_range <= 0.0 {
            return Err(ImageError::InvalidSigma(self.sigma_range));
        }
        Ok(())
    }
}

/// Apply an edge preserving bilateral filter.
///
/// Every neighbor `q` of a pixel `p` is weighted by
/// `exp(-‖p - q‖² / (2σs²)) · exp(-D² / (2σr²))` where `D` is the sum over channels
/// of the squared differences between `q` and the center pixel `p`.
/// The output is the weighted mean of the neighborhood, per channel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the neighborhood.
/// * `sigma_space` - The spatial standard deviation.
/// * `sigma_range` - The range standard deviation.
pub fn bilateral_filter<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    sigma_space: f64,
    sigma_range: f64,
) -> Result<(), ImageError> {
    bilateral_filter_with_config(
        src,
        dst,
        &BilateralConfig::new(kernel_size, sigma_space, sigma_range),
    )
}

/// Apply a bilateral filter described by a [`BilateralConfig`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid, `src` is empty or `dst`
/// has a different size.
pub fn bilateral_filter_with_config<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    config: &BilateralConfig,
) -> Result<(), ImageError> {
    config.validate()?;
    ensure_src_dst(src, dst)?;

    let kernel_size = config.effective_kernel_size();
    if kernel_size < config.kernel_size {
        log::debug!(
            "bilateral kernel size capped from {} to {}",
            config.kernel_size,
            kernel_size
        );
    }

    // spatial weights only depend on the offset
    let radius = (kernel_size / 2) as isize;
    let spatial = (-radius..=radius)
        .flat_map(|dy| (-radius..=radius).map(move |dx| (dx, dy)))
        .map(|(dx, dy)| {
            let weight = gaussian_weight(dx as f64, config.sigma_space)
                * gaussian_weight(dy as f64, config.sigma_space);
            (dx, dy, weight)
        })
        .collect::<Vec<_>>();

    let cols = src.cols();

    for_each_row(
        dst.as_slice_mut(),
        cols * C,
        src.size().area(),
        config.strategy,
        |r, dst_row| {
            for c in 0..cols {
                let (x, y) = (c as isize, r as isize);
                let center = src.pixel_clamped(x, y);

                let mut acc = [0.0f64; C];
                let mut weight_sum = 0.0;

                for &(dx, dy, spatial_weight) in spatial.iter() {
                    let neighbor = src.pixel_clamped(x + dx, y + dy);

                    let color_dist = center
                        .iter()
                        .zip(neighbor.iter())
                        .map(|(&a, &b)| {
                            let d = a.as_f64() - b.as_f64();
                            d * d
                        })
                        .sum::<f64>();

                    let weight = spatial_weight * gaussian_weight(color_dist, config.sigma_range);

                    for (a, &v) in acc.iter_mut().zip(neighbor.iter()) {
                        *a += weight * v.as_f64();
                    }
                    weight_sum += weight;
                }

                // the center tap always has weight one
                for (d, &a) in dst_row[c * C..(c + 1) * C].iter_mut().zip(acc.iter()) {
                    *d = T::from_f64(a / weight_sum);
                }
            }
        },
    );

    Ok(())
}
