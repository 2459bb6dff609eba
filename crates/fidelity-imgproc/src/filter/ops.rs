use fidelity_image::{Image, ImageError, SampleType};

use super::{filter2d_with_strategy, kernels, separable_filter_with_strategy};
use crate::parallel::ExecutionStrategy;

/// Blur an image using a gaussian blur filter
///
/// The same 1D kernel is applied on both axes.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel. Even sizes are incremented by one.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Errors
///
/// Returns an error if the kernel parameters are invalid, `src` is empty or
/// `dst` has a different size.
pub fn gaussian_blur<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    sigma: f64,
) -> Result<(), ImageError> {
    gaussian_blur_with_strategy(src, dst, kernel_size, sigma, ExecutionStrategy::default())
}

/// Blur an image using a gaussian blur filter and an explicit execution strategy.
pub fn gaussian_blur_with_strategy<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: usize,
    sigma: f64,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma)?;
    separable_filter_with_strategy(src, dst, &kernel, &kernel, strategy)
}

/// Sharpen an image with the fixed 3x3 sharpen kernel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `amount` - The strength of the sharpening, see [`kernels::sharpen_kernel`].
///
/// # Errors
///
/// Returns an error if `amount` is negative or not finite, `src` is empty or
/// `dst` has a different size.
pub fn sharpen<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    amount: f64,
) -> Result<(), ImageError> {
    let kernel = kernels::sharpen_kernel(amount)?;
    filter2d_with_strategy(src, dst, &kernel, ExecutionStrategy::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelity_image::ImageSize;

    #[test]
    fn test_gaussian_blur() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = Image::<u8, 1>::new(
            size,
            (0..25).map(|x| x as u8 * 10).collect(),
        )?;

        let mut dst = Image::<_, 1>::from_size_val(size, 0)?;

        gaussian_blur(&img, &mut dst, 3, 0.5)?;

        // a linear ramp is preserved away from the clamped border
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(dst.get_pixel(x, y, 0)?, img.get_pixel(x, y, 0)?);
            }
        }

        // the border replicates, which pulls the corner towards its inner neighbors
        assert!(dst.get_pixel(0, 0, 0)? > img.get_pixel(0, 0, 0)?);
        assert!(dst.get_pixel(4, 4, 0)? < img.get_pixel(4, 4, 0)?);

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_uniform() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 13,
            height: 9,
        };

        for value in [0u8, 1, 77, 254, 255] {
            let img = Image::<u8, 3>::from_size_val(size, value)?;
            let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;
            gaussian_blur(&img, &mut dst, 7, 2.0)?;
            assert_eq!(dst, img);
        }

        let img = Image::<u16, 1>::from_size_val(size, 40_000)?;
        let mut dst = Image::<u16, 1>::from_size_val(size, 0)?;
        gaussian_blur(&img, &mut dst, 11, 1.5)?;
        assert_eq!(dst, img);

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_tiny_sigma() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let flat = Image::<u8, 1>::from_size_val(size, 100)?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        gaussian_blur(&flat, &mut dst, 3, 1e-200)?;
        assert_eq!(dst, flat);

        // the kernel degenerates to the identity
        let img = Image::<u8, 1>::from_fn(size, |x, y, _| (x * 50 + y * 7) as u8);
        gaussian_blur(&img, &mut dst, 5, 1e-200)?;
        assert_eq!(dst, img);

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_even_kernel() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let img = Image::<u8, 1>::from_fn(size, |x, y, _| if x == 3 && y == 3 { 200 } else { 0 });

        let mut even = Image::<u8, 1>::from_size_val(size, 0)?;
        let mut odd = Image::<u8, 1>::from_size_val(size, 0)?;
        gaussian_blur(&img, &mut even, 4, 1.0)?;
        gaussian_blur(&img, &mut odd, 5, 1.0)?;

        assert_eq!(even, odd);

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_invalid() -> Result<(), ImageError> {
        let img = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;
        let mut dst = img.clone();

        assert_eq!(
            gaussian_blur(&img, &mut dst, 0, 1.0),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(
            gaussian_blur(&img, &mut dst, 3, 0.0),
            Err(ImageError::InvalidSigma(0.0))
        );

        let empty = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        let mut empty_dst = empty.clone();
        assert_eq!(
            gaussian_blur(&empty, &mut empty_dst, 3, 1.0),
            Err(ImageError::EmptyImage)
        );

        Ok(())
    }

    #[test]
    fn test_sharpen() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 1,
        };
        let img = Image::<u8, 1>::new(size, vec![100, 100, 140, 140])?;
        let mut dst = Image::<u8, 1>::from_size_val(size, 0)?;

        sharpen(&img, &mut dst, 0.5)?;

        // vertical neighbors replicate the single row and cancel out
        assert_eq!(dst.as_slice(), &[100, 80, 160, 140]);

        Ok(())
    }

    #[test]
    fn test_sharpen_uniform_and_zero_amount() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let flat = Image::<u8, 3>::from_size_val(size, 123)?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;
        sharpen(&flat, &mut dst, 2.0)?;
        assert_eq!(dst, flat);

        let img = Image::<u8, 3>::from_fn(size, |x, y, ch| (x * 40 + y * 3 + ch) as u8);
        sharpen(&img, &mut dst, 0.0)?;
        assert_eq!(dst, img);

        assert_eq!(
            sharpen(&img, &mut dst, -0.1),
            Err(ImageError::InvalidParameter("amount", -0.1))
        );
        assert!(sharpen(&img, &mut dst, f64::NAN).is_err());

        Ok(())
    }
}
