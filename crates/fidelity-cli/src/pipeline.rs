use std::fmt;

use fidelity::image::{Image, ImageError};
use fidelity::imgproc::{
    enhance::{unsharp_mask, EnhanceParams},
    filter::{bilateral_filter_with_config, gaussian_blur, sharpen, BilateralConfig},
};

/// Neighborhood of the edge preserving pipeline.
const BILATERAL_KERNEL_SIZE: usize = 9;
const BILATERAL_SIGMA_SPACE: f64 = 3.0;
const BILATERAL_SIGMA_RANGE: f64 = 300.0;

/// How a degraded image is enhanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Gaussian blur followed by an unsharp mask.
    Unsharp,
    /// Fast bilateral smoothing followed by the 3x3 sharpen kernel.
    Bilateral,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Unsharp => write!(f, "unsharp"),
            Method::Bilateral => write!(f, "bilateral"),
        }
    }
}

/// Images produced by [`run`].
pub struct Enhanced {
    /// The gaussian blurred input, only produced by [`Method::Unsharp`].
    pub blurred: Option<Image<u8, 3>>,
    pub enhanced: Image<u8, 3>,
}

/// The sharpen amount used by the bilateral pipeline.
pub fn bilateral_sharpen_amount(params: &EnhanceParams) -> f64 {
    params.amount / 3.0
}

/// Enhance `src` with the given method.
pub fn run(
    src: &Image<u8, 3>,
    method: Method,
    params: &EnhanceParams,
) -> Result<Enhanced, ImageError> {
    let mut enhanced = Image::from_size_val(src.size(), 0u8)?;

    match method {
        Method::Unsharp => {
            let mut blurred = Image::from_size_val(src.size(), 0u8)?;
            gaussian_blur(src, &mut blurred, params.kernel_size, params.sigma)?;
            unsharp_mask(src, &blurred, &mut enhanced, params.amount, params.threshold)?;

            Ok(Enhanced {
                blurred: Some(blurred),
                enhanced,
            })
        }
        Method::Bilateral => {
            let config = BilateralConfig::fast(
                BILATERAL_KERNEL_SIZE,
                BILATERAL_SIGMA_SPACE,
                BILATERAL_SIGMA_RANGE,
            );

            let mut smoothed = Image::from_size_val(src.size(), 0u8)?;
            bilateral_filter_with_config(src, &mut smoothed, &config)?;
            sharpen(&smoothed, &mut enhanced, bilateral_sharpen_amount(params))?;

            Ok(Enhanced {
                blurred: None,
                enhanced,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelity::image::ImageSize;

    fn step_edge() -> Image<u8, 3> {
        let size = ImageSize {
            width: 12,
            height: 8,
        };
        Image::from_fn(size, |x, _, _| if x < 6 { 60 } else { 180 })
    }

    #[test]
    fn test_unsharp_pipeline() -> Result<(), ImageError> {
        let src = step_edge();
        let out = run(&src, Method::Unsharp, &EnhanceParams::default())?;

        let blurred = out.blurred.as_ref().ok_or(ImageError::EmptyImage)?;
        assert_eq!(blurred.size(), src.size());
        assert_eq!(out.enhanced.size(), src.size());

        // the edge gets steeper, flat regions far from it are untouched
        let dark = *out.enhanced.get(5, 4, 0).ok_or(ImageError::EmptyImage)?;
        let bright = *out.enhanced.get(6, 4, 0).ok_or(ImageError::EmptyImage)?;
        assert!(dark < 60);
        assert!(bright > 180);
        assert_eq!(out.enhanced.get(0, 0, 0), Some(&60));
        assert_eq!(out.enhanced.get(11, 7, 2), Some(&180));

        Ok(())
    }

    #[test]
    fn test_bilateral_pipeline() -> Result<(), ImageError> {
        let src = step_edge();
        let out = run(&src, Method::Bilateral, &EnhanceParams::default())?;

        assert!(out.blurred.is_none());
        assert_eq!(out.enhanced.size(), src.size());
        assert_eq!(out.enhanced.get(0, 0, 0), Some(&60));
        assert_eq!(out.enhanced.get(11, 7, 2), Some(&180));

        Ok(())
    }

    #[test]
    fn test_pipeline_invalid_params() -> Result<(), ImageError> {
        let src = step_edge();

        let params = EnhanceParams::default().with_sigma(0.0);
        assert!(run(&src, Method::Unsharp, &params).is_err());

        let params = EnhanceParams::default().with_amount(-3.0);
        assert!(run(&src, Method::Bilateral, &params).is_err());

        Ok(())
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Unsharp.to_string(), "unsharp");
        assert_eq!(Method::Bilateral.to_string(), "bilateral");
        assert_eq!(bilateral_sharpen_amount(&EnhanceParams::default()), 0.5);
    }
}
