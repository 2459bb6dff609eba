use fidelity_image::{Image, ImageError};

pub(crate) fn ensure_not_empty<T, const C: usize>(image: &Image<T, C>) -> Result<(), ImageError> {
    if image.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    Ok(())
}

pub(crate) fn ensure_same_size<T, U, const C1: usize, const C2: usize>(
    image1: &Image<T, C1>,
    image2: &Image<U, C2>,
) -> Result<(), ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.width(),
            image1.height(),
            image2.width(),
            image2.height(),
        ));
    }
    Ok(())
}

/// Source must hold pixels and `dst` must match it.
pub(crate) fn ensure_src_dst<T, U, const C1: usize, const C2: usize>(
    src: &Image<T, C1>,
    dst: &Image<U, C2>,
) -> Result<(), ImageError> {
    ensure_not_empty(src)?;
    ensure_same_size(src, dst)
}

/// Finite and strictly positive.
pub(crate) fn ensure_sigma(sigma: f64) -> Result<(), ImageError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageError::InvalidSigma(sigma));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), ImageError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ImageError::InvalidParameter(name, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_sigma() {
        assert!(ensure_sigma(0.5).is_ok());
        assert_eq!(ensure_sigma(0.0), Err(ImageError::InvalidSigma(0.0)));
        assert_eq!(ensure_sigma(-1.0), Err(ImageError::InvalidSigma(-1.0)));
        assert!(ensure_sigma(f64::NAN).is_err());
        assert!(ensure_sigma(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("amount", 0.0).is_ok());
        assert_eq!(
            ensure_non_negative("amount", -0.1),
            Err(ImageError::InvalidParameter("amount", -0.1))
        );
        assert!(ensure_non_negative("amount", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_src_dst() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;
        let dst = Image::<u8, 1>::from_size_val([2, 3].into(), 0)?;
        assert_eq!(
            ensure_src_dst(&src, &dst),
            Err(ImageError::InvalidImageSize(3, 2, 2, 3))
        );

        let empty = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        assert_eq!(ensure_src_dst(&empty, &empty), Err(ImageError::EmptyImage));
        Ok(())
    }
}
