use fidelity_image::{Image, SampleType};

/// Widen every sample of an image into an interleaved `f64` plane.
pub(crate) fn to_plane<T: SampleType, const C: usize>(image: &Image<T, C>) -> Vec<f64> {
    image.as_slice().iter().map(|&v| v.as_f64()).collect()
}

/// Store an `f64` plane into `dst`, rounding and clamping into the sample domain.
///
/// PRECONDITION: `plane` has as many samples as `dst`.
pub(crate) fn store_plane<T: SampleType, const C: usize>(plane: &[f64], dst: &mut Image<T, C>) {
    dst.as_slice_mut()
        .iter_mut()
        .zip(plane.iter())
        .for_each(|(d, &v)| *d = T::from_f64(v));
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelity_image::ImageError;

    #[test]
    fn test_plane_roundtrip_clamps() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 1].into(), vec![0, 128, 255])?;
        let mut plane = to_plane(&image);
        assert_eq!(plane, vec![0.0, 128.0, 255.0]);

        plane[0] = -4.0;
        plane[1] = 127.6;
        plane[2] = 300.0;

        let mut dst = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        store_plane(&plane, &mut dst);
        assert_eq!(dst.as_slice(), &[0, 128, 255]);
        Ok(())
    }
}
