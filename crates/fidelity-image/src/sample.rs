use num_traits::{NumCast, ToPrimitive};

/// A sample domain: the storage type of one channel value and its valid range.
///
/// Every sample lives in `[0, MAX]`. Integer domains round to the nearest value
/// when converted back from `f64`, float domains keep the fraction; both clamp.
///
/// | type  | MAX     |
/// |-------|---------|
/// | `u8`  | 255     |
/// | `u16` | 65535   |
/// | `f32` | 1.0     |
/// | `f64` | 1.0     |
///
/// # Examples
///
/// ```
/// use fidelity_image::SampleType;
///
/// assert_eq!(<u8 as SampleType>::MAX, 255.0);
/// assert_eq!(u8::from_f64(300.0), 255);
/// assert_eq!(u8::from_f64(12.5), 13);
/// assert_eq!(f32::from_f64(-0.5), 0.0);
/// ```
pub trait SampleType: Copy + Default + PartialOrd + NumCast + Send + Sync + 'static {
    /// Largest value of the domain.
    const MAX: f64;

    /// Whether the domain stores whole numbers.
    const IS_INTEGER: bool;

    /// Widen the sample to `f64`.
    #[inline]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or_default()
    }

    /// Narrow an accumulated value into the domain, rounding and clamping to `[0, MAX]`.
    #[inline]
    fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        let clamped = value.clamp(0.0, Self::MAX);
        let value = if Self::IS_INTEGER {
            clamped.round()
        } else {
            clamped
        };
        <Self as NumCast>::from(value).unwrap_or_default()
    }
}

impl SampleType for u8 {
    const MAX: f64 = 255.0;
    const IS_INTEGER: bool = true;
}

impl SampleType for u16 {
    const MAX: f64 = 65535.0;
    const IS_INTEGER: bool = true;
}

impl SampleType for f32 {
    const MAX: f64 = 1.0;
    const IS_INTEGER: bool = false;
}

impl SampleType for f64 {
    const MAX: f64 = 1.0;
    const IS_INTEGER: bool = false;
}
