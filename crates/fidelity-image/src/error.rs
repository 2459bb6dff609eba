/// An error type for the image and image processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has no pixels.
    #[error("Image is empty")]
    EmptyImage,

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must be comparable have different sizes.
    #[error("Invalid image size: ({0}, {1}) does not match ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the kernel size is not valid.
    #[error("Invalid kernel size: {0}")]
    InvalidKernelSize(usize),

    /// Error when the kernel data does not match the kernel shape.
    #[error("Invalid kernel length: {0} and {1}")]
    InvalidKernelLength(usize, usize),

    /// Error when a standard deviation is not strictly positive.
    #[error("Invalid sigma: {0}")]
    InvalidSigma(f64),

    /// Error when a scalar parameter is outside its valid range.
    #[error("Invalid parameter `{0}`: {1}")]
    InvalidParameter(&'static str, f64),
}
