use std::path::Path;

use fidelity_image::{Image, ImageSize};

use crate::error::IoError;

/// Decode any supported image format, guessing it from the file content.
fn decode(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    Ok(img)
}

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate.
/// Grayscale and alpha images are converted to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be decoded.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode(file_path.as_ref())?.into_rgb8();

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_raw())?)
}

/// Reads an image from the given file path as 8-bit grayscale.
///
/// Color images are converted to luma.
pub fn read_image_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let img = decode(file_path.as_ref())?.into_luma8();

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_raw())?)
}

/// Writes an 8-bit RGB image to the given file path.
///
/// The format is deduced from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The image to write.
pub fn write_image_rgb8(file_path: impl AsRef<Path>, image: &Image<u8, 3>) -> Result<(), IoError> {
    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Writes an 8-bit grayscale image to the given file path.
///
/// The format is deduced from the file extension.
pub fn write_image_gray8(file_path: impl AsRef<Path>, image: &Image<u8, 1>) -> Result<(), IoError> {
    image::save_buffer(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::L8,
    )?;
    Ok(())
}
