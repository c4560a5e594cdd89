//! Image I/O: decoding carriers into [`PixelBuffer`]s and encoding them back.
//!
//! Any format the `image` crate was built with is accepted on input and
//! converted to RGBA8. Output is always PNG; a lossy encoder would destroy
//! the embedded bits.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::errors::PlainsightError;
use crate::stego::PixelBuffer;

/// Decode an encoded image (PNG etc.) into an RGBA8 pixel buffer.
///
/// # Errors
/// `ImageLoadFailure` if the bytes are not a decodable image.
pub fn load_image(bytes: &[u8]) -> Result<PixelBuffer, PlainsightError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PlainsightError::ImageLoadFailure(e.to_string()))?;
    to_pixel_buffer(decoded.to_rgba8())
}

/// Read and decode an image file.
///
/// # Errors
/// `ImageLoadFailure` if the file cannot be read or decoded.
pub fn load_image_file(path: impl AsRef<Path>) -> Result<PixelBuffer, PlainsightError> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| PlainsightError::ImageLoadFailure(format!("{}: {e}", path.display())))?;
    to_pixel_buffer(decoded.to_rgba8())
}

/// Encode `carrier` as PNG bytes.
///
/// # Errors
/// `ImageRenderFailure` if encoding fails.
pub fn render_png(carrier: &PixelBuffer) -> Result<Vec<u8>, PlainsightError> {
    let image = RgbaImage::from_raw(carrier.width(), carrier.height(), carrier.as_bytes().to_vec())
        .ok_or_else(|| {
            PlainsightError::ImageRenderFailure("pixel buffer does not match dimensions".into())
        })?;

    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| PlainsightError::ImageRenderFailure(e.to_string()))?;

    tracing::debug!(
        width = carrier.width(),
        height = carrier.height(),
        png_len = out.get_ref().len(),
        "rendered carrier"
    );
    Ok(out.into_inner())
}

/// Encode `carrier` as PNG and write it to `path`.
///
/// # Errors
/// `ImageRenderFailure` if encoding or writing fails.
pub fn save_image(carrier: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), PlainsightError> {
    let path = path.as_ref();
    let png = render_png(carrier)?;
    std::fs::write(path, png)
        .map_err(|e| PlainsightError::ImageRenderFailure(format!("{}: {e}", path.display())))
}

fn to_pixel_buffer(image: RgbaImage) -> Result<PixelBuffer, PlainsightError> {
    let (width, height) = image.dimensions();
    PixelBuffer::new(width, height, image.into_raw())
}
