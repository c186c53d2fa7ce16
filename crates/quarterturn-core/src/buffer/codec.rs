//! Raster codec: bytes in, [`PixelBuffer`] out, and back to PNG.
//!
//! Decoding goes through the `image` crate's format detection so both PNG and
//! JPEG inputs work. Encoding always produces PNG since it is the only enabled
//! format that keeps the alpha channel the renderers rely on.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use thiserror::Error;

use super::PixelBuffer;
use crate::error::TransformError;

/// Errors that can occur while decoding or encoding raster data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a supported image or are corrupted.
    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    EncodeFailed(String),

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The decoded data could not be turned into a buffer.
    #[error(transparent)]
    Buffer(#[from] TransformError),
}

/// Decode PNG or JPEG bytes into an RGBA buffer.
///
/// # Errors
///
/// Returns `CodecError::DecodeFailed` if the format is not recognized or the
/// data is corrupted.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::DecodeFailed(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CodecError::DecodeFailed(e.to_string()))?;

    Ok(PixelBuffer::from_rgba_image(img.into_rgba8()))
}

/// Encode a buffer as PNG bytes.
///
/// # Errors
///
/// Returns `CodecError::InvalidDimensions` for zero-sized buffers and
/// `CodecError::EncodeFailed` if the encoder rejects the data.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions { width, height });
    }

    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(&buffer.to_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| CodecError::EncodeFailed(e.to_string()))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Pixel;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn sample_buffer() -> PixelBuffer {
        let mut buf = PixelBuffer::new(6, 4);
        buf.set_pixel(0, 0, Pixel::opaque(255, 0, 0)).unwrap();
        buf.set_pixel(5, 3, Pixel::new(0, 0, 255, 128)).unwrap();
        buf.set_pixel(2, 1, Pixel::opaque(0, 255, 0)).unwrap();
        buf
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&sample_buffer()).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_png_preserves_pixels() {
        let buf = sample_buffer();
        let decoded = decode_image(&encode_png(&buf).unwrap()).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let err = encode_png(&PixelBuffer::new(0, 4)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidDimensions {
                width: 0,
                height: 4
            }
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_image(&[0, 1, 2, 3]),
            Err(CodecError::DecodeFailed(_))
        ));
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let rgb = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50]));
        let mut jpeg = Cursor::new(Vec::new());
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 95)
            .write_image(rgb.as_raw(), 8, 8, ExtendedColorType::Rgb8)
            .unwrap();

        let decoded = decode_image(&jpeg.into_inner()).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert!(decoded.pixels().iter().all(|p| p.a == 255));
    }
}
