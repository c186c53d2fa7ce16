//! Core pixel and buffer types.

use crate::error::TransformError;

/// An RGBA color with 8 bits per channel and straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black, used for destination cells nothing maps to.
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Check if the pixel has zero alpha.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        p.to_array()
    }
}

/// A rectangular grid of RGBA pixels stored in row-major order.
///
/// Every row has exactly `width` pixels. Access outside
/// `[0, width) x [0, height)` is rejected with
/// [`TransformError::OutOfBounds`]; coordinates are never wrapped or clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Create a buffer where every pixel has the same color.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Build a buffer from a grid of rows.
    ///
    /// The width is taken from the first row. Every other row must have
    /// the same length, otherwise [`TransformError::ShapeMismatch`] names
    /// the first offending row. An empty grid yields a 0x0 buffer.
    pub fn from_rows(rows: &[Vec<Pixel>]) -> Result<Self, TransformError> {
        let width = rows.first().map_or(0, Vec::len);

        if let Some((row, actual)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(TransformError::ShapeMismatch {
                row,
                expected: width,
                actual,
            });
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            pixels: rows.concat(),
        })
    }

    /// Build a buffer from raw RGBA bytes (4 bytes per pixel, row-major).
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TransformError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TransformError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(4)
            .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Pixel::from(p.0)).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for encoding or further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_raw())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Read the pixel at `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Pixel, TransformError> {
        self.index(x, y)
            .map(|idx| self.pixels[idx])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), TransformError> {
        let idx = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.pixels[idx] = pixel;
        Ok(())
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Copy the pixels out as a grid of rows.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        let w = self.width as usize;
        (0..self.height as usize)
            .map(|y| self.pixels[y * w..(y + 1) * w].to_vec())
            .collect()
    }

    /// Raw RGBA bytes (4 bytes per pixel, row-major).
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Consume the buffer, returning raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.to_raw()
    }

    /// Row-major index for signed coordinates, `None` when outside the buffer.
    #[inline]
    pub(crate) fn index_signed(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at a row-major index produced by [`Self::index_signed`].
    #[inline]
    pub(crate) fn pixel_at(&self, idx: usize) -> Pixel {
        self.pixels[idx]
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        self.index_signed(x as i64, y as i64)
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> TransformError {
        TransformError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}
