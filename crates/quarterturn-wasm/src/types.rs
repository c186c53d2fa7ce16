//! WASM-compatible wrapper types for pixel data.
//!
//! JavaScript sees images as flat RGBA byte arrays; this module converts them
//! to and from the core [`PixelBuffer`].

use quarterturn_core::{PixelBuffer, TransformError};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. Calling `pixels()` copies it to
/// JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a buffer from dimensions and RGBA bytes (4 per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Throws if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        Self::checked(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (`width * height * 4`).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsPixelBuffer {
    /// Validate raw bytes without touching `JsValue`.
    pub(crate) fn checked(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, TransformError> {
        PixelBuffer::from_raw(width, height, pixels).map(Self::from_buffer)
    }

    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: buffer.into_raw(),
        }
    }

    /// Convert back to a core buffer. Clones the pixel data.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, TransformError> {
        PixelBuffer::from_raw(self.width, self.height, self.pixels.clone())
    }
}
