//! Image decoding and encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_png } from '@quarterturn/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const png = encode_png(image);
//! ```

use crate::types::JsPixelBuffer;
use quarterturn_core::{buffer, CodecError};
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into an RGBA image.
///
/// # Errors
///
/// Throws if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode_native(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as PNG bytes.
///
/// # Errors
///
/// Throws for zero-sized images or if encoding fails.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode_native(image).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn decode_native(bytes: &[u8]) -> Result<JsPixelBuffer, CodecError> {
    buffer::decode_image(bytes).map(JsPixelBuffer::from_buffer)
}

pub(crate) fn encode_native(image: &JsPixelBuffer) -> Result<Vec<u8>, CodecError> {
    let buffer = image.to_buffer()?;
    buffer::encode_png(&buffer)
}
