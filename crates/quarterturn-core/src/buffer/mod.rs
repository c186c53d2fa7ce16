//! RGBA pixel buffers and the raster codec around them.
//!
//! This module provides:
//! - [`Pixel`], a straight-alpha RGBA8 color
//! - [`PixelBuffer`], a rectangular row-major grid of pixels with checked access
//! - PNG/JPEG decoding and PNG encoding between bytes and buffers
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)` in continuous space,
//!   so its center is `(x + 0.5, y + 0.5)`
//!
//! # Examples
//!
//! ```ignore
//! use quarterturn_core::buffer::{decode_image, encode_png};
//!
//! let bytes = std::fs::read("sprite.png").unwrap();
//! let buffer = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", buffer.width(), buffer.height());
//! let png = encode_png(&buffer).unwrap();
//! ```

mod codec;
mod types;

pub use codec::{decode_image, encode_png, CodecError};
pub use types::{Pixel, PixelBuffer};
