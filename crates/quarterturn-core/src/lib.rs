//! Quarterturn Core - 2-D affine transforms for RGBA pixel buffers
//!
//! This crate provides translations, reflections and quarter-turn rotations
//! that compose into a single affine matrix, plus two renderers that apply a
//! matrix to a [`PixelBuffer`]:
//!
//! - [`forward_remap`]: pushes source pixels through the matrix (may leave gaps)
//! - [`inverse_sample`]: pulls every destination pixel from the source with
//!   bilinear interpolation
//!
//! Typical use builds a [`TransformChain`], then applies it:
//!
//! ```ignore
//! let mut chain = TransformChain::new();
//! chain.rotate_quarter_turns(1, true).reflect_horizontal();
//! let out = chain.apply(&buffer, RenderStrategy::InverseSample)?;
//! ```

pub mod buffer;
pub mod error;
pub mod render;
pub mod transform;

pub use buffer::{decode_image, encode_png, CodecError, Pixel, PixelBuffer};
pub use error::TransformError;
pub use render::{
    forward_remap, inverse_sample, inverse_sample_into, render, BlendMode, RenderStrategy,
};
pub use transform::{AffineMatrix, Operation, TransformChain};
