//! Inverse-mapped rendering with bilinear interpolation.
//!
//! For each destination pixel we compute which source point maps onto its
//! center and interpolate the four nearest source pixels:
//!
//! ```text
//! (src_x, src_y) = M⁻¹(dst_x + 0.5, dst_y + 0.5)
//! ```
//!
//! Source points outside `[0, width) x [0, height)` sample as fully
//! transparent. Inside the source, neighbours past the edge clamp to the edge
//! pixel so border rows and columns keep their color.

use log::debug;

use super::BlendMode;
use crate::buffer::{Pixel, PixelBuffer};
use crate::error::TransformError;
use crate::transform::AffineMatrix;

/// Render `source` through `matrix` onto a new `width` x `height` canvas.
///
/// Every destination pixel receives a sampled value, possibly transparent.
///
/// # Errors
///
/// Returns `TransformError::DegenerateTransform` if `matrix` is not
/// invertible. The destination is not allocated in that case.
pub fn inverse_sample(
    source: &PixelBuffer,
    matrix: &AffineMatrix,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, TransformError> {
    let inverse = invert(matrix)?;
    let mut output = PixelBuffer::new(width, height);
    fill(&mut output, &inverse, source, BlendMode::Src);
    Ok(output)
}

/// Sample `source` through `matrix` into an existing destination buffer.
///
/// With [`BlendMode::Src`] every destination pixel is replaced; with
/// [`BlendMode::Over`] the sample is composited over what is already there.
///
/// # Errors
///
/// Returns `TransformError::DegenerateTransform` if `matrix` is not
/// invertible, leaving `dst` untouched.
pub fn inverse_sample_into(
    dst: &mut PixelBuffer,
    matrix: &AffineMatrix,
    source: &PixelBuffer,
    blend: BlendMode,
) -> Result<(), TransformError> {
    let inverse = invert(matrix)?;
    fill(dst, &inverse, source, blend);
    Ok(())
}

fn invert(matrix: &AffineMatrix) -> Result<AffineMatrix, TransformError> {
    matrix.inverse().ok_or_else(|| {
        let determinant = matrix.determinant();
        debug!("rejecting degenerate transform {:?}", matrix);
        TransformError::DegenerateTransform { determinant }
    })
}

fn fill(dst: &mut PixelBuffer, inverse: &AffineMatrix, source: &PixelBuffer, blend: BlendMode) {
    let width = dst.width() as usize;

    for (idx, out) in dst.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (idx % width, idx / width);
        let (src_x, src_y) = inverse.transform_point(x as f64 + 0.5, y as f64 + 0.5);
        let sample = sample_bilinear(source, src_x, src_y);

        *out = match blend {
            BlendMode::Src => sample,
            BlendMode::Over => composite_over(sample, *out),
        };
    }
}

/// Get the pixel at `(x, y)` with coordinates clamped to the buffer edge.
///
/// Callers guarantee the buffer is non-empty.
#[inline]
fn get_pixel_clamped(image: &PixelBuffer, x: i64, y: i64) -> Pixel {
    let x = x.clamp(0, image.width() as i64 - 1);
    let y = y.clamp(0, image.height() as i64 - 1);
    image.pixel_at(y as usize * image.width() as usize + x as usize)
}

/// Sample a pixel using bilinear interpolation.
///
/// `(x, y)` is in continuous image space, so pixel centers sit on half
/// integers. Colors are interpolated premultiplied by alpha so transparent
/// neighbours fade coverage without darkening the color. A sample exactly on
/// a pixel center returns that pixel unchanged.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Pixel {
    let (w, h) = (image.width() as f64, image.height() as f64);

    // Also rejects NaN
    if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
        return Pixel::TRANSPARENT;
    }

    let px = x - 0.5;
    let py = y - 0.5;
    let x0 = px.floor();
    let y0 = py.floor();

    // Fractional distances
    let fx = px - x0;
    let fy = py - y0;

    let (x0, y0) = (x0 as i64, y0 as i64);
    if fx == 0.0 && fy == 0.0 {
        return get_pixel_clamped(image, x0, y0);
    }

    let taps = [
        (get_pixel_clamped(image, x0, y0), (1.0 - fx) * (1.0 - fy)),
        (get_pixel_clamped(image, x0 + 1, y0), fx * (1.0 - fy)),
        (get_pixel_clamped(image, x0, y0 + 1), (1.0 - fx) * fy),
        (get_pixel_clamped(image, x0 + 1, y0 + 1), fx * fy),
    ];

    let mut sum = [0.0f64; 3];
    let mut alpha_sum = 0.0;
    for (p, weight) in taps {
        let alpha = p.a as f64 * weight;
        sum[0] += p.r as f64 * alpha;
        sum[1] += p.g as f64 * alpha;
        sum[2] += p.b as f64 * alpha;
        alpha_sum += alpha;
    }

    if alpha_sum <= 0.0 {
        return Pixel::TRANSPARENT;
    }

    Pixel::new(
        to_channel(sum[0] / alpha_sum),
        to_channel(sum[1] / alpha_sum),
        to_channel(sum[2] / alpha_sum),
        to_channel(alpha_sum),
    )
}

/// Porter-Duff "over" for straight-alpha pixels.
fn composite_over(src: Pixel, dst: Pixel) -> Pixel {
    let sa = src.a as f64 / 255.0;
    let da = dst.a as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Pixel::TRANSPARENT;
    }

    let mix = |s: u8, d: u8| (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
    Pixel::new(
        to_channel(mix(src.r, dst.r)),
        to_channel(mix(src.g, dst.g)),
        to_channel(mix(src.b, dst.b)),
        to_channel(out_a * 255.0),
    )
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}
