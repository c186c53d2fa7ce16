//! Forward remapping: push every source pixel through the matrix.

use log::trace;

use crate::buffer::PixelBuffer;
use crate::transform::AffineMatrix;

/// Map each source pixel onto a new `width` x `height` canvas.
///
/// The center of source pixel `(x, y)` is mapped through `matrix` and floored
/// to a destination cell. Pixels landing outside the canvas (or on a
/// non-finite coordinate) are dropped. When several source pixels land on the
/// same cell the last one in row-major order wins.
///
/// This is a lossy approximation: cells nothing maps to are left fully
/// transparent, so scaling or non-axis-aligned maps can leave gaps. It is exact
/// for quarter turns, reflections and whole-pixel translations. Any matrix is
/// accepted, including degenerate ones.
pub fn forward_remap(
    source: &PixelBuffer,
    matrix: &AffineMatrix,
    width: u32,
    height: u32,
) -> PixelBuffer {
    let mut output = PixelBuffer::new(width, height);
    let mut dropped = 0usize;

    for y in 0..source.height() {
        for x in 0..source.width() {
            let (tx, ty) = matrix.transform_point(x as f64 + 0.5, y as f64 + 0.5);
            if !tx.is_finite() || !ty.is_finite() {
                dropped += 1;
                continue;
            }

            let src_idx = y as usize * source.width() as usize + x as usize;
            match output.index_signed(tx.floor() as i64, ty.floor() as i64) {
                Some(dst_idx) => output.pixels_mut()[dst_idx] = source.pixel_at(src_idx),
                None => dropped += 1,
            }
        }
    }

    trace!(
        "forward remap: dropped {} of {} source pixels",
        dropped,
        source.pixel_count()
    );

    output
}
