//! Geometric operations and the matrices they produce.
//!
//! Every operation is expressed against the canvas it is applied to: the
//! reflections mirror about that canvas's centerlines and quarter-turn
//! rotations pivot around its center.
//!
//! # Rotation
//!
//! For `turns` quarter turns (θ = turns × 90°, positive = counter-clockwise
//! on screen) about the canvas center `(cx, cy)`, placed with its center at
//! `(ox, oy)` in the output:
//!
//! ```text
//! x' =  cos θ * (x - cx) + sin θ * (y - cy) + ox
//! y' = -sin θ * (x - cx) + cos θ * (y - cy) + oy
//! ```
//!
//! `(ox, oy) == (cx, cy)` unless the canvas grows to fit an odd number of
//! turns, in which case the output center is transposed to `(cy, cx)`.

use serde::{Deserialize, Serialize};

use super::AffineMatrix;

/// A single step of a [`TransformChain`](super::TransformChain).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Shift by `(dx, dy)` pixels.
    Translate { dx: f64, dy: f64 },
    /// Mirror left-to-right (`x' = width - x`).
    ReflectHorizontal,
    /// Mirror top-to-bottom (`y' = height - y`).
    ReflectVertical,
    /// Rotate by `turns * 90` degrees counter-clockwise.
    ///
    /// With `expand_canvas`, an odd number of turns swaps the canvas
    /// width and height so nothing is clipped.
    RotateQuarterTurns {
        turns: i32,
        #[serde(default)]
        expand_canvas: bool,
    },
}

impl Operation {
    pub fn translate(dx: f64, dy: f64) -> Self {
        Operation::Translate { dx, dy }
    }

    pub fn rotate_quarter_turns(turns: i32, expand_canvas: bool) -> Self {
        Operation::RotateQuarterTurns {
            turns,
            expand_canvas,
        }
    }

    /// Returns true if this operation swaps the canvas width and height.
    #[inline]
    pub fn swaps_dimensions(&self) -> bool {
        matches!(
            self,
            Operation::RotateQuarterTurns {
                turns,
                expand_canvas: true,
            } if turns % 2 != 0
        )
    }

    /// Canvas size after this operation, given the size before it.
    pub fn output_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// The matrix for this operation on a `width` x `height` canvas.
    pub fn matrix_for(&self, width: u32, height: u32) -> AffineMatrix {
        let (w, h) = (width as f64, height as f64);

        match *self {
            Operation::Translate { dx, dy } => AffineMatrix::translation(dx, dy),
            Operation::ReflectHorizontal => AffineMatrix::new(-1.0, 0.0, w, 0.0, 1.0, 0.0),
            Operation::ReflectVertical => AffineMatrix::new(1.0, 0.0, 0.0, 0.0, -1.0, h),
            Operation::RotateQuarterTurns { turns, .. } => {
                let (cos, sin) = quarter_turn_cos_sin(turns);
                let (cx, cy) = (w / 2.0, h / 2.0);
                let (ox, oy) = if self.swaps_dimensions() {
                    (cy, cx)
                } else {
                    (cx, cy)
                };

                AffineMatrix::new(
                    cos,
                    sin,
                    ox - cos * cx - sin * cy,
                    -sin,
                    cos,
                    oy + sin * cx - cos * cy,
                )
            }
        }
    }
}

/// Exact `(cos, sin)` of `turns * 90°`.
///
/// Table lookup instead of `f64::cos` keeps whole turns an exact identity.
fn quarter_turn_cos_sin(turns: i32) -> (f64, f64) {
    match turns.rem_euclid(4) {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    }
}
