//! Affine transform chains: matrices, operations and their composition.
//!
//! A [`TransformChain`] collects [`Operation`]s in application order and folds
//! them into a single [`AffineMatrix`]. The matrix is then handed to one of the
//! renderers in [`crate::render`].
//!
//! # Composition Order
//!
//! For a chain `[op1, op2, op3]` the composed matrix is `M3 * M2 * M1`, so a
//! point goes through `op1` first and `op3` last. There is exactly one fold
//! implementing this ([`AffineMatrix::then`]).
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Matrices map continuous source coordinates to continuous destination
//!   coordinates; pixel `(x, y)` is sampled at its center `(x + 0.5, y + 0.5)`
//! - Positive quarter turns rotate counter-clockwise on screen

mod chain;
mod matrix;
mod operation;

pub use chain::TransformChain;
pub use matrix::{AffineMatrix, DEGENERATE_EPSILON};
pub use operation::Operation;
