//! Ordered operation chains.
//!
//! A chain is built by appending operations in the order they should be
//! applied. Applying it composes every operation into a single matrix and
//! renders the source once, so intermediate canvases are never materialized.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{AffineMatrix, Operation};
use crate::buffer::PixelBuffer;
use crate::error::TransformError;
use crate::render::{render, RenderStrategy};

/// An append-only sequence of [`Operation`]s.
///
/// Serializes as a plain array of tagged operations:
///
/// ```text
/// [{"op":"translate","dx":2,"dy":0},{"op":"rotate_quarter_turns","turns":1,"expand_canvas":true}]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformChain {
    operations: Vec<Operation>,
}

impl TransformChain {
    /// Create an empty chain (the identity transform).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the end of the chain.
    pub fn append(&mut self, op: Operation) -> &mut Self {
        self.operations.push(op);
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.append(Operation::translate(dx, dy))
    }

    pub fn reflect_horizontal(&mut self) -> &mut Self {
        self.append(Operation::ReflectHorizontal)
    }

    pub fn reflect_vertical(&mut self) -> &mut Self {
        self.append(Operation::ReflectVertical)
    }

    pub fn rotate_quarter_turns(&mut self, turns: i32, expand_canvas: bool) -> &mut Self {
        self.append(Operation::rotate_quarter_turns(turns, expand_canvas))
    }

    /// Operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Compose the chain into one matrix for a `width` x `height` source.
    ///
    /// For a chain `[op1, op2, op3]` the result satisfies
    /// `M(p) == op3(op2(op1(p)))`. Each operation is built against the canvas
    /// it actually sees, so a reflection after an expanding quarter turn
    /// mirrors about the rotated canvas's centerline.
    pub fn compose(&self, width: u32, height: u32) -> AffineMatrix {
        self.compose_with_canvas(width, height).0
    }

    /// Final canvas size for a `width` x `height` source.
    pub fn canvas_size(&self, width: u32, height: u32) -> (u32, u32) {
        self.operations
            .iter()
            .fold((width, height), |(w, h), op| op.output_dimensions(w, h))
    }

    /// Render `source` through the chain into a newly allocated buffer.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DegenerateTransform` when `strategy` is
    /// [`RenderStrategy::InverseSample`] and the composed matrix has no inverse.
    /// Forward remapping never fails.
    pub fn apply(
        &self,
        source: &PixelBuffer,
        strategy: RenderStrategy,
    ) -> Result<PixelBuffer, TransformError> {
        let (matrix, (width, height)) = self.compose_with_canvas(source.width(), source.height());

        debug!(
            "applying {} operation(s) to {}x{} source -> {}x{} canvas via {:?}",
            self.operations.len(),
            source.width(),
            source.height(),
            width,
            height,
            strategy
        );

        render(source, &matrix, width, height, strategy)
    }

    fn compose_with_canvas(&self, width: u32, height: u32) -> (AffineMatrix, (u32, u32)) {
        let mut matrix = AffineMatrix::IDENTITY;
        let mut canvas = (width, height);

        for op in &self.operations {
            matrix = matrix.then(op.matrix_for(canvas.0, canvas.1));
            canvas = op.output_dimensions(canvas.0, canvas.1);
        }

        (matrix, canvas)
    }
}

impl FromIterator<Operation> for TransformChain {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::Pixel;
    use crate::render::{inverse_sample_into, BlendMode};
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=24, 1u32..=24)
    }

    /// Strategy for a buffer of random pixels, including transparent ones.
    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        dimensions_strategy().prop_flat_map(|(w, h)| {
            let size = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |raw| PixelBuffer::from_raw(w, h, raw).unwrap())
        })
    }

    fn strategy_strategy() -> impl Strategy<Value = RenderStrategy> {
        prop_oneof![
            Just(RenderStrategy::ForwardRemap),
            Just(RenderStrategy::InverseSample)
        ]
    }

    proptest! {
        /// Property: An empty chain reproduces the source exactly.
        #[test]
        fn prop_empty_chain_identity(
            src in buffer_strategy(),
            strategy in strategy_strategy(),
        ) {
            let result = TransformChain::new().apply(&src, strategy).unwrap();
            prop_assert_eq!(result, src);
        }

        /// Property: Reflecting twice along the same axis is the identity.
        #[test]
        fn prop_double_reflection_identity(
            src in buffer_strategy(),
            strategy in strategy_strategy(),
            vertical in any::<bool>(),
        ) {
            let mut chain = TransformChain::new();
            if vertical {
                chain.reflect_vertical().reflect_vertical();
            } else {
                chain.reflect_horizontal().reflect_horizontal();
            }
            let result = chain.apply(&src, strategy).unwrap();
            prop_assert_eq!(result, src);
        }

        /// Property: Whole turns are the identity, with or without expansion.
        #[test]
        fn prop_whole_turns_identity(
            src in buffer_strategy(),
            strategy in strategy_strategy(),
            k in -3i32..=3,
            expand in any::<bool>(),
        ) {
            let mut chain = TransformChain::new();
            chain.rotate_quarter_turns(4 * k, expand);
            let result = chain.apply(&src, strategy).unwrap();
            prop_assert_eq!(result, src);
        }

        /// Property: Odd expanded turns swap dimensions and lose no pixels.
        #[test]
        fn prop_quarter_turn_swaps_and_preserves(
            src in buffer_strategy(),
            strategy in strategy_strategy(),
            clockwise in any::<bool>(),
        ) {
            let turns = if clockwise { -1 } else { 1 };
            let mut chain = TransformChain::new();
            chain.rotate_quarter_turns(turns, true);

            let result = chain.apply(&src, strategy).unwrap();
            prop_assert_eq!(result.dimensions(), (src.height(), src.width()));

            let mut sorted_src: Vec<[u8; 4]> = src.pixels().iter().map(|p| p.to_array()).collect();
            let mut sorted_dst: Vec<[u8; 4]> = result.pixels().iter().map(|p| p.to_array()).collect();
            sorted_src.sort_unstable();
            sorted_dst.sort_unstable();
            prop_assert_eq!(sorted_src, sorted_dst);
        }

        /// Property: Forward remap and inverse sampling agree on pixel-exact chains.
        #[test]
        fn prop_strategies_agree_on_exact_chains(
            src in buffer_strategy(),
            ops in prop::collection::vec(0u8..5, 0..6),
        ) {
            let chain: TransformChain = ops
                .iter()
                .map(|&k| match k {
                    0 => Operation::ReflectHorizontal,
                    1 => Operation::ReflectVertical,
                    2 => Operation::rotate_quarter_turns(1, true),
                    3 => Operation::rotate_quarter_turns(2, false),
                    _ => Operation::translate(1.0, -1.0),
                })
                .collect();

            let forward = chain.apply(&src, RenderStrategy::ForwardRemap).unwrap();
            let inverse = chain.apply(&src, RenderStrategy::InverseSample).unwrap();
            prop_assert_eq!(forward, inverse);
        }

        /// Property: Inverse sampling writes every destination pixel.
        #[test]
        fn prop_inverse_sample_full_coverage(
            (w, h) in dimensions_strategy(),
            dx in -30.0f64..30.0,
            dy in -30.0f64..30.0,
            turns in -5i32..=5,
        ) {
            let src = PixelBuffer::filled(w, h, Pixel::opaque(10, 20, 30));
            let mut chain = TransformChain::new();
            chain.translate(dx, dy).rotate_quarter_turns(turns, true);

            let (cw, ch) = chain.canvas_size(w, h);
            let sentinel = Pixel::new(1, 2, 3, 4);
            let mut dst = PixelBuffer::filled(cw, ch, sentinel);
            inverse_sample_into(&mut dst, &chain.compose(w, h), &src, BlendMode::Src).unwrap();

            prop_assert!(dst
                .pixels()
                .iter()
                .all(|&p| p == Pixel::TRANSPARENT || p == Pixel::opaque(10, 20, 30)));
        }
    }
}
