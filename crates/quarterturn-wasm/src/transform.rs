//! WASM bindings for transform chains.
//!
//! A chain can be built step by step or from a plain array of operation
//! objects, then applied to a [`JsPixelBuffer`] with either renderer.

use crate::types::JsPixelBuffer;
use quarterturn_core::{Operation, RenderStrategy, TransformChain, TransformError};
use wasm_bindgen::prelude::*;

/// JavaScript-accessible transform chain.
///
/// # Example (TypeScript)
/// ```typescript
/// const chain = JsTransformChain.from_operations([
///   { op: 'rotate_quarter_turns', turns: 1, expand_canvas: true },
///   { op: 'reflect_horizontal' },
/// ]);
/// const rotated = chain.apply_inverse(image);
///
/// chain.free();
/// ```
#[wasm_bindgen]
pub struct JsTransformChain {
    inner: TransformChain,
}

#[wasm_bindgen]
impl JsTransformChain {
    /// Create an empty chain (the identity transform).
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsTransformChain {
        Self {
            inner: TransformChain::new(),
        }
    }

    /// Build a chain from an array of `{ op: ..., ... }` objects.
    ///
    /// # Errors
    /// Throws if the array does not describe valid operations.
    pub fn from_operations(operations: JsValue) -> Result<JsTransformChain, JsValue> {
        let inner: TransformChain = serde_wasm_bindgen::from_value(operations)
            .map_err(|e| JsValue::from_str(&format!("Invalid operations: {}", e)))?;
        Ok(Self { inner })
    }

    /// Serialize the chain back to an array of operation objects.
    pub fn to_operations(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.inner.translate(dx, dy);
    }

    pub fn reflect_horizontal(&mut self) {
        self.inner.reflect_horizontal();
    }

    pub fn reflect_vertical(&mut self) {
        self.inner.reflect_vertical();
    }

    /// Rotate by `turns * 90` degrees counter-clockwise.
    pub fn rotate_quarter_turns(&mut self, turns: i32, expand_canvas: bool) {
        self.inner.rotate_quarter_turns(turns, expand_canvas);
    }

    /// Number of operations in the chain.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Output width for a source of the given size.
    pub fn canvas_width(&self, width: u32, height: u32) -> u32 {
        self.inner.canvas_size(width, height).0
    }

    /// Output height for a source of the given size.
    pub fn canvas_height(&self, width: u32, height: u32) -> u32 {
        self.inner.canvas_size(width, height).1
    }

    /// Apply the chain by pushing source pixels forward.
    ///
    /// Exact for quarter turns, reflections and whole-pixel shifts; other
    /// transforms may leave transparent gaps.
    pub fn apply_forward(&self, image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
        self.apply_native(image, RenderStrategy::ForwardRemap)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply the chain with bilinear inverse sampling.
    ///
    /// # Errors
    /// Throws if the composed transform is not invertible.
    pub fn apply_inverse(&self, image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
        self.apply_native(image, RenderStrategy::InverseSample)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for JsTransformChain {
    fn default() -> Self {
        Self::new()
    }
}

impl JsTransformChain {
    pub(crate) fn from_chain(inner: TransformChain) -> Self {
        Self { inner }
    }

    pub(crate) fn apply_native(
        &self,
        image: &JsPixelBuffer,
        strategy: RenderStrategy,
    ) -> Result<JsPixelBuffer, TransformError> {
        let source = image.to_buffer()?;
        self.inner
            .apply(&source, strategy)
            .map(JsPixelBuffer::from_buffer)
    }
}

impl FromIterator<Operation> for JsTransformChain {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::from_chain(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 image where each pixel's red channel is its row-major index.
    fn test_image() -> JsPixelBuffer {
        let pixels: Vec<u8> = (0..6u8).flat_map(|i| [i, 0, 0, 255]).collect();
        JsPixelBuffer::checked(3, 2, pixels).unwrap()
    }

    fn reds(img: &JsPixelBuffer) -> Vec<u8> {
        img.pixels().chunks_exact(4).map(|c| c[0]).collect()
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let chain = JsTransformChain::new();
        assert_eq!(chain.length(), 0);

        let img = test_image();
        let out = chain
            .apply_native(&img, RenderStrategy::ForwardRemap)
            .unwrap();
        assert_eq!(out.pixels(), img.pixels());
    }

    #[test]
    fn test_builder_steps() {
        let mut chain = JsTransformChain::new();
        chain.translate(1.0, 0.0);
        chain.reflect_horizontal();
        chain.reflect_vertical();
        chain.rotate_quarter_turns(1, true);
        assert_eq!(chain.length(), 4);
        assert_eq!(chain.canvas_width(3, 2), 2);
        assert_eq!(chain.canvas_height(3, 2), 3);
    }

    #[test]
    fn test_reflect_horizontal() {
        let mut chain = JsTransformChain::new();
        chain.reflect_horizontal();

        for strategy in [RenderStrategy::ForwardRemap, RenderStrategy::InverseSample] {
            let out = chain.apply_native(&test_image(), strategy).unwrap();
            assert_eq!(reds(&out), vec![2, 1, 0, 5, 4, 3]);
        }
    }

    #[test]
    fn test_rotate_expand() {
        let chain: JsTransformChain =
            std::iter::once(Operation::rotate_quarter_turns(1, true)).collect();
        let out = chain
            .apply_native(&test_image(), RenderStrategy::InverseSample)
            .unwrap();

        // Counter-clockwise: the right column becomes the top row
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(reds(&out), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_translate_off_canvas() {
        let mut chain = JsTransformChain::new();
        chain.translate(3.0, 0.0);

        let out = chain
            .apply_native(&test_image(), RenderStrategy::InverseSample)
            .unwrap();
        assert_eq!((out.width(), out.height()), (3, 2));
        assert!(out.pixels().iter().all(|&b| b == 0));
    }
}
