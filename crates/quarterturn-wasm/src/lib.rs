//! Quarterturn WASM - WebAssembly bindings for the transform engine
//!
//! This crate exposes quarterturn-core to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA image data
//! - `codec` - PNG/JPEG decoding and PNG encoding
//! - `transform` - Transform chain building and rendering
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, encode_png, JsTransformChain } from '@quarterturn/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const chain = new JsTransformChain();
//! chain.rotate_quarter_turns(1, true);
//! const png = encode_png(chain.apply_inverse(image));
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod logging;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_png};
pub use transform::JsTransformChain;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
///
/// Routes `log` output from the core crate to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
