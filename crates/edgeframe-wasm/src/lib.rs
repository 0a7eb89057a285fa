//! Edgeframe WASM - WebAssembly bindings for the edge detection pipeline
//!
//! This crate exposes the edgeframe-core pipeline to JavaScript/TypeScript,
//! so the browser live view can process raw camera frames locally.
//!
//! # Module Structure
//!
//! - `pipeline` - NV21 to PNG bindings
//! - `types` - WASM-compatible wrapper types for pipeline output
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_frame_nv21_to_png } from '@edgeframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const png = process_frame_nv21_to_png(nv21, width, height);
//! ```

use wasm_bindgen::prelude::*;

mod pipeline;
mod types;

// Re-export public types
pub use pipeline::{process_frame_nv21_to_png, process_frame_with_report};
pub use types::JsProcessedFrame;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Sum of two integers; checks that the WASM module is loaded and callable.
#[wasm_bindgen]
pub fn native_add(a: i32, b: i32) -> i32 {
    edgeframe_core::diagnostic_add(a, b)
}
