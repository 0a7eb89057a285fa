//! Frame pipeline WASM bindings.
//!
//! This module exposes the edgeframe-core pipeline to JavaScript so the web
//! live view can run edge detection on raw NV21 frames itself.
//!
//! # Functions
//!
//! - [`process_frame_nv21_to_png`] - NV21 bytes to PNG bytes
//! - [`process_frame_with_report`] - Same, plus a frame report
//!
//! # Example
//!
//! ```typescript
//! import { process_frame_nv21_to_png } from '@edgeframe/wasm';
//!
//! const png = process_frame_nv21_to_png(nv21, 640, 480);
//! img.src = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::JsProcessedFrame;
use edgeframe_core::PipelineError;
use wasm_bindgen::prelude::*;

/// Convert a pipeline error into a JS `Error`, echoing it to the console.
fn to_js_error(err: PipelineError) -> JsValue {
    let message = format!("{} ({:?})", err, err.kind());
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

/// Run the edge pipeline on an NV21 frame and return PNG bytes.
///
/// # Arguments
///
/// * `bytes` - NV21 frame as a `Uint8Array`, `width * height * 3 / 2` bytes
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels (must be even)
///
/// # Errors
///
/// Throws if:
/// - Width or height is not positive, or height is odd
/// - The buffer length doesn't match the dimensions
/// - PNG encoding fails
#[wasm_bindgen]
pub fn process_frame_nv21_to_png(bytes: &[u8], width: i32, height: i32) -> Result<Vec<u8>, JsValue> {
    edgeframe_core::process_nv21(bytes, width.into(), height.into()).map_err(to_js_error)
}

/// Run the edge pipeline and return the PNG together with a frame report.
///
/// # Example
///
/// ```typescript
/// const frame = process_frame_with_report(nv21, 640, 480);
/// console.log(`${frame.report().edgePixels} edge pixels, ${frame.byte_length} bytes`);
/// ```
#[wasm_bindgen]
pub fn process_frame_with_report(
    bytes: &[u8],
    width: i32,
    height: i32,
) -> Result<JsProcessedFrame, JsValue> {
    edgeframe_core::process_nv21_with_report(bytes, width.into(), height.into())
        .map(JsProcessedFrame::from_processed)
        .map_err(to_js_error)
}
