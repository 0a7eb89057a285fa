//! WASM-compatible wrapper types for pipeline output.

use edgeframe_core::{FrameReport, ProcessedFrame};
use wasm_bindgen::prelude::*;

/// A processed frame wrapper for JavaScript.
///
/// Holds the PNG bytes and the frame report in WASM memory. `png()` copies
/// the bytes out to a `Uint8Array`; `report()` returns a plain object:
///
/// ```typescript
/// { width: number, height: number, edgePixels: number, encodedBytes: number }
/// ```
#[wasm_bindgen]
pub struct JsProcessedFrame {
    png: Vec<u8>,
    report: FrameReport,
}

#[wasm_bindgen]
impl JsProcessedFrame {
    /// Frame width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.report.width
    }

    /// Frame height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.report.height
    }

    /// Size of the PNG in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.png.len()
    }

    /// Returns the PNG bytes as a Uint8Array (copied).
    pub fn png(&self) -> Vec<u8> {
        self.png.clone()
    }

    /// Returns the frame report as a plain JavaScript object.
    pub fn report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report).map_err(JsValue::from)
    }
}

impl JsProcessedFrame {
    pub(crate) fn from_processed(processed: ProcessedFrame) -> Self {
        Self {
            png: processed.png,
            report: processed.report,
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_report_is_plain_object() {
        let frame = JsProcessedFrame::from_processed(ProcessedFrame {
            png: vec![],
            report: FrameReport {
                width: 2,
                height: 2,
                edge_pixels: 0,
                encoded_bytes: 0,
            },
        });
        let report = frame.report().unwrap();
        let edge_pixels = js_sys::Reflect::get(&report, &JsValue::from_str("edgePixels")).unwrap();
        assert_eq!(edge_pixels.as_f64(), Some(0.0));
    }
}
