//! Frame pipeline entry point for `NativeBridge.processFrameNV21ToPNG`.
//!
//! Kotlin declaration:
//!
//! ```kotlin
//! object NativeBridge {
//!     external fun processFrameNV21ToPNG(nv21: ByteArray, width: Int, height: Int): ByteArray
//! }
//! ```
//!
//! The result is `null` for malformed frames and for encoder or allocation
//! failures. Each call is independent.

use crate::marshal;
use edgeframe_core::PipelineError;
use jni::objects::{JByteArray, JObject};
use jni::sys::{jbyteArray, jint};
use jni::JNIEnv;

const ENTRY: &str = "processFrameNV21ToPNG";

/// Run the pipeline on NV21 bytes with JVM-typed dimensions.
pub fn frame_to_png(nv21: &[u8], width: jint, height: jint) -> Result<Vec<u8>, PipelineError> {
    edgeframe_core::process_nv21(nv21, width.into(), height.into())
}

/// NV21 `byte[]` in, PNG `byte[]` (or `null`) out.
///
/// The input array is copied into Rust memory before processing; the output
/// array is allocated by the JVM. See [`crate::marshal`].
#[no_mangle]
pub extern "system" fn Java_com_example_realtimeedgedetection_NativeBridge_processFrameNV21ToPNG<'local>(
    env: JNIEnv<'local>,
    _this: JObject<'local>,
    nv21: JByteArray<'local>,
    width: jint,
    height: jint,
) -> jbyteArray {
    let result = marshal::catch(ENTRY, || {
        let bytes = marshal::copy_from_java(&env, &nv21)?;
        let png = frame_to_png(&bytes, width, height)?;
        marshal::copy_to_java(&env, &png)
    });
    marshal::or_null(&env, result)
}
