//! Edgeframe JNI - Android bindings for the edge detection pipeline
//!
//! This crate builds the `cdylib` loaded by the Android app and exposes
//! `edgeframe-core` through JNI entry points whose names match the Kotlin
//! `external fun` declarations in `com.example.realtimeedgedetection`.
//!
//! # Module Structure
//!
//! - `frame` - `NativeBridge.processFrameNV21ToPNG`, the pipeline entry point
//! - `yuv` - `YuvUtils.packNV21`, strided camera planes to NV21
//! - `marshal` - buffer ownership transfer and panic containment
//!
//! No entry point throws. Failures are logged through the `log` facade and
//! reported to Kotlin as `null`; the host app installs the logger backend.

use jni::objects::JObject;
use jni::sys::jint;
use jni::JNIEnv;

mod frame;
mod marshal;
mod yuv;

pub use frame::frame_to_png;
pub use yuv::{planes_to_nv21, PlaneStrides};

/// `MainActivity.nativeAdd`: connectivity check for the native library.
#[no_mangle]
pub extern "system" fn Java_com_example_realtimeedgedetection_MainActivity_nativeAdd<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    a: jint,
    b: jint,
) -> jint {
    edgeframe_core::diagnostic_add(a, b)
}

/// Get the version of the native library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
