//! YUV_420_888 to NV21 packing entry point for `YuvUtils.packNV21`.
//!
//! Kotlin declaration:
//!
//! ```kotlin
//! object YuvUtils {
//!     external fun packNV21(
//!         y: ByteBuffer, u: ByteBuffer, v: ByteBuffer,
//!         width: Int, height: Int,
//!         yRowStride: Int, yPixelStride: Int,
//!         uvRowStride: Int, uvPixelStride: Int,
//!     ): ByteArray
//! }
//! ```
//!
//! The planes are the direct buffers from `Image.planes`, read in place.
//! Android guarantees the U and V planes share strides.

use crate::marshal;
use edgeframe_core::{pack_nv21, FrameError, PipelineError, PlaneView, Yuv420Planes};
use jni::objects::{JByteBuffer, JObject};
use jni::sys::{jbyteArray, jint};
use jni::JNIEnv;

const ENTRY: &str = "packNV21";

/// Row and pixel strides for the luma and chroma planes, as Android reports them.
#[derive(Debug, Clone, Copy)]
pub struct PlaneStrides {
    pub y_row: jint,
    pub y_pixel: jint,
    pub uv_row: jint,
    pub uv_pixel: jint,
}

/// Negative strides become zero, which the packer rejects.
fn stride(value: jint) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Pack three plane buffers into NV21 bytes.
pub fn planes_to_nv21(
    y: &[u8],
    u: &[u8],
    v: &[u8],
    width: jint,
    height: jint,
    strides: PlaneStrides,
) -> Result<Vec<u8>, PipelineError> {
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(FrameError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
        .into());
    };

    let planes = Yuv420Planes {
        y: PlaneView::new(y, stride(strides.y_row), stride(strides.y_pixel)),
        u: PlaneView::new(u, stride(strides.uv_row), stride(strides.uv_pixel)),
        v: PlaneView::new(v, stride(strides.uv_row), stride(strides.uv_pixel)),
    };
    Ok(pack_nv21(&planes, w, h)?.into_bytes())
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "system" fn Java_com_example_realtimeedgedetection_YuvUtils_packNV21<'local>(
    env: JNIEnv<'local>,
    _this: JObject<'local>,
    y: JByteBuffer<'local>,
    u: JByteBuffer<'local>,
    v: JByteBuffer<'local>,
    width: jint,
    height: jint,
    y_row_stride: jint,
    y_pixel_stride: jint,
    uv_row_stride: jint,
    uv_pixel_stride: jint,
) -> jbyteArray {
    let strides = PlaneStrides {
        y_row: y_row_stride,
        y_pixel: y_pixel_stride,
        uv_row: uv_row_stride,
        uv_pixel: uv_pixel_stride,
    };
    let result = marshal::catch(ENTRY, || {
        // SAFETY: the plane slices are dropped before this call returns and
        // the camera does not reuse an Image while it is being read.
        let (y, u, v) = unsafe {
            (
                marshal::borrow_direct_buffer(&env, &y)?,
                marshal::borrow_direct_buffer(&env, &u)?,
                marshal::borrow_direct_buffer(&env, &v)?,
            )
        };
        let nv21 = planes_to_nv21(y, u, v, width, height, strides)?;
        marshal::copy_to_java(&env, &nv21)
    });
    marshal::or_null(&env, result)
}
