//! Edgeframe Core - camera frame to edge image pipeline
//!
//! This crate turns a raw NV21 camera frame into a PNG of its edges:
//!
//! 1. [`frame`] validates the buffer against its declared geometry
//! 2. [`grayscale`] copies out the luma plane
//! 3. [`edges`] runs Canny with fixed thresholds
//! 4. [`expand`] replicates the binary mask into three channels
//! 5. [`encode`] writes a PNG
//!
//! [`pipeline`] chains the stages. The binding crates (`edgeframe-jni`,
//! `edgeframe-wasm`) are thin wrappers around it.
//!
//! # Example
//!
//! ```ignore
//! use edgeframe_core::process_nv21;
//!
//! let nv21 = vec![0u8; 640 * 480 * 3 / 2];
//! let png = process_nv21(&nv21, 640, 480)?;
//! ```

pub mod edges;
pub mod encode;
pub mod expand;
pub mod frame;
pub mod grayscale;
pub mod pipeline;
pub mod types;

pub use edges::{detect_edges, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};
pub use encode::{encode_png, EncodeError};
pub use expand::expand_to_rgb;
pub use frame::{pack_nv21, FrameError, Nv21Frame, PlaneView, Yuv420Planes};
pub use grayscale::to_grayscale;
pub use pipeline::{
    process_frame, process_nv21, process_nv21_with_report, ErrorKind, FrameReport, PipelineError,
    ProcessedFrame,
};
pub use types::{DisplayImage, EdgeMask, GrayscaleImage};

/// Sum of two integers, wrapping on overflow.
///
/// Not part of the image pipeline. Bindings expose it so the host application
/// can check that the native library is loaded and callable.
pub fn diagnostic_add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_diagnostic_add() {
        assert_eq!(diagnostic_add(2, 3), 5);
        assert_eq!(diagnostic_add(-7, 7), 0);
        assert_eq!(diagnostic_add(i32::MAX, 1), i32::MIN);
    }

    #[test]
    fn test_types_are_thread_safe() {
        assert_send_sync::<Nv21Frame>();
        assert_send_sync::<EdgeMask>();
        assert_send_sync::<DisplayImage>();
        assert_send_sync::<ProcessedFrame>();
        assert_send_sync::<PipelineError>();
    }

    #[test]
    fn test_concurrent_invocations_agree() {
        let (w, h) = (32usize, 16usize);
        let mut nv21: Vec<u8> = (0..w * h).map(|i| ((i % w) * 8) as u8).collect();
        nv21.resize(w * (h + h / 2), 128);

        let expected = process_nv21(&nv21, w as i64, h as i64).unwrap();
        let results: Vec<Vec<u8>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| process_nv21(&nv21, w as i64, h as i64).unwrap()))
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        for result in results {
            assert_eq!(result, expected);
        }
    }
}
