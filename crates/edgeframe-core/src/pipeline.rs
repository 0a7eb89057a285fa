//! The frame pipeline: NV21 → grayscale → edges → RGB → PNG.
//!
//! Every call allocates its own intermediates and drops each one as soon as
//! the next stage has produced its output. Nothing is shared between calls,
//! so the functions here are safe to run concurrently from any number of
//! threads.

use crate::edges::detect_edges;
use crate::encode::{encode_display_image, EncodeError};
use crate::expand::expand_to_rgb;
use crate::frame::{FrameError, Nv21Frame};
use crate::grayscale::to_grayscale;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that end a pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input buffer is not a valid NV21 frame
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The encoder rejected the image or failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A buffer could not be allocated at the language boundary
    #[error("Failed to allocate boundary buffer: {0}")]
    AllocationFailed(String),
}

/// Flat classification of [`PipelineError`] for callers that only need to
/// know which kind of failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidDimensions,
    InvalidFrameSize,
    EncodingFailed,
    AllocationFailed,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Frame(FrameError::InvalidDimensions { .. }) => ErrorKind::InvalidDimensions,
            PipelineError::Frame(FrameError::InvalidFrameSize { .. }) => ErrorKind::InvalidFrameSize,
            PipelineError::Encode(EncodeError::InvalidDimensions { .. }) => {
                ErrorKind::InvalidDimensions
            }
            PipelineError::Encode(_) => ErrorKind::EncodingFailed,
            PipelineError::AllocationFailed(_) => ErrorKind::AllocationFailed,
        }
    }
}

/// Summary of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Number of pixels classified as edges
    pub edge_pixels: u64,
    /// Size of the encoded PNG in bytes
    pub encoded_bytes: usize,
}

/// Encoded output of one frame together with its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFrame {
    /// PNG bytes
    pub png: Vec<u8>,
    pub report: FrameReport,
}

/// Run the pipeline on a validated frame.
pub fn process_frame(frame: &Nv21Frame) -> Result<ProcessedFrame, PipelineError> {
    let mask = detect_edges(&to_grayscale(frame));
    let edge_pixels = mask.edge_count();
    let display = expand_to_rgb(&mask);
    drop(mask);

    let png = encode_display_image(&display)?;
    let report = FrameReport {
        width: frame.width(),
        height: frame.height(),
        edge_pixels,
        encoded_bytes: png.len(),
    };
    log::debug!(
        "processed {}x{} frame: {} edge pixels, {} PNG bytes",
        report.width,
        report.height,
        report.edge_pixels,
        report.encoded_bytes
    );

    Ok(ProcessedFrame { png, report })
}

/// Validate `bytes` as an NV21 frame and run the pipeline, returning a report.
pub fn process_nv21_with_report(
    bytes: &[u8],
    width: i64,
    height: i64,
) -> Result<ProcessedFrame, PipelineError> {
    let frame = Nv21Frame::from_slice(bytes, width, height).map_err(|err| {
        log::warn!("rejecting frame: {}", err);
        err
    })?;
    process_frame(&frame)
}

/// Validate `bytes` as an NV21 frame and run the pipeline, returning PNG bytes.
///
/// # Errors
///
/// * [`PipelineError::Frame`] when the dimensions or buffer length are invalid
/// * [`PipelineError::Encode`] when PNG encoding fails
pub fn process_nv21(bytes: &[u8], width: i64, height: i64) -> Result<Vec<u8>, PipelineError> {
    process_nv21_with_report(bytes, width, height).map(|processed| processed.png)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a valid NV21 frame: any width, even height, random bytes.
    fn frame_strategy() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
        (1u32..=24, 1u32..=12).prop_flat_map(|(w, half_h)| {
            let h = half_h * 2;
            let len = (w * (h + h / 2)) as usize;
            (Just(w), Just(h), prop::collection::vec(any::<u8>(), len..=len))
        })
    }

    proptest! {
        /// Property: valid frames produce a PNG decoding to width x height RGB.
        #[test]
        fn prop_valid_frame_decodes_to_frame_size((width, height, bytes) in frame_strategy()) {
            let png = process_nv21(&bytes, width.into(), height.into()).unwrap();
            prop_assert!(!png.is_empty());

            let decoded = image::load_from_memory(&png).unwrap();
            prop_assert_eq!(decoded.color(), image::ColorType::Rgb8);
            let rgb = decoded.to_rgb8();
            prop_assert_eq!(rgb.dimensions(), (width, height));

            // Binary and channel-replicated
            for pixel in rgb.pixels() {
                let [r, g, b] = pixel.0;
                prop_assert!(r == 0 || r == 255);
                prop_assert!(r == g && g == b);
            }
        }

        /// Property: identical input gives byte-identical output.
        #[test]
        fn prop_deterministic((width, height, bytes) in frame_strategy()) {
            let first = process_nv21(&bytes, width.into(), height.into()).unwrap();
            let second = process_nv21(&bytes, width.into(), height.into()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: any buffer shorter than required is rejected, never panics.
        #[test]
        fn prop_short_buffer_rejected(
            (width, height, bytes) in frame_strategy(),
            missing in 1usize..=64,
        ) {
            let short = &bytes[..bytes.len().saturating_sub(missing)];
            let result = process_nv21(short, width.into(), height.into());
            prop_assert!(
                matches!(result, Err(PipelineError::Frame(FrameError::InvalidFrameSize { .. }))),
                "short buffers must be InvalidFrameSize"
            );
        }

        /// Property: odd heights are rejected regardless of buffer contents.
        #[test]
        fn prop_odd_height_rejected(
            width in 1i64..=32,
            half in 0i64..=16,
            len in 0usize..=256,
        ) {
            let height = half * 2 + 1;
            let result = process_nv21(&vec![0u8; len], width, height);
            prop_assert!(
                matches!(result, Err(PipelineError::Frame(FrameError::InvalidDimensions { .. }))),
                "odd heights must be InvalidDimensions"
            );
        }
    }
}
