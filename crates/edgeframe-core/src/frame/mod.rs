//! NV21 frame ingest.
//!
//! An NV21 buffer is a single allocation holding a full-resolution luma plane
//! followed by a half-resolution plane of interleaved `V, U` chroma pairs:
//!
//! ```text
//! +---------------------------+  0
//! | Y (width * height)        |
//! +---------------------------+  width * height
//! | VU VU VU ... (height / 2  |
//! | rows of `width` bytes)    |
//! +---------------------------+  width * (height + height / 2)
//! ```
//!
//! [`Nv21Frame`] is the only way into the pipeline. Its constructors validate
//! the declared geometry against the buffer length before any byte is read, so
//! every later stage can slice planes without bounds concerns.

mod pack;

pub use pack::{pack_nv21, PlaneView, Yuv420Planes, NEUTRAL_CHROMA};

use thiserror::Error;

/// Errors raised while interpreting a buffer as an NV21 frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Width or height is zero, negative, too large, or the height is odd
    #[error(
        "Invalid dimensions: {width}x{height} (width and height must be positive and height even)"
    )]
    InvalidDimensions { width: i64, height: i64 },

    /// Buffer length doesn't match `width * (height + height / 2)`
    #[error("Invalid frame size: expected {expected} bytes (width * height * 3 / 2), got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },
}

/// Geometry of a validated NV21 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Geometry {
    width: u32,
    height: u32,
    luma_len: usize,
    total_len: usize,
}

impl Geometry {
    fn new(width: i64, height: i64) -> Result<Self, FrameError> {
        let invalid = FrameError::InvalidDimensions { width, height };

        if width <= 0 || height <= 0 || height % 2 != 0 {
            return Err(invalid);
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(invalid);
        };
        let Some(total_len) = nv21_frame_len(w, h) else {
            return Err(invalid);
        };

        Ok(Self {
            width: w,
            height: h,
            luma_len: w as usize * h as usize,
            total_len,
        })
    }

    fn check_len(&self, actual: usize) -> Result<(), FrameError> {
        if actual != self.total_len {
            return Err(FrameError::InvalidFrameSize {
                expected: self.total_len,
                actual,
            });
        }
        Ok(())
    }
}

/// Number of bytes in an NV21 frame of the given size, or `None` on overflow.
///
/// This is `width * (height + height / 2)`. The caller is responsible for
/// rejecting odd heights; this function only does the arithmetic.
pub fn nv21_frame_len(width: u32, height: u32) -> Option<usize> {
    let rows = (height as usize).checked_add(height as usize / 2)?;
    (width as usize).checked_mul(rows)
}

/// An owned, validated NV21 frame.
///
/// Immutable once constructed. Dimensions are signed on the way in because the
/// managed side hands over 32-bit signed integers; anything that is not a
/// positive width and a positive even height is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nv21Frame {
    width: u32,
    height: u32,
    luma_len: usize,
    data: Vec<u8>,
}

impl Nv21Frame {
    /// Take ownership of `data` as an NV21 frame of `width` x `height`.
    ///
    /// # Errors
    ///
    /// * [`FrameError::InvalidDimensions`] for non-positive dimensions, odd
    ///   height, or a geometry whose byte size overflows `usize`
    /// * [`FrameError::InvalidFrameSize`] when `data.len()` is not exactly
    ///   `width * (height + height / 2)`
    pub fn new(data: Vec<u8>, width: i64, height: i64) -> Result<Self, FrameError> {
        let geometry = Geometry::new(width, height)?;
        geometry.check_len(data.len())?;
        Ok(Self::from_geometry(geometry, data))
    }

    /// Validate `bytes` and copy them into a new frame.
    ///
    /// Validation happens before the copy, so a rejected buffer is never
    /// duplicated.
    pub fn from_slice(bytes: &[u8], width: i64, height: i64) -> Result<Self, FrameError> {
        let geometry = Geometry::new(width, height)?;
        geometry.check_len(bytes.len())?;
        Ok(Self::from_geometry(geometry, bytes.to_vec()))
    }

    fn from_geometry(geometry: Geometry, data: Vec<u8>) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            luma_len: geometry.luma_len,
            data,
        }
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full-resolution luma plane, `width * height` bytes, row-major.
    pub fn luma_plane(&self) -> &[u8] {
        &self.data[..self.luma_len]
    }

    /// The interleaved `V, U` plane, `width * (height / 2)` bytes.
    pub fn chroma_plane(&self) -> &[u8] {
        &self.data[self.luma_len..]
    }

    /// The whole NV21 buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Release the underlying buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_bytes(width: usize, height: usize) -> Vec<u8> {
        vec![0u8; width * (height + height / 2)]
    }

    #[test]
    fn test_nv21_frame_len() {
        assert_eq!(nv21_frame_len(4, 4), Some(24));
        assert_eq!(nv21_frame_len(640, 480), Some(460_800));
        assert_eq!(nv21_frame_len(3, 2), Some(9));
    }

    #[test]
    fn test_new_valid_frame() {
        let frame = Nv21Frame::new(frame_bytes(4, 4), 4, 4).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.luma_plane().len(), 16);
        assert_eq!(frame.chroma_plane().len(), 8);
        assert_eq!(frame.as_bytes().len(), 24);
    }

    #[test]
    fn test_planes_split_at_luma_boundary() {
        let mut bytes = vec![10u8; 16];
        bytes.extend_from_slice(&[200u8; 8]);
        let frame = Nv21Frame::new(bytes, 4, 4).unwrap();

        assert!(frame.luma_plane().iter().all(|&b| b == 10));
        assert!(frame.chroma_plane().iter().all(|&b| b == 200));
    }

    #[test]
    fn test_odd_width_is_accepted() {
        let frame = Nv21Frame::new(frame_bytes(3, 2), 3, 2).unwrap();
        assert_eq!(frame.luma_plane().len(), 6);
        assert_eq!(frame.chroma_plane().len(), 3);
    }

    #[test]
    fn test_odd_height_is_rejected() {
        let result = Nv21Frame::new(vec![0u8; 8], 2, 3);
        assert_eq!(
            result,
            Err(FrameError::InvalidDimensions {
                width: 2,
                height: 3
            })
        );
    }

    #[test]
    fn test_zero_and_negative_dimensions() {
        for (w, h) in [(0, 4), (4, 0), (-4, 4), (4, -2), (0, 0)] {
            let result = Nv21Frame::new(vec![], w, h);
            assert!(
                matches!(result, Err(FrameError::InvalidDimensions { .. })),
                "{}x{} should be rejected",
                w,
                h
            );
        }
    }

    #[test]
    fn test_oversized_dimensions() {
        let result = Nv21Frame::new(vec![], i64::from(u32::MAX) + 1, 2);
        assert!(matches!(result, Err(FrameError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_short_buffer() {
        let result = Nv21Frame::new(vec![0u8; 23], 4, 4);
        assert_eq!(
            result,
            Err(FrameError::InvalidFrameSize {
                expected: 24,
                actual: 23
            })
        );
    }

    #[test]
    fn test_long_buffer() {
        let result = Nv21Frame::new(vec![0u8; 25], 4, 4);
        assert!(matches!(
            result,
            Err(FrameError::InvalidFrameSize {
                expected: 24,
                actual: 25
            })
        ));
    }

    #[test]
    fn test_luma_only_buffer_is_short() {
        // A common mistake: passing just the Y plane
        let result = Nv21Frame::from_slice(&[0u8; 640 * 480], 640, 480);
        assert!(matches!(result, Err(FrameError::InvalidFrameSize { .. })));
    }

    #[test]
    fn test_from_slice_copies() {
        let bytes = frame_bytes(2, 2);
        let frame = Nv21Frame::from_slice(&bytes, 2, 2).unwrap();
        assert_eq!(frame.as_bytes(), bytes.as_slice());
        assert_eq!(frame.into_bytes(), bytes);
    }

    #[test]
    fn test_error_display() {
        let err = FrameError::InvalidFrameSize {
            expected: 24,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid frame size: expected 24 bytes (width * height * 3 / 2), got 10"
        );
    }
}
