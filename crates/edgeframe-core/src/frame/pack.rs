//! Packing of strided YUV 4:2:0 camera planes into a tight NV21 buffer.
//!
//! Android's `ImageReader` delivers `YUV_420_888` images as three planes, each
//! with its own row stride (bytes between rows) and pixel stride (bytes between
//! horizontally adjacent samples). Chroma planes are often views into the same
//! interleaved memory with a pixel stride of 2. This module walks those planes
//! with their strides and writes the layout [`Nv21Frame`] expects.

use super::{nv21_frame_len, FrameError, Nv21Frame};

/// Chroma value written where a chroma plane runs out of samples.
pub const NEUTRAL_CHROMA: u8 = 128;

/// A borrowed view of one image plane with its strides.
#[derive(Debug, Clone, Copy)]
pub struct PlaneView<'a> {
    /// Plane bytes, starting at the plane's first sample
    pub data: &'a [u8],
    /// Bytes between the starts of consecutive rows
    pub row_stride: usize,
    /// Bytes between horizontally adjacent samples
    pub pixel_stride: usize,
}

impl<'a> PlaneView<'a> {
    pub fn new(data: &'a [u8], row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }

    /// A tightly packed plane: `row_stride == width`, `pixel_stride == 1`.
    pub fn packed(data: &'a [u8], width: usize) -> Self {
        Self::new(data, width, 1)
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        row.checked_mul(self.row_stride)?
            .checked_add(col.checked_mul(self.pixel_stride)?)
    }

    fn sample(&self, row: usize, col: usize) -> Option<u8> {
        self.data.get(self.offset(row, col)?).copied()
    }

    /// A contiguous row of `len` samples, only when pixel stride is 1.
    fn contiguous_row(&self, row: usize, len: usize) -> Option<&'a [u8]> {
        if self.pixel_stride != 1 {
            return None;
        }
        let start = self.offset(row, 0)?;
        self.data.get(start..start.checked_add(len)?)
    }

    fn has_zero_stride(&self) -> bool {
        self.row_stride == 0 || self.pixel_stride == 0
    }
}

/// The three planes of a YUV 4:2:0 image.
#[derive(Debug, Clone, Copy)]
pub struct Yuv420Planes<'a> {
    pub y: PlaneView<'a>,
    pub u: PlaneView<'a>,
    pub v: PlaneView<'a>,
}

/// Pack strided Y, U and V planes into an NV21 frame.
///
/// Luma rows are copied using the Y plane's strides, then chroma is written as
/// `V, U` pairs for `height / 2` rows and `width / 2` columns.
///
/// Planes shorter than their strides imply are tolerated: a luma row that runs
/// out is padded by repeating the last written sample, and chroma that runs out
/// is left at [`NEUTRAL_CHROMA`]. The result always has the exact NV21 length.
///
/// # Errors
///
/// Returns [`FrameError::InvalidDimensions`] if either dimension is zero, the
/// height is odd, or any plane has a zero stride.
pub fn pack_nv21(planes: &Yuv420Planes<'_>, width: u32, height: u32) -> Result<Nv21Frame, FrameError> {
    let invalid = FrameError::InvalidDimensions {
        width: i64::from(width),
        height: i64::from(height),
    };

    if width == 0 || height == 0 || height % 2 != 0 {
        return Err(invalid);
    }
    if planes.y.has_zero_stride() || planes.u.has_zero_stride() || planes.v.has_zero_stride() {
        return Err(invalid);
    }
    let Some(total_len) = nv21_frame_len(width, height) else {
        return Err(invalid);
    };

    let w = width as usize;
    let h = height as usize;
    let mut nv21 = Vec::with_capacity(total_len);

    for row in 0..h {
        let row_start = nv21.len();
        if let Some(src) = planes.y.contiguous_row(row, w) {
            nv21.extend_from_slice(src);
            continue;
        }
        for col in 0..w {
            match planes.y.sample(row, col) {
                Some(value) => nv21.push(value),
                None => break,
            }
        }
        let fill = nv21.last().copied().unwrap_or(0);
        nv21.resize(row_start + w, fill);
    }

    let luma_len = nv21.len();
    nv21.resize(total_len, NEUTRAL_CHROMA);
    let chroma = &mut nv21[luma_len..];

    'rows: for row in 0..h / 2 {
        for col in 0..w / 2 {
            let (Some(v), Some(u)) = (planes.v.sample(row, col), planes.u.sample(row, col)) else {
                // Both chroma planes end at the same place in practice
                break 'rows;
            };
            let idx = row * w + col * 2;
            chroma[idx] = v;
            chroma[idx + 1] = u;
        }
    }

    Nv21Frame::new(nv21, i64::from(width), i64::from(height))
}
