//! Canny edge detection with fixed thresholds.
//!
//! Gradients come straight from 3x3 Sobel kernels on the unsmoothed image
//! ([`imageproc::gradients`], borders clamped). The Euclidean magnitude is
//! thinned by non-maximum suppression along the quantized gradient direction,
//! then pixels are classified by hysteresis:
//!
//! - gradient magnitude above [`CANNY_HIGH_THRESHOLD`] is an edge
//! - above [`CANNY_LOW_THRESHOLD`] is an edge only if 8-connected to an edge
//! - everything else is not an edge
//!
//! The thresholds are part of the pipeline's look and are not configurable.

use crate::types::{EdgeMask, GrayscaleImage, EDGE, NO_EDGE};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

/// Lower hysteresis threshold, on the 0-255 intensity scale.
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;

/// Upper hysteresis threshold, on the 0-255 intensity scale.
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Smallest width or height with room for a 3x3 derivative kernel.
pub const MIN_EDGE_DIMENSION: u32 = 3;

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// Detect edges in `gray`, returning a binary mask of the same size.
///
/// Images narrower or shorter than [`MIN_EDGE_DIMENSION`] have no interior
/// pixel to measure a gradient at and yield an empty mask.
pub fn detect_edges(gray: &GrayscaleImage) -> EdgeMask {
    let (width, height) = gray.dimensions();
    if width < MIN_EDGE_DIMENSION || height < MIN_EDGE_DIMENSION {
        return EdgeMask::empty(width, height);
    }

    let gradients = Gradients::sobel(gray);
    let thinned = gradients.suppress_non_maxima();
    let edges = hysteresis(&thinned, width, height);
    EdgeMask::from_detector_output(edges)
}

/// Per-pixel Sobel derivatives and magnitude, row-major.
struct Gradients {
    width: usize,
    height: usize,
    gx: Vec<f32>,
    gy: Vec<f32>,
    mag: Vec<f32>,
}

impl Gradients {
    fn sobel(gray: &GrayscaleImage) -> Self {
        let to_f32 = |buf: image::ImageBuffer<image::Luma<i16>, Vec<i16>>| -> Vec<f32> {
            buf.into_raw().into_iter().map(f32::from).collect()
        };
        let gx = to_f32(horizontal_sobel(gray));
        let gy = to_f32(vertical_sobel(gray));
        let mag = gx.iter().zip(&gy).map(|(x, y)| x.hypot(*y)).collect();
        Self {
            width: gray.width() as usize,
            height: gray.height() as usize,
            gx,
            gy,
            mag,
        }
    }

    /// Zero every magnitude that is not a local maximum across the edge.
    ///
    /// The outermost 1-pixel frame is always zeroed. On a plateau the first
    /// pixel along the gradient direction wins, so a sharp step stays one
    /// pixel wide instead of vanishing.
    fn suppress_non_maxima(&self) -> Vec<f32> {
        let (w, h) = (self.width, self.height);
        let mut out = vec![0.0f32; w * h];

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = y * w + x;
                let mag = self.mag[i];
                if mag <= CANNY_LOW_THRESHOLD {
                    continue;
                }

                let (gx, gy) = (self.gx[i], self.gy[i]);
                let (abs_gx, abs_gy) = (gx.abs(), gy.abs());
                let same_sign = (gx >= 0.0) == (gy >= 0.0);

                // (before, after) along the gradient
                let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (i - 1, i + 1)
                } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                    (i - w, i + w)
                } else if same_sign {
                    (i - w - 1, i + w + 1)
                } else {
                    (i - w + 1, i + w - 1)
                };

                if mag > self.mag[before] && mag >= self.mag[after] {
                    out[i] = mag;
                }
            }
        }
        out
    }
}

/// Keep strong pixels and every weak pixel 8-connected to one.
fn hysteresis(thinned: &[f32], width: u32, height: u32) -> GrayscaleImage {
    let (w, h) = (width as usize, height as usize);
    let mut out = GrayscaleImage::new(width, height);
    let samples: &mut [u8] = &mut out;
    let mut stack = Vec::new();

    for (i, &mag) in thinned.iter().enumerate() {
        if mag > CANNY_HIGH_THRESHOLD && samples[i] == NO_EDGE {
            samples[i] = EDGE;
            stack.push(i);
        }

        while let Some(j) = stack.pop() {
            let (x, y) = (j % w, j / w);
            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let k = ny * w + nx;
                    if samples[k] == NO_EDGE && thinned[k] > CANNY_LOW_THRESHOLD {
                        samples[k] = EDGE;
                        stack.push(k);
                    }
                }
            }
        }
    }
    out
}
