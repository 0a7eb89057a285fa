//! Image types passed between pipeline stages.

/// Single-channel 8-bit image, row-major.
///
/// The `image` crate's buffer is used directly so the edge detector can work
/// on it without another copy.
pub type GrayscaleImage = image::GrayImage;

/// Sample value marking an edge pixel.
pub const EDGE: u8 = 255;

/// Sample value marking a non-edge pixel.
pub const NO_EDGE: u8 = 0;

/// Binary edge map: every sample is either [`EDGE`] or [`NO_EDGE`].
///
/// Only the edge detector constructs masks, which is what keeps the binary
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    image: image::GrayImage,
}

impl EdgeMask {
    /// An all-[`NO_EDGE`] mask.
    pub(crate) fn empty(width: u32, height: u32) -> Self {
        Self {
            image: image::GrayImage::new(width, height),
        }
    }

    /// Wrap detector output, forcing every non-zero sample to [`EDGE`].
    pub(crate) fn from_detector_output(mut image: image::GrayImage) -> Self {
        for sample in image.iter_mut() {
            *sample = if *sample == NO_EDGE { NO_EDGE } else { EDGE };
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Mask samples in row-major order.
    pub fn samples(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Whether the pixel at (`x`, `y`) is an edge. Out-of-range is `false`.
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|p| p.0[0] == EDGE)
    }

    /// Number of edge pixels.
    pub fn edge_count(&self) -> u64 {
        self.samples().iter().filter(|&&s| s == EDGE).count() as u64
    }
}

/// A 3-channel 8-bit image ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DisplayImage {
    /// Create a new DisplayImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }
}
