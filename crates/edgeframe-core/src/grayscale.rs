//! NV21 to grayscale conversion.
//!
//! The NV21 luma plane already is a grayscale image, so conversion is a copy
//! of that plane. Chroma is discarded without any color math.

use crate::frame::Nv21Frame;
use crate::types::GrayscaleImage;

/// Copy the luma plane of `frame` into a standalone grayscale image.
pub fn to_grayscale(frame: &Nv21Frame) -> GrayscaleImage {
    let mut gray = GrayscaleImage::new(frame.width(), frame.height());
    // Nv21Frame guarantees the luma plane is exactly width * height bytes
    gray.copy_from_slice(frame.luma_plane());
    gray
}
