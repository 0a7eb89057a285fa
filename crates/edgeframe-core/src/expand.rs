//! Expansion of the single-channel edge mask into a 3-channel image.
//!
//! Each mask sample is copied into all three channels, giving white edges on
//! black. No color transform happens here.

use crate::types::{DisplayImage, EdgeMask};

/// Replicate each mask sample into three identical channels.
pub fn expand_to_rgb(mask: &EdgeMask) -> DisplayImage {
    let pixels = mask.samples().iter().flat_map(|&s| [s, s, s]).collect();
    DisplayImage::new(mask.width(), mask.height(), pixels)
}
