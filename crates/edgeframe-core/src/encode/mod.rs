//! Image encoding for the pipeline output.
//!
//! This module provides functionality for:
//! - Encoding 8-bit RGB images to PNG
//!
//! # Examples
//!
//! ```ignore
//! use edgeframe_core::encode::encode_png;
//!
//! let pixels = vec![0u8; 64 * 48 * 3]; // Black image
//! let png_bytes = encode_png(&pixels, 64, 48).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_display_image, encode_png, EncodeError};
