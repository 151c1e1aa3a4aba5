#![deny(unsafe_code)]

//! A codec for the Truevision TGA image format.
//!
//! Supports decoding every common variant - uncompressed or run-length
//! encoded, true-color, grayscale, or color-mapped - into one of five fixed
//! pixel formats, and encoding an image back out as an uncompressed,
//! true-color or grayscale TGA stream. File I/O and anything beyond
//! flipping and single-pixel access are left to the caller: `Image::decode`
//! and `Image::encode` work against any `Read`/`Write` byte stream.

mod byte_reader;
mod color_map;
mod decode;
mod encode;
mod error;
mod header;
mod image;
mod pixel_format;

pub use error::*;
pub use image::*;
pub use pixel_format::*;
