use std::fmt;

/// Everything that can go wrong while creating, decoding, or encoding a TGA image.
#[derive(Debug)]
pub enum TgaError {
    /// An allocation for image or color map data failed.
    OutOfMemory,
    /// The byte source ended early or returned an I/O error while decoding.
    FileCannotRead(std::io::Error),
    /// The byte sink returned an I/O error, or a write was short, while encoding.
    FileCannotWrite(std::io::Error),
    /// The header declares no image data, or encode was called on an empty image.
    NoData,
    /// `map_type` was greater than 1.
    UnsupportedColorMapType,
    /// `image_type` was not one of the seven recognized values.
    UnsupportedImageType,
    /// The combination of image class, pixel depth, and map entry size has no
    /// corresponding `PixelFormat`.
    UnsupportedPixelFormat,
    /// `width` or `height` was zero (or, for `Image::create`, exceeded 65535).
    InvalidImageDimension,
    /// A color-mapped pixel's index fell outside `[first_index, first_index + entry_count)`.
    BadColorMapIndex,
}

impl fmt::Display for TgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "memory allocation failed"),
            Self::FileCannotRead(error) => write!(f, "cannot read tga data: {error}"),
            Self::FileCannotWrite(error) => write!(f, "cannot write tga data: {error}"),
            Self::NoData => write!(f, "image has no data"),
            Self::UnsupportedColorMapType => write!(f, "unsupported color map type"),
            Self::UnsupportedImageType => write!(f, "unsupported image type"),
            Self::UnsupportedPixelFormat => write!(f, "unsupported pixel format"),
            Self::InvalidImageDimension => write!(f, "invalid image dimension"),
            Self::BadColorMapIndex => write!(f, "color map index out of range"),
        }
    }
}

impl std::error::Error for TgaError {}
