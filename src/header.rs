use std::io::Read;

use crate::byte_reader::HeaderReader;
use crate::PixelFormat;
use crate::TgaError;

/// Recognized values of the header's `image_type` field.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImageType {
    NoData = 0,
    ColorMapped = 1,
    TrueColor = 2,
    Grayscale = 3,
    RleColorMapped = 9,
    RleTrueColor = 10,
    RleGrayscale = 11,
}

impl ImageType {
    const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::NoData,
            1 => Self::ColorMapped,
            2 => Self::TrueColor,
            3 => Self::Grayscale,
            9 => Self::RleColorMapped,
            10 => Self::RleTrueColor,
            11 => Self::RleGrayscale,
            _ => return None,
        })
    }

    pub(crate) const fn is_color_mapped(self) -> bool {
        matches!(self, Self::ColorMapped | Self::RleColorMapped)
    }

    const fn is_true_color(self) -> bool {
        matches!(self, Self::TrueColor | Self::RleTrueColor)
    }

    const fn is_grayscale(self) -> bool {
        matches!(self, Self::Grayscale | Self::RleGrayscale)
    }

    pub(crate) const fn is_rle(self) -> bool {
        matches!(
            self,
            Self::RleColorMapped | Self::RleTrueColor | Self::RleGrayscale
        )
    }
}

/// The fixed 18-byte TGA header.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TgaHeader {
    pub(crate) id_length: u8,
    pub(crate) map_type: u8,
    pub(crate) image_type: ImageType,
    pub(crate) map_first_entry: u16,
    pub(crate) map_length: u16,
    pub(crate) map_entry_size: u8,
    pub(crate) image_width: u16,
    pub(crate) image_height: u16,
    pub(crate) pixel_depth: u8,
    pub(crate) image_descriptor: u8,
}

impl TgaHeader {
    /// Bit 4 of the image descriptor: the origin is on the right edge.
    pub(crate) const fn flip_h(&self) -> bool {
        self.image_descriptor & 0x10 != 0
    }

    /// Bit 5 of the image descriptor clear: the origin is on the bottom edge.
    pub(crate) const fn flip_v(&self) -> bool {
        self.image_descriptor & 0x20 == 0
    }

    pub(crate) const fn pixel_bytes(&self) -> usize {
        bits_to_bytes(self.pixel_depth)
    }

    pub(crate) const fn map_bytes_per_entry(&self) -> usize {
        bits_to_bytes(self.map_entry_size)
    }
}

/// Converts a bit count to the number of bytes needed to hold it. Computed
/// in a signed type so a `bits` of 0 (an absent color map's `map_entry_size`)
/// doesn't underflow; this matches the reference implementation's own
/// `BITS_TO_BYTES` macro, which relies on `uint8_t`'s promotion to `int`
/// for the same reason.
pub(crate) const fn bits_to_bytes(bits: u8) -> usize {
    (((bits as i32) - 1) / 8 + 1) as usize
}

/// Reads and validates the 18-byte header, and resolves the pixel format
/// implied by it, in the order the format demands: short reads first, then
/// the color map type, then the image type, then the dimensions, and only
/// then the depth/entry-size combination.
pub(crate) fn read_header_and_format<R: Read>(
    source: &mut R,
) -> Result<(TgaHeader, PixelFormat), TgaError> {
    let mut reader = HeaderReader::new(source);

    let id_length = reader.read_u8();
    let map_type = reader.read_u8();
    let image_type_raw = reader.read_u8();
    let map_first_entry = reader.read_u16_le();
    let map_length = reader.read_u16_le();
    let map_entry_size = reader.read_u8();
    let _image_x_origin = reader.read_u16_le();
    let _image_y_origin = reader.read_u16_le();
    let image_width = reader.read_u16_le();
    let image_height = reader.read_u16_le();
    let pixel_depth = reader.read_u8();
    let image_descriptor = reader.read_u8();

    if reader.failed() {
        return Err(TgaError::FileCannotRead(std::io::Error::from(
            std::io::ErrorKind::UnexpectedEof,
        )));
    }

    if map_type > 1 {
        return Err(TgaError::UnsupportedColorMapType);
    }

    let image_type = ImageType::from_u8(image_type_raw).ok_or(TgaError::UnsupportedImageType)?;

    if image_type == ImageType::NoData {
        return Err(TgaError::NoData);
    }

    if image_width == 0 || image_height == 0 {
        return Err(TgaError::InvalidImageDimension);
    }

    let header = TgaHeader {
        id_length,
        map_type,
        image_type,
        map_first_entry,
        map_length,
        map_entry_size,
        image_width,
        image_height,
        pixel_depth,
        image_descriptor,
    };

    let format = resolve_pixel_format(&header)?;

    Ok((header, format))
}

/// The exact (image class, pixel depth, map entry size) -> format table.
fn resolve_pixel_format(header: &TgaHeader) -> Result<PixelFormat, TgaError> {
    if header.image_type.is_color_mapped() {
        if header.pixel_depth == 8 {
            return match header.map_entry_size {
                15 | 16 => Ok(PixelFormat::Rgb555),
                24 => Ok(PixelFormat::Rgb24),
                32 => Ok(PixelFormat::Argb32),
                _ => Err(TgaError::UnsupportedPixelFormat),
            };
        }
    } else if header.image_type.is_true_color() {
        return match header.pixel_depth {
            16 => Ok(PixelFormat::Rgb555),
            24 => Ok(PixelFormat::Rgb24),
            32 => Ok(PixelFormat::Argb32),
            _ => Err(TgaError::UnsupportedPixelFormat),
        };
    } else if header.image_type.is_grayscale() {
        return match header.pixel_depth {
            8 => Ok(PixelFormat::Bw8),
            16 => Ok(PixelFormat::Bw16),
            _ => Err(TgaError::UnsupportedPixelFormat),
        };
    }

    Err(TgaError::UnsupportedPixelFormat)
}
