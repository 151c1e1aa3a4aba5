use std::io::Write;

use crate::Image;
use crate::PixelFormat;
use crate::TgaError;

/// Size in bytes of the header written by `encode`.
const HEADER_SIZE: usize = 18;

/// `image_type` values used on write: everything this encoder emits is
/// uncompressed, so only the true-color and grayscale discriminants appear.
const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
const IMAGE_TYPE_GRAYSCALE: u8 = 3;

/// Writes an 18-byte header followed by the raw pixel payload. Never writes
/// a color map, never run-length encodes, and never writes an ID field -
/// the encoder only produces the simplest TGA variant any reader accepts.
pub(crate) fn encode<W: Write>(image: &Image, sink: &mut W) -> Result<(), TgaError> {
    if image.data().is_empty() {
        return Err(TgaError::NoData);
    }

    let mut header = [0u8; HEADER_SIZE];

    header[2] = match image.format() {
        PixelFormat::Bw8 | PixelFormat::Bw16 => IMAGE_TYPE_GRAYSCALE,
        PixelFormat::Rgb555 | PixelFormat::Rgb24 | PixelFormat::Argb32 => IMAGE_TYPE_TRUE_COLOR,
    };

    let width = image.width().to_le_bytes();
    let height = image.height().to_le_bytes();

    header[12] = width[0];
    header[13] = width[1];
    header[14] = height[0];
    header[15] = height[1];
    header[16] = (image.bytes_per_pixel() * 8) as u8;
    header[17] = if image.format() == PixelFormat::Argb32 {
        0x28
    } else {
        0x20
    };

    sink.write_all(&header).map_err(TgaError::FileCannotWrite)?;
    sink.write_all(image.data()).map_err(TgaError::FileCannotWrite)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn round_trip(image: &Image) -> Image {
        let mut bytes = Vec::new();

        image.encode(&mut bytes).unwrap();

        Image::decode(&mut Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn round_trips_rgb24() {
        let mut image = Image::create(3, 2, PixelFormat::Rgb24).unwrap();

        for y in 0..2 {
            for x in 0..3 {
                image.set_pixel(x, y, x as u8 * 10, y as u8 * 10, 1, 255);
            }
        }

        let decoded = round_trip(&image);

        assert_eq!(decoded.width(), image.width());
        assert_eq!(decoded.height(), image.height());
        assert_eq!(decoded.format(), image.format());
        assert_eq!(decoded.data(), image.data());
    }

    #[test]
    fn round_trips_argb32() {
        let mut image = Image::create(2, 2, PixelFormat::Argb32).unwrap();

        image.set_pixel(0, 0, 1, 2, 3, 4);
        image.set_pixel(1, 1, 5, 6, 7, 8);

        let decoded = round_trip(&image);

        assert_eq!(decoded.format(), PixelFormat::Argb32);
        assert_eq!(decoded.data(), image.data());
    }

    #[test]
    fn round_trips_bw8_and_bw16() {
        let mut bw8 = Image::create(4, 1, PixelFormat::Bw8).unwrap();
        bw8.data_mut().copy_from_slice(&[1, 2, 3, 4]);

        let decoded = round_trip(&bw8);
        assert_eq!(decoded.format(), PixelFormat::Bw8);
        assert_eq!(decoded.data(), bw8.data());

        let mut bw16 = Image::create(2, 1, PixelFormat::Bw16).unwrap();
        bw16.data_mut().copy_from_slice(&[1, 2, 3, 4]);

        let decoded = round_trip(&bw16);
        assert_eq!(decoded.format(), PixelFormat::Bw16);
        assert_eq!(decoded.data(), bw16.data());
    }
}
