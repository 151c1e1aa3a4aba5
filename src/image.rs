use std::io::Read;
use std::io::Write;

use crate::decode;
use crate::encode;
use crate::PixelFormat;
use crate::TgaError;

/// Only RGB24 and ARGB32 expose single-pixel read/write; every other format
/// leaves `get_pixel`/`set_pixel` as a no-op, matching `IS_OPERABLE_PIXEL_FORMAT`
/// in the reference implementation.
const fn is_operable(format: PixelFormat) -> bool {
    matches!(format, PixelFormat::Rgb24 | PixelFormat::Argb32)
}

/// A fully decoded (or freshly created) TGA image: width, height, pixel
/// format, and the pixel bytes, all owned together. Dropping an `Image`
/// releases its pixel buffer; there is no explicit `free`.
#[derive(Debug, Clone)]
pub struct Image {
    width: u16,
    height: u16,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Image {
    /// Creates a new, zero-initialized image of the given dimensions and
    /// format. `width` and `height` must each be in `1..=65535`; the
    /// parameters are widened past `u16` so that out-of-range values (not
    /// just zero) are a runtime `InvalidImageDimension` rather than a type
    /// error at the call site.
    pub fn create(width: u32, height: u32, format: PixelFormat) -> Result<Self, TgaError> {
        let width = u16::try_from(width)
            .ok()
            .filter(|&width| width != 0)
            .ok_or(TgaError::InvalidImageDimension)?;
        let height = u16::try_from(height)
            .ok()
            .filter(|&height| height != 0)
            .ok_or(TgaError::InvalidImageDimension)?;

        Self::allocate(width, height, format)
    }

    /// Allocates a zeroed pixel buffer for the given, already-validated
    /// dimensions. Shared by `create` and the decoder, which has already
    /// checked the header's width/height against zero.
    pub(crate) fn allocate(width: u16, height: u16, format: PixelFormat) -> Result<Self, TgaError> {
        let size = width as usize * height as usize * format.bytes_per_pixel();

        let mut data = Vec::new();

        data.try_reserve_exact(size).map_err(|_| TgaError::OutOfMemory)?;
        data.resize(size, 0);

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Decodes a TGA image from a sequential byte source.
    ///
    /// Reads the header, the color map (if present), and the pixel data in
    /// that order, applying run-length decompression and color-map
    /// resolution as required, then normalizes orientation so the returned
    /// image's origin is always the upper-left corner.
    pub fn decode<R: Read>(source: &mut R) -> Result<Self, TgaError> {
        decode::decode(source)
    }

    /// Encodes this image as an uncompressed TGA stream: an 18-byte header
    /// followed by the raw pixel payload. Never writes a color map, never
    /// run-length encodes, and never writes an ID field.
    pub fn encode<W: Write>(&self, sink: &mut W) -> Result<(), TgaError> {
        encode::encode(self, sink)
    }

    /// The image width in pixels.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The image height in pixels.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The image's pixel format.
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// The raw pixel bytes, row-major, origin at upper-left.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) const fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Clamps `(x, y)` to the image bounds and returns the byte offset of
    /// that pixel within `data`.
    fn pixel_offset(&self, x: i32, y: i32) -> usize {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;

        (y * self.width as usize + x) * self.bytes_per_pixel()
    }

    /// Reads the pixel at `(x, y)`, clamping out-of-range coordinates to the
    /// nearest edge pixel instead of rejecting them. Only defined for RGB24
    /// and ARGB32; other formats return `(0, 0, 0, 0)`.
    ///
    /// Channel order in memory is blue, green, red, alpha. RGB24 has no
    /// alpha byte, so its reported alpha is always 255.
    pub fn get_pixel(&self, x: i32, y: i32) -> (u8, u8, u8, u8) {
        if !is_operable(self.format) {
            return (0, 0, 0, 0);
        }

        let offset = self.pixel_offset(x, y);
        let pixel = &self.data[offset..offset + self.bytes_per_pixel()];

        let alpha = if self.format == PixelFormat::Argb32 {
            pixel[3]
        } else {
            255
        };

        (pixel[2], pixel[1], pixel[0], alpha)
    }

    /// Writes the pixel at `(x, y)`, clamping out-of-range coordinates.
    /// Only defined for RGB24 and ARGB32; other formats are a no-op. RGB24
    /// has no alpha byte, so `alpha` is ignored for it.
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, alpha: u8) {
        if !is_operable(self.format) {
            return;
        }

        let offset = self.pixel_offset(x, y);
        let bytes_per_pixel = self.bytes_per_pixel();
        let is_argb32 = self.format == PixelFormat::Argb32;
        let pixel = &mut self.data[offset..offset + bytes_per_pixel];

        pixel[0] = b;
        pixel[1] = g;
        pixel[2] = r;

        if is_argb32 {
            pixel[3] = alpha;
        }
    }

    /// Mirrors the image left-to-right in place.
    pub fn flip_horizontal(&mut self) {
        let bytes_per_pixel = self.bytes_per_pixel();
        let width = self.width as usize;
        let height = self.height as usize;

        for row in 0..height {
            let row_start = row * width * bytes_per_pixel;

            for col in 0..width / 2 {
                let left = row_start + col * bytes_per_pixel;
                let right = row_start + (width - 1 - col) * bytes_per_pixel;

                swap_pixels(&mut self.data, left, right, bytes_per_pixel);
            }
        }
    }

    /// Mirrors the image top-to-bottom in place.
    pub fn flip_vertical(&mut self) {
        let bytes_per_pixel = self.bytes_per_pixel();
        let width = self.width as usize;
        let height = self.height as usize;

        for col in 0..width {
            for row in 0..height / 2 {
                let top = (row * width + col) * bytes_per_pixel;
                let bottom = ((height - 1 - row) * width + col) * bytes_per_pixel;

                swap_pixels(&mut self.data, top, bottom, bytes_per_pixel);
            }
        }
    }
}

/// Swaps two non-overlapping `bytes_per_pixel`-sized slots within `data`.
fn swap_pixels(data: &mut [u8], a: usize, b: usize, bytes_per_pixel: usize) {
    let mut temp = [0u8; 4];

    temp[..bytes_per_pixel].copy_from_slice(&data[a..a + bytes_per_pixel]);
    data.copy_within(b..b + bytes_per_pixel, a);
    data[b..b + bytes_per_pixel].copy_from_slice(&temp[..bytes_per_pixel]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_zero_dimensions() {
        assert!(matches!(
            Image::create(0, 32, PixelFormat::Rgb24),
            Err(TgaError::InvalidImageDimension)
        ));
        assert!(matches!(
            Image::create(32, 0, PixelFormat::Argb32),
            Err(TgaError::InvalidImageDimension)
        ));
    }

    #[test]
    fn create_rejects_dimensions_past_the_16_bit_range() {
        assert!(matches!(
            Image::create(32, 65536, PixelFormat::Rgb24),
            Err(TgaError::InvalidImageDimension)
        ));
        assert!(matches!(
            Image::create(65536, 32, PixelFormat::Rgb24),
            Err(TgaError::InvalidImageDimension)
        ));
        assert!(Image::create(128, 128, PixelFormat::Rgb24).is_ok());
    }

    #[test]
    fn create_zero_initializes_the_pixel_buffer() {
        let image = Image::create(4, 4, PixelFormat::Argb32).unwrap();

        assert_eq!(image.data().len(), 4 * 4 * 4);
        assert!(image.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn get_pixel_is_a_no_op_format_outside_rgb24_and_argb32() {
        let mut image = Image::create(2, 2, PixelFormat::Bw8).unwrap();

        image.set_pixel(0, 0, 10, 20, 30, 40);

        assert_eq!(image.get_pixel(0, 0), (0, 0, 0, 0));
        assert!(image.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn set_then_get_round_trips_for_argb32() {
        let mut image = Image::create(3, 3, PixelFormat::Argb32).unwrap();

        image.set_pixel(1, 1, 10, 20, 30, 40);

        assert_eq!(image.get_pixel(1, 1), (10, 20, 30, 40));
    }

    #[test]
    fn set_then_get_round_trips_for_rgb24_with_forced_opaque_alpha() {
        let mut image = Image::create(3, 3, PixelFormat::Rgb24).unwrap();

        image.set_pixel(1, 1, 10, 20, 30, 40);

        assert_eq!(image.get_pixel(1, 1), (10, 20, 30, 255));
    }

    #[test]
    fn out_of_bounds_coordinates_clamp_to_the_nearest_edge_pixel() {
        let mut image = Image::create(4, 4, PixelFormat::Rgb24).unwrap();

        image.set_pixel(-5, -5, 1, 2, 3, 255);

        assert_eq!(image.get_pixel(0, 0), (1, 2, 3, 255));
        assert_eq!(image.get_pixel(-100, -100), (1, 2, 3, 255));

        image.set_pixel(100, 100, 4, 5, 6, 255);

        assert_eq!(image.get_pixel(3, 3), (4, 5, 6, 255));
    }

    #[test]
    fn flip_horizontal_twice_is_the_identity() {
        let mut image = Image::create(4, 3, PixelFormat::Rgb24).unwrap();

        for y in 0..3 {
            for x in 0..4 {
                image.set_pixel(x, y, x as u8, y as u8, 0, 255);
            }
        }

        let original = image.data().to_vec();

        image.flip_horizontal();
        assert_ne!(image.data(), original.as_slice());

        image.flip_horizontal();
        assert_eq!(image.data(), original.as_slice());
    }

    #[test]
    fn flip_vertical_twice_is_the_identity() {
        let mut image = Image::create(3, 4, PixelFormat::Argb32).unwrap();

        for y in 0..4 {
            for x in 0..3 {
                image.set_pixel(x, y, x as u8, y as u8, 0, 128);
            }
        }

        let original = image.data().to_vec();

        image.flip_vertical();
        assert_ne!(image.data(), original.as_slice());

        image.flip_vertical();
        assert_eq!(image.data(), original.as_slice());
    }
}
