use crate::TgaError;

/// The in-memory pixel format of a decoded or created image.
///
/// This is the full set of formats the codec understands; there is no
/// `Unknown` variant because every `Image` that exists carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single channel, 8-bit grayscale.
    Bw8,
    /// Single channel, 16-bit grayscale.
    Bw16,
    /// 5 bits each for red, green, blue, plus one attribute bit.
    Rgb555,
    /// 8 bits each for blue, green, red, stored in that order.
    Rgb24,
    /// 8 bits each for blue, green, red, alpha, stored in that order.
    Argb32,
}

impl PixelFormat {
    /// Returns the number of bytes one pixel of this format occupies, both
    /// in memory and in an uncompressed TGA payload.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bw8 => 1,
            Self::Bw16 | Self::Rgb555 => 2,
            Self::Rgb24 => 3,
            Self::Argb32 => 4,
        }
    }
}

/// A boundary conversion from a raw discriminant, used nowhere internally
/// but kept so callers crossing an FFI-style boundary have a checked path
/// onto the closed enum instead of transmuting one together.
impl TryFrom<u8> for PixelFormat {
    type Error = TgaError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Bw8),
            1 => Ok(Self::Bw16),
            2 => Ok(Self::Rgb555),
            3 => Ok(Self::Rgb24),
            4 => Ok(Self::Argb32),
            _ => Err(TgaError::UnsupportedPixelFormat),
        }
    }
}
