use std::io::Read;

use crate::header::TgaHeader;
use crate::TgaError;

/// A color-mapped image's palette, loaded once and held for the duration of
/// a single decode. Dropped when the decode function returns, same as the
/// reference implementation frees it immediately after decoding the pixels.
pub(crate) struct ColorMap {
    first_index: u16,
    entry_count: u16,
    bytes_per_entry: usize,
    entries: Vec<u8>,
}

impl ColorMap {
    /// Loads the color map if the image is color-mapped, skips the
    /// color-map payload if one is merely present but unused, or does
    /// neither if `map_type` says there is none.
    pub(crate) fn load<R: Read>(
        header: &TgaHeader,
        source: &mut R,
    ) -> Result<Option<Self>, TgaError> {
        let bytes_per_entry = header.map_bytes_per_entry();
        let map_size = header.map_length as usize * bytes_per_entry;

        if header.image_type.is_color_mapped() {
            let mut entries = Vec::new();

            entries
                .try_reserve_exact(map_size)
                .map_err(|_| TgaError::OutOfMemory)?;
            entries.resize(map_size, 0);

            source
                .read_exact(&mut entries)
                .map_err(TgaError::FileCannotRead)?;

            Ok(Some(Self {
                first_index: header.map_first_entry,
                entry_count: header.map_length,
                bytes_per_entry,
                entries,
            }))
        } else if header.map_type == 1 {
            skip_bytes(source, map_size)?;

            Ok(None)
        } else {
            Ok(None)
        }
    }

    /// Resolves a pixel's raw index to a map entry, rejecting indices
    /// outside `[first_index, first_index + entry_count)` instead of
    /// reading past the map like the original's unsigned-wraparound check
    /// did (see the `BadColorMapIndex` design note).
    pub(crate) fn get(&self, index: u16) -> Result<&[u8], TgaError> {
        let offset = i32::from(index) - i32::from(self.first_index);

        if offset < 0 || offset >= i32::from(self.entry_count) {
            return Err(TgaError::BadColorMapIndex);
        }

        let start = offset as usize * self.bytes_per_entry;

        Ok(&self.entries[start..start + self.bytes_per_entry])
    }
}

/// Discards `count` bytes from a forward-only byte source. The id field and
/// an unused color map are skipped this way rather than via `Seek`, since
/// the abstract byte source is never assumed to support seeking.
pub(crate) fn skip_bytes<R: Read>(source: &mut R, mut count: usize) -> Result<(), TgaError> {
    let mut scratch = [0u8; 256];

    while count > 0 {
        let chunk = count.min(scratch.len());

        source
            .read_exact(&mut scratch[..chunk])
            .map_err(TgaError::FileCannotRead)?;

        count -= chunk;
    }

    Ok(())
}
