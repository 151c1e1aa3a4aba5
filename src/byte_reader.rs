use std::io::Read;

/// Reads the fixed-width integers that make up a TGA header.
///
/// Mirrors the reference implementation's `has_read_file_error` pattern: a
/// short read raises a sticky flag and the accessor returns 0 instead of
/// propagating immediately, so a run of header fields can be read without
/// a `?` after every one. The flag is owned by this value, not global state,
/// so it never leaks across decodes. Scoped to header parsing only - the
/// uncompressed and RLE decoders below detect short reads directly through
/// `Read::read_exact`.
pub(crate) struct HeaderReader<'a, R: Read> {
    source: &'a mut R,
    failed: bool,
}

impl<'a, R: Read> HeaderReader<'a, R> {
    pub(crate) fn new(source: &'a mut R) -> Self {
        Self {
            source,
            failed: false,
        }
    }

    pub(crate) fn read_u8(&mut self) -> u8 {
        let mut buffer = [0u8; 1];

        if self.source.read_exact(&mut buffer).is_err() {
            self.failed = true;
            return 0;
        }

        buffer[0]
    }

    pub(crate) fn read_u16_le(&mut self) -> u16 {
        let mut buffer = [0u8; 2];

        if self.source.read_exact(&mut buffer).is_err() {
            self.failed = true;
            return 0;
        }

        u16::from_le_bytes(buffer)
    }

    pub(crate) fn failed(&self) -> bool {
        self.failed
    }
}
