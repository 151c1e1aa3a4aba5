use std::io::Read;

use crate::color_map::skip_bytes;
use crate::color_map::ColorMap;
use crate::header::read_header_and_format;
use crate::header::TgaHeader;
use crate::Image;
use crate::TgaError;

/// Orchestrates a full decode: header, id field, color map, pixel data,
/// orientation. Mirrors the reference implementation's `load_image` state
/// machine (header -> id skip -> color map -> allocate -> decode -> flip),
/// except resources are released by ordinary drop on every early return
/// instead of by an explicit free call.
pub(crate) fn decode<R: Read>(source: &mut R) -> Result<Image, TgaError> {
    let (header, format) = read_header_and_format(source)?;

    skip_bytes(source, header.id_length as usize)?;

    let color_map = ColorMap::load(&header, source)?;

    let mut image = Image::allocate(header.image_width, header.image_height, format)?;

    if header.image_type.is_rle() {
        decode_rle(&mut image, &header, color_map.as_ref(), source)?;
    } else {
        decode_uncompressed(&mut image, &header, color_map.as_ref(), source)?;
    }

    if header.flip_h() {
        image.flip_horizontal();
    }

    if header.flip_v() {
        image.flip_vertical();
    }

    Ok(image)
}

/// Decodes a straight, unencoded pixel stream.
fn decode_uncompressed<R: Read>(
    image: &mut Image,
    header: &TgaHeader,
    color_map: Option<&ColorMap>,
    source: &mut R,
) -> Result<(), TgaError> {
    let bytes_per_pixel = image.bytes_per_pixel();

    if let Some(color_map) = color_map {
        let pixel_bytes = header.pixel_bytes();
        let pixel_count = header.image_width as usize * header.image_height as usize;

        for i in 0..pixel_count {
            let mut index_buffer = [0u8; 1];

            source
                .read_exact(&mut index_buffer[..pixel_bytes])
                .map_err(TgaError::FileCannotRead)?;

            let entry = color_map.get(index_buffer[0] as u16)?;
            let offset = i * bytes_per_pixel;

            image.data_mut()[offset..offset + bytes_per_pixel].copy_from_slice(entry);
        }
    } else {
        source
            .read_exact(image.data_mut())
            .map_err(TgaError::FileCannotRead)?;
    }

    Ok(())
}

/// Decodes a run-length encoded pixel stream: a sequence of packets, each
/// either a run (one pixel, repeated) or raw (a handful of distinct
/// pixels), until `width * height` pixels have been produced.
fn decode_rle<R: Read>(
    image: &mut Image,
    header: &TgaHeader,
    color_map: Option<&ColorMap>,
    source: &mut R,
) -> Result<(), TgaError> {
    let pixel_bytes = header.pixel_bytes();
    let bytes_per_pixel = image.bytes_per_pixel();
    let pixel_count = header.image_width as usize * header.image_height as usize;

    let mut packet_remaining: u8 = 0;
    let mut is_run_packet = false;
    // Largest supported pixel is 4 bytes (ARGB32); this buffer holds either
    // the raw pixel-in-file bytes or, after color-map translation, the
    // output pixel bytes - whichever is larger, which is always <= 4.
    let mut run_pixel = [0u8; 4];

    let mut offset = 0usize;

    for _ in 0..pixel_count {
        if packet_remaining == 0 {
            let mut opcode_buffer = [0u8; 1];

            source
                .read_exact(&mut opcode_buffer)
                .map_err(TgaError::FileCannotRead)?;

            let opcode = opcode_buffer[0];

            is_run_packet = opcode & 0x80 != 0;
            packet_remaining = (opcode & 0x7F) + 1;

            if is_run_packet {
                source
                    .read_exact(&mut run_pixel[..pixel_bytes])
                    .map_err(TgaError::FileCannotRead)?;

                if let Some(color_map) = color_map {
                    let entry = color_map.get(run_pixel[0] as u16)?;
                    run_pixel[..bytes_per_pixel].copy_from_slice(entry);
                }
            }
        }

        if is_run_packet {
            image.data_mut()[offset..offset + bytes_per_pixel]
                .copy_from_slice(&run_pixel[..bytes_per_pixel]);
        } else {
            let mut raw_pixel = [0u8; 4];

            source
                .read_exact(&mut raw_pixel[..pixel_bytes])
                .map_err(TgaError::FileCannotRead)?;

            if let Some(color_map) = color_map {
                let entry = color_map.get(raw_pixel[0] as u16)?;
                image.data_mut()[offset..offset + bytes_per_pixel].copy_from_slice(entry);
            } else {
                image.data_mut()[offset..offset + bytes_per_pixel]
                    .copy_from_slice(&raw_pixel[..bytes_per_pixel]);
            }
        }

        packet_remaining -= 1;
        offset += bytes_per_pixel;
    }

    Ok(())
}
