//! Whole surface decoding into uncompressed RGB(A) layouts.

use crate::channel_layout::ChannelLayout;
use crate::error::DecodeError;
use crate::util::{decode_bc1_block_from_slice, decode_bc2_block_from_slice, decode_bc3_block_from_slice};
use likely_stable::likely;
use soft_blit_common::{
    compressed_format::CompressedFormat,
    decoded_4x4_block::Decoded4x4Block,
    pixel_format::{FormatKind, PixelFormat},
};

const BLOCK_DIMENSION: usize = CompressedFormat::BLOCK_DIMENSION as usize;

/// Decodes the block at the start of `src`.
///
/// # Errors
///
/// [`DecodeError::SourceTooSmall`] when `src` is shorter than one block of `format`.
#[inline]
pub fn decode_block(format: CompressedFormat, src: &[u8]) -> Result<Decoded4x4Block, DecodeError> {
    let decoded = match format {
        CompressedFormat::Dxt1 => decode_bc1_block_from_slice(src),
        CompressedFormat::Dxt3 => decode_bc2_block_from_slice(src),
        CompressedFormat::Dxt5 => decode_bc3_block_from_slice(src),
    };
    decoded.ok_or(DecodeError::SourceTooSmall {
        needed: format.block_byte_count(),
        actual: src.len(),
    })
}

/// Decodes a whole block-compressed surface into `dst`.
///
/// Each row of blocks in `src` starts `src_pitch` bytes after the previous one;
/// each destination scanline starts `dst_pitch` bytes after the previous one.
/// Texels are packed through the channel masks of `dst_format` and stored
/// little endian. Blocks on the right and bottom edges that extend past
/// `width` x `height` are decoded whole, but only their in-bounds texels are
/// written.
///
/// # Parameters
///
/// - `format`: Encoding of the source blocks
/// - `src`: The compressed surface
/// - `src_pitch`: Bytes between consecutive rows of blocks
/// - `width`, `height`: Surface size in texels
/// - `dst_format`: A 16, 24 or 32 bit RGB format
/// - `dst`: Destination pixels
/// - `dst_pitch`: Bytes between consecutive destination scanlines
///
/// # Errors
///
/// - [`DecodeError::UnsupportedDestination`] when `dst_format` is not a 16/24/32 bit RGB format
/// - [`DecodeError::PitchTooSmall`] when either pitch is shorter than one row
/// - [`DecodeError::SourceTooSmall`] / [`DecodeError::DestinationTooSmall`] for short buffers
#[allow(clippy::too_many_arguments)]
pub fn decode_surface(
    format: CompressedFormat,
    src: &[u8],
    src_pitch: usize,
    width: u32,
    height: u32,
    dst_format: &PixelFormat,
    dst: &mut [u8],
    dst_pitch: usize,
) -> Result<(), DecodeError> {
    let bytes_per_pixel = match (dst_format.kind, dst_format.bytes_per_pixel()) {
        (FormatKind::Rgb, Some(bpp @ 2..=4)) => bpp,
        _ => return Err(DecodeError::UnsupportedDestination(*dst_format)),
    };

    let src_format = PixelFormat::compressed(format);
    check_pitch(src_pitch, src_format.row_bytes(width))?;
    check_pitch(dst_pitch, dst_format.row_bytes(width))?;

    let src_needed = src_format
        .min_buffer_len(width, height, src_pitch)
        .ok_or(DecodeError::LayoutTooLarge { pitch: src_pitch })?;
    if src.len() < src_needed {
        return Err(DecodeError::SourceTooSmall {
            needed: src_needed,
            actual: src.len(),
        });
    }
    let dst_needed = dst_format
        .min_buffer_len(width, height, dst_pitch)
        .ok_or(DecodeError::LayoutTooLarge { pitch: dst_pitch })?;
    if dst.len() < dst_needed {
        return Err(DecodeError::DestinationTooSmall {
            needed: dst_needed,
            actual: dst.len(),
        });
    }

    let layout = ChannelLayout::from_format(dst_format);
    let block_bytes = format.block_byte_count();
    let (width, height) = (width as usize, height as usize);

    for block_y in 0..CompressedFormat::blocks_for(height as u32) {
        let block_row = &src[block_y * src_pitch..];
        let top = block_y * BLOCK_DIMENSION;
        let rows = BLOCK_DIMENSION.min(height - top);

        for block_x in 0..CompressedFormat::blocks_for(width as u32) {
            let block = decode_block(format, &block_row[block_x * block_bytes..])?;
            let left = block_x * BLOCK_DIMENSION;
            let columns = if likely(left + BLOCK_DIMENSION <= width) {
                BLOCK_DIMENSION
            } else {
                width - left
            };

            for y in 0..rows {
                let row_start = (top + y) * dst_pitch + left * bytes_per_pixel;
                let out = &mut dst[row_start..row_start + columns * bytes_per_pixel];
                for (x, pixel) in out.chunks_exact_mut(bytes_per_pixel).enumerate() {
                    let value = layout.pack(block.pixel(x, y)).to_le_bytes();
                    pixel.copy_from_slice(&value[..bytes_per_pixel]);
                }
            }
        }
    }

    Ok(())
}

#[inline]
fn check_pitch(pitch: usize, min_pitch: usize) -> Result<(), DecodeError> {
    if pitch < min_pitch {
        return Err(DecodeError::PitchTooSmall { pitch, min_pitch });
    }
    Ok(())
}
