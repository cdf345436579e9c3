//! Block-compressed surface formats, identified by their four character code.

use derive_enum_all_values::AllValues;

/// `'DXT1'` as stored in a surface description.
pub const FOURCC_DXT1: u32 = u32::from_le_bytes(*b"DXT1");
/// `'DXT2'`, premultiplied-alpha variant of DXT3.
pub const FOURCC_DXT2: u32 = u32::from_le_bytes(*b"DXT2");
/// `'DXT3'`
pub const FOURCC_DXT3: u32 = u32::from_le_bytes(*b"DXT3");
/// `'DXT4'`, premultiplied-alpha variant of DXT5.
pub const FOURCC_DXT4: u32 = u32::from_le_bytes(*b"DXT4");
/// `'DXT5'`
pub const FOURCC_DXT5: u32 = u32::from_le_bytes(*b"DXT5");

/// The three block-compressed encodings the decoder understands.
///
/// Every format stores a 4x4 texel block in a fixed number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum CompressedFormat {
    /// BC1: 8 bytes per block, two RGB565 endpoints and 2-bit indices,
    /// with an optional 1-bit transparent colour.
    Dxt1,
    /// BC2: 16 bytes per block, explicit 4-bit alpha followed by a BC1 colour block.
    Dxt3,
    /// BC3: 16 bytes per block, interpolated 3-bit alpha followed by a BC1 colour block.
    Dxt5,
}

impl CompressedFormat {
    /// Width and height of a block, in texels.
    pub const BLOCK_DIMENSION: u32 = 4;

    /// Resolves a four character code. `DXT2` and `DXT4` decode like `DXT3` and `DXT5`.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_common::compressed_format::{CompressedFormat, FOURCC_DXT4};
    ///
    /// assert_eq!(CompressedFormat::from_fourcc(FOURCC_DXT4), Some(CompressedFormat::Dxt5));
    /// assert_eq!(CompressedFormat::from_fourcc(u32::from_le_bytes(*b"YUY2")), None);
    /// ```
    pub fn from_fourcc(fourcc: u32) -> Option<Self> {
        match fourcc {
            FOURCC_DXT1 => Some(Self::Dxt1),
            FOURCC_DXT2 | FOURCC_DXT3 => Some(Self::Dxt3),
            FOURCC_DXT4 | FOURCC_DXT5 => Some(Self::Dxt5),
            _ => None,
        }
    }

    /// The canonical four character code of this format.
    pub fn fourcc(&self) -> u32 {
        match self {
            Self::Dxt1 => FOURCC_DXT1,
            Self::Dxt3 => FOURCC_DXT3,
            Self::Dxt5 => FOURCC_DXT5,
        }
    }

    /// Number of bytes a single 4x4 block occupies.
    pub fn block_byte_count(&self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }

    /// Nominal bits per texel, used to fill in [`crate::pixel_format::PixelFormat::bits_per_pixel`].
    pub fn bits_per_texel(&self) -> u32 {
        (self.block_byte_count() * 8 / 16) as u32
    }

    /// Number of blocks needed to cover `texels` texels along one axis.
    #[inline]
    pub fn blocks_for(texels: u32) -> usize {
        texels.div_ceil(Self::BLOCK_DIMENSION) as usize
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;
    use crate::compressed_format::*;

    #[rstest]
    #[case(FOURCC_DXT1, CompressedFormat::Dxt1, 8)]
    #[case(FOURCC_DXT2, CompressedFormat::Dxt3, 16)]
    #[case(FOURCC_DXT3, CompressedFormat::Dxt3, 16)]
    #[case(FOURCC_DXT4, CompressedFormat::Dxt5, 16)]
    #[case(FOURCC_DXT5, CompressedFormat::Dxt5, 16)]
    fn resolves_fourcc(
        #[case] fourcc: u32,
        #[case] expected: CompressedFormat,
        #[case] block_bytes: usize,
    ) {
        let format = CompressedFormat::from_fourcc(fourcc).unwrap();
        assert_eq!(format, expected);
        assert_eq!(format.block_byte_count(), block_bytes);
    }

    #[test]
    fn canonical_fourcc_round_trips() {
        for format in CompressedFormat::all_values() {
            assert_eq!(CompressedFormat::from_fourcc(format.fourcc()), Some(*format));
        }
    }

    #[test]
    fn block_counts_round_up() {
        assert_eq!(CompressedFormat::blocks_for(0), 0);
        assert_eq!(CompressedFormat::blocks_for(1), 1);
        assert_eq!(CompressedFormat::blocks_for(4), 1);
        assert_eq!(CompressedFormat::blocks_for(5), 2);
    }
}
