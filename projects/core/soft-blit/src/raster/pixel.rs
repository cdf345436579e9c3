//! Fixed-width pixel storage.
//!
//! Rasterizer loops are written once over [`Pixel`] and instantiated for
//! 1, 2, 3 and 4 byte strides. Pixels are stored little endian; the 3 byte
//! variant keeps its bytes in an array since there is no native 24-bit integer.

/// A pixel occupying [`Pixel::BYTES`] consecutive bytes of a scanline.
pub trait Pixel: Copy + Eq + core::fmt::Debug {
    /// Bytes per pixel.
    const BYTES: usize;

    /// Reads the pixel at the start of `bytes`.
    fn load(bytes: &[u8]) -> Self;

    /// Writes the pixel to the start of `bytes`.
    fn store(self, bytes: &mut [u8]);

    /// The raw value, zero extended.
    fn to_bits(self) -> u32;

    /// Truncates a raw value to this pixel width.
    fn from_bits(bits: u32) -> Self;
}

/// 8bpp pixel, usually a palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P8(pub u8);

/// 16bpp pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P16(pub u16);

/// Packed 24bpp pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P24(pub [u8; 3]);

/// 32bpp pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct P32(pub u32);

impl Pixel for P8 {
    const BYTES: usize = 1;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        P8(bytes[0])
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[0] = self.0;
    }

    #[inline(always)]
    fn to_bits(self) -> u32 {
        self.0 as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        P8(bits as u8)
    }
}

impl Pixel for P16 {
    const BYTES: usize = 2;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        P16(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_le_bytes());
    }

    #[inline(always)]
    fn to_bits(self) -> u32 {
        self.0 as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        P16(bits as u16)
    }
}

impl Pixel for P24 {
    const BYTES: usize = 3;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        P24([bytes[0], bytes[1], bytes[2]])
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[..3].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn to_bits(self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], 0])
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        let [b0, b1, b2, _] = bits.to_le_bytes();
        P24([b0, b1, b2])
    }
}

impl Pixel for P32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        P32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.0.to_le_bytes());
    }

    #[inline(always)]
    fn to_bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        P32(bits)
    }
}

/// Reads a little endian value of 1 to 4 bytes.
#[inline(always)]
pub(crate) fn load_le(bytes: &[u8]) -> u32 {
    let mut raw = [0u8; 4];
    raw[..bytes.len()].copy_from_slice(bytes);
    u32::from_le_bytes(raw)
}

/// Writes the low `bytes.len()` bytes of `value`, little endian.
#[inline(always)]
pub(crate) fn store_le(value: u32, bytes: &mut [u8]) {
    let len = bytes.len();
    bytes.copy_from_slice(&value.to_le_bytes()[..len]);
}
