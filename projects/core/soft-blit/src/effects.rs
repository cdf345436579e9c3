//! Mirroring, rotation and colour keying.
//!
//! Effects are applied while writing: the destination rectangle is walked
//! from a remapped start corner with remapped row and column strides, so a
//! rotated or mirrored blit costs the same as a plain stretch. Every write is
//! gated by a [`KeyTest`].

use crate::error::BlitError;
use crate::raster::pixel::{Pixel, P16, P24, P32, P8};
use crate::raster::stretch::fixed_step;
use crate::request::BlitFlags;
use crate::surface::ColorKey;
use multiversion::multiversion;
use soft_blit_common::rect::Rect;

/// Colour key comparison applied before each destination write.
///
/// A sample is written when `sample & mask` lies outside `src_low..=src_high`
/// and the current destination value lies inside `dst_low..=dst_high`.
/// The disabled ranges (`src_low > src_high`, `dst_low..=u32::MAX`) let every
/// write through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTest {
    /// Bits of a sample that take part in the source comparison.
    pub mask: u32,
    /// Lowest transparent source value.
    pub src_low: u32,
    /// Highest transparent source value.
    pub src_high: u32,
    /// Lowest destination value that may be overwritten.
    pub dst_low: u32,
    /// Highest destination value that may be overwritten.
    pub dst_high: u32,
}

impl Default for KeyTest {
    fn default() -> Self {
        Self::PASS_ALL
    }
}

impl KeyTest {
    /// Lets every write through.
    pub const PASS_ALL: Self = Self {
        mask: u32::MAX,
        src_low: u32::MAX,
        src_high: 0,
        dst_low: 0,
        dst_high: u32::MAX,
    };

    /// Builds a test from the keys in use. `mask` is the colour key mask of
    /// the source format and only applies when a key is present.
    pub fn new(mask: u32, src_key: Option<ColorKey>, dst_key: Option<ColorKey>) -> Self {
        let mut test = Self::PASS_ALL;
        if src_key.is_none() && dst_key.is_none() {
            return test;
        }
        test.mask = mask;
        if let Some(key) = src_key {
            test.src_low = key.low;
            test.src_high = key.high;
        }
        if let Some(key) = dst_key {
            test.dst_low = key.low;
            test.dst_high = key.high;
        }
        test
    }

    /// `true` when `sample` may replace `current`.
    #[inline(always)]
    pub fn passes(&self, sample: u32, current: u32) -> bool {
        let keyed = sample & self.mask;
        (keyed < self.src_low || keyed > self.src_high)
            && current >= self.dst_low
            && current <= self.dst_high
    }

    /// The 24bpp variant of [`Self::passes`].
    ///
    /// The destination is masked and accepted when it is at or above
    /// `dst_low` or at or below `src_high`.
    #[inline(always)]
    pub fn passes_24(&self, sample: u32, current: u32) -> bool {
        let keyed = sample & self.mask;
        let current = current & self.mask;
        (keyed < self.src_low || keyed > self.src_high)
            && (current >= self.dst_low || current <= self.src_high)
    }
}

/// A corner of the destination footprint, relative to its top left pixel.
type Corner = (isize, isize);

/// How the destination rectangle is walked for a mirrored or rotated blit.
///
/// The source is read in raster order over a virtual `width` x `height`
/// grid; the destination write position starts at `start` and advances by
/// `x_step` per pixel and `y_step` per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FxTraversal {
    /// Byte offset of the first destination pixel written.
    pub start: usize,
    /// Byte step between pixels of a virtual row.
    pub x_step: isize,
    /// Byte step between virtual rows.
    pub y_step: isize,
    /// Pixels per virtual row.
    pub width: usize,
    /// Number of virtual rows.
    pub height: usize,
}

impl FxTraversal {
    /// Remaps the corners of `dst_rect` for the geometry in `flags`.
    ///
    /// The flags are applied in a fixed order: mirror left/right, mirror
    /// up/down, rotate 180, rotate 270, rotate 90. A quarter turn swaps the
    /// virtual width and height so the walk covers exactly the footprint of
    /// `dst_rect`, also when it is not square.
    pub fn new(flags: BlitFlags, dst_rect: &Rect, bytes_per_pixel: usize, pitch: usize) -> Self {
        let w = dst_rect.width() as isize;
        let h = dst_rect.height() as isize;

        let mut top_left: Corner = (0, 0);
        let mut top_right: Corner = (w - 1, 0);
        let mut bottom_left: Corner = (0, h - 1);
        let mut bottom_right: Corner = (w - 1, h - 1);
        let mut x_dir: Corner = (1, 0);
        let mut y_dir: Corner = (0, 1);

        if flags.contains(BlitFlags::MIRROR_LEFT_RIGHT) {
            core::mem::swap(&mut top_left, &mut top_right);
            core::mem::swap(&mut bottom_left, &mut bottom_right);
            x_dir = negate(x_dir);
        }
        if flags.contains(BlitFlags::MIRROR_UP_DOWN) {
            core::mem::swap(&mut top_left, &mut bottom_left);
            core::mem::swap(&mut top_right, &mut bottom_right);
            y_dir = negate(y_dir);
        }
        if flags.contains(BlitFlags::ROTATE_180) {
            core::mem::swap(&mut top_left, &mut bottom_right);
            core::mem::swap(&mut top_right, &mut bottom_left);
            x_dir = negate(x_dir);
            y_dir = negate(y_dir);
        }
        if flags.contains(BlitFlags::ROTATE_270) {
            let old_top_left = top_left;
            top_left = bottom_left;
            bottom_left = bottom_right;
            bottom_right = top_right;
            top_right = old_top_left;
            (x_dir, y_dir) = (negate(y_dir), x_dir);
        }
        if flags.contains(BlitFlags::ROTATE_90) {
            let old_top_left = top_left;
            top_left = top_right;
            top_right = bottom_right;
            bottom_right = bottom_left;
            bottom_left = old_top_left;
            (x_dir, y_dir) = (y_dir, negate(x_dir));
        }

        let (width, height) = if flags.transposes() { (h, w) } else { (w, h) };

        let bpp = bytes_per_pixel as isize;
        let pitch = pitch as isize;
        let to_bytes = |(dx, dy): Corner| dx * bpp + dy * pitch;
        let origin = dst_rect.top as isize * pitch + dst_rect.left as isize * bpp;

        Self {
            start: (origin + to_bytes(top_left)) as usize,
            x_step: to_bytes(x_dir),
            y_step: to_bytes(y_dir),
            width: width as usize,
            height: height as usize,
        }
    }

    /// Walks the destination without any geometry: left to right, top to bottom.
    pub fn identity(dst_rect: &Rect, bytes_per_pixel: usize, pitch: usize) -> Self {
        Self::new(BlitFlags::empty(), dst_rect, bytes_per_pixel, pitch)
    }
}

#[inline(always)]
fn negate((x, y): Corner) -> Corner {
    (-x, -y)
}

/// Resamples `src_rect` of `src` onto the destination walk described by
/// `traversal`, writing only the pixels accepted by `keys`.
pub fn copy_keyed_fx<P: Pixel>(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    traversal: &FxTraversal,
    keys: &KeyTest,
) {
    walk::<P>(src, src_pitch, src_rect, dst, traversal, |sample, current| {
        keys.passes(sample.to_bits(), current.to_bits())
    });
}

/// [`copy_keyed_fx`] for packed 24bpp pixels, keyed with [`KeyTest::passes_24`].
pub fn copy_keyed_fx_24(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    traversal: &FxTraversal,
    keys: &KeyTest,
) {
    walk::<P24>(src, src_pitch, src_rect, dst, traversal, |sample, current| {
        keys.passes_24(sample.to_bits(), current.to_bits())
    });
}

#[inline(always)]
fn walk<P: Pixel>(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    traversal: &FxTraversal,
    accept: impl Fn(P, P) -> bool,
) {
    let xinc = fixed_step(src_rect.width(), traversal.width as i64);
    let yinc = fixed_step(src_rect.height(), traversal.height as i64);
    let src_origin = src_rect.top as usize * src_pitch + src_rect.left as usize * P::BYTES;

    let mut row_start = traversal.start as isize;
    let mut sy = 0u64;
    for _ in 0..traversal.height {
        let src_row = src_origin + (sy >> 16) as usize * src_pitch;
        let mut d = row_start;
        let mut sx = 0u64;
        for _ in 0..traversal.width {
            let sample = P::load(&src[src_row + (sx >> 16) as usize * P::BYTES..]);
            let out = &mut dst[d as usize..];
            if accept(sample, P::load(out)) {
                sample.store(out);
            }
            d += traversal.x_step;
            sx += xinc;
        }
        row_start += traversal.y_step;
        sy += yinc;
    }
}

/// Runs [`copy_keyed_fx`] (or [`copy_keyed_fx_24`]) for a pixel of
/// `bytes_per_pixel` bytes.
///
/// # Errors
///
/// [`BlitError::UnsupportedBpp`] for depths other than 1 to 4 bytes.
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub fn copy_with_effects(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut [u8],
    traversal: &FxTraversal,
    keys: &KeyTest,
    bytes_per_pixel: usize,
) -> Result<(), BlitError> {
    match bytes_per_pixel {
        1 => copy_keyed_fx::<P8>(src, src_pitch, src_rect, dst, traversal, keys),
        2 => copy_keyed_fx::<P16>(src, src_pitch, src_rect, dst, traversal, keys),
        3 => copy_keyed_fx_24(src, src_pitch, src_rect, dst, traversal, keys),
        4 => copy_keyed_fx::<P32>(src, src_pitch, src_rect, dst, traversal, keys),
        other => return Err(BlitError::UnsupportedBpp(other as u32 * 8)),
    }
    Ok(())
}
