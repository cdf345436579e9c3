//! Caller supplied 256-entry palettes for 8bpp indexed surfaces.

use crate::color_8888::Color8888;

/// Number of entries in a palette.
pub const PALETTE_SIZE: usize = 256;

/// One palette slot, laid out like a Win32 `PALETTEENTRY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteEntry {
    /// Red intensity (0-255)
    pub red: u8,
    /// Green intensity (0-255)
    pub green: u8,
    /// Blue intensity (0-255)
    pub blue: u8,
    /// Entry flags; carried through untouched.
    pub flags: u8,
}

impl PaletteEntry {
    /// Creates an entry with no flags set.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            flags: 0,
        }
    }

    /// The entry as an opaque [`Color8888`].
    #[inline]
    pub fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red, self.green, self.blue, 255)
    }
}

/// A read-only palette of 256 entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [PaletteEntry; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: [PaletteEntry::default(); PALETTE_SIZE],
        }
    }
}

impl Palette {
    /// Builds a palette from up to 256 entries; missing entries are black.
    /// Entries past the 256th are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_common::palette::{Palette, PaletteEntry};
    ///
    /// let palette = Palette::from_entries(&[PaletteEntry::new(255, 0, 0)]);
    /// assert_eq!(palette.entry(0).red, 255);
    /// assert_eq!(palette.entry(1), PaletteEntry::default());
    /// ```
    pub fn from_entries(entries: &[PaletteEntry]) -> Self {
        let mut palette = Self::default();
        let count = entries.len().min(PALETTE_SIZE);
        palette.entries[..count].copy_from_slice(&entries[..count]);
        palette
    }

    /// Returns the entry for `index`.
    #[inline]
    pub fn entry(&self, index: u8) -> PaletteEntry {
        self.entries[index as usize]
    }

    /// All 256 entries.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry; PALETTE_SIZE] {
        &self.entries
    }

    /// Index of the entry closest to `color` by squared RGB distance.
    /// Ties resolve to the lowest index.
    pub fn nearest_index(&self, color: Color8888) -> u8 {
        let mut best = 0usize;
        let mut best_distance = u32::MAX;
        for (index, entry) in self.entries.iter().enumerate() {
            let dr = entry.red as i32 - color.r as i32;
            let dg = entry.green as i32 - color.g as i32;
            let db = entry.blue as i32 - color.b as i32;
            let distance = (dr * dr + dg * dg + db * db) as u32;
            if distance < best_distance {
                best = index;
                best_distance = distance;
                if distance == 0 {
                    break;
                }
            }
        }
        best as u8
    }
}
