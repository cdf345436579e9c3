/// Represents a single RGBA8888 pixel color, as produced by the block decoders
/// and by palette lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xAARRGGBB` value.
    #[inline]
    pub fn from_argb(pixel: u32) -> Self {
        Self {
            r: (pixel >> 16) as u8,
            g: (pixel >> 8) as u8,
            b: pixel as u8,
            a: (pixel >> 24) as u8,
        }
    }

    /// Packs into `0x00RRGGBB`, dropping alpha.
    #[inline]
    pub fn to_xrgb(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Returns a copy of this colour with the alpha channel cleared.
    #[inline]
    pub fn without_alpha(&self) -> Self {
        Self { a: 0, ..*self }
    }

    /// Returns the channel selected by `index` (0 = red, 1 = green, 2 = blue, 3 = alpha).
    #[inline]
    pub fn channel(&self, index: usize) -> u8 {
        match index {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => self.a,
        }
    }
}
