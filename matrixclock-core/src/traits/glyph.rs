//! Read-only glyph table trait

/// Highest character code the renderers will look up
pub const MAX_GLYPH_CODE: u8 = 127;

/// Read-only font storage
///
/// A glyph is `width` columns of 8-bit vertical pixel masks stored
/// contiguously starting at `offset` in the bitmap. A width of zero means
/// the character has no glyph.
pub trait GlyphStore {
    /// Glyph width in columns (0 = no glyph)
    fn width(&self, code: u8) -> u8;

    /// Offset of the glyph's first column in the bitmap
    fn offset(&self, code: u8) -> u16;

    /// Bitmap byte at `offset`
    fn bitmap(&self, offset: u16) -> u8;

    /// Width of a drawable glyph
    ///
    /// Codes above [`MAX_GLYPH_CODE`] are rejected and report zero.
    fn glyph_width(&self, code: u8) -> u8 {
        if code > MAX_GLYPH_CODE {
            0
        } else {
            self.width(code)
        }
    }
}

impl<G: GlyphStore + ?Sized> GlyphStore for &G {
    fn width(&self, code: u8) -> u8 {
        (**self).width(code)
    }

    fn offset(&self, code: u8) -> u16 {
        (**self).offset(code)
    }

    fn bitmap(&self, offset: u16) -> u8 {
        (**self).bitmap(offset)
    }
}
